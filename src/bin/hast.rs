//! hast command line: parse HTML, print it back normalized or as a tree.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use hast::{Document, NodeId, NodeKind, ParseOptions, Processor, UnknownAttributes};

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Print the syntax tree instead of the serialized markup
    #[arg(long, action = ArgAction::SetTrue)]
    tree: bool,

    /// Drop unknown non-custom attributes instead of passing them through
    #[arg(long = "strict-attributes", action = ArgAction::SetTrue)]
    strict_attributes: bool,

    /// Keep character references in text and attribute values undecoded
    #[arg(long = "no-decode", action = ArgAction::SetTrue)]
    no_decode: bool,

    /// Input file (default: stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = read_source(cli.input.as_deref())?;

    let mut options = ParseOptions::DEFAULT.with_decode_entities(!cli.no_decode);
    if cli.strict_attributes {
        options = options.with_unknown_attributes(UnknownAttributes::CustomOnly);
    }
    let processor = Processor::new().with_options(options);

    let doc = processor.parse(&source).context("parsing input")?;
    let out = if cli.tree {
        let mut out = String::new();
        print_tree(&doc, doc.root(), 0, &mut out);
        out
    } else {
        let mut out = processor.stringify(&processor.run(doc)).context("rendering output")?;
        out.push('\n');
        out
    };

    io::stdout().write_all(out.as_bytes()).context("writing stdout")?;
    Ok(())
}

fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).with_context(|| path.display().to_string()),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn print_tree(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = doc.get(id) else { return };
    let label = match &node.kind {
        NodeKind::Element(element) => {
            let mut label = format!("<{}>", element.tag_name);
            for (key, value) in element.properties.iter() {
                label.push_str(&format!(" {key}={value:?}"));
            }
            label
        }
        NodeKind::Text(text) => format!("{:?}", text.value()),
        NodeKind::Comment(comment) => format!("<!--{}-->", comment.value()),
        NodeKind::CharacterData(data) => format!("<![CDATA[{}]]>", data.value()),
        NodeKind::Directive(directive) => format!("<{}>", directive.value),
        other => other.name().to_string(),
    };
    let position = node.position.map(|p| format!(" {p}")).unwrap_or_default();
    out.push_str(&format!("{:indent$}{label}{position}\n", "", indent = depth * 2));
    for &child in doc.children(id) {
        print_tree(doc, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_the_path() {
        let path = Path::new("does/not/exist.html");
        let err = read_source(Some(path)).unwrap_err();
        assert_eq!(err.to_string(), "does/not/exist.html");
        assert!(err.chain().nth(1).is_some_and(|cause| cause.is::<io::Error>()));
    }

    #[test]
    fn test_print_tree() {
        let doc = hast::parse("<p class=a>x</p>").unwrap();
        let mut out = String::new();
        print_tree(&doc, doc.root(), 0, &mut out);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "root");
        assert!(lines[1].starts_with("  <p> className="));
        assert!(lines[2].starts_with("    \"x\" 1:"));
    }
}
