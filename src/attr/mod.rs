//! Attribute model and codec.
//!
//! # Key Features
//!
//! - Static [`registry`] of known attributes with value kinds
//! - Typed [`PropertyValue`]s in an ordered [`Properties`] map
//! - [`AttributeParser`] (markup -> typed) and [`compile_properties`]
//!   (typed -> markup)
//!
//! # Example
//!
//! ```
//! use hast::attr::{compile_properties, AttributeParser, PropertyValue};
//!
//! let props = AttributeParser::default().parse([("class", "a  b"), ("disabled", "")]);
//! assert_eq!(props.get("className"), Some(&PropertyValue::from(vec!["a", "b"])));
//! assert_eq!(compile_properties(&props), r#"class="a b" disabled"#);
//! ```

mod case;
mod compile;
mod parse;
pub mod registry;
mod value;

pub use case::{camel_case, param_case};
pub use compile::{compile_properties, compile_property, compile_style, format_number};
pub use parse::{
    AttributeParser, UnknownAttributes, parse_number, parse_style, parse_value, split_commas,
    split_spaces,
};
pub use registry::{AttributeInfo, ValueKind};
pub use value::{Properties, PropertyValue, Style};
