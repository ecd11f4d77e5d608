//! Tokenizer: source text -> stream of [`Token`]s.
//!
//! The tree builder only depends on the [`Event`] vocabulary and the
//! offsets carried by each [`Token`], so any driver producing the same
//! stream can feed it.

mod token;
mod tokenizer;

pub use token::{Event, Token};
pub use tokenizer::Tokenizer;
