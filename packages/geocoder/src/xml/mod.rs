//! Streaming XML handling for service responses.

pub mod parser;
pub mod stack;

pub use parser::{parse, ParseState, ResponseParser, TextNode};
pub use stack::ElementStack;
