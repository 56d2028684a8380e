// Box markup: data model and parser.
// The parser is the only producer of `ContentBox`; the renderer is the only consumer.

pub mod model;
pub mod parser;

pub use model::{ContentBox, ContentLine, SizeClass};
pub use parser::{parse, ParseError};
