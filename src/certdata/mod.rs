//! Reading the certdata database and the operator blacklist

pub mod blacklist;
pub mod parser;

pub use blacklist::Blacklist;
pub use parser::{parse_reader, parse_str, Parser, ParserState};
