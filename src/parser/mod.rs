//! Document loading module.

mod json_parser;
mod options;

pub use json_parser::{plain_text_document, DocumentParser};
pub use options::{ErrorMode, ParseOptions};
