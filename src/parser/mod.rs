pub mod errors;
pub mod models;
pub mod parser_trait;
pub mod public_parser;
pub mod section_parser;
pub mod url_parser;
pub mod utils;

pub use errors::ParseError;
pub use parser_trait::Parser;
pub use public_parser::PublicMediaParser;
pub use section_parser::SectionParser;
pub use url_parser::UrlParser;
