pub mod base;
pub mod html;
pub mod json;

pub use base::RecordParser;
pub use html::{HtmlTableParser, Row, TableRecord};
pub use json::JsonRecordParser;
