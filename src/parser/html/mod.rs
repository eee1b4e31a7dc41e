mod html_parser;
mod row;

pub use html_parser::{HtmlTableParser, TableRecord};
pub use row::Row;
