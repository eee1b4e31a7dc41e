use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

use super::RecordParser;
use crate::http::Page;
use crate::{ScraperError, ScraperResult};

/// Reads a page whose body is a JSON array, one record per element.
///
/// A body that is not a JSON array is a structure error. An element that does
/// not deserialize into `R` is a field error for that row, naming the offending
/// key when there is one and `record` when the element as a whole is wrong.
pub struct JsonRecordParser<R> {
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonRecordParser<R> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<R> Default for JsonRecordParser<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DeserializeOwned + Send> RecordParser for JsonRecordParser<R> {
    type Record = R;

    fn parse_page(&self, page: &Page, page_index: u32) -> ScraperResult<Vec<R>> {
        let structure_error = |reason: String| ScraperError::ParseStructure {
            url: page.url.to_string(),
            reason,
        };

        let value: Value = serde_json::from_str(&page.body)
            .map_err(|e| structure_error(format!("invalid JSON: {e}")))?;
        let Value::Array(items) = value else {
            return Err(structure_error("expected a JSON array".to_string()));
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_path_to_error::deserialize::<_, R>(item).map_err(|e| {
                    let path = e.path().to_string();
                    let field = if path.is_empty() || path == "." {
                        "record".to_string()
                    } else {
                        path
                    };
                    ScraperError::FieldExtraction {
                        page: page_index,
                        row: i + 1,
                        field,
                        reason: e.into_inner().to_string(),
                    }
                })
            })
            .collect::<ScraperResult<Vec<R>>>()?;

        debug!("{}: {} JSON records", page.url, records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use url::Url;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Entry {
        name: String,
        score: u32,
    }

    fn page(body: &str) -> Page {
        Page::new(Url::parse("http://example.com/?ajax=true").unwrap(), 200, body)
    }

    #[test]
    fn test_array_elements_in_order() {
        let parser = JsonRecordParser::<Entry>::new();
        let entries = parser
            .parse_page(&page(r#"[{"name":"a","score":1},{"name":"b","score":2}]"#), 1)
            .unwrap();
        assert_eq!(
            entries,
            vec![
                Entry {
                    name: "a".to_string(),
                    score: 1
                },
                Entry {
                    name: "b".to_string(),
                    score: 2
                },
            ]
        );
    }

    #[test]
    fn test_empty_array_is_empty() {
        let parser = JsonRecordParser::<Entry>::new();
        assert!(parser.parse_page(&page("[]"), 1).unwrap().is_empty());
    }

    #[test]
    fn test_non_array_is_structure_error() {
        let parser = JsonRecordParser::<Entry>::new();
        for body in ["<html></html>", r#"{"name":"a"}"#, ""] {
            let err = parser.parse_page(&page(body), 1).unwrap_err();
            assert!(matches!(err, ScraperError::ParseStructure { .. }), "{body}");
        }
    }

    #[test]
    fn test_bad_element_is_field_error() {
        let parser = JsonRecordParser::<Entry>::new();
        let body = r#"[{"name":"a","score":1},{"name":"b","score":"high"}]"#;
        match parser.parse_page(&page(body), 1).unwrap_err() {
            ScraperError::FieldExtraction { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "score");
            }
            other => panic!("unexpected error: {other}"),
        }

        let body = r#"[{"name":"a","score":1,"extra":true}]"#;
        let err = parser.parse_page(&page(body), 1).unwrap_err();
        assert!(matches!(err, ScraperError::FieldExtraction { row: 1, .. }));

        let err = parser.parse_page(&page(r#"[["a", 1], 7]"#), 1).unwrap_err();
        assert!(matches!(
            err,
            ScraperError::FieldExtraction { row: 2, ref field, .. } if field == "record"
        ));
    }
}
