use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    Html,
    Json,
    Text,
    Binary,
}

impl ResponseType {
    pub fn detect(headers: &HashMap<String, String>, body: &str) -> Self {
        if let Some(content_type) = headers.get("content-type") {
            let content_type = content_type.to_ascii_lowercase();
            if content_type.contains("text/html") {
                ResponseType::Html
            } else if content_type.contains("application/json") {
                ResponseType::Json
            } else if content_type.contains("text/") {
                ResponseType::Text
            } else {
                ResponseType::Binary
            }
        } else {
            let start = body.trim_start();
            if start.starts_with('{') || start.starts_with('[') {
                ResponseType::Json
            } else if start.starts_with("<!DOCTYPE")
                || start.starts_with("<!doctype")
                || start.starts_with("<html")
            {
                ResponseType::Html
            } else {
                ResponseType::Text
            }
        }
    }
}

/// A successfully retrieved page body.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub response_type: ResponseType,
    pub timestamp: DateTime<Utc>,
}

impl Page {
    pub fn new(url: Url, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let headers = HashMap::new();
        let response_type = ResponseType::detect(&headers, &body);
        Self {
            url,
            status,
            headers,
            body,
            response_type,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_header() {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            "text/html; charset=utf-8".to_string(),
        );
        assert_eq!(ResponseType::detect(&headers, "{}"), ResponseType::Html);

        headers.insert("content-type".to_string(), "application/json".to_string());
        assert_eq!(ResponseType::detect(&headers, ""), ResponseType::Json);

        headers.insert("content-type".to_string(), "image/png".to_string());
        assert_eq!(ResponseType::detect(&headers, ""), ResponseType::Binary);
    }

    #[test]
    fn test_detect_from_body() {
        let headers = HashMap::new();
        assert_eq!(
            ResponseType::detect(&headers, "  [{\"title\": \"x\"}]"),
            ResponseType::Json
        );
        assert_eq!(
            ResponseType::detect(&headers, "<!DOCTYPE html><html></html>"),
            ResponseType::Html
        );
        assert_eq!(ResponseType::detect(&headers, "plain"), ResponseType::Text);
    }
}
