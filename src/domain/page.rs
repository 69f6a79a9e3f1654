//! Paged list responses
//!
//! Depending on the backend version, list endpoints answer with a Spring
//! page envelope, a bare JSON array, or an object wrapping the list under
//! `data`. [`PageResponse`] accepts all three and [`Page`] is the single
//! shape handed to callers. The shape is chosen from the body's structure
//! first, so an item that fails to decode is reported as an error instead
//! of being read as some other shape.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Page envelope as produced by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

/// Any of the list shapes a paged endpoint may return
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse<T> {
    Paged(PageEnvelope<T>),
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<'de, T> Deserialize<'de> for PageResponse<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let body = Value::deserialize(deserializer)?;
        let response = match body {
            Value::Array(items) => {
                serde_json::from_value(Value::Array(items)).map(PageResponse::Bare)
            }
            Value::Object(mut fields) => {
                if fields.contains_key("content") {
                    serde_json::from_value(Value::Object(fields)).map(PageResponse::Paged)
                } else if let Some(data) = fields.remove("data") {
                    serde_json::from_value(data).map(|data| PageResponse::Wrapped { data })
                } else {
                    return Err(D::Error::custom(
                        "expected a page envelope, a list, or a `data` wrapper",
                    ));
                }
            }
            other => {
                return Err(D::Error::custom(format!(
                    "expected a list response, found {other}"
                )))
            }
        };
        response.map_err(D::Error::custom)
    }
}

/// Normalized page of items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// A single page holding every item
    pub fn single(items: Vec<T>) -> Self {
        let total_elements = items.len() as u64;
        Self {
            items,
            total_pages: 1,
            total_elements,
        }
    }
}

impl<T> From<PageResponse<T>> for Page<T> {
    fn from(response: PageResponse<T>) -> Self {
        match response {
            PageResponse::Paged(envelope) => Page {
                items: envelope.content,
                // A zero or missing page count still renders one page.
                total_pages: envelope.total_pages.filter(|p| *p > 0).unwrap_or(1),
                total_elements: envelope.total_elements.unwrap_or(0),
            },
            PageResponse::Bare(items) | PageResponse::Wrapped { data: items } => {
                Page::single(items)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn decode(body: Value) -> Page<Value> {
        serde_json::from_value::<PageResponse<Value>>(body)
            .unwrap()
            .into()
    }

    #[test]
    fn test_bare_array_is_single_page() {
        let page = decode(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_envelope_matches_bare_equivalent() {
        let paged = decode(json!({
            "content": [{"id": 1}, {"id": 2}],
            "totalPages": 1,
            "totalElements": 2
        }));
        let bare = decode(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(paged, bare);
    }

    #[test]
    fn test_envelope_keeps_server_totals() {
        let page = decode(json!({
            "content": [{"id": 26}],
            "totalPages": 4,
            "totalElements": 76,
            "number": 3
        }));
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_elements, 76);
    }

    #[test]
    fn test_envelope_with_zero_pages() {
        let page = decode(json!({"content": [], "totalPages": 0, "totalElements": 0}));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn test_data_wrapper() {
        let page = decode(json!({"data": [{"id": 5}]}));
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_unrecognized_shapes_are_rejected() {
        assert!(serde_json::from_value::<PageResponse<Value>>(json!({})).is_err());
        assert!(serde_json::from_value::<PageResponse<Value>>(json!({"items": []})).is_err());
        assert!(serde_json::from_value::<PageResponse<Value>>(json!("nope")).is_err());
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: u32,
    }

    #[test]
    fn test_bad_item_in_envelope_is_an_error() {
        let result = serde_json::from_value::<PageResponse<Item>>(json!({
            "content": [{"id": 1}, {"id": "two"}],
            "totalPages": 3,
            "totalElements": 52
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid type"), "{err}");
    }

    #[test]
    fn test_bad_item_in_bare_or_wrapped_list_is_an_error() {
        assert!(serde_json::from_value::<PageResponse<Item>>(json!([{"id": "x"}])).is_err());
        assert!(
            serde_json::from_value::<PageResponse<Item>>(json!({"data": [{"id": "x"}]})).is_err()
        );
    }

    #[test]
    fn test_typed_envelope_decodes_every_item() {
        let page: Page<Item> = serde_json::from_value::<PageResponse<Item>>(json!({
            "content": [{"id": 1}, {"id": 2}],
            "totalPages": 3,
            "totalElements": 52
        }))
        .unwrap()
        .into();
        assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 52);
    }
}
