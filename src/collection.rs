//! Collection interchange - export saved requests to, and import them from,
//! a Postman v2.1 style collection document

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{APP_NAME, COLLECTION_SCHEMA, DEFAULT_IMPORT_NAME};
use crate::error::{PhotonError, Result};
use crate::models::{Auth, HttpMethod, RequestDescriptor, SavedRequest};

/// Exported collection document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionDocument {
    pub info: CollectionInfo,
    pub item: Vec<CollectionItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub schema: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub name: String,
    pub request: CollectionRequest,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionRequest {
    pub method: HttpMethod,
    pub url: CollectionUrl,
    pub header: Vec<HeaderPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<CollectionBody>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionUrl {
    pub raw: String,
}

/// Header as a key/value pair
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaderPair {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionBody {
    pub mode: String,
    pub raw: String,
}

/// Build the export document for the saved requests, titled with `date`
pub fn export_collection(saved: &[SavedRequest], date: NaiveDate) -> CollectionDocument {
    CollectionDocument {
        info: CollectionInfo {
            name: format!("{} Collection {}", APP_NAME, date.format("%Y-%m-%d")),
            schema: COLLECTION_SCHEMA.to_string(),
        },
        item: saved.iter().map(export_item).collect(),
    }
}

fn export_item(saved: &SavedRequest) -> CollectionItem {
    let request = &saved.request;
    let body = if request.body.is_empty() {
        None
    } else {
        Some(CollectionBody {
            mode: "raw".to_string(),
            raw: request.body.clone(),
        })
    };

    CollectionItem {
        name: saved.name.clone(),
        request: CollectionRequest {
            method: request.method,
            url: CollectionUrl {
                raw: request.url.clone(),
            },
            header: header_pairs(&request.headers),
            body,
        },
    }
}

/// Header text as key/value pairs in the order they were typed; empty when
/// the text is not a JSON object. `null` values are left out, as on dispatch.
fn header_pairs(text: &str) -> Vec<HeaderPair> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => object
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some(HeaderPair { key, value })
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse a collection document into fresh saved requests.
///
/// The whole document is rejected when it is not a JSON object or its `item`
/// is not a list. Items without a `request` are skipped.
pub fn import_collection(text: &str) -> Result<Vec<SavedRequest>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| PhotonError::InvalidCollection(e.to_string()))?;

    let Some(root) = document.as_object() else {
        return Err(PhotonError::InvalidCollection(
            "document is not an object".to_string(),
        ));
    };

    let items = match root.get("item") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(PhotonError::InvalidCollection(
                "`item` is not a list".to_string(),
            ))
        }
    };

    Ok(items.iter().filter_map(import_item).collect())
}

fn import_item(item: &Value) -> Option<SavedRequest> {
    let request = item.get("request")?;

    let name = item
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_IMPORT_NAME);

    let method = request
        .get("method")
        .and_then(|v| v.as_str())
        .map(HttpMethod::parse_lenient)
        .unwrap_or_default();

    let url = match request.get("url") {
        Some(Value::String(url)) => url.clone(),
        Some(url) => url
            .get("raw")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        None => String::new(),
    };

    let headers = request
        .get("header")
        .and_then(|h| h.as_array())
        .map(|pairs| headers_text(pairs))
        .unwrap_or_default();

    let body = request
        .get("body")
        .and_then(|b| b.get("raw"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Some(SavedRequest::new(
        name,
        RequestDescriptor {
            method,
            url,
            headers,
            body,
            auth: Auth::None,
        },
    ))
}

/// Fold header pairs into one JSON object (later keys win) and serialize it.
/// No pairs means no header text.
fn headers_text(pairs: &[Value]) -> String {
    let mut object = Map::new();
    for pair in pairs {
        if let Some(key) = pair.get("key").and_then(|k| k.as_str()) {
            let value = match pair.get("value") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            object.insert(key.to_string(), Value::String(value));
        }
    }

    if object.is_empty() {
        return String::new();
    }
    serde_json::to_string_pretty(&Value::Object(object)).unwrap_or_default()
}

/// Write a collection document to `path` as pretty JSON
pub fn write_collection(path: &Path, document: &CollectionDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content)?;
    Ok(())
}

/// Read and parse a collection document from `path`
pub fn read_collection(path: &Path) -> Result<Vec<SavedRequest>> {
    let content = fs::read_to_string(path)?;
    import_collection(&content)
}
