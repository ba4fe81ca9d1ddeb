//! Request normalizer - turns raw user fields into a well-formed outbound request

use std::collections::BTreeMap;

use base64::Engine;
use serde_json::Value;

use crate::error::{PhotonError, Result};
use crate::models::{Auth, HttpMethod, RequestDescriptor};

const AUTHORIZATION: &str = "Authorization";

/// Body ready to be put on the wire
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Raw(String),
}

/// Outbound request produced from a [`RequestDescriptor`]
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
    pub auth_header_injected: bool,
}

/// Normalize a descriptor for dispatch.
///
/// Fails only when the header text is not a JSON object.
pub fn normalize(request: &RequestDescriptor) -> Result<NormalizedRequest> {
    let mut headers = parse_headers(&request.headers)?;

    let auth_header_injected = match auth_header(&request.auth) {
        Some(value) => {
            headers.retain(|key, _| !key.eq_ignore_ascii_case(AUTHORIZATION));
            headers.insert(AUTHORIZATION.to_string(), value);
            true
        }
        None => false,
    };

    Ok(NormalizedRequest {
        method: request.method,
        url: normalize_url(&request.url),
        headers,
        body: coerce_body(request.method, &request.body),
        auth_header_injected,
    })
}

/// Trim the URL and default its scheme to `http://`
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

/// Parse header text as a JSON object of header names to values.
///
/// Empty text means no headers. `null` values are dropped and non-string
/// values are sent as their JSON text.
pub fn parse_headers(text: &str) -> Result<BTreeMap<String, String>> {
    let mut headers = BTreeMap::new();
    if text.trim().is_empty() {
        return Ok(headers);
    }

    let object = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => object,
        _ => return Err(PhotonError::InvalidHeaders),
    };

    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::String(s) => {
                headers.insert(key, s);
            }
            other => {
                headers.insert(key, other.to_string());
            }
        }
    }
    Ok(headers)
}

/// Authorization header value for the given auth, if its credentials are present
pub fn auth_header(auth: &Auth) -> Option<String> {
    match auth {
        Auth::Basic { username, password } if !username.is_empty() => {
            let credentials = format!("{}:{}", username, password.as_deref().unwrap_or(""));
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            Some(format!("Basic {}", encoded))
        }
        Auth::Bearer { token } if !token.is_empty() => Some(format!("Bearer {}", token)),
        _ => None,
    }
}

/// JSON when the body parses, the raw text otherwise. GET never carries a body.
pub fn coerce_body(method: HttpMethod, body: &str) -> Option<RequestBody> {
    if method == HttpMethod::GET || body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Some(RequestBody::Json(value)),
        Err(_) => Some(RequestBody::Raw(body.to_string())),
    }
}
