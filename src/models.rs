use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// Lenient parse used for host input and imported documents.
    /// Unknown methods fall back to GET.
    pub fn parse_lenient(value: &str) -> HttpMethod {
        match value.trim().to_uppercase().as_str() {
            "POST" => HttpMethod::POST,
            "PUT" => HttpMethod::PUT,
            "PATCH" => HttpMethod::PATCH,
            "DELETE" => HttpMethod::DELETE,
            _ => HttpMethod::GET,
        }
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .map(HttpMethod::parse_lenient)
            .unwrap_or_default())
    }
}

/// Authentication attached to a request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Auth {
    #[default]
    None,
    Bearer {
        #[serde(default)]
        token: String,
    },
    Basic {
        #[serde(default)]
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
}

/// A request as the user composed it.
///
/// `headers` and `body` are kept as the raw text the user typed; they are
/// only parsed when the request is dispatched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub auth: Auth,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        RequestDescriptor {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }
}

/// History entry, one per dispatch attempt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in epoch milliseconds
    pub id: i64,
    #[serde(flatten)]
    pub request: RequestDescriptor,
    /// Local capture time, e.g. `14:03:27`
    pub timestamp: String,
}

/// A named request kept by the user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedRequest {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub request: RequestDescriptor,
    /// Local creation date, e.g. `2024-05-01`
    pub timestamp: String,
}

impl SavedRequest {
    /// Build a saved request with a fresh id stamped with today's date
    pub fn new(name: impl Into<String>, request: RequestDescriptor) -> Self {
        SavedRequest {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            request,
            timestamp: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Status of an outcome: a real HTTP status, or the error marker when no
/// response was ever received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeStatus {
    Http(u16),
    Error,
}

const ERROR_STATUS: &str = "Error";

impl OutcomeStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, OutcomeStatus::Error)
    }
}

impl Serialize for OutcomeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutcomeStatus::Http(code) => serializer.serialize_u16(*code),
            OutcomeStatus::Error => serializer.serialize_str(ERROR_STATUS),
        }
    }
}

impl<'de> Deserialize<'de> for OutcomeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(OutcomeStatus::Http(code)),
            Raw::Text(text) if text == ERROR_STATUS => Ok(OutcomeStatus::Error),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "unknown status marker: {}",
                text
            ))),
        }
    }
}

/// Result of one dispatch attempt, success or failure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub status_text: String,
    pub data: serde_json::Value,
    /// Elapsed milliseconds
    pub time: u64,
    pub content_type: Option<String>,
}

impl Outcome {
    /// Outcome for an attempt that never got a response
    pub fn failure(status_text: impl Into<String>, data: serde_json::Value, time: u64) -> Self {
        Outcome {
            status: OutcomeStatus::Error,
            status_text: status_text.into(),
            data,
            time,
            content_type: None,
        }
    }
}
