//! Commands - messages from the editor host to the session

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{Auth, HttpMethod, RequestDescriptor};

/// Inbound commands, tagged by `"command"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// Dispatch the composed request
    SendRequest(SendRequestPayload),
    LoadHistory,
    ClearHistory,
    SaveRequest {
        name: String,
        req: RequestDescriptor,
    },
    GetSavedRequests,
    DeleteSavedRequest {
        id: String,
    },
    /// Export to a destination the host already picked
    ExportSaved {
        path: PathBuf,
    },
    /// Import from a source the host already picked
    ImportSaved {
        path: PathBuf,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SendRequest(_) => "sendRequest",
            Command::LoadHistory => "loadHistory",
            Command::ClearHistory => "clearHistory",
            Command::SaveRequest { .. } => "saveRequest",
            Command::GetSavedRequests => "getSavedRequests",
            Command::DeleteSavedRequest { .. } => "deleteSavedRequest",
            Command::ExportSaved { .. } => "exportSaved",
            Command::ImportSaved { .. } => "importSaved",
        }
    }
}

/// Request form fields as the host sends them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestPayload {
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: String,
    #[serde(default)]
    pub body: String,
    /// `none`, `bearer` or `basic`
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl SendRequestPayload {
    /// Fold the flat auth fields into a descriptor
    pub fn into_descriptor(self) -> RequestDescriptor {
        let auth = match self.auth_type.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("bearer") => Auth::Bearer {
                token: self.token.unwrap_or_default(),
            },
            Some("basic") => Auth::Basic {
                username: self.username.unwrap_or_default(),
                password: self.password,
            },
            _ => Auth::None,
        };

        RequestDescriptor {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            auth,
        }
    }
}
