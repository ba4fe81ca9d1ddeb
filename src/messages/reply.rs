//! Replies - messages from the session back to the editor host

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{HistoryEntry, Outcome, SavedRequest};

/// Outbound replies, tagged by `"command"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Reply {
    /// Outcome of a `sendRequest`, with the history as it stands afterwards
    Response {
        #[serde(flatten)]
        outcome: Outcome,
        history: Vec<HistoryEntry>,
    },
    HistoryData {
        history: Vec<HistoryEntry>,
    },
    SavedRequestsData {
        saved: Vec<SavedRequest>,
    },
    Exported {
        path: PathBuf,
        count: usize,
    },
    Error {
        message: String,
    },
}

impl Reply {
    pub fn error(message: impl Into<String>) -> Self {
        Reply::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutcomeStatus;
    use serde_json::json;

    #[test]
    fn test_response_reply_is_flat() {
        let reply = Reply::Response {
            outcome: Outcome {
                status: OutcomeStatus::Http(201),
                status_text: "Created".into(),
                data: json!({"id": 7}),
                time: 12,
                content_type: Some("application/json".into()),
            },
            history: Vec::new(),
        };

        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "command": "response",
                "status": 201,
                "statusText": "Created",
                "data": {"id": 7},
                "time": 12,
                "contentType": "application/json",
                "history": []
            })
        );
    }

    #[test]
    fn test_history_data_tag() {
        let value = serde_json::to_value(Reply::HistoryData { history: vec![] }).unwrap();
        assert_eq!(value, json!({"command": "historyData", "history": []}));
    }
}
