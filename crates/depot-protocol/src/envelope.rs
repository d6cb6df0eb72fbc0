//! Response envelopes.
//!
//! Every failure, on any endpoint, serializes to the same shape:
//! `{"status": "error", "message": <string>}`. Success envelopes vary per
//! endpoint but always carry a `status` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// The uniform error envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.into(),
            message: message.into(),
        }
    }
}

/// Success envelope carrying a confirmation message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub status: String,
    pub message: String,
}

impl MessageBody {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            message: message.into(),
        }
    }
}

/// Success envelope for `extract`: the value found at the requested path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractBody {
    pub status: String,
    pub result: Value,
}

impl ExtractBody {
    pub fn success(result: Value) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            result,
        }
    }
}

/// Success envelope for a full document upsert, echoing the stored body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpsertBody {
    pub status: String,
    pub message: String,
    pub namespace: String,
    pub obj: String,
    pub object: Value,
}

impl UpsertBody {
    pub fn created(namespace: impl Into<String>, obj: impl Into<String>, object: Value) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            message: "created new object".into(),
            namespace: namespace.into(),
            obj: obj.into(),
            object,
        }
    }
}
