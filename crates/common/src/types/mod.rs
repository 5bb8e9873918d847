use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
    pub message: String,
    /// RFC 3339 / ISO-8601, millisecond precision, `Z` suffix.
    pub timestamp: String,
}

impl Health {
    pub fn ok_at(now: DateTime<Utc>) -> Self {
        Self {
            status: "ok".into(),
            message: "pong".into(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn ok() -> Self { Self::ok_at(Utc::now()) }
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Body returned after a successful delete.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageBody {
    pub message: String,
}
