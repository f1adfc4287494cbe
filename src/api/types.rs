use serde::{Deserialize, Serialize};

use crate::models::anime::Anime;

/// Incoming Anime JSON. Both fields may be null or missing on the wire;
/// single-item endpoints validate `name` before use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimeBody {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl AnimeBody {
    /// Converts without validation. A null name becomes empty.
    #[must_use]
    pub fn into_anime_unchecked(self) -> Anime {
        Anime {
            id: self.id,
            name: self.name.unwrap_or_default(),
        }
    }
}

/// Uniform JSON error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
    pub timestamp: String,
    pub path: String,
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
