use jiff::Timestamp;
use qrlink_core::LinkStats;
use serde::{Deserialize, Serialize};

// Request fields are optional so that a missing field is reported as a
// 400 with our own message instead of a deserialization rejection.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlRequest {
    pub target_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_url: String,
    pub qr_code_data_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlRequest {
    pub short_code: Option<String>,
    pub new_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateUrlResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub short_code: String,
    pub target_url: String,
    pub clicks: u64,
    #[serde(rename = "created_at")]
    pub created_at: Timestamp,
    #[serde(rename = "updated_at")]
    pub updated_at: Timestamp,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            short_code: stats.short_code.into(),
            target_url: stats.target_url,
            clicks: stats.clicks,
            created_at: stats.created_at,
            updated_at: stats.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
