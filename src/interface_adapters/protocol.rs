use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::UserRecord;

// Wire envelope wrapping MindLink responses: `code` is the application-level
// status, `data` the payload, `message` the human-readable reason on failure.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: String,
}

// Body shape accompanying non-2xx HTTP statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// Token bundle nested under login `data.tokens`. `expires_in` is seconds
// from now; the store converts it to an absolute epoch-millisecond instant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenBundle {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub user: UserRecord,
    pub tokens: TokenBundle,
}

#[derive(Debug, Deserialize)]
pub struct RegisterData {
    pub user: UserRecord,
    #[serde(default)]
    pub message: String,
}

// Payload of a successful token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshData {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

// Partial account update for PUT /auth/profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TagUpdate {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

// Listing filters for GET /notes.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub tags: Vec<String>,
    pub search: Option<String>,
}

impl NoteQuery {
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size".to_string(), size.to_string()));
        }
        for tag in &self.tags {
            params.push(("tags".to_string(), tag.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        params
    }
}
