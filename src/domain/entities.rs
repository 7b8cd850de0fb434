use serde::{Deserialize, Serialize};

// Client-held authentication record. An absent token means logged out,
// regardless of what the other fields hold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub token_type: String,
    // Absolute expiry in epoch milliseconds. Absent means never-expiring.
    pub expires_at: Option<u64>,
}

// Account record as returned by the auth endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    // Timestamps stay as the wire's ISO-8601 strings; the SDK does not
    // interpret them.
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_id: i64,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// Historical revision of a note.
#[derive(Clone, Debug, Deserialize)]
pub struct NoteVersion {
    pub id: i64,
    pub note_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub version_number: i64,
    #[serde(default)]
    pub change_description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub pages: u32,
}

// One page of the notes listing.
#[derive(Clone, Debug, Deserialize)]
pub struct NotePage {
    pub items: Vec<Note>,
    pub pagination: Pagination,
}

// Result bundle for keyword search.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchResults {
    pub query: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub total_results: u64,
    pub results: Vec<Note>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub filename: String,
    pub file_size: u64,
    pub file_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

// One page of the files listing.
#[derive(Clone, Debug, Deserialize)]
pub struct FilePage {
    pub items: Vec<FileRecord>,
    pub pagination: Pagination,
}
