use crate::domain::entities::{Note, NotePage, NoteVersion, SearchResults};
use crate::domain::errors::ApiError;
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::{NoteDraft, NotePatch, NoteQuery, TagUpdate};

// Notes API. Every endpoint here follows the envelope convention with
// success code 200.
#[derive(Clone)]
pub struct NotesClient {
    api: ApiClient,
}

impl NotesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &NoteQuery) -> Result<NotePage, ApiError> {
        self.api.get_enveloped("/notes", &query.to_params()).await
    }

    pub async fn get(&self, note_id: i64) -> Result<Note, ApiError> {
        self.api
            .get_enveloped(&format!("/notes/{note_id}"), &[])
            .await
    }

    pub async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        self.api.post_enveloped("/notes", draft).await
    }

    pub async fn update(&self, note_id: i64, patch: &NotePatch) -> Result<Note, ApiError> {
        self.api
            .put_enveloped(&format!("/notes/{note_id}"), patch)
            .await
    }

    pub async fn update_tags(&self, note_id: i64, tags: Vec<String>) -> Result<Note, ApiError> {
        self.api
            .post_enveloped(&format!("/notes/{note_id}/tags"), &TagUpdate { tags })
            .await
    }

    pub async fn delete(&self, note_id: i64) -> Result<(), ApiError> {
        self.api.delete_enveloped(&format!("/notes/{note_id}")).await
    }

    pub async fn search(
        &self,
        keyword: &str,
        tags: &[String],
        limit: Option<u32>,
    ) -> Result<SearchResults, ApiError> {
        let mut params = vec![("q".to_string(), keyword.to_string())];
        for tag in tags {
            params.push(("tags".to_string(), tag.clone()));
        }
        if let Some(limit) = limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        self.api.get_enveloped("/notes/search", &params).await
    }

    pub async fn versions(&self, note_id: i64) -> Result<Vec<NoteVersion>, ApiError> {
        self.api
            .get_enveloped(&format!("/notes/{note_id}/versions"), &[])
            .await
    }

    pub async fn version(
        &self,
        note_id: i64,
        version_number: i64,
    ) -> Result<NoteVersion, ApiError> {
        self.api
            .get_enveloped(&format!("/notes/{note_id}/versions/{version_number}"), &[])
            .await
    }

    // Restoring creates a new version on the server; the restored note comes
    // back as the payload.
    pub async fn restore_version(
        &self,
        note_id: i64,
        version_number: i64,
    ) -> Result<Note, ApiError> {
        self.api
            .post_enveloped(
                &format!("/notes/{note_id}/versions/{version_number}/restore"),
                &serde_json::json!({}),
            )
            .await
    }

    pub async fn all_tags(&self) -> Result<Vec<String>, ApiError> {
        self.api.get_enveloped("/notes/tags/all", &[]).await
    }
}
