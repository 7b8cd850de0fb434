use reqwest::multipart::{Form, Part};

use crate::domain::entities::{FilePage, FileRecord};
use crate::domain::errors::ApiError;
use crate::interface_adapters::http::ApiClient;
use crate::interface_adapters::protocol::FilePatch;

// Files API. Metadata endpoints follow the envelope convention; download is
// a raw byte stream outside it.
#[derive(Clone)]
pub struct FilesClient {
    api: ApiClient,
}

impl FilesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<FileRecord, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|_| ApiError::RequestFailed {
                status: None,
                message: format!("invalid content type: {content_type}"),
            })?;
        let form = Form::new().part("file", part);
        // Upload mirrors registration: creation is envelope code 201.
        self.api
            .post_multipart_enveloped("/files/upload", form, 201)
            .await
    }

    pub async fn list(&self, page: Option<u32>, size: Option<u32>) -> Result<FilePage, ApiError> {
        self.api.get_enveloped("/files", &page_params(page, size)).await
    }

    pub async fn list_public(
        &self,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<FilePage, ApiError> {
        self.api
            .get_enveloped("/files/public", &page_params(page, size))
            .await
    }

    pub async fn detail(&self, file_id: i64) -> Result<FileRecord, ApiError> {
        self.api
            .get_enveloped(&format!("/files/{file_id}"), &[])
            .await
    }

    pub async fn update(&self, file_id: i64, patch: &FilePatch) -> Result<FileRecord, ApiError> {
        self.api
            .put_enveloped(&format!("/files/{file_id}"), patch)
            .await
    }

    pub async fn delete(&self, file_id: i64) -> Result<(), ApiError> {
        self.api.delete_enveloped(&format!("/files/{file_id}")).await
    }

    pub async fn download(&self, file_id: i64) -> Result<Vec<u8>, ApiError> {
        self.api
            .get_raw_bytes(&format!("/files/download/{file_id}"))
            .await
    }
}

fn page_params(page: Option<u32>, size: Option<u32>) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(page) = page {
        params.push(("page".to_string(), page.to_string()));
    }
    if let Some(size) = size {
        params.push(("size".to_string(), size.to_string()));
    }
    params
}
