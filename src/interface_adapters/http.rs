use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::domain::errors::ApiError;
use crate::domain::ports::{Notifier, SessionObserver};
use crate::frameworks::config;
use crate::interface_adapters::notify::{LoggingObserver, TracingNotifier};
use crate::interface_adapters::protocol::{Envelope, ErrorBody};
use crate::interface_adapters::session::SessionStore;

// Shared HTTP pipeline. Outbound: decorate requests with the stored
// credential. Inbound: unwrap the response envelope or classify the HTTP
// failure, notifying the user and tearing the session down on 401.
//
// Endpoints declare their response shape by choosing the `*_enveloped` or
// raw call path; the pipeline never sniffs bodies for an envelope.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    notifier: Arc<dyn Notifier>,
    observer: Arc<dyn SessionObserver>,
}

impl ApiClient {
    pub fn new(base_url: Url, session: SessionStore) -> Result<Self, reqwest::Error> {
        Self::with_hooks(
            base_url,
            session,
            Arc::new(TracingNotifier),
            Arc::new(LoggingObserver),
        )
    }

    pub fn with_hooks(
        base_url: Url,
        session: SessionStore,
        notifier: Arc<dyn Notifier>,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(config::request_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
            notifier,
            observer,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    // Outbound stage. Absence of a token is a no-op, never an error.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));
        if let Some(header) = self.session.auth_header() {
            builder = builder.header(AUTHORIZATION, header);
        }
        builder
    }

    pub async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).query(query);
        self.dispatch_enveloped(builder, 200).await
    }

    pub async fn post_enveloped<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        self.dispatch_enveloped(builder, 200).await
    }

    pub async fn put_enveloped<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path).json(body);
        self.dispatch_enveloped(builder, 200).await
    }

    pub async fn delete_enveloped(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path);
        // Delete payloads carry nothing the caller needs.
        let _: serde_json::Value = self.dispatch_enveloped(builder, 200).await?;
        Ok(())
    }

    pub async fn post_multipart_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        expect_code: i64,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).multipart(form);
        self.dispatch_enveloped(builder, expect_code).await
    }

    // Pass-through path for endpoints outside the envelope convention.
    pub async fn get_raw<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.send(builder).await?;
        decode_json(response).await
    }

    pub async fn get_raw_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let builder = self.request(Method::GET, path);
        let response = self.send(builder).await?;
        let bytes = response.bytes().await.map_err(ApiError::Network)?;
        Ok(bytes.to_vec())
    }

    async fn dispatch_enveloped<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        expect_code: i64,
    ) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        let envelope: Envelope = decode_json(response).await?;

        if envelope.code != expect_code {
            let message = or_generic(envelope.message);
            self.notifier.error(&message);
            return Err(ApiError::RequestFailed {
                status: None,
                message,
            });
        }

        serde_json::from_value(envelope.data).map_err(ApiError::Decode)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                // No response reached the client at all.
                self.notifier.error("network error, check your connection");
                return Err(ApiError::Network(err));
            }
        };

        if response.status().is_success() {
            return Ok(response);
        }
        Err(self.classify_http_error(response).await)
    }

    // Inbound error branch table. Every branch notifies and still fails the
    // call; 401 is the only branch that mutates state.
    async fn classify_http_error(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => {
                self.notifier.error("unauthorized, please log in again");
                self.session.clear();
                // Navigation is the observer's job, not the pipeline's.
                self.observer.session_expired().await;
                ApiError::SessionExpired
            }
            StatusCode::FORBIDDEN => {
                self.notifier.error("access denied");
                ApiError::RequestFailed {
                    status: Some(status.as_u16()),
                    message: "access denied".to_string(),
                }
            }
            StatusCode::NOT_FOUND => {
                self.notifier.error("resource not found");
                ApiError::RequestFailed {
                    status: Some(status.as_u16()),
                    message: "resource not found".to_string(),
                }
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                self.notifier.error("server error");
                ApiError::RequestFailed {
                    status: Some(status.as_u16()),
                    message: "server error".to_string(),
                }
            }
            _ => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .map(|body| body.message)
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| "request failed".to_string());
                self.notifier.error(&message);
                ApiError::RequestFailed {
                    status: Some(status.as_u16()),
                    message,
                }
            }
        }
    }
}

pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let text = response.text().await.map_err(ApiError::Network)?;
    serde_json::from_str(&text).map_err(ApiError::Decode)
}

pub(crate) fn or_generic(message: String) -> String {
    if message.is_empty() {
        "request failed".to_string()
    } else {
        message
    }
}
