use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use url::Url;

use crate::domain::entities::UserRecord;
use crate::domain::errors::ApiError;
use crate::domain::ports::{Notifier, SessionObserver};
use crate::frameworks::config;
use crate::interface_adapters::http::{decode_json, or_generic};
use crate::interface_adapters::notify::{LoggingObserver, TracingNotifier};
use crate::interface_adapters::protocol::{
    Envelope, ErrorBody, LoginData, LoginRequest, ProfilePatch, RefreshData, RegisterData,
    RegisterRequest,
};
use crate::interface_adapters::session::SessionStore;

// Auth calls deliberately bypass the shared pipeline: a 401 on login means
// bad credentials, not an expired session, and must not trigger the global
// teardown. No stored token is attached to register/login either. The
// account endpoints (me/profile/delete) do carry the token and tear the
// session down on 401 exactly like the pipeline, observer signal included.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    notifier: Arc<dyn Notifier>,
    observer: Arc<dyn SessionObserver>,
}

impl AuthClient {
    pub fn new(base_url: Url, session: SessionStore) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config::request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url,
            session,
            notifier: Arc::new(TracingNotifier),
            observer: Arc::new(LoggingObserver),
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserRecord, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/auth/register"))
            .json(&RegisterRequest {
                username,
                email,
                password,
                confirm_password,
            })
            .send()
            .await
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            let message = read_error_message(response).await;
            return Err(ApiError::RegistrationFailed(message));
        }

        let envelope: Envelope = decode_json(response).await?;
        if envelope.code != 201 {
            return Err(ApiError::RegistrationFailed(or_generic(envelope.message)));
        }

        let data: RegisterData =
            serde_json::from_value(envelope.data).map_err(ApiError::Decode)?;
        Ok(data.user)
    }

    // On success the token bundle is written to the store atomically and the
    // full payload is handed back to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(ApiError::Network)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Bad credentials never touch the stored session.
            return Err(ApiError::InvalidCredentials);
        }
        if !response.status().is_success() {
            let message = read_error_message(response).await;
            return Err(ApiError::LoginFailed(message));
        }

        let envelope: Envelope = decode_json(response).await?;
        if envelope.code != 200 {
            return Err(ApiError::LoginFailed(or_generic(envelope.message)));
        }

        let data: LoginData = serde_json::from_value(envelope.data).map_err(ApiError::Decode)?;
        let expires_at = self.session.now_epoch_millis() + data.tokens.expires_in * 1000;
        self.session.set_session(
            &data.tokens.access_token,
            &data.tokens.token_type,
            Some(expires_at),
        );

        Ok(data)
    }

    pub fn logout(&self) {
        self.session.clear();
        self.notifier.success("logged out");
    }

    // Exchange a refresh token for a fresh access token. The stored token is
    // rewritten in place; the known expiry instant is kept.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/auth/refresh"))
            .query(&[("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = read_error_message(response).await;
            return Err(ApiError::RequestFailed {
                status: Some(status),
                message,
            });
        }

        let envelope: Envelope = decode_json(response).await?;
        if envelope.code != 200 {
            return Err(ApiError::RequestFailed {
                status: None,
                message: or_generic(envelope.message),
            });
        }

        let data: RefreshData = serde_json::from_value(envelope.data).map_err(ApiError::Decode)?;
        self.session.set_session(
            &data.access_token,
            &data.token_type,
            self.session.expires_at(),
        );
        Ok(data.access_token)
    }

    // Fetch the account behind the stored token. A 401 here means the
    // session is gone; mirror the pipeline's teardown.
    pub async fn me(&self) -> Result<UserRecord, ApiError> {
        let envelope = self
            .send_authenticated(self.http.get(self.endpoint("/auth/me")))
            .await?;
        serde_json::from_value(envelope.data).map_err(ApiError::Decode)
    }

    // Partial update of the logged-in account; returns the updated record.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<UserRecord, ApiError> {
        let envelope = self
            .send_authenticated(self.http.put(self.endpoint("/auth/profile")).json(patch))
            .await?;
        serde_json::from_value(envelope.data).map_err(ApiError::Decode)
    }

    // Permanently delete the logged-in account. The stored session is gone
    // either way once the server confirms.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.send_authenticated(self.http.delete(self.endpoint("/auth/account")))
            .await?;
        self.session.clear();
        Ok(())
    }

    // Shared path for the token-bearing account endpoints: attaches the
    // stored credential and tears the session down on 401, observer
    // signal included, exactly like the pipeline does.
    async fn send_authenticated(
        &self,
        mut builder: reqwest::RequestBuilder,
    ) -> Result<Envelope, ApiError> {
        if let Some(header) = self.session.auth_header() {
            builder = builder.header(AUTHORIZATION, header);
        }
        let response = builder.send().await.map_err(ApiError::Network)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.notifier.error("unauthorized, please log in again");
            self.session.clear();
            self.observer.session_expired().await;
            return Err(ApiError::SessionExpired);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = read_error_message(response).await;
            return Err(ApiError::RequestFailed {
                status: Some(status),
                message,
            });
        }

        let envelope: Envelope = decode_json(response).await?;
        if envelope.code != 200 {
            return Err(ApiError::RequestFailed {
                status: None,
                message: or_generic(envelope.message),
            });
        }
        Ok(envelope)
    }

    pub fn is_token_valid(&self) -> bool {
        self.session.is_token_valid()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn auth_header(&self) -> Option<String> {
        self.session.auth_header()
    }
}

async fn read_error_message(response: reqwest::Response) -> String {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "request failed".to_string())
}
