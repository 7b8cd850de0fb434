use std::{env, path::PathBuf, time::Duration};

use url::Url;

// Runtime configuration, environment-driven with local defaults.

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SESSION_FILE: &str = ".mindlink_session.json";

// Load a local .env file if one exists.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}

pub fn api_base_url() -> Url {
    let raw = env::var("MINDLINK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    match Url::parse(&raw) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(%raw, %err, "invalid MINDLINK_API_URL, using default");
            Url::parse(DEFAULT_API_URL).expect("default base url parses")
        }
    }
}

pub fn request_timeout() -> Duration {
    let millis = env::var("MINDLINK_REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
    Duration::from_millis(millis)
}

// Where the durable session backend keeps its key/value file.
pub fn session_file() -> PathBuf {
    env::var("MINDLINK_SESSION_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE))
}
