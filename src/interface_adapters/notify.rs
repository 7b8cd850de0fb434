use async_trait::async_trait;

use crate::domain::ports::{Notifier, SessionObserver};

// Default notifier: surfaces pipeline messages through tracing. Hosts with a
// UI supply their own adapter to show toasts instead.
#[derive(Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(%message, "api notification");
    }

    fn success(&self, message: &str) {
        tracing::info!(%message, "api notification");
    }
}

// Default observer: records session expiry in the log. Hosts wire navigation
// to the login view here.
#[derive(Clone, Copy, Default)]
pub struct LoggingObserver;

#[async_trait]
impl SessionObserver for LoggingObserver {
    async fn session_expired(&self) {
        tracing::warn!("session expired, re-authentication required");
    }
}
