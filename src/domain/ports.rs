use async_trait::async_trait;

// Port for the key/value medium that persists the session between runs.
// Adapters are expected to be cheap; values are short opaque strings.
pub trait SessionBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;
}

// Port for user-visible notifications emitted by the request pipeline.
// Callers still receive the error; this only covers the toast-style surface.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

// Port signaled when a 401 invalidates the session. Navigation to the login
// view is the host application's job, not the pipeline's.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn session_expired(&self);
}
