use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::entities::Session;
use crate::domain::ports::{Clock, SessionBackend};

// Storage keys. The three are always written and cleared together; partial
// sessions never exist.
const TOKEN_KEY: &str = "access_token";
const TOKEN_TYPE_KEY: &str = "token_type";
const EXPIRES_AT_KEY: &str = "expires_at";

const DEFAULT_TOKEN_TYPE: &str = "bearer";

// Sole owner of the client-side session. All other components go through
// these accessors; nothing reads the backend directly.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    // Ephemeral store for tests and short-lived tools.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBackend::default()), Arc::new(SystemClock))
    }

    // Durable store backed by a JSON key/value file.
    pub fn durable(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(path)), Arc::new(SystemClock))
    }

    // Overwrite the session wholesale. `expires_at` is epoch milliseconds;
    // absent means the token never expires locally.
    pub fn set_session(&self, token: &str, token_type: &str, expires_at: Option<u64>) {
        self.backend.write(TOKEN_KEY, token);
        self.backend.write(TOKEN_TYPE_KEY, token_type);
        match expires_at {
            Some(at) => self.backend.write(EXPIRES_AT_KEY, &at.to_string()),
            None => self.backend.remove(EXPIRES_AT_KEY),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.backend.read(TOKEN_KEY)
    }

    pub fn token_type(&self) -> String {
        self.backend
            .read(TOKEN_TYPE_KEY)
            .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string())
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.backend
            .read(EXPIRES_AT_KEY)
            .and_then(|value| value.parse::<u64>().ok())
    }

    // Remove all three keys. Safe to call when already clear.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(TOKEN_TYPE_KEY);
        self.backend.remove(EXPIRES_AT_KEY);
    }

    // Validity check with a pruning side effect: a session found expired is
    // cleared on the spot so later reads see a clean logged-out state.
    pub fn is_token_valid(&self) -> bool {
        if self.token().is_none() {
            return false;
        }
        if let Some(expires_at) = self.expires_at() {
            if self.clock.now_epoch_millis() >= expires_at {
                self.clear();
                return false;
            }
        }
        true
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_token_valid()
    }

    // Value for the Authorization header, `"<type> <token>"`. None when no
    // token is stored; callers then send the request undecorated.
    pub fn auth_header(&self) -> Option<String> {
        self.token()
            .map(|token| format!("{} {}", self.token_type(), token))
    }

    pub fn now_epoch_millis(&self) -> u64 {
        self.clock.now_epoch_millis()
    }

    pub fn snapshot(&self) -> Session {
        Session {
            access_token: self.token(),
            token_type: self.token_type(),
            expires_at: self.expires_at(),
        }
    }
}

// In-memory backend, the test double for browser-style local storage.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionBackend for InMemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        let guard = self.values.lock().expect("session values mutex poisoned");
        guard.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut guard = self.values.lock().expect("session values mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut guard = self.values.lock().expect("session values mutex poisoned");
        guard.remove(key);
    }
}

// File-backed key/value store that survives restarts. Write failures are
// logged and otherwise ignored; losing a cached token is not fatal.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> HashMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn store(&self, values: &HashMap<String, String>) {
        match serde_json::to_string(values) {
            Ok(raw) => {
                if let Err(err) = std::fs::write(&self.path, raw) {
                    tracing::warn!(path = %self.path.display(), %err, "session file write failed");
                }
            }
            Err(err) => {
                tracing::warn!(%err, "session serialization failed");
            }
        }
    }
}

impl SessionBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.load().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut values = self.load();
        values.insert(key.to_string(), value.to_string());
        self.store(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.load();
        if values.remove(key).is_some() {
            self.store(&values);
        }
    }
}

// System clock adapter used outside of tests.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
