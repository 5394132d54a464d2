//! Per-browser-session state.
//!
//! Each session owns its credential and last result; nothing is shared
//! between sessions and nothing outlives the process. A session ends on an
//! explicit reset or after sitting idle longer than the configured TTL.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use uuid::Uuid;

use crate::forge::request::ForgeRequest;

pub const SESSION_COOKIE: &str = "forge_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    /// Reads the session id from the request's `Cookie` header(s).
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
            .map(SessionId)
    }

    /// `Set-Cookie` value binding the browser to this session.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict", self.0)
    }

    /// `Set-Cookie` value that makes the browser forget its session.
    pub fn expired_cookie() -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// State held for one browser session.
#[derive(Debug)]
pub struct SessionState {
    /// Key typed into the form. `SecretString` keeps it out of `Debug` and logs.
    pub api_key: Option<SecretString>,
    /// Text of the most recent successful forge.
    pub last_output: Option<String>,
    /// Non-secret field values of the most recent submit; the page is
    /// re-rendered with them and the "Original" panel shows its bullets.
    pub last_request: ForgeRequest,
    last_seen: Instant,
}

impl SessionState {
    fn new() -> Self {
        SessionState {
            api_key: None,
            last_output: None,
            last_request: ForgeRequest::default(),
            last_seen: Instant::now(),
        }
    }

    fn is_expired(&self, idle_ttl: Duration) -> bool {
        self.last_seen.elapsed() > idle_ttl
    }
}

/// Session table owned by `AppState`.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, SessionState>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            idle_ttl,
        }
    }

    /// Resumes the caller's session if it is still live. Never creates one.
    pub fn resume(&self, requested: Option<SessionId>) -> Option<SessionId> {
        let id = requested?;
        if let Some(mut session) = self.sessions.get_mut(&id) {
            if !session.is_expired(self.idle_ttl) {
                session.last_seen = Instant::now();
                return Some(id);
            }
        }
        if self
            .sessions
            .remove_if(&id, |_, s| s.is_expired(self.idle_ttl))
            .is_some()
        {
            info!(session = %id, "session expired");
        }
        None
    }

    /// Resumes the caller's session or starts a fresh one.
    ///
    /// Returns the id to use and whether it is new (and so needs a cookie).
    pub fn open(&self, requested: Option<SessionId>) -> (SessionId, bool) {
        if let Some(id) = self.resume(requested) {
            return (id, false);
        }

        let id = SessionId::new();
        self.sessions.insert(id, SessionState::new());
        info!(session = %id, "session started");
        (id, true)
    }

    /// Runs `f` against the session, if it still exists.
    pub fn with_session<R>(&self, id: SessionId, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        self.sessions
            .get_mut(&id)
            .map(|mut session| f(session.value_mut()))
    }

    /// Copies the session's credential out so the map entry is not held
    /// across the outbound call.
    pub fn credential(&self, id: SessionId) -> Option<SecretString> {
        self.sessions.get(&id).and_then(|session| {
            session
                .api_key
                .as_ref()
                .map(|key| SecretString::from(key.expose_secret().to_owned()))
        })
    }

    /// Ends a session, dropping its key and result.
    pub fn end(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            info!(session = %id, "session ended");
        }
        removed
    }

    /// Evicts every idle session. Returns how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(self.idle_ttl));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Periodically evicts idle sessions for the life of the process.
pub fn spawn_sweeper(store: SessionStore, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = store.sweep_expired();
            debug!("Session sweep evicted {evicted}, {} live", store.len());
        }
    })
}
