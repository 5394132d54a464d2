use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CapabilityProvider;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-user data itself; everything a user enters lives in their
/// entry of `sessions`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Builds a completion client from a session's key. Default: OpenAI.
    pub capability: Arc<dyn CapabilityProvider>,
    pub sessions: SessionStore,
}
