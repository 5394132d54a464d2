//! Bullet forging — the one round trip this service exists for.
//!
//! Flow: check credential → check bullets → connect capability →
//!       build prompt → single completion call → trimmed text.
//!
//! Nothing here touches session state while the call is in flight; the
//! handler applies the outcome afterwards with `apply_outcome`.

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::errors::ForgeError;
use crate::forge::options::ChoiceSet;
use crate::forge::prompts::{prompt_for, FORGE_MAX_TOKENS, FORGE_SYSTEM, FORGE_TEMPERATURE};
use crate::forge::request::ForgeRequest;
use crate::llm_client::{CapabilityProvider, CompletionRequest, LlmError};
use crate::session::SessionState;

/// Rewrites the request's bullets through the generation capability.
///
/// Validation happens before any remote work: a blank credential yields
/// `MissingCredential`, then blank bullets yield `MissingInput`.
pub async fn forge_bullets(
    capability: &dyn CapabilityProvider,
    api_key: Option<&SecretString>,
    request: &ForgeRequest,
) -> Result<String, ForgeError> {
    let api_key = api_key
        .filter(|key| !key.expose_secret().trim().is_empty())
        .ok_or(ForgeError::MissingCredential)?;

    if !request.has_bullets() {
        return Err(ForgeError::MissingInput);
    }

    let client = capability.connect(api_key).map_err(|e| match e {
        LlmError::Unavailable(msg) => ForgeError::CapabilityUnavailable(msg),
        other => ForgeError::CapabilityUnavailable(other.to_string()),
    })?;

    let completion = CompletionRequest {
        model: request.model.label().to_string(),
        system: FORGE_SYSTEM.to_string(),
        user: prompt_for(request),
        temperature: FORGE_TEMPERATURE,
        max_tokens: FORGE_MAX_TOKENS,
    };

    info!(
        "Forging bullets with {} ({} chars of input)",
        completion.model,
        request.bullets.chars().count()
    );

    let text = client
        .complete(&completion)
        .await
        .map_err(|e| ForgeError::RemoteCallFailure(e.to_string()))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ForgeError::RemoteCallFailure(LlmError::EmptyContent.to_string()));
    }

    info!("Forge produced {} chars", text.chars().count());
    Ok(text)
}

/// Folds a forge outcome into the session.
///
/// Success replaces the last result. Failure leaves any previous result in
/// place and returns the message to show.
pub fn apply_outcome(
    session: &mut SessionState,
    outcome: Result<String, ForgeError>,
) -> Option<String> {
    match outcome {
        Ok(text) => {
            session.last_output = Some(text);
            None
        }
        Err(err) => {
            warn!("Forge failed [{}]: {err}", err.code());
            Some(err.to_string())
        }
    }
}
