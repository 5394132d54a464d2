//! Form input → typed forge request.

use std::fmt;

use secrecy::SecretString;
use serde::Deserialize;

use crate::forge::options::{
    ChoiceSet, ModelId, QuantifyPreference, Seniority, Tone, UnknownOption,
};

/// Raw form body as posted by the page (`application/x-www-form-urlencoded`)
/// or sent as JSON to the forge API.
///
/// Every field is optional on the wire; a browser omits nothing, but a
/// hand-written request might.
#[derive(Clone, Default, Deserialize)]
pub struct ForgeForm {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub seniority: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub bullets: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub quantify_pref: String,
}

impl fmt::Debug for ForgeForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForgeForm")
            .field("api_key", &"[REDACTED]")
            .field("job_title", &self.job_title)
            .field("seniority", &self.seniority)
            .field("tone", &self.tone)
            .field("industry", &self.industry)
            .field("bullets", &self.bullets)
            .field("model", &self.model)
            .field("quantify_pref", &self.quantify_pref)
            .finish()
    }
}

impl ForgeForm {
    /// The credential typed into the form, if any. Whitespace-only counts as none.
    pub fn credential(&self) -> Option<SecretString> {
        let key = self.api_key.trim();
        (!key.is_empty()).then(|| SecretString::from(key.to_owned()))
    }
}

/// Everything the forge needs apart from the credential, with each choice
/// constrained to its closed set.
///
/// `bullets` may still be blank here; emptiness is a forge-time error so it
/// can be reported after the credential check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForgeRequest {
    pub job_title: String,
    pub seniority: Seniority,
    pub tone: Tone,
    pub industry: String,
    pub bullets: String,
    pub model: ModelId,
    pub quantify_pref: QuantifyPreference,
}

impl ForgeRequest {
    pub fn from_form(form: &ForgeForm) -> Result<Self, UnknownOption> {
        Ok(ForgeRequest {
            job_title: form.job_title.clone(),
            seniority: Seniority::parse_label(&form.seniority)?,
            tone: Tone::parse_label(&form.tone)?,
            industry: form.industry.clone(),
            bullets: form.bullets.clone(),
            model: ModelId::parse_label(&form.model)?,
            quantify_pref: QuantifyPreference::parse_label(&form.quantify_pref)?,
        })
    }

    pub fn has_bullets(&self) -> bool {
        !self.bullets.trim().is_empty()
    }
}
