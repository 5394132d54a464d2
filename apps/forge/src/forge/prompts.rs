// Prompt text for the bullet forge. Every string the model sees lives here.

use crate::forge::options::{ChoiceSet, QuantifyPreference, Seniority, Tone};
use crate::forge::request::ForgeRequest;

/// System message framing the assistant as an expert resume writer.
pub const FORGE_SYSTEM: &str = "You are an expert resume writer who crafts high-impact, \
    quantified bullets that pass resume screeners and ATS.";

/// Sampling temperature: moderate creativity over determinism.
pub const FORGE_TEMPERATURE: f32 = 0.5;

/// Upper bound on generated tokens.
pub const FORGE_MAX_TOKENS: u32 = 600;

/// Placeholder for an empty target role.
pub const ROLE_FALLBACK: &str = "Not specified";

/// Placeholder for an empty industry.
pub const INDUSTRY_FALLBACK: &str = "Generic";

/// Builds the user message for one forge.
///
/// Pure and deterministic. Bullets are embedded byte-for-byte; optional
/// fields that are blank are replaced by their fallback placeholder.
pub fn build_prompt(
    job_title: &str,
    seniority: Seniority,
    tone: Tone,
    industry: &str,
    quantify_pref: QuantifyPreference,
    bullets: &str,
) -> String {
    let job_title = or_fallback(job_title, ROLE_FALLBACK);
    let industry = or_fallback(industry, INDUSTRY_FALLBACK);
    let tone = format!(
        "{}. Quantification preference: {}",
        tone.label(),
        quantify_pref.hint()
    );

    format!(
        "You are an expert resume writer and career coach.

TASK:
Rewrite the following resume bullet points to be:
- Impact-focused
- Quantified where possible
- Tailored to the target role
- Concise (1–2 lines per bullet)
- Written in the selected tone

Target role: {job_title}
Seniority: {seniority}
Tone: {tone}
Industry/domain: {industry}

ORIGINAL BULLETS:
{bullets}

OUTPUT FORMAT:
- Return ONLY the improved bullets as a Markdown numbered list.
- Do NOT include explanations or headings.",
        seniority = seniority.label(),
    )
}

/// Shorthand for `build_prompt` over a whole request.
pub fn prompt_for(request: &ForgeRequest) -> String {
    build_prompt(
        &request.job_title,
        request.seniority,
        request.tone,
        &request.industry,
        request.quantify_pref,
        &request.bullets,
    )
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
