//! Server-rendered page for the forge.
//!
//! The page is a single HTML document assembled from the fragments in
//! `templates`. Every piece of user-supplied text goes through
//! `escape_html` before it is spliced in.

pub mod templates;

use std::fmt::Write;

use secrecy::{ExposeSecret, SecretString};

use crate::forge::options::{ChoiceSet, ModelId, QuantifyPreference, Seniority, Tone};
use crate::forge::request::ForgeRequest;
use templates::{
    stylesheet, BULLETS_PLACEHOLDER, FOOTER_TEXT, HEADER, HOW_IT_WORKS, KEY_TIP, PAGE_TITLE,
    SPINNER_TEXT, SUBMIT_SCRIPT,
};

/// Everything needed to paint the page once.
pub struct PageView<'a> {
    /// Echoed back into the password field so the key survives re-renders.
    pub api_key: Option<&'a SecretString>,
    pub request: &'a ForgeRequest,
    pub last_output: Option<&'a str>,
    pub error: Option<&'a str>,
    /// File name of the logo, or `None` when the file is missing.
    pub logo_name: Option<&'a str>,
    pub missing_logo_name: &'a str,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(16 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🧨</text></svg>">
<style>{css}</style>
</head>
<body>
<main>
{HEADER}
<form id="forge-form" method="post" action="/forge">
"#,
        css = stylesheet(),
    );

    render_top(&mut html, view);
    html.push_str("<hr>\n");
    render_inputs(&mut html, view.request);
    html.push_str("</form>\n");
    // Own form so clearing never trips the forge form's submit handler.
    html.push_str(r#"<form id="reset-form" method="post" action="/session/reset"></form>"#);
    html.push('\n');

    if let Some(error) = view.error {
        let _ = writeln!(
            html,
            r#"<div class="error-banner" role="alert">{}</div>"#,
            escape_html(error)
        );
    }

    if let Some(output) = view.last_output.filter(|o| !o.is_empty()) {
        render_results(&mut html, &view.request.bullets, output);
    }

    render_footer(&mut html, view.logo_name, view.missing_logo_name);

    html.push_str(SUBMIT_SCRIPT);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}

fn render_top(html: &mut String, view: &PageView<'_>) {
    let key = view
        .api_key
        .map(|k| escape_html(k.expose_secret()))
        .unwrap_or_default();

    let _ = write!(
        html,
        r#"<div class="row">
<div class="col-wide">
<div class="section-title">1. Connect your AI engine</div>
<div class="section-subtitle">Paste your OpenAI API key. It is kept only in this session and not stored anywhere else.</div>
<label for="api_key">OpenAI API Key</label>
<input id="api_key" name="api_key" type="password" placeholder="sk-..." autocomplete="off" value="{key}" title="Your key is used only to call OpenAI from this app and is not logged or saved.">
{KEY_TIP}
<p><button type="submit" form="reset-form" class="link-button">Clear session (forget key and results)</button></p>
</div>
<div class="col">
{HOW_IT_WORKS}
</div>
</div>
"#
    );
}

fn render_inputs(html: &mut String, request: &ForgeRequest) {
    let _ = write!(
        html,
        r#"<div class="row">
<div class="col-wide">
<div class="section-title">2. Describe your target role</div>
<label for="job_title">Target role / job title</label>
<input id="job_title" name="job_title" type="text" placeholder="e.g. Senior Data Engineer, AI Product Manager" value="{job_title}">
<div class="row">
<div class="col">
<label for="seniority">Seniority level</label>
{seniority}
</div>
<div class="col">
<label for="tone">Tone</label>
{tone}
</div>
</div>
<label for="industry">Industry / domain (optional)</label>
<input id="industry" name="industry" type="text" placeholder="e.g. Fintech, Insurance, eCommerce…" value="{industry}">
<div class="section-title" style="margin-top: 1rem;">3. Paste your existing bullet points</div>
<label for="bullets">Existing bullets</label>
<textarea id="bullets" name="bullets" placeholder="{BULLETS_PLACEHOLDER}">{bullets}</textarea>
</div>
<div class="col">
<div class="section-title">Model &amp; options</div>
<div class="aza-panel">
<label for="model">OpenAI model</label>
{model}
<label for="quantify_pref">Quantification preference</label>
{quantify}
<div class="helper-text" style="margin-top: 0.4rem;">The model will automatically weave in impact &amp; metrics.<br>Preference: <b>{preference}</b></div>
</div>
<button id="forge-button" type="submit" class="forge-button">🔥 Forge bullets</button>
<div class="spinner">{SPINNER_TEXT}</div>
</div>
</div>
"#,
        job_title = escape_html(&request.job_title),
        seniority = render_select::<Seniority>("seniority", request.seniority),
        tone = render_select::<Tone>("tone", request.tone),
        industry = escape_html(&request.industry),
        bullets = escape_html(&request.bullets),
        model = render_select::<ModelId>("model", request.model),
        quantify = render_select::<QuantifyPreference>("quantify_pref", request.quantify_pref),
        preference = escape_html(request.quantify_pref.label()),
    );
}

fn render_results(html: &mut String, original: &str, forged: &str) {
    let _ = write!(
        html,
        r#"<hr>
<div class="section-title">4. Compare &amp; copy</div>
<div class="section-subtitle">Original vs. forged bullets side-by-side. Copy the right-hand side into your resume or LinkedIn.</div>
<div class="row">
<div class="col">
<div class="result-label">Original</div>
<div class="result-title">Your current bullets</div>
<div class="aza-panel"><div class="result-body">{original}</div></div>
</div>
<div class="col">
<div class="result-label">Forged</div>
<div class="result-title">AI-upgraded bullets</div>
<div class="aza-panel"><div class="result-body">{forged}</div></div>
</div>
</div>
"#,
        original = escape_html(original),
        forged = escape_html(forged),
    );
}

fn render_footer(html: &mut String, logo_name: Option<&str>, missing_logo_name: &str) {
    let logo = match logo_name {
        Some(name) => format!(
            r#"<img src="/assets/logo" alt="{}" width="70">"#,
            escape_html(name)
        ),
        None => format!(
            r#"<div class="caption">Add {} next to the server to show the logo here.</div>"#,
            escape_html(missing_logo_name)
        ),
    };

    let _ = write!(
        html,
        r#"<div class="aza-footer">
{FOOTER_TEXT}
<div>{logo}</div>
</div>
"#
    );
}

/// `<select>` over a closed choice set with `selected` pre-chosen.
fn render_select<T: ChoiceSet>(name: &str, selected: T) -> String {
    let mut select = format!(r#"<select id="{name}" name="{name}">"#);
    for choice in T::all() {
        let label = escape_html(choice.label());
        let marker = if *choice == selected { " selected" } else { "" };
        let _ = write!(select, r#"<option value="{label}"{marker}>{label}</option>"#);
    }
    select.push_str("</select>");
    select
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
