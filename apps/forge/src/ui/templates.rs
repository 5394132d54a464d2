// Static page fragments. Dynamic values are spliced in by `ui::render_page`.

pub const PAGE_TITLE: &str = "Aza-Labs Resume Bullet Forge";

pub const BRAND_BG: &str = "#001529";
pub const BRAND_ORANGE: &str = "#F58B02";
pub const BRAND_CYAN: &str = "#00C4E8";
pub const BRAND_TEXT: &str = "#F9FAFB";
pub const BRAND_MUTED: &str = "#9CA3AF";

/// Stylesheet template. Replace the `{bg}`, `{orange}`, `{cyan}`, `{text}`
/// and `{muted}` placeholders with the brand colours.
const STYLESHEET_TEMPLATE: &str = r#"
body { margin: 0; background: {bg}; color: {text}; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; }
main { max-width: 1200px; margin: 0 auto; padding: 2rem 1.5rem; }
hr { border: none; border-top: 1px solid rgba(148, 163, 184, 0.3); margin: 1.5rem 0; }
label { display: block; font-size: 0.85rem; margin: 0.6rem 0 0.25rem 0; color: {text}; }
input, select, textarea { width: 100%; box-sizing: border-box; padding: 0.5rem 0.6rem; border-radius: 0.5rem;
    border: 1px solid rgba(148, 163, 184, 0.4); background: #0b1524; color: {text}; font-size: 0.9rem; }
textarea { min-height: 220px; resize: vertical; font-family: inherit; }
.row { display: flex; gap: 1.5rem; flex-wrap: wrap; }
.col { flex: 1 1 320px; min-width: 0; }
.col-wide { flex: 2.2 1 420px; min-width: 0; }
.app-title { font-size: 2.4rem; font-weight: 800; margin-bottom: 0.25rem;
    background: linear-gradient(120deg, {orange}, {cyan}, {text});
    -webkit-background-clip: text; -webkit-text-fill-color: transparent; }
.app-subtitle { font-size: 0.98rem; color: {muted}; margin-bottom: 1.5rem; }
.section-title { font-size: 1.05rem; font-weight: 600; color: {text}; margin-bottom: 0.4rem; }
.section-subtitle { font-size: 0.85rem; color: {muted}; margin-bottom: 0.8rem; }
.aza-panel { border-radius: 1rem; padding: 1rem 1.1rem; background: radial-gradient(circle at top left, #0b1524, #000814);
    border: 1px solid rgba(148, 163, 184, 0.35); box-shadow: 0 14px 35px rgba(0, 0, 0, 0.8); }
.aza-panel-muted { border-radius: 1rem; padding: 0.9rem 1rem; background: rgba(15, 23, 42, 0.9);
    border: 1px dashed rgba(148, 163, 184, 0.4); }
.label-strong { font-weight: 600; color: {text}; }
.helper-text { font-size: 0.8rem; color: {muted}; }
.result-title { font-size: 0.9rem; font-weight: 600; color: {text}; margin-bottom: 0.2rem; }
.result-label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.08em; color: {orange}; margin-bottom: 0.15rem; }
.result-body { color: #e5e7eb; white-space: pre-wrap; font-size: 0.9rem; }
.error-banner { border-radius: 0.6rem; padding: 0.8rem 1rem; margin: 1rem 0; background: rgba(127, 29, 29, 0.6);
    border: 1px solid #f87171; color: #fee2e2; }
.forge-button { width: 100%; margin-top: 1rem; padding: 0.7rem; border: none; border-radius: 0.6rem; cursor: pointer;
    background: {orange}; color: #111827; font-weight: 700; font-size: 1rem; }
.forge-button:disabled { opacity: 0.6; cursor: wait; }
.link-button { background: none; border: none; padding: 0; color: {muted}; text-decoration: underline; cursor: pointer; font-size: 0.8rem; }
.spinner { display: none; margin-top: 0.5rem; font-size: 0.85rem; color: {cyan}; }
form.busy .spinner { display: block; }
.aza-footer { margin-top: 2rem; padding: 1rem 0 0.5rem 0; border-top: 1px solid rgba(148, 163, 184, 0.3);
    display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.aza-footer-text { font-size: 0.85rem; color: {muted}; }
.aza-footer-highlight { color: {cyan}; font-weight: 600; }
.caption { font-size: 0.75rem; color: {muted}; }
"#;

pub fn stylesheet() -> String {
    STYLESHEET_TEMPLATE
        .replace("{bg}", BRAND_BG)
        .replace("{orange}", BRAND_ORANGE)
        .replace("{cyan}", BRAND_CYAN)
        .replace("{text}", BRAND_TEXT)
        .replace("{muted}", BRAND_MUTED)
}

pub const HEADER: &str = r#"<div class="app-title">Aza-Labs Resume Bullet Forge</div>
<div class="app-subtitle">Turn basic bullets into quantified, high-impact lines tailored to your target role. Perfect for refreshing your resume or optimizing it for a new job.</div>"#;

pub const HOW_IT_WORKS: &str = r#"<div class="section-title">How this works</div>
<div class="aza-panel-muted">
  <ul style="padding-left: 1rem; margin-bottom: 0.4rem; color: #e5e7eb; font-size: 0.85rem;">
    <li>Describe the <b>target role</b> and <b>seniority</b>.</li>
    <li>Paste your current resume bullet points.</li>
    <li>Choose tone (e.g. neutral, confident).</li>
    <li>Click <b>Forge bullets</b> to generate upgraded lines.</li>
  </ul>
  <div style="font-size: 0.8rem; color: #9CA3AF;">You can copy the improved bullets directly into your resume or LinkedIn.</div>
</div>"#;

pub const KEY_TIP: &str = r#"<div class="helper-text"><span class="label-strong">Tip:</span> Use a key with access to <code>gpt-4o</code> or similar for best results.</div>"#;

pub const BULLETS_PLACEHOLDER: &str =
    "• Led a team of 4 engineers...&#10;• Worked on data pipelines...&#10;• Improved performance...";

pub const SPINNER_TEXT: &str = "Forging upgraded bullets with AI...";

/// Marks the form busy and disables the button so a session only ever has
/// one request in flight.
pub const SUBMIT_SCRIPT: &str = r#"<script>
document.getElementById("forge-form").addEventListener("submit", function (e) {
  e.target.classList.add("busy");
  document.getElementById("forge-button").disabled = true;
});
</script>"#;

pub const FOOTER_TEXT: &str = r#"<div class="aza-footer-text">Built at <span class="aza-footer-highlight">Aza-Labs</span>. Forge sharper, louder, more impactful career stories — one bullet at a time.</div>"#;
