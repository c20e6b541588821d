//! Shared page chrome: layout, escaping, banners, htmx helpers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Successful mutation from an htmx modal: tell the client to reload the page.
pub fn hx_redirect(to: &str) -> Response {
    (StatusCode::OK, [("HX-Redirect", to.to_string())], "").into_response()
}

pub fn banner(kind: &str, message: &str) -> String {
    format!(
        "<div class=\"banner banner-{kind}\">{}</div>",
        escape_html(message)
    )
}

const STYLE: &str = r#"
    body { font-family: ui-sans-serif, system-ui, -apple-system, "Segoe UI", Roboto, Arial; margin: 0; }
    a { color: #0A6ED1; }
    .wrap { display: flex; min-height: 100vh; }
    .sidebar { width: 280px; flex-shrink: 0; background: #F7F8FA; border-right: 1px solid #E5E7EB; padding: 20px; }
    .sidebar h2 { font-size: 1rem; margin-top: 0; }
    .sidebar hr { border: none; border-top: 1px solid #E5E7EB; margin: 16px 0; }
    .main { flex: 1; padding: 24px 32px; max-width: 900px; }
    .muted { color: #6B7280; }
    .card { border: 1px solid #E5E7EB; border-radius: 12px; padding: 16px; margin-bottom: 16px; box-shadow: 0 1px 4px rgba(0,0,0,0.04); }
    .banner { border-radius: 8px; padding: 10px 14px; margin: 8px 0; white-space: pre-wrap; }
    .banner-error   { background: #FDECEC; color: #BB0000; }
    .banner-warning { background: #FEF4E5; color: #8A5A00; }
    .banner-info    { background: #EAF3FC; color: #0A6ED1; }
    .banner-success { background: #EBF8EE; color: #188918; }
    .service-badge { display: inline-block; padding: 2px 10px; border-radius: 12px; color: #FFFFFF;
                     font-size: 0.8rem; font-weight: 600; margin-right: 6px; margin-bottom: 4px; }
    .confidence-high   { color: #188918; font-weight: 600; }
    .confidence-medium { color: #E78C07; font-weight: 600; }
    .confidence-low    { color: #BB0000; font-weight: 600; }
    .answer-text { white-space: pre-wrap; line-height: 1.6; font-size: 0.95rem; }
    .tag-pill { display: inline-block; padding: 2px 10px; border-radius: 10px; background: #F0F2F5;
                color: #555; font-size: 0.75rem; font-weight: 500; margin-right: 4px; margin-bottom: 4px; }
    .score { margin-right: 10px; font-variant-numeric: tabular-nums; }
    .score-safe { color: #188918; } .score-caution { color: #E78C07; } .score-danger { color: #BB0000; }
    .suggested { display: flex; gap: 12px; flex-wrap: wrap; margin-bottom: 16px; }
    .suggested form { flex: 1 1 180px; }
    .suggested button { width: 100%; min-height: 64px; text-align: left; white-space: normal; }
    button, .button { background: #0A6ED1; color: #FFFFFF; border: none; border-radius: 8px;
                      padding: 8px 14px; font-size: 0.9rem; cursor: pointer; text-decoration: none; display: inline-block; }
    button.secondary { background: #E5E7EB; color: #111; }
    input[type=text], textarea, select { width: 100%; box-sizing: border-box; padding: 8px;
                                         border: 1px solid #D1D5DB; border-radius: 8px; margin-bottom: 10px; }
    .ask-form { display: flex; gap: 8px; margin-top: 16px; }
    .ask-form input { flex: 1; margin-bottom: 0; }
    .htmx-indicator { display: none; color: #6B7280; align-self: center; }
    .htmx-request .htmx-indicator, .htmx-request.htmx-indicator { display: inline; }
    details.pipeline { border: 1px solid #E5E7EB; border-radius: 8px; padding: 8px 12px; margin-top: 10px; }
    details.pipeline h4 { border-bottom: 2px solid #0A6ED1; padding-bottom: 2px; }
    pre { background: #F3F4F6; padding: 8px; border-radius: 6px; overflow-x: auto; font-size: 0.85rem; }
    code { background: #F3F4F6; padding: 2px 6px; border-radius: 6px; }
    .cols { display: flex; gap: 24px; }
    .cols > div { flex: 1; }
    .modal-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,0.4);
                      display: flex; align-items: center; justify-content: center; }
    .modal { background: #FFFFFF; border-radius: 12px; padding: 20px; width: 480px; max-width: 90vw; }
    .modal h3 { margin-top: 0; }
"#;

pub fn layout(title: &str, sidebar: &str, main: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <script src="https://unpkg.com/htmx.org@1.9.12"></script>
  <style>{STYLE}</style>
</head>
<body hx-boost="true">
  <div class="wrap">
    <aside class="sidebar">
      <nav><a href="/">Ask</a> &middot; <a href="/kb">Knowledge Base</a></nav>
      <hr />
{sidebar}
    </aside>
    <section class="main">
{main}
    </section>
  </div>
  <div id="modal"></div>
</body>
</html>"#,
        title = escape_html(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"A&B's"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&#x27;s&quot;&lt;/b&gt;"
        );
    }
}
