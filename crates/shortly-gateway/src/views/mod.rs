//! Server-rendered HTML pages.

mod redirect;
mod shortener;
mod stats;

pub use redirect::redirect_page;
pub use shortener::{shortener_page, CreatedLink};
pub use stats::{stats_page, StatsRow};

use jiff::Timestamp;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
nav a{margin-right:1rem}table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4rem;text-align:left;vertical-align:top}\
.error{color:#b00020}.muted{color:#666}input{margin:.2rem}";

/// Wraps `body` in the shared page chrome.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Shortly</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Shorten</a><a href=\"/stats\">Statistics</a></nav>\n\
         {body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!(
            "<h1>Error</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to the shortener</a></p>",
            escape(message)
        ),
    )
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn format_timestamp(ts: Timestamp) -> String {
    ts.strftime("%Y-%m-%d %H:%M:%S UTC").to_string()
}
