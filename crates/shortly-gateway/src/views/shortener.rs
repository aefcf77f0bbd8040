use super::{escape, format_timestamp, layout};
use crate::model::{ShortenForm, MAX_ROWS};
use jiff::Timestamp;
use std::fmt::Write;

/// A link created by the last submission.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub row: usize,
    pub short_url: String,
    pub long_url: String,
    pub expires_at: Timestamp,
}

pub fn shortener_page(
    form: &ShortenForm,
    errors: &[String],
    created: &[CreatedLink],
    default_validity_minutes: i64,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>URL Shortener</h1>\n");
    let _ = writeln!(
        body,
        "<p class=\"muted\">Shorten up to {MAX_ROWS} URLs at once. \
         Leave validity blank for default ({default_validity_minutes} minutes).</p>"
    );

    body.push_str("<form method=\"post\" action=\"/\">\n");
    let _ = writeln!(
        body,
        "<input type=\"hidden\" name=\"rows\" value=\"{}\">",
        form.rows.len()
    );
    for (index, row) in form.rows.iter().enumerate() {
        let n = index + 1;
        let _ = writeln!(
            body,
            "<fieldset><legend>Row {n}</legend>\
             <input type=\"text\" name=\"url_{n}\" placeholder=\"Long URL\" size=\"50\" value=\"{url}\">\
             <input type=\"number\" name=\"validity_{n}\" placeholder=\"Validity (minutes)\" min=\"1\" value=\"{validity}\">\
             <input type=\"text\" name=\"preferred_{n}\" placeholder=\"Preferred shortcode (optional)\" value=\"{preferred}\">\
             </fieldset>",
            url = escape(&row.url),
            validity = escape(&row.validity),
            preferred = escape(&row.preferred),
        );
    }
    body.push_str("<button type=\"submit\">Shorten</button>\n");
    if form.rows.len() < MAX_ROWS {
        let _ = writeln!(
            body,
            "<a href=\"/?rows={}\">Add row</a>",
            form.rows.len() + 1
        );
    }
    if form.rows.len() > 1 {
        let _ = writeln!(
            body,
            "<a href=\"/?rows={}\">Remove row</a>",
            form.rows.len() - 1
        );
    }
    body.push_str("</form>\n");

    if !errors.is_empty() {
        body.push_str("<ul class=\"error\">\n");
        for error in errors {
            let _ = writeln!(body, "<li>{}</li>", escape(error));
        }
        body.push_str("</ul>\n");
    }

    if !created.is_empty() {
        body.push_str("<h2>Results</h2>\n<table>\n");
        body.push_str("<tr><th>Row</th><th>Short URL</th><th>Original URL</th><th>Expires</th></tr>\n");
        for link in created {
            let _ = writeln!(
                body,
                "<tr><td>{row}</td><td><a href=\"{short}\">{short}</a></td><td>{long}</td><td>{expires}</td></tr>",
                row = link.row,
                short = escape(&link.short_url),
                long = escape(&link.long_url),
                expires = format_timestamp(link.expires_at),
            );
        }
        body.push_str("</table>\n");
    }

    layout("Shorten", &body)
}
