use super::{escape, format_timestamp, layout};
use shortly_core::{ClickRecord, ShortCode, ShortcodeEntry};
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct StatsRow {
    pub code: ShortCode,
    pub short_url: String,
    pub entry: ShortcodeEntry,
    pub expired: bool,
}

pub fn stats_page(rows: &[StatsRow]) -> String {
    let mut body = String::from("<h1>Statistics</h1>\n");

    if rows.is_empty() {
        body.push_str("<p class=\"muted\">No short links yet.</p>\n");
        return layout("Statistics", &body);
    }

    body.push_str(
        "<form method=\"post\" action=\"/stats/clear\">\
         <button type=\"submit\">Clear all</button></form>\n",
    );
    body.push_str("<table>\n<tr><th>Shortcode</th><th>Original URL</th><th>Created</th>\
                   <th>Expires</th><th>Clicks</th><th>Click details</th><th></th></tr>\n");

    for row in rows {
        let status = if row.expired { " <span class=\"muted\">(expired)</span>" } else { "" };
        let _ = writeln!(
            body,
            "<tr><td><a href=\"{short}\">{code}</a>{status}</td><td>{long}</td><td>{created}</td>\
             <td>{expires}</td><td>{count}</td><td>{clicks}</td>\
             <td><form method=\"post\" action=\"/stats/{code}/delete\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            short = escape(&row.short_url),
            code = escape(row.code.as_str()),
            long = escape(&row.entry.long_url),
            created = format_timestamp(row.entry.created_at),
            expires = format_timestamp(row.entry.expires_at),
            count = row.entry.click_count(),
            clicks = click_details(&row.entry.clicks),
        );
    }
    body.push_str("</table>\n");

    layout("Statistics", &body)
}

fn click_details(clicks: &[ClickRecord]) -> String {
    if clicks.is_empty() {
        return "<span class=\"muted\">none</span>".to_string();
    }

    let mut out = String::from("<ul>");
    for click in clicks {
        let referrer = if click.referrer.is_empty() { "direct" } else { &click.referrer };
        let language = if click.language.is_empty() { "unknown" } else { &click.language };
        let _ = write!(
            out,
            "<li>{} | {} | {}</li>",
            format_timestamp(click.ts),
            escape(referrer),
            escape(language)
        );
    }
    out.push_str("</ul>");
    out
}
