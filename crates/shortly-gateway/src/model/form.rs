use serde::Deserialize;
use shortly_core::ShortenParams;
use std::collections::HashMap;

/// Maximum number of URLs that can be shortened in one submission.
pub const MAX_ROWS: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct RowsQuery {
    pub rows: Option<String>,
}

impl RowsQuery {
    pub fn count(&self) -> usize {
        clamp_rows(self.rows.as_deref())
    }
}

/// One row of the shortener form, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRow {
    pub url: String,
    pub validity: String,
    pub preferred: String,
}

impl FormRow {
    /// Minutes entered for the row, read from the leading digits so that
    /// `"15min"` means 15. Blank, non-numeric and non-positive input all mean
    /// "use the default".
    pub fn validity_minutes(&self) -> Option<u32> {
        let raw = self.validity.trim();
        if raw.starts_with('-') {
            return None;
        }
        let raw = raw.strip_prefix('+').unwrap_or(raw);
        let end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let digits = &raw[..end];
        if digits.is_empty() {
            return None;
        }

        // Only overflow can fail once the digits are known to be ASCII.
        let minutes = digits.parse::<u32>().unwrap_or(u32::MAX);
        (minutes > 0).then_some(minutes)
    }

    pub fn to_params(&self) -> ShortenParams {
        ShortenParams {
            long_url: self.url.clone(),
            validity_minutes: self.validity_minutes(),
            preferred_code: Some(self.preferred.clone()).filter(|code| !code.trim().is_empty()),
        }
    }
}

/// The submitted form. Fields are named `url_N`, `validity_N` and
/// `preferred_N` with `N` counting from 1; `rows` says how many were shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenForm {
    pub rows: Vec<FormRow>,
}

impl ShortenForm {
    pub fn blank(rows: usize) -> Self {
        Self {
            rows: vec![FormRow::default(); rows.clamp(1, MAX_ROWS)],
        }
    }

    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let count = clamp_rows(fields.get("rows").map(String::as_str));
        let field = |name: &str, row: usize| {
            fields
                .get(&format!("{name}_{row}"))
                .cloned()
                .unwrap_or_default()
        };

        let rows = (1..=count)
            .map(|row| FormRow {
                url: field("url", row),
                validity: field("validity", row),
                preferred: field("preferred", row),
            })
            .collect();

        Self { rows }
    }
}

fn clamp_rows(raw: Option<&str>) -> usize {
    raw.and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_ROWS)
}
