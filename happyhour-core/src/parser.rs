// ============================================================
// CSV PARSER
// ============================================================
// Turns the spreadsheet export into typed deals. Columns are looked up by
// normalized header name, so the sheet's column order does not matter.

use crate::models::{Deal, DEFAULT_FEATURE_PRIORITY};
use std::collections::HashMap;
use std::mem::take;
use tracing::debug;

/// Parse a full CSV export into deals.
///
/// Never fails: short rows, unknown columns and bad cells fall back to
/// defaults, and rows without a venue are dropped.
pub fn parse_deals(csv_text: &str) -> Vec<Deal> {
    let mut lines = csv_text.split('\n');

    let header = match lines.next() {
        Some(h) => h.trim_start_matches('\u{feff}'),
        None => return Vec::new(),
    };
    let columns = ColumnMap::from_header(header);

    let mut deals = Vec::new();
    let mut dropped = 0usize;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let values = split_line(line);
        match columns.deal_from(&values) {
            Some(deal) => deals.push(deal),
            None => dropped += 1,
        }
    }

    debug!(parsed = deals.len(), dropped, "Parsed deals from CSV");
    deals
}

/// Split one CSV line into trimmed fields.
///
/// Commas inside double quotes are kept; `""` inside a quoted field is one
/// literal quote. An unterminated quote runs to the end of the line.
pub fn split_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => values.push(take(&mut field).trim().to_string()),
            _ => field.push(ch),
        }
    }
    values.push(field.trim().to_string());

    values
}

/// Normalize a header cell into a snake_case column name.
///
/// "Deal Type" -> "deal_type", "URL" -> "url", "Taco Tuesday" -> "taco_tuesday"
pub fn normalize_header(header: &str) -> String {
    let mut name = String::with_capacity(header.len());
    let mut pending_sep = false;

    for ch in header.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !name.is_empty() {
                name.push('_');
            }
            pending_sep = false;
            name.push(ch);
        } else {
            pending_sep = true;
        }
    }

    name
}

/// Header name -> column index, built once per parse
#[derive(Debug, Default)]
pub struct ColumnMap {
    columns: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn from_header(header_line: &str) -> Self {
        let mut columns = HashMap::new();
        for (index, cell) in split_line(header_line).iter().enumerate() {
            let name = normalize_header(cell);
            if !name.is_empty() {
                columns.insert(name, index);
            }
        }
        Self { columns }
    }

    /// Trimmed cell for `name`, or "" when the column or cell is missing
    pub fn get<'v>(&self, values: &'v [String], name: &str) -> &'v str {
        self.columns
            .get(name)
            .and_then(|&idx| values.get(idx))
            .map(|v| v.trim())
            .unwrap_or("")
    }

    /// "x" in any case marks a flag as set
    pub fn get_bool(&self, values: &[String], name: &str) -> bool {
        self.get(values, name).eq_ignore_ascii_case("x")
    }

    /// Whole-cell integer, else the default; "3 (top)" and "7.5" are not numbers
    pub fn get_priority(&self, values: &[String], name: &str) -> i32 {
        self.get(values, name)
            .parse()
            .unwrap_or(DEFAULT_FEATURE_PRIORITY)
    }

    /// Build a deal from one row, or `None` when the row has no venue
    pub fn deal_from(&self, values: &[String]) -> Option<Deal> {
        let venue = self.get(values, "venue");
        if venue.is_empty() {
            return None;
        }

        let text = |name: &str| self.get(values, name).to_string();
        let flag = |name: &str| self.get_bool(values, name);

        Some(Deal {
            venue: venue.to_string(),
            city: text("city"),
            day: text("day"),
            deal_type: text("deal_type"),
            time: text("time"),
            deal_description: text("deal_description"),
            url: text("url"),
            beer: flag("beer"),
            wine: flag("wine"),
            cocktail: flag("cocktail"),
            margarita: flag("margarita"),
            nobo: flag("nobo"),
            sobo: flag("sobo"),
            downtown: flag("downtown"),
            lesbo: flag("lesbo"),
            thehill: flag("thehill"),
            central: flag("central"),
            latenight: flag("latenight"),
            taco_tuesday: flag("taco_tuesday"),
            show_ad_card: flag("show_ad_card"),
            coffee: flag("coffee"),
            feature_tier: self.get(values, "feature_tier").to_lowercase(),
            feature_expiration: text("feature_expiration"),
            feature_priority: self.get_priority(values, "feature_priority"),
        })
    }
}
