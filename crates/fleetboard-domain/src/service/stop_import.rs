//! Parser for delivery rows pasted from a spreadsheet
//!
//! One row per line, columns: client code, client name, zip code.
//! Each line picks its own delimiter: tab, then `;`, then `,`; the first
//! one producing at least two fields wins.

use serde::{Deserialize, Serialize};

use crate::model::DeliveryStop;

const DELIMITERS: [char; 3] = ['\t', ';', ','];

/// A parsed row, not yet registered (no id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRow {
    pub client_code: String,
    pub client_name: String,
    pub zip_code: String,
}

impl StopRow {
    pub fn into_stop(self, id: String) -> DeliveryStop {
        DeliveryStop {
            id,
            client_code: self.client_code,
            client_name: self.client_name,
            zip_code: self.zip_code,
        }
    }
}

/// Parse pasted text into rows.
///
/// Rows with neither a client code nor a client name are dropped.
pub fn parse_stop_rows(text: &str) -> Vec<StopRow> {
    text.trim().lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<StopRow> {
    let fields = split_fields(line);
    let field = |idx: usize| fields.get(idx).map(|s| s.trim().to_string()).unwrap_or_default();

    let row = StopRow {
        client_code: field(0),
        client_name: field(1),
        zip_code: field(2),
    };
    if row.client_code.is_empty() && row.client_name.is_empty() {
        return None;
    }
    Some(row)
}

fn split_fields(line: &str) -> Vec<&str> {
    for delimiter in DELIMITERS {
        let parts: Vec<&str> = line.split(delimiter).collect();
        if parts.len() >= 2 {
            return parts;
        }
    }
    vec![line]
}
