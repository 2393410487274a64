// Best-effort parsing of the published menu sheet

use crate::models::MenuRecord;
use csv::{ReaderBuilder, Trim};
use tracing::debug;

/// Number of positional fields in a menu row: date, category, name, price.
const FIELD_COUNT: usize = 4;

/// Parse raw delimited text into menu records, in file order.
///
/// The first line is the header; its field count defines the expected count
/// for every data row (column names are not otherwise validated). Fields are
/// trimmed of surrounding whitespace. A row whose field count differs from
/// the header's is dropped silently; a bad row never fails the whole sheet.
/// No deduplication.
///
/// The delimiter must be a single ASCII character.
///
/// Quoting and escaping are not interpreted: a field value must not itself
/// contain the delimiter or a line break. This is a known limitation of the
/// input contract, not something the parser papers over.
pub fn parse(raw: &str, delimiter: char) -> Vec<MenuRecord> {
    // The delimiter is cast to a single byte below; a multi-byte char
    // cannot survive that.
    debug_assert!(delimiter.is_ascii(), "delimiter must be ASCII");

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(raw.as_bytes());

    let expected = match reader.headers() {
        Ok(headers) => headers.len(),
        Err(e) => {
            debug!(error = %e, "Failed to read header row, treating sheet as empty");
            return Vec::new();
        }
    };

    if expected < FIELD_COUNT {
        debug!(
            header_fields = expected,
            "Header has fewer fields than a menu row needs, dropping all rows"
        );
        return Vec::new();
    }

    reader
        .records()
        .filter_map(|result| {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    debug!(error = %e, "Dropping unreadable row");
                    return None;
                }
            };
            if row.len() != expected {
                debug!(
                    fields = row.len(),
                    expected_fields = expected,
                    "Dropping row with mismatched field count"
                );
                return None;
            }
            Some(MenuRecord {
                date: row[0].to_string(),
                category: row[1].to_string(),
                name: row[2].to_string(),
                price: row[3].to_string(),
            })
        })
        .collect()
}
