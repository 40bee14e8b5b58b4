//! Decoder for the packed header text produced by the native core.
//!
//! The core flattens all header keywords into one blob of the form
//! `"key:value; key:value; ..."`. Decoding is pure string work; fetching the
//! blob itself is the session's job.

use crate::{Error, HeaderMap};

/// Separator between packed header entries.
const ENTRY_SEPARATOR: &str = "; ";

/// Decodes a packed header blob into an ordered key/value map.
///
/// Entries are split on `"; "`; empty entries (including a trailing one left
/// by the core) are skipped. Each entry is split on its first `:` into key
/// and value; an entry with no `:` at all is malformed and yields
/// [`Error::HeaderParse`] rather than a partial map. The value may be empty.
pub fn parse_header(raw: &str) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::new();
    for entry in raw.split(ENTRY_SEPARATOR) {
        let entry = entry.trim_end_matches(';').trim();
        if entry.is_empty() {
            continue;
        }
        let Some((key, value)) = entry.split_once(':') else {
            return Err(Error::HeaderParse {
                entry: entry.to_owned(),
            });
        };
        map.insert(key.to_owned(), value.to_owned());
    }
    Ok(map)
}
