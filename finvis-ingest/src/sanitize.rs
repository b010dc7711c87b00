//! Cell cleanup for exported statements ("quote trap", BOM, padding).

const STRIPPED: [char; 3] = ['"', '\'', '\u{FEFF}'];

/// Remove quote characters and byte-order marks anywhere in the cell, then trim.
/// A missing cell yields an empty string.
pub fn clean_cell(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    raw.chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
