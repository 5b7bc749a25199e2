use crate::spreadsheet::record::RawValue;

/// Rows scanned for the header when nothing else is configured.
pub const HEADER_SCAN_ROWS: usize = 50;

/// Header cells of which at least one must sit next to a `product` cell.
const COMPANION_HEADERS: [&str; 4] = ["location", "room", "category", "product type"];

/// Returns the index of the first of the leading `window` rows that looks like
/// the column header: a `product` cell plus a location, room or category cell.
/// Cells are compared trimmed and lowercased.
pub fn locate_header(rows: &[Vec<RawValue>], window: usize) -> Option<usize> {
    rows.iter().take(window).position(|row| {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.to_text().trim().to_lowercase())
            .collect();
        cells.iter().any(|cell| cell == "product")
            && cells.iter().any(|cell| COMPANION_HEADERS.contains(&cell.as_str()))
    })
}
