//! Conversions between `A1`-style cell references and 0-based indexes.

use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?([A-Za-z]{1,3})\$?(\d+)$").expect("Hardcode regex pattern"));

/// Converts column letters (`A`, `AB`) to a 0-based column index.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0usize, |index, letter| {
        letter
            .is_ascii_alphabetic()
            .then(|| index * 26 + (letter.to_ascii_uppercase() as usize - 'A' as usize + 1))
    })
    .map(|index| index - 1)
}

/// Converts a 1-based row number string to a 0-based row index.
pub fn row_to_index(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok().filter(|row| *row > 0).map(|row| row - 1)
}

/// Parses a cell reference such as `B3` into `(row, col)`.
pub fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let captures = REFERENCE.captures(reference)?;
    let col = col_to_index(captures.get(1)?.as_str())?;
    let row = row_to_index(captures.get(2)?.as_str())?;
    Some((row, col))
}

/// Formats `(row, col)` as an upper-case cell reference.
pub fn index_to_reference(row: usize, col: usize) -> String {
    let mut column = col + 1;
    let mut letters = Vec::new();
    while column > 0 {
        column -= 1;
        letters.push((b'A' + (column % 26) as u8) as char);
        column /= 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}
