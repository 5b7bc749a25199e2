use crate::spreadsheet::record::RawRecord;

/// Finds the record key matching the first alias that matches any key.
///
/// Aliases are tried in the given order; for each alias, keys are scanned in
/// column order and compared case-insensitively.
pub fn resolve<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| {
        let alias = alias.to_lowercase();
        record.keys().find(|key| key.to_lowercase() == alias)
    })
}
