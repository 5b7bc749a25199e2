use crate::error::TerpSheetError;
use glob::Pattern;

/// Criteria for selecting sheets and treating cell errors while reading a workbook.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// Sheet name patterns; `None` accepts every sheet.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Read error cells (`#N/A`, `#DIV/0!`, ...) as empty instead of failing.
    pub error_as_null: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            sheet_name_patterns: None,
            error_as_null: true,
        }
    }
}

impl Criteria {
    /// Builds criteria from glob patterns; an empty list accepts every sheet.
    pub fn with_sheet_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, TerpSheetError> {
        self.sheet_name_patterns = if patterns.is_empty() {
            None
        } else {
            Some(
                patterns
                    .iter()
                    .map(|pattern| Pattern::new(pattern.as_ref()))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };
        Ok(self)
    }

    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        match &self.sheet_name_patterns {
            Some(patterns) => patterns.iter().any(|pattern| pattern.matches(sheet_name)),
            None => true,
        }
    }
}
