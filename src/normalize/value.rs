use crate::spreadsheet::record::RawValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest numeric prefix: sign, digits with optional fraction, optional exponent.
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("Hardcode regex pattern"));

static MILLIGRAMS_PER_GRAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)mg/g").expect("Hardcode regex pattern"));

/// mg/g readings are converted to percent by this divisor.
const MG_PER_G_DIVISOR: f64 = 10.0;

/// Outcome of reading a numeric cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Reading {
    /// A usable percentage-scale value.
    Parsed(f64),
    /// Absent, unparseable, non-finite or negative input, read as 0.
    Defaulted,
}

impl Reading {
    pub fn value(self) -> f64 {
        match self {
            Reading::Parsed(value) => value,
            Reading::Defaulted => 0.0,
        }
    }

    pub fn is_defaulted(self) -> bool {
        self == Reading::Defaulted
    }

    fn from_number(number: f64) -> Reading {
        if !number.is_finite() || number < 0.0 {
            Reading::Defaulted
        } else if number == 0.0 {
            // folds -0 into 0
            Reading::Parsed(0.0)
        } else {
            Reading::Parsed(number)
        }
    }
}

/// Reads a cell as a percentage-scale number.
pub fn parse_percent(raw: &RawValue) -> Reading {
    match raw {
        RawValue::Number(number) => Reading::from_number(*number),
        RawValue::Text(text) => parse_percent_text(text),
        RawValue::Empty | RawValue::Bool(_) => Reading::Defaulted,
    }
}

/// Reads `"22.9%"`, `"750 mg/g"`, `"1,234.5"` or a bare number.
///
/// Thousands separators are dropped first. An `mg/g` reading is divided by 10;
/// a `%` reading or a bare number is taken as is. Trailing text after the
/// leading number is ignored.
pub fn parse_percent_text(text: &str) -> Reading {
    let text = text.trim().replace(',', "");
    if text.is_empty() {
        return Reading::Defaulted;
    }
    let number = match leading_number(&text) {
        Some(number) => number,
        None => return Reading::Defaulted,
    };
    if MILLIGRAMS_PER_GRAM.is_match(&text) {
        Reading::from_number(number / MG_PER_G_DIVISOR)
    } else {
        Reading::from_number(number)
    }
}

/// Total form of [`parse_percent`]: every input yields a number, defaulting to 0.
pub fn normalize_percent(raw: &RawValue) -> f64 {
    parse_percent(raw).value()
}

fn leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(text)
        .and_then(|found| found.as_str().trim().parse::<f64>().ok())
}
