use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Labels containing any of these are vape products.
const VAPE_MARKERS: [&str; 4] = ["vape", "cartridge", "cartridges", "disposable"];
/// Labels containing any of these are concentrates, once the vape markers have been ruled out.
const CONCENTRATE_MARKERS: [&str; 9] = [
    "budder", "badder", "sugar", "sauce", "resin", "rosin", "wax", "shatter", "concentrate",
];

#[derive(Error, Debug, PartialEq)]
#[error("Unknown category '{0}', expected one of Flower, Vape, Concentrate")]
pub struct UnknownCategory(pub String);

/// The product buckets a board can show. There is no "all" bucket.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[default]
    Flower,
    Vape,
    Concentrate,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Flower, Category::Vape, Category::Concentrate];

    pub fn name(self) -> &'static str {
        match self {
            Category::Flower => "Flower",
            Category::Vape => "Vape",
            Category::Concentrate => "Concentrate",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Collapses a free-text product type into a [`Category`].
///
/// Matching is case-insensitive and the first rule that applies wins:
/// exactly `flower`, then the vape markers, then the concentrate markers.
/// "Live Resin Sauce Cartridge" is therefore a vape.
pub fn classify(label: &str) -> Option<Category> {
    let label = label.to_lowercase();
    if label == "flower" {
        Some(Category::Flower)
    } else if VAPE_MARKERS.iter().any(|marker| label.contains(marker)) {
        Some(Category::Vape)
    } else if CONCENTRATE_MARKERS.iter().any(|marker| label.contains(marker)) {
        Some(Category::Concentrate)
    } else if label == "vape" {
        Some(Category::Vape)
    } else if label == "concentrate" {
        Some(Category::Concentrate)
    } else {
        None
    }
}
