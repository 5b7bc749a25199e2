use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;
use std::fmt::Display;

/// The tracked terpenes, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Terpene {
    BetaCaryphyllene,
    Limonene,
    Linalool,
    BetaMyrcene,
    Humulene,
    Terpinolene,
    BetaPinene,
    AlphaPinene,
    ThreeCarene,
    AlphaTerpinene,
    BetaEudesmol,
    Bisabolol,
    Camphene,
    Eucalyptol,
    Geraniol,
    Guaiol,
    Isopulegol,
    Nerolidol,
    NerolidolTwo,
    Ocimene,
    OcimeneOne,
    OcimeneTwo,
    PCymene,
    PIsopropyltouluene,
    Terpinene,
    TransNerolidol,
}

impl Terpene {
    pub const COUNT: usize = 26;

    pub const ALL: [Terpene; Terpene::COUNT] = [
        Terpene::BetaCaryphyllene,
        Terpene::Limonene,
        Terpene::Linalool,
        Terpene::BetaMyrcene,
        Terpene::Humulene,
        Terpene::Terpinolene,
        Terpene::BetaPinene,
        Terpene::AlphaPinene,
        Terpene::ThreeCarene,
        Terpene::AlphaTerpinene,
        Terpene::BetaEudesmol,
        Terpene::Bisabolol,
        Terpene::Camphene,
        Terpene::Eucalyptol,
        Terpene::Geraniol,
        Terpene::Guaiol,
        Terpene::Isopulegol,
        Terpene::Nerolidol,
        Terpene::NerolidolTwo,
        Terpene::Ocimene,
        Terpene::OcimeneOne,
        Terpene::OcimeneTwo,
        Terpene::PCymene,
        Terpene::PIsopropyltouluene,
        Terpene::Terpinene,
        Terpene::TransNerolidol,
    ];

    /// Column name used in lab exports, also the display label.
    pub fn name(self) -> &'static str {
        match self {
            Terpene::BetaCaryphyllene => "BetaCaryphyllene",
            Terpene::Limonene => "Limonene",
            Terpene::Linalool => "Linalool",
            Terpene::BetaMyrcene => "BetaMyrcene",
            Terpene::Humulene => "Humulene",
            Terpene::Terpinolene => "Terpinolene",
            Terpene::BetaPinene => "BetaPinene",
            Terpene::AlphaPinene => "AlphaPinene",
            Terpene::ThreeCarene => "ThreeCarene",
            Terpene::AlphaTerpinene => "AlphaTerpinene",
            Terpene::BetaEudesmol => "BetaEudesmol",
            Terpene::Bisabolol => "Bisabolol",
            Terpene::Camphene => "Camphene",
            Terpene::Eucalyptol => "Eucalyptol",
            Terpene::Geraniol => "Geraniol",
            Terpene::Guaiol => "Guaiol",
            Terpene::Isopulegol => "Isopulegol",
            Terpene::Nerolidol => "Nerolidol",
            Terpene::NerolidolTwo => "NerolidolTwo",
            Terpene::Ocimene => "Ocimene",
            Terpene::OcimeneOne => "OcimeneOne",
            Terpene::OcimeneTwo => "OcimeneTwo",
            Terpene::PCymene => "pCymene",
            Terpene::PIsopropyltouluene => "pIsopropyltouluene",
            Terpene::Terpinene => "Terpinene",
            Terpene::TransNerolidol => "TransNerolidol",
        }
    }

    /// Looks a terpene up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Terpene> {
        Terpene::ALL
            .into_iter()
            .find(|terpene| terpene.name().eq_ignore_ascii_case(name))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Display for Terpene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Percentage-scale reading for every terpene; absent readings are 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerpeneProfile {
    values: [f64; Terpene::COUNT],
}

impl TerpeneProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, terpene: Terpene) -> f64 {
        self.values[terpene.index()]
    }

    /// Stores a reading. Negative and non-finite readings are stored as 0.
    pub fn set(&mut self, terpene: Terpene, value: f64) {
        self.values[terpene.index()] = if value.is_finite() && value > 0.0 { value } else { 0.0 };
    }

    /// Builder-style [`TerpeneProfile::set`].
    pub fn with(mut self, terpene: Terpene, value: f64) -> Self {
        self.set(terpene, value);
        self
    }

    /// Readings paired with their terpene, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Terpene, f64)> + '_ {
        Terpene::ALL.into_iter().map(|terpene| (terpene, self.get(terpene)))
    }

    /// Sum of all readings rounded to 2 decimal places.
    pub fn total(&self) -> f64 {
        let sum: f64 = self.values.iter().sum();
        (sum * 100.0).round() / 100.0
    }
}

impl Serialize for TerpeneProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Terpene::COUNT))?;
        for (terpene, value) in self.iter() {
            map.serialize_entry(terpene.name(), &value)?;
        }
        map.end()
    }
}
