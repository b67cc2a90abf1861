//! Sales territory codes and their human-readable regions.

use serde::{Deserialize, Serialize};

/// A territory code with a known region expansion.
///
/// Codes outside this set (e.g. `LATAM`, `Japan`) have no region; callers
/// leave the region empty rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Territory {
    #[serde(rename = "NA")]
    NorthAmerica,
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "APAC")]
    Apac,
}

impl Territory {
    /// Looks up a territory code (exact, case-sensitive match).
    ///
    /// ```
    /// use sales_model::Territory;
    ///
    /// assert_eq!(Territory::from_code("EMEA"), Some(Territory::Emea));
    /// assert_eq!(Territory::from_code("emea"), None);
    /// assert_eq!(Territory::from_code("LATAM"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NA" => Some(Self::NorthAmerica),
            "EMEA" => Some(Self::Emea),
            "APAC" => Some(Self::Apac),
            _ => None,
        }
    }

    /// Returns the region name written to the `region` column.
    pub fn region(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::Emea => "Europe/Middle East/Africa",
            Self::Apac => "Asia Pacific",
        }
    }
}

/// Expands a territory code into its region name, if mapped.
pub fn region_for(code: &str) -> Option<&'static str> {
    Territory::from_code(code).map(|territory| territory.region())
}
