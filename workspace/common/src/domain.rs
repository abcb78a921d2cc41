//! Core agronomic vocabulary shared by the backend, the forecast engine
//! and the frontend: cultivation seasons, administrative districts and
//! user roles. Wire forms and encoding indices are fixed here so every
//! crate agrees on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Paddy cultivation season. Sri Lanka runs two per year; the trained
/// models are season-specific, so the encoded index selects the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Season {
    Maha,
    Yala,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::Maha, Season::Yala];

    /// Feature encoding used when the models were fitted: Maha = 0, Yala = 1.
    pub fn encoded(&self) -> u8 {
        match self {
            Season::Maha => 0,
            Season::Yala => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Maha => "Maha",
            Season::Yala => "Yala",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ();

    /// Exact match only. The prediction endpoint rejects any other
    /// casing, so the shared parser must not be more forgiving.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Maha" => Ok(Season::Maha),
            "Yala" => Ok(Season::Yala),
            _ => Err(()),
        }
    }
}

/// The 24 districts covered by the production dataset, in the fixed
/// order the models were trained with. The list position is the
/// district's feature encoding, so the order must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum District {
    #[serde(rename = "AMPARA")]
    Ampara,
    #[serde(rename = "ANURADHAPURA")]
    Anuradhapura,
    #[serde(rename = "BADULLA")]
    Badulla,
    #[serde(rename = "BATTICALOA")]
    Batticaloa,
    #[serde(rename = "COLOMBO")]
    Colombo,
    #[serde(rename = "GALLE")]
    Galle,
    #[serde(rename = "GAMPAHA")]
    Gampaha,
    #[serde(rename = "HAMBANTOTA")]
    Hambantota,
    #[serde(rename = "JAFFNA")]
    Jaffna,
    #[serde(rename = "KALUTARA")]
    Kalutara,
    #[serde(rename = "KANDY")]
    Kandy,
    #[serde(rename = "KEGALLE")]
    Kegalle,
    #[serde(rename = "KILINOCHCHI")]
    Kilinochchi,
    #[serde(rename = "KURUNEGALA")]
    Kurunegala,
    #[serde(rename = "MANNAR")]
    Mannar,
    #[serde(rename = "MATALE")]
    Matale,
    #[serde(rename = "MONARAGALA")]
    Monaragala,
    #[serde(rename = "MULLAITIVU")]
    Mullaitivu,
    #[serde(rename = "NUWARA ELIYA")]
    NuwaraEliya,
    #[serde(rename = "POLONNARUWA")]
    Polonnaruwa,
    #[serde(rename = "PUTTALAM")]
    Puttalam,
    #[serde(rename = "RATNAPURA")]
    Ratnapura,
    #[serde(rename = "TRINCOMALEE")]
    Trincomalee,
    #[serde(rename = "VAVUNIYA")]
    Vavuniya,
}

impl District {
    pub const ALL: [District; 24] = [
        District::Ampara,
        District::Anuradhapura,
        District::Badulla,
        District::Batticaloa,
        District::Colombo,
        District::Galle,
        District::Gampaha,
        District::Hambantota,
        District::Jaffna,
        District::Kalutara,
        District::Kandy,
        District::Kegalle,
        District::Kilinochchi,
        District::Kurunegala,
        District::Mannar,
        District::Matale,
        District::Monaragala,
        District::Mullaitivu,
        District::NuwaraEliya,
        District::Polonnaruwa,
        District::Puttalam,
        District::Ratnapura,
        District::Trincomalee,
        District::Vavuniya,
    ];

    /// Canonical (dataset) spelling, uppercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            District::Ampara => "AMPARA",
            District::Anuradhapura => "ANURADHAPURA",
            District::Badulla => "BADULLA",
            District::Batticaloa => "BATTICALOA",
            District::Colombo => "COLOMBO",
            District::Galle => "GALLE",
            District::Gampaha => "GAMPAHA",
            District::Hambantota => "HAMBANTOTA",
            District::Jaffna => "JAFFNA",
            District::Kalutara => "KALUTARA",
            District::Kandy => "KANDY",
            District::Kegalle => "KEGALLE",
            District::Kilinochchi => "KILINOCHCHI",
            District::Kurunegala => "KURUNEGALA",
            District::Mannar => "MANNAR",
            District::Matale => "MATALE",
            District::Monaragala => "MONARAGALA",
            District::Mullaitivu => "MULLAITIVU",
            District::NuwaraEliya => "NUWARA ELIYA",
            District::Polonnaruwa => "POLONNARUWA",
            District::Puttalam => "PUTTALAM",
            District::Ratnapura => "RATNAPURA",
            District::Trincomalee => "TRINCOMALEE",
            District::Vavuniya => "VAVUNIYA",
        }
    }

    /// Human-facing spelling for form controls.
    pub fn label(&self) -> &'static str {
        match self {
            District::Ampara => "Ampara",
            District::Anuradhapura => "Anuradhapura",
            District::Badulla => "Badulla",
            District::Batticaloa => "Batticaloa",
            District::Colombo => "Colombo",
            District::Galle => "Galle",
            District::Gampaha => "Gampaha",
            District::Hambantota => "Hambantota",
            District::Jaffna => "Jaffna",
            District::Kalutara => "Kalutara",
            District::Kandy => "Kandy",
            District::Kegalle => "Kegalle",
            District::Kilinochchi => "Kilinochchi",
            District::Kurunegala => "Kurunegala",
            District::Mannar => "Mannar",
            District::Matale => "Matale",
            District::Monaragala => "Monaragala",
            District::Mullaitivu => "Mullaitivu",
            District::NuwaraEliya => "Nuwara Eliya",
            District::Polonnaruwa => "Polonnaruwa",
            District::Puttalam => "Puttalam",
            District::Ratnapura => "Ratnapura",
            District::Trincomalee => "Trincomalee",
            District::Vavuniya => "Vavuniya",
        }
    }

    /// Position in [`District::ALL`], the feature encoding the models expect.
    pub fn encoded(&self) -> usize {
        District::ALL
            .iter()
            .position(|d| d == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for District {
    type Err = ();

    /// Case-insensitive lookup against the canonical spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        District::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or(())
    }
}

/// Application role assigned once during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Researcher,
    Officer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Farmer, Role::Researcher, Role::Officer, Role::Admin];

    /// Wire form, lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Researcher => "researcher",
            Role::Officer => "officer",
            Role::Admin => "admin",
        }
    }

    /// Display label for the onboarding picker.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Farmer => "Farmer",
            Role::Researcher => "Researcher",
            Role::Officer => "Agriculture Officer",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "researcher" => Ok(Role::Researcher),
            "officer" => Ok(Role::Officer),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_encoding_is_stable() {
        assert_eq!(Season::Maha.encoded(), 0);
        assert_eq!(Season::Yala.encoded(), 1);
    }

    #[test]
    fn test_season_parsing_requires_exact_spelling() {
        assert_eq!("Maha".parse::<Season>(), Ok(Season::Maha));
        assert_eq!("Yala".parse::<Season>(), Ok(Season::Yala));
        assert!("maha".parse::<Season>().is_err());
        assert!("YALA".parse::<Season>().is_err());
        assert!("monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn test_district_list_order_matches_encoding() {
        assert_eq!(District::ALL.len(), 24);
        assert_eq!(District::Ampara.encoded(), 0);
        assert_eq!(District::Colombo.encoded(), 4);
        assert_eq!(District::NuwaraEliya.encoded(), 18);
        assert_eq!(District::Vavuniya.encoded(), 23);
        // ALL is sorted by canonical spelling; the encoding relies on it.
        let mut sorted = District::ALL.map(|d| d.as_str());
        sorted.sort_unstable();
        assert_eq!(sorted, District::ALL.map(|d| d.as_str()));
    }

    #[test]
    fn test_district_parses_any_case_and_spacing() {
        assert_eq!("Colombo".parse::<District>(), Ok(District::Colombo));
        assert_eq!("nuwara eliya".parse::<District>(), Ok(District::NuwaraEliya));
        assert_eq!(" TRINCOMALEE ".parse::<District>(), Ok(District::Trincomalee));
        assert!("Matara".parse::<District>().is_err());
    }

    #[test]
    fn test_district_serializes_to_canonical_spelling() {
        let json = serde_json::to_string(&District::NuwaraEliya).unwrap();
        assert_eq!(json, "\"NUWARA ELIYA\"");
        let back: District = serde_json::from_str(&json).unwrap();
        assert_eq!(back, District::NuwaraEliya);
    }

    #[test]
    fn test_role_wire_form_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Officer).unwrap(), "\"officer\"");
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(Role::Officer.label(), "Agriculture Officer");
        assert!("guest".parse::<Role>().is_err());
    }
}
