//! Fixed catalogues the operator chooses from when composing a request

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[default]
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        BloodGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == wanted)
            .ok_or_else(|| SharedError::unknown_value("blood group", s))
    }
}

/// Blood product a bank can supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodProduct {
    #[serde(rename = "Whole Blood")]
    WholeBlood,
    #[serde(rename = "Plasma")]
    Plasma,
    #[serde(rename = "Platelets")]
    Platelets,
    #[serde(rename = "Packed RBC")]
    PackedRbc,
    #[serde(rename = "Fresh Frozen Plasma")]
    FreshFrozenPlasma,
}

impl BloodProduct {
    pub const ALL: [BloodProduct; 5] = [
        BloodProduct::WholeBlood,
        BloodProduct::Plasma,
        BloodProduct::Platelets,
        BloodProduct::PackedRbc,
        BloodProduct::FreshFrozenPlasma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodProduct::WholeBlood => "Whole Blood",
            BloodProduct::Plasma => "Plasma",
            BloodProduct::Platelets => "Platelets",
            BloodProduct::PackedRbc => "Packed RBC",
            BloodProduct::FreshFrozenPlasma => "Fresh Frozen Plasma",
        }
    }
}

impl fmt::Display for BloodProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodProduct {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BloodProduct::ALL
            .into_iter()
            .find(|product| product.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SharedError::unknown_value("blood product", s))
    }
}

/// How urgently the hospital needs the units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    #[default]
    High,
    Critical,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Urgency::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SharedError::unknown_value("urgency", s))
    }
}
