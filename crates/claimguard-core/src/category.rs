//! Claim categories and their static policy requirement profiles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a claim is classified into when no knowledge store answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    AutoAccident,
    PropertyDamage,
    Medical,
    General,
}

impl ClaimCategory {
    /// Snake-case identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::AutoAccident => "auto_accident",
            ClaimCategory::PropertyDamage => "property_damage",
            ClaimCategory::Medical => "medical",
            ClaimCategory::General => "general",
        }
    }

    /// Human-cased name used in instruction context blocks
    pub fn display_name(&self) -> &'static str {
        match self {
            ClaimCategory::AutoAccident => "Auto Accident",
            ClaimCategory::PropertyDamage => "Property Damage",
            ClaimCategory::Medical => "Medical",
            ClaimCategory::General => "General",
        }
    }

    /// Requirement profile for this category.
    ///
    /// `General` has no profile of its own and resolves to the auto accident
    /// profile.
    pub fn profile(&self) -> &'static CategoryProfile {
        match self {
            ClaimCategory::AutoAccident | ClaimCategory::General => &AUTO_ACCIDENT,
            ClaimCategory::PropertyDamage => &PROPERTY_DAMAGE,
            ClaimCategory::Medical => &MEDICAL,
        }
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static policy requirements for one claim category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProfile {
    pub coverage_types: &'static [&'static str],
    pub required_info: &'static [&'static str],
    pub typical_deductible: &'static str,
    pub processing_time: &'static str,
    pub documentation: &'static str,
}

pub static AUTO_ACCIDENT: CategoryProfile = CategoryProfile {
    coverage_types: &["Collision", "Comprehensive", "Liability"],
    required_info: &[
        "Police report number",
        "Other driver information",
        "Witness statements",
    ],
    typical_deductible: "$500-$1000",
    processing_time: "7-14 business days",
    documentation: "Photos of damage, repair estimates, police report",
};

pub static PROPERTY_DAMAGE: CategoryProfile = CategoryProfile {
    coverage_types: &["Homeowners", "Renters", "Property"],
    required_info: &["Date of incident", "Cause of damage", "Extent of damage"],
    typical_deductible: "$1000-$2500",
    processing_time: "10-21 business days",
    documentation: "Photos, repair estimates, receipts for damaged items",
};

pub static MEDICAL: CategoryProfile = CategoryProfile {
    coverage_types: &["Medical Payments", "Personal Injury Protection"],
    required_info: &[
        "Medical provider information",
        "Treatment dates",
        "Diagnosis",
    ],
    typical_deductible: "$0-$500",
    processing_time: "14-30 business days",
    documentation: "Medical bills, treatment records, prescription receipts",
};
