//! Typed survey answers.
//!
//! Each categorical survey field is an enum whose variants carry the exact
//! display string the form offers. Parsing is an exact string match; anything
//! else is an [`PricerError::InvalidCategory`].

use crate::errors::{PricerError, PricerResult};
use std::fmt;
use std::str::FromStr;

/// A closed set of answers for one survey field.
pub trait Category: Sized + Copy + 'static {
    /// Survey field name, as keyed in the input record.
    const FIELD: &'static str;
    /// Every answer, in the order a form should offer them.
    const ALL: &'static [Self];

    /// Exact display string of this answer.
    fn label(self) -> &'static str;

    fn parse(value: &str) -> PricerResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == value)
            .ok_or_else(|| PricerError::invalid_category(Self::FIELD, value))
    }

    /// Display strings for populating a select widget.
    fn choices() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

/// Categories with an ordinal code in the training data.
pub trait Ordinal: Category {
    fn code(self) -> u8;
}

/// Categories expanded into indicator columns named `<GROUP>_<suffix>`.
pub trait OneHot: Category {
    const GROUP: &'static str = Self::FIELD;

    fn column_suffix(self) -> &'static str {
        self.label()
    }

    fn column_name(self) -> String {
        format!("{}_{}", Self::GROUP, self.column_suffix())
    }
}

macro_rules! survey_category {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = PricerError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                <$name as Category>::parse(input)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

survey_category!(Gender, "gender" {
    Male => "Male",
    Female => "Female",
});

survey_category!(
    /// Residential zone type.
    Zone, "zone" {
        Urban => "Urban",
        Rural => "Rural",
        Metro => "Metro",
        SemiUrban => "Semi-Urban",
    }
);

survey_category!(Occupation, "occupation" {
    WorkingProfessional => "Working Professional",
    Student => "Student",
    Entrepreneur => "Entrepreneur",
    Retired => "Retired",
});

survey_category!(
    /// Annual income band, in lakhs.
    IncomeLevel, "income_levels" {
        Below10L => "<10L",
        From10To15L => "10L - 15L",
        From16To25L => "16L - 25L",
        From26To35L => "26L - 35L",
        Above35L => "> 35L",
    }
);

survey_category!(HealthConcern, "health_concerns" {
    Low => "Low (Not very concerned)",
    Medium => "Medium (Moderately health-conscious)",
    High => "High (Very health-conscious)",
});

survey_category!(
    /// Beverages consumed per week.
    ConsumeFrequency, "consume_frequency(weekly)" {
        ZeroToTwo => "0-2 times",
        ThreeToFour => "3-4 times",
        FiveToSeven => "5-7 times",
    }
);

survey_category!(ConsumptionSize, "preferable_consumption_size" {
    Small => "Small",
    Medium => "Medium",
    Large => "Large",
});

survey_category!(ConsumptionSituation, "typical_consumption_situations" {
    Active => "Active (eg. Sports, gym)",
    Social => "Social (eg. Parties)",
    Casual => "Casual (eg. At home)",
});

survey_category!(PurchaseChannel, "purchase_channel" {
    Online => "Online",
    RetailStore => "Retail Store",
});

survey_category!(PackagingPreference, "packaging_preference" {
    Simple => "Simple",
    Premium => "Premium",
    EcoFriendly => "Eco-Friendly",
});

survey_category!(FlavorPreference, "flavor_preference" {
    Traditional => "Traditional",
    Exotic => "Exotic",
});

survey_category!(CurrentBrand, "current_brand" {
    Established => "Established",
    Newcomer => "Newcomer",
});

survey_category!(
    /// Number of other brands the respondent knows of.
    BrandAwareness, "awareness_of_other_brands" {
        ZeroToOne => "0 to 1",
        TwoToFour => "2 to 4",
        AboveFour => "above 4",
    }
);

survey_category!(BrandReason, "reasons_for_choosing_brands" {
    Price => "Price",
    Quality => "Quality",
    Availability => "Availability",
    BrandReputation => "Brand Reputation",
});

impl Ordinal for ConsumeFrequency {
    fn code(self) -> u8 {
        match self {
            ConsumeFrequency::ZeroToTwo => 1,
            ConsumeFrequency::ThreeToFour => 2,
            ConsumeFrequency::FiveToSeven => 3,
        }
    }
}

impl Ordinal for BrandAwareness {
    fn code(self) -> u8 {
        match self {
            BrandAwareness::ZeroToOne => 1,
            BrandAwareness::TwoToFour => 2,
            BrandAwareness::AboveFour => 3,
        }
    }
}

impl Ordinal for Zone {
    fn code(self) -> u8 {
        match self {
            Zone::Rural => 1,
            Zone::SemiUrban => 2,
            Zone::Urban => 3,
            Zone::Metro => 4,
        }
    }
}

impl Ordinal for IncomeLevel {
    fn code(self) -> u8 {
        match self {
            IncomeLevel::Below10L => 1,
            IncomeLevel::From10To15L => 2,
            IncomeLevel::From16To25L => 3,
            IncomeLevel::From26To35L => 4,
            IncomeLevel::Above35L => 5,
        }
    }
}

impl Ordinal for HealthConcern {
    fn code(self) -> u8 {
        match self {
            HealthConcern::Low => 0,
            HealthConcern::Medium => 1,
            HealthConcern::High => 2,
        }
    }
}

impl Ordinal for ConsumptionSize {
    fn code(self) -> u8 {
        match self {
            ConsumptionSize::Small => 0,
            ConsumptionSize::Medium => 1,
            ConsumptionSize::Large => 2,
        }
    }
}

// Training data abbreviated gender to its initial.
impl OneHot for Gender {
    fn column_suffix(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl OneHot for Zone {}
impl OneHot for Occupation {}
impl OneHot for CurrentBrand {}
impl OneHot for BrandAwareness {}
impl OneHot for BrandReason {}
impl OneHot for FlavorPreference {}
impl OneHot for PurchaseChannel {}
impl OneHot for PackagingPreference {}
impl OneHot for ConsumptionSituation {}
