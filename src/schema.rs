//! Column layout the classifier was trained against.
//!
//! Positions are the contract: runtimes feed the vector positionally and never
//! look at names.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Number of columns in every feature vector.
pub const FEATURE_COUNT: usize = 37;

/// Number of leading ordinal and derived columns; indicators follow.
pub const SCALAR_COUNT: usize = 8;

pub const TRAIN_FEATURES: [&str; FEATURE_COUNT] = [
    "income_levels",
    "consume_frequency(weekly)",
    "preferable_consumption_size",
    "health_concerns",
    "age_group",
    "cf_ab_score",
    "zas_score",
    "bsi",
    "gender_F",
    "gender_M",
    "zone_Metro",
    "zone_Rural",
    "zone_Semi-Urban",
    "zone_Urban",
    "occupation_Entrepreneur",
    "occupation_Retired",
    "occupation_Student",
    "occupation_Working Professional",
    "current_brand_Established",
    "current_brand_Newcomer",
    "awareness_of_other_brands_0 to 1",
    "awareness_of_other_brands_2 to 4",
    "awareness_of_other_brands_above 4",
    "reasons_for_choosing_brands_Availability",
    "reasons_for_choosing_brands_Brand Reputation",
    "reasons_for_choosing_brands_Price",
    "reasons_for_choosing_brands_Quality",
    "flavor_preference_Exotic",
    "flavor_preference_Traditional",
    "purchase_channel_Online",
    "purchase_channel_Retail Store",
    "packaging_preference_Eco-Friendly",
    "packaging_preference_Premium",
    "packaging_preference_Simple",
    "typical_consumption_situations_Active (eg. Sports, gym)",
    "typical_consumption_situations_Casual (eg. At home)",
    "typical_consumption_situations_Social (eg. Parties)",
];

/// Prefixes of the one-hot groups, in the order they appear in the schema.
pub const INDICATOR_GROUPS: [&str; 10] = [
    "gender",
    "zone",
    "occupation",
    "current_brand",
    "awareness_of_other_brands",
    "reasons_for_choosing_brands",
    "flavor_preference",
    "purchase_channel",
    "packaging_preference",
    "typical_consumption_situations",
];

lazy_static! {
    static ref COLUMN_INDEX: HashMap<&'static str, usize> = TRAIN_FEATURES
        .iter()
        .enumerate()
        .map(|(position, name)| (*name, position))
        .collect();
}

/// Position of `name` in the training schema.
pub fn column_index(name: &str) -> Option<usize> {
    COLUMN_INDEX.get(name).copied()
}

/// Positions of every indicator column belonging to `group`.
pub fn group_columns(group: &str) -> Vec<usize> {
    let prefix = format!("{group}_");
    TRAIN_FEATURES
        .iter()
        .enumerate()
        .skip(SCALAR_COUNT)
        .filter(|(_, name)| name.starts_with(&prefix))
        .map(|(position, _)| position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_are_unique() {
        assert_eq!(COLUMN_INDEX.len(), FEATURE_COUNT);
    }

    #[test]
    fn indicator_groups_cover_every_indicator_column() {
        let covered: usize = INDICATOR_GROUPS
            .iter()
            .map(|group| group_columns(group).len())
            .sum();
        assert_eq!(covered, FEATURE_COUNT - SCALAR_COUNT);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(column_index("income_levels"), Some(0));
        assert_eq!(column_index("bsi"), Some(7));
        assert_eq!(column_index("gender_F"), Some(8));
        assert_eq!(
            column_index("typical_consumption_situations_Social (eg. Parties)"),
            Some(36)
        );
        assert_eq!(column_index("zone_Coastal"), None);
    }

    #[test]
    fn group_sizes() {
        assert_eq!(group_columns("gender"), vec![8, 9]);
        assert_eq!(group_columns("zone").len(), 4);
        assert_eq!(group_columns("reasons_for_choosing_brands").len(), 4);
        assert_eq!(group_columns("flavor_preference").len(), 2);
    }
}
