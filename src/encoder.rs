//! Feature encoder.
//!
//! Turns a [`SurveyResponse`] into the 37-column vector the classifier was
//! trained on: six ordinal scalars, two derived scores, then one indicator per
//! categorical answer. Every answer is resolved before any column is written,
//! so an unknown category fails the whole request.

use crate::category::{
    BrandAwareness, BrandReason, Category, ConsumeFrequency, ConsumptionSituation,
    ConsumptionSize, CurrentBrand, FlavorPreference, Gender, HealthConcern, IncomeLevel,
    Occupation, OneHot, Ordinal, PackagingPreference, PurchaseChannel, Zone,
};
use crate::errors::{PricerError, PricerResult};
use crate::schema::{self, FEATURE_COUNT, TRAIN_FEATURES};
use crate::survey::SurveyResponse;

/// Decimal places kept on `cf_ab_score`.
pub const SCORE_DECIMALS: i32 = 2;

const INCOME_LEVELS: usize = 0;
const CONSUME_FREQUENCY: usize = 1;
const CONSUMPTION_SIZE: usize = 2;
const HEALTH_CONCERNS: usize = 3;
const AGE_GROUP: usize = 4;
const CF_AB_SCORE: usize = 5;
const ZAS_SCORE: usize = 6;
const BSI: usize = 7;

/// Ordered feature columns, always fully populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value of the named column, if the schema has it.
    pub fn get(&self, column: &str) -> Option<f64> {
        schema::column_index(column).map(|i| self.values[i])
    }

    /// `(column name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        TRAIN_FEATURES.iter().copied().zip(self.values.iter().copied())
    }

    /// Single-precision copy for runtimes that take `f32` input.
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }

    /// Sum of the indicator columns of one categorical group.
    pub fn indicator_group_sum(&self, group: &str) -> f64 {
        schema::group_columns(group)
            .into_iter()
            .map(|i| self.values[i])
            .sum()
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_half_away(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Age bucket used in training. Ages outside 18..=70 land in bucket 6.
pub fn age_group(age: i32) -> u8 {
    match age {
        18..=25 => 1,
        26..=35 => 2,
        36..=45 => 3,
        46..=55 => 4,
        56..=70 => 5,
        _ => 6,
    }
}

/// Share of consumption frequency against frequency plus brand awareness.
pub fn cf_ab_score(frequency: ConsumeFrequency, awareness: BrandAwareness) -> f64 {
    let fs = f64::from(frequency.code());
    let aw = f64::from(awareness.code());
    round_half_away(fs / (aw + fs), SCORE_DECIMALS)
}

/// Zone and income interaction term.
pub fn zas_score(zone: Zone, income: IncomeLevel) -> f64 {
    f64::from(zone.code()) * f64::from(income.code())
}

struct ParsedResponse {
    gender: Gender,
    zone: Zone,
    occupation: Occupation,
    income: IncomeLevel,
    health: HealthConcern,
    frequency: ConsumeFrequency,
    size: ConsumptionSize,
    situation: ConsumptionSituation,
    channel: PurchaseChannel,
    packaging: PackagingPreference,
    flavor: FlavorPreference,
    brand: CurrentBrand,
    awareness: BrandAwareness,
    reason: BrandReason,
}

impl ParsedResponse {
    fn parse(response: &SurveyResponse) -> PricerResult<Self> {
        Ok(Self {
            gender: Gender::parse(&response.gender)?,
            zone: Zone::parse(&response.zone)?,
            occupation: Occupation::parse(&response.occupation)?,
            income: IncomeLevel::parse(&response.income_levels)?,
            health: HealthConcern::parse(&response.health_concerns)?,
            frequency: ConsumeFrequency::parse(&response.consume_frequency)?,
            size: ConsumptionSize::parse(&response.preferable_consumption_size)?,
            situation: ConsumptionSituation::parse(&response.typical_consumption_situations)?,
            channel: PurchaseChannel::parse(&response.purchase_channel)?,
            packaging: PackagingPreference::parse(&response.packaging_preference)?,
            flavor: FlavorPreference::parse(&response.flavor_preference)?,
            brand: CurrentBrand::parse(&response.current_brand)?,
            awareness: BrandAwareness::parse(&response.awareness_of_other_brands)?,
            reason: BrandReason::parse(&response.reasons_for_choosing_brands)?,
        })
    }

    fn indicator_columns(&self) -> [String; 10] {
        [
            self.gender.column_name(),
            self.zone.column_name(),
            self.occupation.column_name(),
            self.brand.column_name(),
            self.awareness.column_name(),
            self.reason.column_name(),
            self.flavor.column_name(),
            self.channel.column_name(),
            self.packaging.column_name(),
            self.situation.column_name(),
        ]
    }
}

/// Survey-to-feature encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    strict_schema: bool,
}

impl Encoder {
    /// With `strict_schema`, an indicator column missing from the training
    /// schema is an error instead of being dropped with a warning.
    pub fn new(strict_schema: bool) -> Self {
        Self { strict_schema }
    }

    pub fn encode(&self, response: &SurveyResponse) -> PricerResult<FeatureVector> {
        let parsed = ParsedResponse::parse(response)?;

        let cf_ab = cf_ab_score(parsed.frequency, parsed.awareness);
        let zas = zas_score(parsed.zone, parsed.income);

        let mut values = [0.0; FEATURE_COUNT];
        values[INCOME_LEVELS] = f64::from(parsed.income.code());
        values[CONSUME_FREQUENCY] = f64::from(parsed.frequency.code());
        values[CONSUMPTION_SIZE] = f64::from(parsed.size.code());
        values[HEALTH_CONCERNS] = f64::from(parsed.health.code());
        values[AGE_GROUP] = f64::from(age_group(response.age));
        values[CF_AB_SCORE] = cf_ab;
        values[ZAS_SCORE] = zas;
        values[BSI] = (cf_ab + zas) / 2.0;

        for column in parsed.indicator_columns() {
            mark_indicator(&mut values, &column, self.strict_schema)?;
        }

        tracing::debug!(
            age_group = values[AGE_GROUP],
            cf_ab_score = cf_ab,
            zas_score = zas,
            "Encoded survey response"
        );

        Ok(FeatureVector::from_values(values))
    }
}

/// Encode with the default (lenient) schema handling.
pub fn encode(response: &SurveyResponse) -> PricerResult<FeatureVector> {
    Encoder::default().encode(response)
}

fn mark_indicator(
    values: &mut [f64; FEATURE_COUNT],
    column: &str,
    strict_schema: bool,
) -> PricerResult<()> {
    match schema::column_index(column) {
        Some(position) => {
            values[position] = 1.0;
            Ok(())
        }
        None if strict_schema => Err(PricerError::unknown_column(column)),
        None => {
            tracing::warn!(column, "Indicator column not in training schema, dropped");
            Ok(())
        }
    }
}
