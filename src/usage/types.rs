use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

const MICROS_PER_DOLLAR: u64 = 1_000_000;

/// A non-negative amount of money, stored as whole micro-dollars so that
/// session totals are exact sums of the per-call costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Self = Self(0);

    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Convert a dollar figure, rounding to the nearest micro-dollar.
    /// Negative and non-finite inputs clamp to zero.
    /// Values beyond `u64::MAX` micro-dollars saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_dollars(dollars: f64) -> Self {
        if !dollars.is_finite() || dollars <= 0.0 {
            return Self::ZERO;
        }
        Self((dollars * 1_000_000.0).round() as u64)
    }

    pub const fn micros(self) -> u64 {
        self.0
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Renders as dollars rounded half-up to 4 decimal places, e.g. `0.1000`.
impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ten_thousandths = self.0.saturating_add(50) / 100;
        write!(
            f,
            "{}.{:04}",
            ten_thousandths / 10_000,
            ten_thousandths % 10_000
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub model_pattern: String,
    pub input_cost_per_million: f64,
    pub output_cost_per_million: f64,
}

impl ModelPricing {
    #[must_use]
    pub fn estimate_cost(&self, input_tokens: u64, output_tokens: u64) -> Cost {
        let input_micros_per_million = micros_per_million(self.input_cost_per_million);
        let output_micros_per_million = micros_per_million(self.output_cost_per_million);

        let input_cost = u128::from(input_tokens) * u128::from(input_micros_per_million)
            / u128::from(MICROS_PER_DOLLAR);
        let output_cost = u128::from(output_tokens) * u128::from(output_micros_per_million)
            / u128::from(MICROS_PER_DOLLAR);
        let total = input_cost + output_cost;

        Cost::from_micros(u64::try_from(total).unwrap_or(u64::MAX))
    }
}

fn micros_per_million(cost_per_million: f64) -> u64 {
    Cost::from_dollars(cost_per_million).micros()
}

fn pricing(model_pattern: &str, input: f64, output: f64) -> ModelPricing {
    ModelPricing {
        model_pattern: model_pattern.into(),
        input_cost_per_million: input,
        output_cost_per_million: output,
    }
}

#[must_use]
pub fn default_pricing() -> Vec<ModelPricing> {
    vec![
        // OpenAI
        pricing("gpt-4o-mini", 0.15, 0.6),
        pricing("gpt-4o", 2.5, 10.0),
        pricing("gpt-4.1-mini", 0.4, 1.6),
        pricing("gpt-4.1", 2.0, 8.0),
        pricing("gpt-4-turbo", 10.0, 30.0),
        pricing("gpt-3.5-turbo", 0.5, 1.5),
        // Anthropic
        pricing("claude-3-5-sonnet", 3.0, 15.0),
        pricing("claude-sonnet-4", 3.0, 15.0),
        pricing("claude-3-5-haiku", 0.8, 4.0),
        pricing("claude-3-haiku", 0.25, 1.25),
        pricing("claude-3-opus", 15.0, 75.0),
        // Mistral
        pricing("mistral-large", 2.0, 6.0),
        pricing("mistral-medium", 0.4, 2.0),
        pricing("mistral-small", 0.2, 0.6),
        pricing("open-mistral-nemo", 0.15, 0.15),
        // Groq
        pricing("llama-3.3-70b-versatile", 0.59, 0.79),
        pricing("llama-3.1-8b-instant", 0.05, 0.08),
        pricing("mixtral-8x7b", 0.24, 0.24),
    ]
}

/// Find the pricing entry whose pattern is the longest substring match of
/// `model`, so `gpt-4o-mini` never resolves to the `gpt-4o` entry.
#[must_use]
pub fn lookup_pricing<'a>(
    model: &str,
    pricing_table: &'a [ModelPricing],
) -> Option<&'a ModelPricing> {
    pricing_table
        .iter()
        .filter(|pricing| model.contains(&pricing.model_pattern))
        .max_by_key(|pricing| pricing.model_pattern.len())
}
