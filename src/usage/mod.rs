pub mod types;

pub use types::{Cost, ModelPricing, default_pricing, lookup_pricing};
