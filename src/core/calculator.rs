use crate::domain::model::{ConsumptionInput, EmissionFactors, FootprintResult};

impl EmissionFactors {
    /// Weighted sum of the quantities, accumulated in category order.
    pub fn total(&self, input: &ConsumptionInput) -> FootprintResult {
        let grams = input
            .iter()
            .fold(0.0_f64, |acc, (category, quantity)| {
                acc + f64::from(quantity) * self.factor(category)
            });
        FootprintResult(grams)
    }
}

/// Footprint in grams of CO2 using the standard factors.
pub fn compute_total(input: &ConsumptionInput) -> f64 {
    EmissionFactors::STANDARD.total(input).grams()
}
