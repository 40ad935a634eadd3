use crate::domain::model::{Category, ConsumptionInput, RawForm};
use crate::utils::error::{FieldError, FootprintError, Result};

/// Parses one raw field. Surrounding whitespace is ignored; anything that is
/// not a base-10 integer in `0..=u32::MAX` is rejected with a reason.
pub fn parse_quantity(raw: &str) -> std::result::Result<u32, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("a value is required".to_string());
    }

    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err("must not be negative".to_string()),
        Ok(n) => u32::try_from(n).map_err(|_| format!("must be at most {}", u32::MAX)),
        Err(_) => {
            // Digits only but too long for i64.
            let digits = trimmed.trim_start_matches(['+', '-']);
            let all_digits = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
            if all_digits && trimmed.starts_with('-') {
                Err("must not be negative".to_string())
            } else if all_digits {
                Err(format!("must be at most {}", u32::MAX))
            } else {
                Err("not a whole number".to_string())
            }
        }
    }
}

/// Validates the whole form. Every offending field is reported at once and
/// nothing is returned unless all ten parse.
pub fn validate_form(form: &RawForm) -> Result<ConsumptionInput> {
    let mut input = ConsumptionInput::default();
    let mut errors = Vec::new();

    for (category, raw) in form.iter() {
        match parse_quantity(raw) {
            Ok(quantity) => input = input.with(category, quantity),
            Err(reason) => errors.push(FieldError {
                field: category.key().to_string(),
                value: raw.to_string(),
                reason,
            }),
        }
    }

    if errors.is_empty() {
        Ok(input)
    } else {
        tracing::debug!("Rejected form with {} invalid field(s)", errors.len());
        Err(FootprintError::InvalidInput { fields: errors })
    }
}

/// Convenience for callers holding the ten strings in category order.
pub fn validate_values(values: [&str; Category::COUNT]) -> Result<ConsumptionInput> {
    let mut form = RawForm::new();
    for (category, value) in Category::ALL.iter().zip(values) {
        form.set(*category, value);
    }
    validate_form(&form)
}
