//! Nickel mass encoded in model identifiers.
//!
//! Simulation runs are named so that the third character is a single decimal
//! digit giving the Ni56 mass in tenths of a solar mass (e.g. `m16...` ->
//! 0.6 M☉).

use crate::error::AnalysisError;

/// Position of the nickel-mass digit in a model identifier.
pub const NICKEL_DIGIT_POSITION: usize = 2;

/// Solar masses per unit of the nickel-mass digit.
pub const NICKEL_DIGIT_SCALE: f64 = 0.1;

/// Derive the Ni56 mass (solar masses) from a model identifier.
pub fn nickel_mass_from_model_id(id: &str) -> Result<f64, AnalysisError> {
    let Some(ch) = id.chars().nth(NICKEL_DIGIT_POSITION) else {
        return Err(AnalysisError::InvalidModelIdentifier {
            id: id.to_string(),
            reason: format!(
                "expected at least {} characters",
                NICKEL_DIGIT_POSITION + 1
            ),
        });
    };
    let digit = ch.to_digit(10).ok_or_else(|| AnalysisError::InvalidModelIdentifier {
        id: id.to_string(),
        reason: format!(
            "character {} ('{ch}') is not a decimal digit",
            NICKEL_DIGIT_POSITION + 1
        ),
    })?;
    Ok(f64::from(digit) * NICKEL_DIGIT_SCALE)
}
