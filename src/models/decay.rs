//! Radioactive-decay energy deposition for the Ni56 -> Co56 -> Fe56 chain.
//!
//! The heating rate is a two-exponential superposition:
//!
//! ```text
//! L(t) = M_Ni * (C_Ni * exp(-t/τ_Ni) + C_Co * exp(-t/τ_Co))
//! ```
//!
//! where `τ = t½ / ln 2` are the e-folding times of the two isotopes. The model
//! works in `log10` space to match the bolometric tables it is compared with.

use crate::domain::DecayModelParameters;
use crate::error::AnalysisError;

/// Deposition model bound to one set of parameters.
#[derive(Debug, Clone, Copy)]
pub struct DecayEnergyModel {
    params: DecayModelParameters,
    tau_ni: f64,
    tau_co: f64,
}

impl DecayEnergyModel {
    pub fn new(params: DecayModelParameters) -> Result<Self, AnalysisError> {
        params.validate()?;
        Ok(Self {
            params,
            tau_ni: params.lifetime_ni(),
            tau_co: params.lifetime_co(),
        })
    }

    pub fn params(&self) -> &DecayModelParameters {
        &self.params
    }

    /// Deposition luminosity (erg/s) at time `t` (days).
    pub fn luminosity_at(&self, t: f64) -> Result<f64, AnalysisError> {
        if !(t.is_finite() && t >= 0.0) {
            return Err(AnalysisError::domain(format!(
                "decay law is undefined for time {t}"
            )));
        }
        let p = &self.params;
        let heating =
            p.energy_coeff_ni * (-t / self.tau_ni).exp() + p.energy_coeff_co * (-t / self.tau_co).exp();
        Ok(p.nickel_mass_fraction * heating)
    }

    /// `log10` of the deposition luminosity on every time sample.
    pub fn log_luminosity(&self, times: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        times
            .iter()
            .map(|&t| self.luminosity_at(t).map(f64::log10))
            .collect()
    }
}

/// One-shot form of `DecayEnergyModel::log_luminosity`.
pub fn log_deposition(params: &DecayModelParameters, times: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    DecayEnergyModel::new(*params)?.log_luminosity(times)
}
