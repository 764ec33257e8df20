//! Crossing-time analysis over many models.
//!
//! Each model is independent: identifier -> nickel mass -> deposition curve ->
//! crossing search. Models are processed in parallel via Rayon; the output keeps
//! the input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::crossing::crossing_for_curve;
use crate::analysis::model_id::nickel_mass_from_model_id;
use crate::domain::{CrossingResult, DecayConstants, DecayModelParameters, TimeSeries};
use crate::error::AnalysisError;

/// Bolometric curve of one simulation run.
#[derive(Debug, Clone)]
pub struct ModelCurve {
    pub id: String,
    pub curve: TimeSeries,
}

/// Crossing times for one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCrossing {
    pub id: String,
    pub nickel_mass: f64,
    pub crossing: CrossingResult,
}

/// Per-model outcome; failures are kept alongside successes.
#[derive(Debug, Clone)]
pub struct ModelOutcome {
    pub id: String,
    pub result: Result<ModelCrossing, AnalysisError>,
}

pub fn analyze_model(
    model: &ModelCurve,
    constants: &DecayConstants,
    eps: f64,
) -> Result<ModelCrossing, AnalysisError> {
    let nickel_mass = nickel_mass_from_model_id(&model.id)?;
    let params = DecayModelParameters::new(nickel_mass, constants);
    let crossing = crossing_for_curve(&model.curve, &params, eps)?;
    Ok(ModelCrossing {
        id: model.id.clone(),
        nickel_mass,
        crossing,
    })
}

pub fn analyze_models(models: &[ModelCurve], constants: &DecayConstants, eps: f64) -> Vec<ModelOutcome> {
    models
        .par_iter()
        .map(|model| ModelOutcome {
            id: model.id.clone(),
            result: analyze_model(model, constants, eps),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_CROSSING_EPS;
    use crate::models::log_deposition;

    fn model(id: &str, offset: f64) -> ModelCurve {
        let times: Vec<f64> = (0..60).map(|i| i as f64).collect();
        let mass = nickel_mass_from_model_id(id).unwrap_or(0.5);
        let deposition = log_deposition(&DecayModelParameters::standard(mass.max(0.1)), &times).unwrap();
        // rises through the deposition curve around t = 20
        let values = times
            .iter()
            .zip(&deposition)
            .map(|(&t, &d)| d + offset + 0.01 * (t - 20.0))
            .collect();
        ModelCurve {
            id: id.to_string(),
            curve: TimeSeries::new(times, values).unwrap(),
        }
    }

    #[test]
    fn keeps_input_order_and_failures() {
        let models = vec![model("m16", 0.0), model("bad", 0.0), model("m10", 0.0), model("m13", -5.0)];
        let out = analyze_models(&models, &DecayConstants::default(), DEFAULT_CROSSING_EPS);
        let ids: Vec<&str> = out.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["m16", "bad", "m10", "m13"]);

        let first = out[0].result.as_ref().unwrap();
        assert!((first.nickel_mass - 0.6).abs() < 1e-12);
        assert_eq!(first.crossing.t_a, 20.0);
        assert_eq!(first.crossing.t_b, 59.0);

        assert!(matches!(out[1].result, Err(AnalysisError::InvalidModelIdentifier { .. })));
        assert!(matches!(out[2].result, Err(AnalysisError::Domain { .. })));

        let faint = out[3].result.as_ref().unwrap();
        assert!(!faint.crossing.is_found());
    }

    #[test]
    fn parallel_matches_sequential() {
        let models: Vec<ModelCurve> = (1..10).map(|d| model(&format!("m1{d}x"), 0.0)).collect();
        let constants = DecayConstants::default();
        let parallel = analyze_models(&models, &constants, DEFAULT_CROSSING_EPS);
        for (m, outcome) in models.iter().zip(&parallel) {
            let sequential = analyze_model(m, &constants, DEFAULT_CROSSING_EPS);
            assert_eq!(outcome.result, sequential);
        }
    }
}
