//! Crossing-time search between an observed light curve and the decay
//! deposition curve.
//!
//! With `diff[i] = model[i] - observed[i]`, a sample qualifies when
//! `diff[i] < eps`, i.e. the observed luminosity has reached the deposition
//! curve (or exceeds it). `t_a` is the first qualifying sample and `t_b` the
//! last. Samples in between are not required to qualify, so noisy curves with
//! several sign changes still yield the outermost pair.

use crate::domain::{CrossingResult, DecayModelParameters, TimeSeries};
use crate::error::AnalysisError;
use crate::models::log_deposition;

/// Find `t_a` / `t_b` on a shared time grid.
///
/// Returns `CrossingResult::NOT_FOUND` when no sample qualifies.
pub fn find_crossing_times(
    times: &[f64],
    observed: &[f64],
    model: &[f64],
    eps: f64,
) -> Result<CrossingResult, AnalysisError> {
    AnalysisError::ensure_len("observed curve", times.len(), observed.len())?;
    AnalysisError::ensure_len("model curve", times.len(), model.len())?;

    let mut qualifying = model
        .iter()
        .zip(observed)
        .enumerate()
        .filter(|(_, (m, o))| *m - *o < eps)
        .map(|(i, _)| i);

    let Some(first) = qualifying.next() else {
        return Ok(CrossingResult::NOT_FOUND);
    };
    let last = qualifying.last().unwrap_or(first);

    Ok(CrossingResult {
        t_a: times[first],
        t_b: times[last],
        value_at_a: observed[first],
        value_at_b: observed[last],
    })
}

/// Evaluate the deposition curve on the observed grid and search it.
pub fn crossing_for_curve(
    curve: &TimeSeries,
    params: &DecayModelParameters,
    eps: f64,
) -> Result<CrossingResult, AnalysisError> {
    let model = log_deposition(params, curve.times())?;
    find_crossing_times(curve.times(), curve.values(), &model, eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_CROSSING_EPS;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    fn grid(n: usize, step: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * step).collect()
    }

    #[test]
    fn identical_curves_span_whole_grid() {
        let times = grid(30, 2.0);
        let params = DecayModelParameters::standard(0.6);
        let model = log_deposition(&params, &times).unwrap();
        let out = find_crossing_times(&times, &model, &model, DEFAULT_CROSSING_EPS).unwrap();
        assert_eq!(out.t_a, times[0]);
        assert_eq!(out.t_b, *times.last().unwrap());
        assert_eq!(out.value_at_a, model[0]);
        assert_eq!(out.value_at_b, *model.last().unwrap());
    }

    #[test]
    fn observed_below_model_everywhere_is_sentinel() {
        let times = grid(20, 3.0);
        let model = log_deposition(&DecayModelParameters::standard(0.3), &times).unwrap();
        let observed: Vec<f64> = model.iter().map(|m| m - 0.2).collect();
        let out = find_crossing_times(&times, &observed, &model, DEFAULT_CROSSING_EPS).unwrap();
        assert_eq!(out, CrossingResult::NOT_FOUND);
        assert!(!out.is_found());
    }

    #[test]
    fn picks_outermost_qualifying_samples() {
        let times = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0];
        let model = [43.0, 42.8, 42.6, 42.4, 42.2, 42.0];
        // qualifies at 10 and 20 only; 15 sits below the model in between
        let observed = [42.0, 42.5, 42.7, 42.0, 42.3, 41.0];
        let out = find_crossing_times(&times, &observed, &model, 1e-5).unwrap();
        assert_eq!(out.t_a, 10.0);
        assert_eq!(out.t_b, 20.0);
        assert_eq!(out.value_at_a, 42.7);
        assert_eq!(out.value_at_b, 42.3);
    }

    #[test]
    fn single_qualifying_sample_gives_equal_times() {
        let times = [0.0, 1.0, 2.0];
        let model = [1.0, 1.0, 1.0];
        let observed = [0.0, 1.5, 0.0];
        let out = find_crossing_times(&times, &observed, &model, 1e-5).unwrap();
        assert_eq!((out.t_a, out.t_b), (1.0, 1.0));
    }

    #[test]
    fn tolerance_is_strict() {
        let times = [0.0, 1.0];
        let model = [1.0, 1.0];
        let observed = [0.5, 0.5];
        let out = find_crossing_times(&times, &observed, &model, 0.5).unwrap();
        assert!(!out.is_found());
        let out = find_crossing_times(&times, &observed, &model, 0.5 + 1e-9).unwrap();
        assert!(out.is_found());
    }

    #[test]
    fn empty_inputs_are_sentinel() {
        let out = find_crossing_times(&[], &[], &[], 1e-5).unwrap();
        assert!(!out.is_found());
    }

    #[test]
    fn misaligned_inputs_fail() {
        let err = find_crossing_times(&[0.0, 1.0], &[1.0], &[1.0, 1.0], 1e-5).unwrap_err();
        assert!(matches!(err, AnalysisError::DimensionMismatch { .. }));
        let err = find_crossing_times(&[0.0, 1.0], &[1.0, 1.0], &[1.0], 1e-5).unwrap_err();
        assert!(matches!(err, AnalysisError::DimensionMismatch { .. }));
    }

    #[test]
    fn noisy_curve_is_deterministic() {
        let times = grid(120, 0.5);
        let params = DecayModelParameters::standard(0.6);
        let model = log_deposition(&params, &times).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 0.05).unwrap();
        let observed: Vec<f64> = model.iter().map(|m| m + noise.sample(&mut rng)).collect();
        let curve = TimeSeries::new(times.clone(), observed).unwrap();

        let first = crossing_for_curve(&curve, &params, DEFAULT_CROSSING_EPS).unwrap();
        let second = crossing_for_curve(&curve, &params, DEFAULT_CROSSING_EPS).unwrap();
        assert_eq!(first, second);
        assert!(first.is_found());
        assert!(first.t_a <= first.t_b);
    }

    #[test]
    fn curve_with_negative_time_is_domain_error() {
        let curve = TimeSeries::new(vec![-1.0, 0.0], vec![42.0, 42.0]).unwrap();
        let err = crossing_for_curve(&curve, &DecayModelParameters::standard(0.1), 1e-5).unwrap_err();
        assert!(matches!(err, AnalysisError::Domain { .. }));
    }
}
