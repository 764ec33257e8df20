//! Euclidean embedding of standardization points.
//!
//! A catalog object with covariates `(x1, color)` and a magnitude-like value `v`
//! is treated as the point `(x1, color, v)` in R³. The classifier compares the
//! distance of such points from the origin.

use nalgebra::Vector3;

/// `sqrt(x1² + color² + value²)`.
pub fn embedded_radius(x1: f64, color: f64, value: f64) -> f64 {
    Vector3::new(x1, color, value).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_of_axis_points() {
        assert!((embedded_radius(0.0, 0.0, -19.48) - 19.48).abs() < 1e-12);
        assert!((embedded_radius(3.0, 4.0, 0.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn radius_grows_with_covariates() {
        let bare = embedded_radius(0.0, 0.0, -19.0);
        let shifted = embedded_radius(1.5, 0.3, -19.0);
        assert!(shifted > bare);
    }
}
