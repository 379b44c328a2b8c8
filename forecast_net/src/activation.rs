//! Activation functions

/// Logistic sigmoid, mapping any real input into `(0, 1)`
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed in terms of its output
pub fn sigmoid_derivative(output: f64) -> f64 {
    output * (1.0 - output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint_and_bounds() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(40.0) <= 1.0);
        assert!(sigmoid(-40.0) >= 0.0);
        assert!(sigmoid(2.0) > sigmoid(1.0));
    }

    #[test]
    fn test_sigmoid_derivative_peak() {
        assert!((sigmoid_derivative(0.5) - 0.25).abs() < 1e-12);
        assert_eq!(sigmoid_derivative(1.0), 0.0);
        assert_eq!(sigmoid_derivative(0.0), 0.0);
    }
}
