/// Σ wᵢ·xᵢ. There is no bias term.
pub fn dot(weights: &[f64], features: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (w_i, x_i) in weights.iter().zip(features) {
        sum += x_i * w_i;
    }
    sum
}

/// Logistic function, clamped so the result stays strictly inside (0, 1)
/// once `exp` saturates for large `|x|`.
pub fn sigmoid(x: f64) -> f64 {
    (1.0 / (1.0 + (-x).exp())).clamp(f64::EPSILON, 1.0 - f64::EPSILON)
}

/// Delta rule error term for a single sigmoid unit: `o(1-o)(y-o)`.
pub fn delta(output: f64, target: f64) -> f64 {
    output * (1.0 - output) * (target - output)
}
