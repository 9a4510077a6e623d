use crate::{
    dataset::Record,
    engine::{delta, dot, sigmoid},
};

pub const INITIAL_WEIGHT: f64 = 0.1;

pub trait Module {
    /// Puts every parameter back to its initial value.
    fn reset(&mut self);
    fn parameters(&self) -> &[f64];
    fn forward(&self, x: &[f64]) -> f64;
}

/// A single linear unit with sigmoid output and one weight per feature.
#[derive(Debug, Clone)]
pub struct Perceptron {
    weights: Vec<f64>,
}

impl Perceptron {
    pub fn new(num_features: usize) -> Self {
        Self {
            weights: vec![INITIAL_WEIGHT; num_features],
        }
    }

    pub fn predict(&self, record: &Record) -> f64 {
        self.forward(&record.features)
    }

    /// Runs `epochs` sequential delta-rule updates on one record. Each pass
    /// sees the weights left by the previous one.
    pub fn train_one(&mut self, record: &Record, learning_rate: f64, epochs: usize) {
        let target = record.class.target();
        for _ in 0..epochs {
            let output = self.predict(record);
            let delta = delta(output, target);
            for (w_i, x_i) in self.weights.iter_mut().zip(record.features.iter()) {
                *w_i += delta * learning_rate * x_i;
            }
        }
    }
}

impl Module for Perceptron {
    fn reset(&mut self) {
        for w in self.weights.iter_mut() {
            *w = INITIAL_WEIGHT;
        }
    }

    fn parameters(&self) -> &[f64] {
        &self.weights
    }

    fn forward(&self, x: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, x))
    }
}
