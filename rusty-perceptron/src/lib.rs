#![deny(warnings)]

pub mod class;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod fit;
pub mod folds;
pub mod metrics;
pub mod nn;

pub use error::{ErrorKind, PerceptronError, Result};
