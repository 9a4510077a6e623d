use crate::error::{PerceptronError, Result};

/// One of the two classes a record can belong to.
///
/// `Positive` is whichever class value was declared first. Training targets
/// are fixed by position: positive trains towards 0 and negative towards 1,
/// while prediction reports positive for scores above 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Positive,
    Negative,
}

impl Class {
    pub fn target(self) -> f64 {
        match self {
            Class::Positive => 0.0,
            Class::Negative => 1.0,
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score > DECISION_THRESHOLD {
            Class::Positive
        } else {
            Class::Negative
        }
    }
}

pub const DECISION_THRESHOLD: f64 = 0.5;

/// The two canonical class value strings, positive first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassValues {
    positive: String,
    negative: String,
}

impl ClassValues {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Result<Self> {
        let positive = positive.into();
        let negative = negative.into();
        if labels_match(&positive, &negative) {
            return Err(PerceptronError::format(format!(
                "class values must differ, got {:?} twice",
                positive
            )));
        }
        Ok(Self { positive, negative })
    }

    /// Case-insensitive lookup of a label.
    pub fn classify(&self, label: &str) -> Option<Class> {
        if labels_match(label, &self.positive) {
            Some(Class::Positive)
        } else if labels_match(label, &self.negative) {
            Some(Class::Negative)
        } else {
            None
        }
    }

    pub fn name(&self, class: Class) -> &str {
        match class {
            Class::Positive => &self.positive,
            Class::Negative => &self.negative,
        }
    }
}

fn labels_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
