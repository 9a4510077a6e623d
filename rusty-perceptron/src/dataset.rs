use crate::{
    class::{Class, ClassValues},
    error::{PerceptronError, Result},
};

/// A single labeled row. `id` is the row position at load time and is only
/// used to order output.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: usize,
    pub features: Vec<f64>,
    /// Label as written in the input.
    pub label: String,
    pub class: Class,
}

pub struct Dataset {
    records: Vec<Record>,
    positive: Vec<usize>,
    negative: Vec<usize>,
    classes: ClassValues,
    num_features: usize,
}

impl Dataset {
    /// Builds the dataset from parsed `(features, label)` rows, assigning ids
    /// in row order and splitting the rows by class.
    pub fn new(
        rows: Vec<(Vec<f64>, String)>,
        classes: ClassValues,
        num_features: usize,
    ) -> Result<Self> {
        let mut records = Vec::with_capacity(rows.len());
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for (id, (features, label)) in rows.into_iter().enumerate() {
            if features.len() != num_features {
                return Err(PerceptronError::format(format!(
                    "record {} has {} features, expected {}",
                    id,
                    features.len(),
                    num_features
                )));
            }
            if let Some(position) = features.iter().position(|x| !x.is_finite()) {
                return Err(PerceptronError::format(format!(
                    "record {} has a non-finite value at feature {}",
                    id, position
                )));
            }
            let class = classes.classify(&label).ok_or_else(|| {
                PerceptronError::format(format!(
                    "record {} has label {:?}, which is outside the declared class values {:?}/{:?}",
                    id,
                    label,
                    classes.name(Class::Positive),
                    classes.name(Class::Negative)
                ))
            })?;

            match class {
                Class::Positive => positive.push(id),
                Class::Negative => negative.push(id),
            }
            records.push(Record {
                id,
                features,
                label,
                class,
            });
        }

        Ok(Self {
            records,
            positive,
            negative,
            classes,
            num_features,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn positive(&self) -> Vec<&Record> {
        self.positive.iter().map(|i| &self.records[*i]).collect()
    }

    pub fn negative(&self) -> Vec<&Record> {
        self.negative.iter().map(|i| &self.records[*i]).collect()
    }

    pub fn classes(&self) -> &ClassValues {
        &self.classes
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
