use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    class::{Class, ClassValues},
    config::RunConfig,
    dataset::{Dataset, Record},
    error::{PerceptronError, Result},
    folds::stratified_folds,
    metrics::{roc_curve, RocPoint, ScoredPrediction, Tally},
    nn::{Module, Perceptron},
};

/// Where each fold's shuffle seed comes from.
pub enum SeedSource {
    /// A fresh seed from the system clock at every fold.
    Clock,
    /// Seeds drawn from a seeded generator, so runs can be repeated.
    Seeded(StdRng),
}

impl SeedSource {
    pub fn from_seed(seed: u64) -> Self {
        SeedSource::Seeded(StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &RunConfig) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(seed),
            None => SeedSource::Clock,
        }
    }

    pub fn next_seed(&mut self) -> u64 {
        match self {
            SeedSource::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default(),
            SeedSource::Seeded(rng) => rng.gen(),
        }
    }
}

pub struct CrossValidation {
    /// One entry per record, sorted by record id.
    pub predictions: Vec<ScoredPrediction>,
    pub tally: Tally,
    /// Model weights after the last fold.
    pub weights: Vec<f64>,
}

impl CrossValidation {
    pub fn accuracy(&self) -> Result<f64> {
        self.tally.accuracy()
    }

    pub fn roc_curve(&self) -> Result<Vec<RocPoint>> {
        roc_curve(&self.predictions)
    }

    pub fn lines<'a>(&'a self, classes: &'a ClassValues) -> impl Iterator<Item = String> + 'a {
        self.predictions.iter().map(move |p| p.line(classes))
    }
}

/// Stratified k-fold cross-validation of a single perceptron.
///
/// Every fold trains on the other folds' records and then scores its own.
/// Unless `reset_per_fold` is set, the same model keeps learning across
/// folds, so later folds start from the weights the earlier ones left.
pub fn cross_validate(
    dataset: &Dataset,
    config: &RunConfig,
    seeds: &mut SeedSource,
) -> Result<CrossValidation> {
    config.validate()?;
    if config.folds > dataset.len() {
        return Err(PerceptronError::config(format!(
            "fold count {} exceeds the dataset size {}",
            config.folds,
            dataset.len()
        )));
    }

    let positive = dataset.positive();
    let negative = dataset.negative();
    let folds = stratified_folds(&positive, &negative, config.folds)?;

    info!(
        records = dataset.len(),
        positive = positive.len(),
        negative = negative.len(),
        folds = config.folds,
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        reset_per_fold = config.reset_per_fold,
        "Starting cross-validation"
    );
    let sizes: Vec<usize> = folds.iter().map(|f| f.len()).collect();
    debug!(sizes = ?sizes, "Built stratified folds");
    if folds.iter().any(|f| f.is_empty()) {
        warn!(sizes = ?sizes, "Some folds are empty and will score no records");
    }

    let mut model = Perceptron::new(dataset.num_features());
    let mut predictions = Vec::with_capacity(dataset.len());
    let mut tally = Tally::default();

    for (i, fold) in folds.iter().enumerate() {
        if config.reset_per_fold {
            model.reset();
        }

        let mut test: Vec<&Record> = fold.clone();
        let mut train: Vec<&Record> = folds
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .flat_map(|(_, other)| other.iter().copied())
            .collect();

        let seed = seeds.next_seed();
        debug!(fold = i + 1, seed, "Shuffling fold");
        train.shuffle(&mut StdRng::seed_from_u64(seed));
        test.shuffle(&mut StdRng::seed_from_u64(seed));

        for record in train.iter() {
            model.train_one(record, config.learning_rate, config.epochs);
        }

        let mut fold_tally = Tally::default();
        for record in test {
            let score = model.predict(record);
            let prediction = ScoredPrediction {
                id: record.id,
                fold: i + 1,
                predicted: Class::from_score(score),
                actual: record.class,
                actual_label: record.label.clone(),
                score,
            };
            fold_tally.record(&prediction);
            predictions.push(prediction);
        }

        info!(
            fold = i + 1,
            train = train.len(),
            test = fold_tally.tested,
            correct = fold_tally.correct,
            "Fold complete"
        );
        tally.merge(fold_tally);
    }

    predictions.sort_by_key(|p| p.id);

    Ok(CrossValidation {
        predictions,
        tally,
        weights: model.parameters().to_vec(),
    })
}
