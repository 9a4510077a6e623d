#![deny(warnings)]
mod dataset_utils;

use std::{error::Error, path::PathBuf};

use clap::Parser;
use dataset_utils::read_arff;
use rusty_perceptron::{
    class::ClassValues,
    config::RunConfig,
    dataset::Dataset,
    fit::{cross_validate, SeedSource},
    metrics::plot_roc,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Stratified k-fold cross-validation of a single sigmoid perceptron
///
/// Prints one `fold predicted actual score` line per record, ordered as the
/// records appear in the input, followed by the overall accuracy.
#[derive(Parser, Debug)]
#[command(name = "sonar_classifier")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// ARFF file (optionally .gz) whose last attribute is a two-valued `class`
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// TOML run configuration; flags below override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    folds: Option<usize>,

    #[arg(long)]
    epochs: Option<usize>,

    /// Seed for the fold shuffles (clock-seeded when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Start every fold from fresh weights
    #[arg(long)]
    reset_per_fold: bool,

    /// Print the ROC curve as `tpr fpr` lines
    #[arg(long)]
    roc: bool,

    /// Write the ROC curve to a PNG
    #[arg(long, value_name = "FILE")]
    roc_plot: Option<PathBuf>,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig, Box<dyn Error>> {
        let mut config = match self.config.as_ref() {
            Some(path) => RunConfig::load_from_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(folds) = self.folds {
            config.folds = folds;
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.reset_per_fold {
            config.reset_per_fold = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.run_config()?;

    let arff = read_arff(&cli.input)?;
    info!(
        relation = %arff.relation,
        features = arff.features.len(),
        rows = arff.rows.len(),
        "Loaded {}",
        cli.input.display()
    );

    let [positive, negative] = arff.class_values;
    let classes = ClassValues::new(positive, negative)?;
    let dataset = Dataset::new(arff.rows, classes, arff.features.len())?;

    let mut seeds = SeedSource::from_config(&config);
    let report = cross_validate(&dataset, &config, &mut seeds)?;

    for line in report.lines(dataset.classes()) {
        println!("{}", line);
    }
    println!("accuracy: {}", report.accuracy()?);

    if cli.roc || cli.roc_plot.is_some() {
        let points = report.roc_curve()?;
        if cli.roc {
            for point in points.iter() {
                println!("{} {}", point.tpr, point.fpr);
            }
        }
        if let Some(path) = cli.roc_plot.as_ref() {
            plot_roc(&points, path)?;
            info!("Wrote ROC curve to {}", path.display());
        }
    }

    Ok(())
}
