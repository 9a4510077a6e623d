use std::{fmt::Display, path::Path};

use plotters::{
    prelude::{BitMapBackend, ChartBuilder, IntoDrawingArea, LabelAreaPosition},
    series::LineSeries,
    style::{BLACK, GREEN, WHITE},
};

use crate::{
    class::{Class, ClassValues},
    error::{PerceptronError, Result},
};

/// Outcome of scoring one test record during cross-validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPrediction {
    pub id: usize,
    /// 1-based fold number.
    pub fold: usize,
    pub predicted: Class,
    pub actual: Class,
    /// Label as written in the input.
    pub actual_label: String,
    pub score: f64,
}

impl ScoredPrediction {
    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }

    /// `{fold} {predicted} {actual} {score}`
    pub fn line(&self, classes: &ClassValues) -> String {
        format!(
            "{} {} {} {}",
            self.fold,
            classes.name(self.predicted),
            self.actual_label,
            format_score(self.score)
        )
    }
}

/// At most 12 fractional digits, trailing zeros dropped.
pub fn format_score(score: f64) -> String {
    let fixed = format!("{:.12}", score);
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub tested: usize,
}

impl Tally {
    pub fn record(&mut self, prediction: &ScoredPrediction) {
        self.tested += 1;
        if prediction.is_correct() {
            self.correct += 1;
        }
    }

    pub fn merge(&mut self, other: Tally) {
        self.correct += other.correct;
        self.tested += other.tested;
    }

    pub fn accuracy(&self) -> Result<f64> {
        if self.tested == 0 {
            return Err(PerceptronError::division(
                "accuracy is undefined when no records were tested",
            ));
        }
        Ok(self.correct as f64 / self.tested as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    pub tpr: f64,
    pub fpr: f64,
}

impl RocPoint {
    fn new(tp: usize, fp: usize, positives: usize, negatives: usize) -> Self {
        Self {
            tpr: tp as f64 / positives as f64,
            fpr: fp as f64 / negatives as f64,
        }
    }
}

/// Walks the predictions in ascending score order and emits a point each time
/// the actual class changes, using the counts from before the current record.
/// The walk ends with the point covering every record, which is `(1, 1)`.
pub fn roc_curve(predictions: &[ScoredPrediction]) -> Result<Vec<RocPoint>> {
    let positives = predictions
        .iter()
        .filter(|p| p.actual == Class::Positive)
        .count();
    let negatives = predictions.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(PerceptronError::division(format!(
            "ROC needs both classes, got {} positive and {} negative records",
            positives, negatives
        )));
    }

    let mut sorted: Vec<&ScoredPrediction> = predictions.iter().collect();
    sorted.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut points = Vec::new();
    let mut tp = 0;
    let mut fp = 0;
    let mut previous: Option<Class> = None;
    for prediction in sorted {
        if previous.is_some_and(|class| class != prediction.actual) {
            points.push(RocPoint::new(tp, fp, positives, negatives));
        }
        match prediction.actual {
            Class::Positive => tp += 1,
            Class::Negative => fp += 1,
        }
        previous = Some(prediction.actual);
    }
    points.push(RocPoint::new(tp, fp, positives, negatives));
    Ok(points)
}

fn plot_error(path: &Path, err: impl Display) -> PerceptronError {
    PerceptronError::Plot {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Draws the curve (false positive rate on x, true positive rate on y) to a
/// PNG, with the chance diagonal for reference.
pub fn plot_roc(points: &[RocPoint], path: &Path) -> Result<()> {
    let root_area = BitMapBackend::new(path, (1080, 1080)).into_drawing_area();
    root_area.fill(&WHITE).map_err(|err| plot_error(path, err))?;

    let mut ctx = ChartBuilder::on(&root_area)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .caption("ROC", ("sans-serif", 40))
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(|err| plot_error(path, err))?;

    ctx.configure_mesh()
        .x_desc("false positive rate")
        .y_desc("true positive rate")
        .draw()
        .map_err(|err| plot_error(path, err))?;

    ctx.draw_series(LineSeries::new(vec![(0.0, 0.0), (1.0, 1.0)], &BLACK))
        .map_err(|err| plot_error(path, err))?;

    let curve = std::iter::once((0.0, 0.0)).chain(points.iter().map(|p| (p.fpr, p.tpr)));
    ctx.draw_series(LineSeries::new(curve, &GREEN))
        .map_err(|err| plot_error(path, err))?;

    root_area.present().map_err(|err| plot_error(path, err))?;
    Ok(())
}
