use crate::{
    dataset::Record,
    error::{PerceptronError, Result},
};

pub type Fold<'a> = Vec<&'a Record>;

/// Distributes records into `k` stratified folds.
///
/// Positive records go round-robin into buckets `0..k` in their original
/// order, then negative records do the same with the counter restarted at 0.
/// Buckets may end up empty when a class is smaller than `k`.
pub fn stratified_folds<'a>(
    positive: &[&'a Record],
    negative: &[&'a Record],
    k: usize,
) -> Result<Vec<Fold<'a>>> {
    if k < 2 {
        return Err(PerceptronError::config(format!(
            "fold count must be >= 2, got {}",
            k
        )));
    }

    let mut folds: Vec<Fold<'a>> = (0..k).map(|_| Vec::new()).collect();
    for partition in [positive, negative] {
        for (i, record) in partition.iter().enumerate() {
            folds[i % k].push(*record);
        }
    }
    Ok(folds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;
    use std::collections::HashSet;

    fn records(ids: std::ops::Range<usize>, class: Class) -> Vec<Record> {
        ids.map(|id| Record {
            id,
            features: vec![id as f64],
            label: format!("{:?}", class),
            class,
        })
        .collect()
    }

    fn ids(fold: &Fold) -> Vec<usize> {
        fold.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_round_robin_restarts_per_class() {
        let pos = records(0..5, Class::Positive);
        let neg = records(5..10, Class::Negative);
        let pos: Vec<&Record> = pos.iter().collect();
        let neg: Vec<&Record> = neg.iter().collect();

        let folds = stratified_folds(&pos, &neg, 5).unwrap();
        assert_eq!(5, folds.len());
        for (i, fold) in folds.iter().enumerate() {
            assert_eq!(vec![i, i + 5], ids(fold));
        }
    }

    #[test]
    fn test_uneven_classes() {
        let pos = records(0..7, Class::Positive);
        let neg = records(7..10, Class::Negative);
        let pos: Vec<&Record> = pos.iter().collect();
        let neg: Vec<&Record> = neg.iter().collect();

        let folds = stratified_folds(&pos, &neg, 3).unwrap();
        assert_eq!(vec![0, 3, 6, 7], ids(&folds[0]));
        assert_eq!(vec![1, 4, 8], ids(&folds[1]));
        assert_eq!(vec![2, 5, 9], ids(&folds[2]));
    }

    #[test]
    fn test_every_record_once() {
        let pos = records(0..13, Class::Positive);
        let neg = records(13..30, Class::Negative);
        let pos: Vec<&Record> = pos.iter().collect();
        let neg: Vec<&Record> = neg.iter().collect();

        for k in 2..12 {
            let folds = stratified_folds(&pos, &neg, k).unwrap();
            let all: Vec<usize> = folds.iter().flat_map(ids).collect();
            let unique: HashSet<usize> = all.iter().copied().collect();
            assert_eq!(30, all.len());
            assert_eq!(30, unique.len());

            let max = folds.iter().map(|f| f.len()).max().unwrap();
            let min = folds.iter().map(|f| f.len()).min().unwrap();
            assert!(max - min <= 2, "k: {}, max: {}, min: {}", k, max, min);
        }
    }

    #[test]
    fn test_deterministic() {
        let pos = records(0..4, Class::Positive);
        let neg = records(4..11, Class::Negative);
        let pos: Vec<&Record> = pos.iter().collect();
        let neg: Vec<&Record> = neg.iter().collect();

        let first = stratified_folds(&pos, &neg, 4).unwrap();
        let second = stratified_folds(&pos, &neg, 4).unwrap();
        let first: Vec<Vec<usize>> = first.iter().map(ids).collect();
        let second: Vec<Vec<usize>> = second.iter().map(ids).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_buckets_are_allowed() {
        let pos = records(0..1, Class::Positive);
        let pos: Vec<&Record> = pos.iter().collect();
        let folds = stratified_folds(&pos, &[], 3).unwrap();
        assert_eq!(vec![1, 0, 0], folds.iter().map(|f| f.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_rejects_single_fold() {
        assert!(stratified_folds(&[], &[], 1).is_err());
        assert!(stratified_folds(&[], &[], 0).is_err());
    }
}
