use crate::models::ActivityRecord;
use crate::scale::{self, BUCKET_COUNT};
use serde::Serialize;
use tracing::warn;

/// A rated record whose scale does not name a bucket. It is left out of the
/// sums and the mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleWarning {
    pub index: usize,
    pub scale: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub bucket_sums: [f64; BUCKET_COUNT],
    pub weighted_mean: f64,
    pub total_importance: f64,
    pub eligible: usize,
    pub excluded: usize,
    pub warnings: Vec<ScaleWarning>,
}

impl Aggregation {
    pub fn has_data(&self) -> bool {
        self.total_importance != 0.0
    }
}

pub fn aggregate(records: &[ActivityRecord]) -> Aggregation {
    let mut bucket_sums = [0.0; BUCKET_COUNT];
    let mut total_importance = 0.0;
    let mut weighted_sum = 0.0;
    let mut eligible = 0usize;
    let mut excluded = 0usize;
    let mut warnings = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some(scale) = record.scale.filter(|_| record.is_eligible()) else {
            excluded += 1;
            continue;
        };
        let Some(bucket) = scale::bucket(scale) else {
            warn!(index, scale, "activity has a scale outside the 7-point range, skipping");
            warnings.push(ScaleWarning { index, scale });
            continue;
        };

        let bucket_sum = bucket_sums[bucket.index] + record.importance;
        let next_total = total_importance + record.importance;
        let next_weighted = weighted_sum + record.importance * f64::from(bucket.value);
        if !(bucket_sum.is_finite() && next_total.is_finite() && next_weighted.is_finite()) {
            warn!(index, importance = record.importance, "importance overflows the totals, skipping");
            excluded += 1;
            continue;
        }

        bucket_sums[bucket.index] = bucket_sum;
        total_importance = next_total;
        weighted_sum = next_weighted;
        eligible += 1;
    }

    let weighted_mean = match weighted_sum / total_importance {
        mean if total_importance != 0.0 && mean.is_finite() => mean,
        _ => 0.0,
    };

    Aggregation {
        bucket_sums,
        weighted_mean,
        total_importance,
        eligible,
        excluded,
        warnings,
    }
}

pub fn bucket_sums(records: &[ActivityRecord]) -> [f64; BUCKET_COUNT] {
    aggregate(records).bucket_sums
}

/// Importance-weighted mean of bucket values, or exactly 0 when nothing is eligible.
pub fn weighted_mean(records: &[ActivityRecord]) -> f64 {
    aggregate(records).weighted_mean
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(activity: &str, scale: Option<i64>, importance: f64) -> ActivityRecord {
        ActivityRecord::new(activity, scale, importance)
    }

    #[test]
    fn empty_and_weightless_lists_have_zero_mean() {
        assert_eq!(weighted_mean(&[]), 0.0);
        let weightless = vec![record("A", Some(2), 0.0), record("B", Some(5), 0.0)];
        assert_eq!(weighted_mean(&weightless), 0.0);
        assert_eq!(bucket_sums(&weightless), [0.0; BUCKET_COUNT]);
    }

    #[test]
    fn unrated_record_is_excluded() {
        let list = vec![record("Run", Some(3), 70.0), record("Nap", None, 40.0)];
        let result = aggregate(&list);
        assert_eq!(result.bucket_sums, [0.0, 0.0, 0.0, 70.0, 0.0, 0.0, 0.0]);
        assert_eq!(result.weighted_mean, 4.0);
        assert_eq!(result.eligible, 1);
        assert_eq!(result.excluded, 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn same_bucket_importances_add_up() {
        let list = vec![record("A", Some(0), 10.0), record("B", Some(0), 20.0)];
        assert_eq!(bucket_sums(&list)[0], 30.0);
        assert_eq!(weighted_mean(&list), 1.0);
    }

    #[test]
    fn sums_match_eligible_importance() {
        let list = vec![
            record("Running", Some(3), 70.0),
            record("Croissant", Some(0), 40.0),
            record("Teeth", Some(6), 90.0),
            record("Unrated", None, 15.0),
            record("Zero", Some(2), 0.0),
            record("Skill", Some(5), 100.0),
        ];
        let result = aggregate(&list);
        let eligible_total: f64 = list
            .iter()
            .filter(|r| r.is_eligible())
            .map(|r| r.importance)
            .sum();
        assert_eq!(result.bucket_sums.iter().sum::<f64>(), eligible_total);
        assert_eq!(result.total_importance, eligible_total);
        assert_eq!(result.eligible, 4);
        assert_eq!(result.excluded, 2);
        let expected = (70.0 * 4.0 + 40.0 * 1.0 + 90.0 * 7.0 + 100.0 * 6.0) / 300.0;
        assert!((result.weighted_mean - expected).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_scale_is_skipped_and_reported() {
        let list = vec![
            record("Fine", Some(1), 10.0),
            record("Too high", Some(9), 50.0),
            record("Negative", Some(-1), 50.0),
        ];
        let result = aggregate(&list);
        assert_eq!(result.bucket_sums[1], 10.0);
        assert_eq!(result.total_importance, 10.0);
        assert_eq!(result.weighted_mean, 2.0);
        assert_eq!(
            result.warnings,
            vec![
                ScaleWarning { index: 1, scale: 9 },
                ScaleWarning { index: 2, scale: -1 },
            ]
        );
    }

    #[test]
    fn nan_importance_does_not_poison_the_mean() {
        let list = vec![record("A", Some(6), f64::NAN), record("B", Some(6), 5.0)];
        let result = aggregate(&list);
        assert_eq!(result.weighted_mean, 7.0);
        assert_eq!(result.excluded, 1);
    }

    #[test]
    fn infinite_importance_is_excluded() {
        let imported = crate::serializer::parse(
            "- {activity: Endless, scale: 6, importance: .inf}\n- {activity: Run, scale: 3, importance: 70}\n",
        )
        .unwrap();
        let list = vec![
            imported[0].clone(),
            imported[1].clone(),
            record("Raw", Some(0), f64::INFINITY),
        ];
        let result = aggregate(&list);
        assert_eq!(result.weighted_mean, 4.0);
        assert_eq!(result.total_importance, 70.0);
        assert_eq!(result.eligible, 1);
        assert_eq!(result.excluded, 2);
    }

    #[test]
    fn overflowing_totals_keep_the_mean_finite() {
        let list = vec![
            record("Big", Some(0), 1e308),
            record("Bigger", Some(0), 1e308),
            record("Small", Some(6), 1.0),
        ];
        let result = aggregate(&list);
        assert!(result.weighted_mean.is_finite());
        assert!(result.total_importance.is_finite());
        assert!(result.bucket_sums.iter().all(|sum| sum.is_finite()));
        assert_eq!(result.eligible, 2);
        assert_eq!(result.excluded, 1);
        assert!(serde_json::to_value(&result).unwrap()["weighted_mean"].is_number());
    }

    #[test]
    fn negative_importance_still_counts() {
        let list = vec![record("A", Some(0), 30.0), record("B", Some(6), -10.0)];
        let result = aggregate(&list);
        assert_eq!(result.bucket_sums[6], -10.0);
        assert_eq!(result.total_importance, 20.0);
    }
}
