use crate::aggregate::{aggregate, Aggregation};
use crate::errors::StoreError;
use crate::models::{ActivityRecord, FieldUpdate};
use tracing::debug;

/// The list as of one version, with its aggregation already derived.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub version: u64,
    pub activities: Vec<ActivityRecord>,
    pub aggregation: Aggregation,
}

/// Ordered activity list. Insertion order is both display and export order.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    records: Vec<ActivityRecord>,
    version: u64,
}

impl ActivityStore {
    pub fn new(records: Vec<ActivityRecord>) -> Self {
        Self { records, version: 0 }
    }

    pub fn with_samples() -> Self {
        Self::new(sample_activities())
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            version: self.version,
            activities: self.records.clone(),
            aggregation: aggregate(&self.records),
        }
    }

    /// Appends a blank, unrated record.
    pub fn add(&mut self) -> StoreSnapshot {
        self.records.push(ActivityRecord::default());
        self.bump("add")
    }

    pub fn update(&mut self, index: usize, update: FieldUpdate) -> Result<StoreSnapshot, StoreError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        record.apply(update);
        Ok(self.bump("update"))
    }

    /// Removes the record at `index`; later records shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<StoreSnapshot, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.records.remove(index);
        Ok(self.bump("remove"))
    }

    pub fn replace_all(&mut self, records: Vec<ActivityRecord>) -> StoreSnapshot {
        self.records = records;
        self.bump("replace_all")
    }

    fn bump(&mut self, operation: &str) -> StoreSnapshot {
        self.version += 1;
        debug!(operation, version = self.version, len = self.records.len(), "activity list changed");
        self.snapshot()
    }
}

pub fn sample_activities() -> Vec<ActivityRecord> {
    [
        ("Running", 3, 70.0),
        ("Eating a 🥐😋", 0, 40.0),
        ("🪥🦷 Brushing my teeth", 6, 90.0),
        ("Filing taxes", 6, 80.0),
        ("Reading a novel", 2, 60.0),
        ("Watching Netflix", 0, 30.0),
        ("Cooking a healthy meal", 4, 50.0),
        ("Meditating", 3, 40.0),
        ("Calling a friend", 2, 50.0),
        ("Learning a new skill", 5, 100.0),
    ]
    .into_iter()
    .map(|(activity, scale, importance)| ActivityRecord::new(activity, Some(scale), importance))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_ten_rated_samples() {
        let store = ActivityStore::with_samples();
        assert_eq!(store.records().len(), 10);
        assert_eq!(store.version(), 0);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.aggregation.eligible, 10);
        assert!(snapshot.aggregation.warnings.is_empty());
    }

    #[test]
    fn add_appends_one_unrated_record() {
        let mut store = ActivityStore::with_samples();
        let before = store.snapshot().aggregation;
        let snapshot = store.add();
        assert_eq!(snapshot.activities.len(), 11);
        assert_eq!(snapshot.activities[10], ActivityRecord::new("", None, 1.0));
        assert_eq!(snapshot.aggregation.bucket_sums, before.bucket_sums);
        assert_eq!(snapshot.aggregation.weighted_mean, before.weighted_mean);
        assert_eq!(snapshot.version, 1);
    }

    #[test]
    fn rating_a_new_record_brings_it_into_the_sums() {
        let mut store = ActivityStore::default();
        store.add();
        let snapshot = store.update(0, FieldUpdate::Scale(Some(6))).unwrap();
        assert_eq!(snapshot.aggregation.bucket_sums[6], 1.0);
        assert_eq!(snapshot.aggregation.weighted_mean, 7.0);
    }

    #[test]
    fn update_after_remove_hits_the_shifted_record() {
        let mut store = ActivityStore::with_samples();
        store.remove(1).unwrap();
        let snapshot = store
            .update(1, FieldUpdate::Activity("Brushing".into()))
            .unwrap();
        assert_eq!(snapshot.activities.len(), 9);
        assert_eq!(snapshot.activities[1].activity, "Brushing");
        assert_eq!(snapshot.activities[1].scale, Some(6));
        assert_eq!(snapshot.activities[1].importance, 90.0);
        assert!(snapshot.activities.iter().all(|r| r.activity != "Eating a 🥐😋"));
    }

    #[test]
    fn out_of_range_index_is_rejected_without_changes() {
        let mut store = ActivityStore::with_samples();
        assert_eq!(
            store.remove(10),
            Err(StoreError::IndexOutOfRange { index: 10, len: 10 })
        );
        assert_eq!(
            store.update(42, FieldUpdate::Importance(5.0)),
            Err(StoreError::IndexOutOfRange { index: 42, len: 10 })
        );
        assert_eq!(store.version(), 0);
        assert_eq!(store.records(), sample_activities().as_slice());
    }

    #[test]
    fn replace_all_accepts_malformed_scales() {
        let mut store = ActivityStore::with_samples();
        let snapshot = store.replace_all(vec![
            ActivityRecord::new("Ok", Some(2), 10.0),
            ActivityRecord::new("Broken", Some(11), 10.0),
        ]);
        assert_eq!(snapshot.activities.len(), 2);
        assert_eq!(snapshot.aggregation.warnings.len(), 1);
        assert_eq!(snapshot.aggregation.weighted_mean, 3.0);
    }

    #[test]
    fn every_mutation_bumps_the_version() {
        let mut store = ActivityStore::default();
        store.add();
        store.add();
        store.update(0, FieldUpdate::Importance(3.0)).unwrap();
        store.remove(1).unwrap();
        let snapshot = store.replace_all(Vec::new());
        assert_eq!(snapshot.version, 5);
    }
}
