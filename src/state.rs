use std::path::Path;

use crate::data::aggregate::{aggregate, Aggregate};
use crate::data::loader;
use crate::data::model::{Dataset, FilterCriteria};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The session state owned by the embedding host, independent of rendering.
/// Holds the current dataset and criteria and keeps the aggregate cached;
/// the aggregate is rebuilt whenever either input changes.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Dataset>,

    /// Active matching window.
    pub criteria: FilterCriteria,

    /// Cached aggregation over `dataset` under `criteria`.
    pub aggregate: Option<Aggregate>,

    /// Status / error message surfaced to the host.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            aggregate: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, replacing the previous one wholesale.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.reaggregate();
    }

    /// Load an export from disk. On failure the previous dataset is kept and
    /// the error becomes a non-fatal status message.
    pub fn load_from_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load export: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Replace the matching window and recompute.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.reaggregate();
    }

    /// Restore the documented defaults (24 °C ± 1 °C) and recompute.
    pub fn reset_criteria(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    fn reaggregate(&mut self) {
        self.aggregate = self.dataset.as_ref().map(|ds| {
            let agg = aggregate(ds, &self.criteria);
            log::info!(
                "{} of {} readings within {:.1} °C of {:.1} °C",
                agg.stats.matching_records,
                agg.stats.total_records,
                self.criteria.tolerance,
                self.criteria.target,
            );
            agg
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_export;

    fn sample_dataset() -> Dataset {
        let mut text = String::new();
        for i in 0..10 {
            text.push_str(&format!("metadata line {i}\n"));
        }
        text.push_str("20240101T0000,23.4\n20240101T0100,30.0\n");
        parse_export(&text)
    }

    #[test]
    fn set_dataset_builds_the_aggregate() {
        let mut state = AppState::default();
        assert!(state.aggregate.is_none());

        state.set_dataset(sample_dataset());
        let agg = state.aggregate.as_ref().unwrap();
        assert_eq!(agg.stats.total_records, 2);
        assert_eq!(agg.stats.matching_records, 1);
    }

    #[test]
    fn criteria_changes_recompute() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        state.set_criteria(FilterCriteria::new(30.0, 0.5));
        assert_eq!(state.aggregate.as_ref().unwrap().stats.matching_records, 1);

        state.set_criteria(FilterCriteria::new(30.0, 10.0));
        assert_eq!(state.aggregate.as_ref().unwrap().stats.matching_records, 2);

        state.reset_criteria();
        assert_eq!(state.criteria, FilterCriteria::default());
        assert_eq!(state.aggregate.as_ref().unwrap().stats.matching_records, 1);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        state.load_from_path(Path::new("/nonexistent/dataexport.csv"));
        assert!(state.status_message.is_some());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
        assert_eq!(state.aggregate.as_ref().unwrap().stats.total_records, 2);
    }

    #[test]
    fn successful_load_clears_the_status() {
        let mut state = AppState::default();
        state.status_message = Some("Error: old".to_string());
        state.set_dataset(Dataset::default());
        assert!(state.status_message.is_none());
    }
}
