use std::path::{Path, PathBuf};

use crate::data::clean::{normalize, require_columns};
use crate::data::filter::{FilterCriteria, matching_indices};
use crate::data::loader::load_file;
use crate::data::model::{ListingTable, columns};
use crate::data::summary::Summary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Normalized dataset (None until the user loads a file).
    pub table: Option<ListingTable>,

    /// Where the dataset came from.
    pub source: Option<PathBuf>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of listings passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Statistics over the visible listings (cached alongside the indices).
    pub summary: Option<Summary>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            summary: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Load, validate and normalize a dataset, then make it current.
    /// Failures land in `status_message` instead of propagating; there is
    /// nothing to recover beyond telling the user.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        let loaded = load_file(path)
            .and_then(|raw| {
                // The dashboard is built around ratings; refuse a table
                // that cannot have them.
                require_columns(&raw, &[columns::RATE])?;
                Ok(raw)
            })
            .map(|raw| normalize(&raw));

        match loaded {
            Ok(table) => {
                log::info!(
                    "Loaded {} listings with {} columns from {}",
                    table.len(),
                    table.columns.len(),
                    path.display()
                );
                self.set_table(table, path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Ingest a normalized dataset, reset filters, prime the caches.
    pub fn set_table(&mut self, table: ListingTable, source: PathBuf) {
        self.criteria = FilterCriteria::default();
        self.visible_indices = (0..table.len()).collect();
        self.summary = Some(Summary::of(&table));

        self.table = Some(table);
        self.source = Some(source);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute the visible rows and their summary after a criteria
    /// change. The table itself is never touched.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = matching_indices(table, &self.criteria);
            self.summary = Some(Summary::of_rows(
                self.visible_indices.iter().map(|&i| &table.rows[i]),
            ));
            log::debug!(
                "{} of {} listings match {:?}",
                self.visible_indices.len(),
                table.len(),
                self.criteria
            );
        }
    }

    /// Back to the wildcard criteria.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Listing, Value};

    fn tiny_table() -> ListingTable {
        let rows: Vec<Listing> = vec![
            [
                ("name".to_string(), Value::Text("Jalsa".into())),
                ("location".to_string(), Value::Text("BTM".into())),
                ("rate".to_string(), Value::Number(4.1)),
            ]
            .into_iter()
            .collect(),
            [
                ("name".to_string(), Value::Text("Onesta".into())),
                ("location".to_string(), Value::Text("HSR".into())),
                ("rate".to_string(), Value::Number(3.5)),
            ]
            .into_iter()
            .collect(),
        ];
        ListingTable::new(
            vec!["name".into(), "location".into(), "rate".into()],
            rows,
        )
    }

    #[test]
    fn set_table_primes_caches_and_resets_filters() {
        let mut state = AppState::default();
        state.criteria.location = Some("BTM".into());

        state.set_table(tiny_table(), PathBuf::from("demo.csv"));
        assert!(state.criteria.is_unconstrained());
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.summary.as_ref().unwrap().rows, 2);
    }

    #[test]
    fn refilter_tracks_criteria() {
        let mut state = AppState::default();
        state.set_table(tiny_table(), PathBuf::from("demo.csv"));

        state.criteria.location = Some("BTM".into());
        state.refilter();
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.summary.as_ref().unwrap().rows, 1);

        state.reset_filters();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn load_failure_becomes_a_status_message() {
        let mut state = AppState::default();
        state.load_path(Path::new("does-not-exist.csv"));
        assert!(state.table.is_none());
        assert!(state.status_message.is_some());
        assert!(!state.loading);
    }
}
