// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Session-held source list with derived views.
//!
//! The store owns the loaded sources and the current selection. Every
//! mutation produces a fresh immutable [`SourceSnapshot`] whose
//! [`DerivedViews`] are recomputed from scratch with the pure pipeline
//! functions, then handed to each subscribed [`SourceObserver`].
//!
//! ```text
//! add / remove / select
//!         │
//!         ▼
//!   SourceSnapshot ──► DerivedViews ──► observers
//! ```

use crate::flatten::flatten_results;
use crate::group::{group_by_category, CategoryGroups};
use crate::pivot::{build_pivot, PivotRow};
use crate::ranking::{build_rankings, BenchmarkRanking};
use crate::source::{CategoryResult, DataSource, SourceId};
use crate::subjects::{summarize_subjects, SubjectSummary};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tracing::debug;

/// Views recomputed whenever the sources or the selection change.
#[derive(Debug, Clone, Default)]
pub struct DerivedViews {
    /// Flattened records per selected source.
    pub flattened: IndexMap<SourceId, Vec<CategoryResult>>,
    /// Records of all selected sources by subject area.
    pub grouped: CategoryGroups,
    /// Category × source pivot table.
    pub pivot: Vec<PivotRow>,
    /// Per-benchmark leaderboards.
    pub rankings: Vec<BenchmarkRanking>,
    /// Per-source subject profiles.
    pub subjects: Vec<SubjectSummary>,
}

impl DerivedViews {
    /// Compute every view over `sources`.
    pub fn compute(sources: &[DataSource]) -> Self {
        let flattened: IndexMap<SourceId, Vec<CategoryResult>> = sources
            .iter()
            .map(|source| (source.id.clone(), flatten_results(&source.raw_data)))
            .collect();
        let all: Vec<CategoryResult> = flattened.values().flatten().cloned().collect();

        Self {
            grouped: group_by_category(&all),
            pivot: build_pivot(sources),
            rankings: build_rankings(sources),
            subjects: summarize_subjects(sources),
            flattened,
        }
    }
}

/// Which sources the derived views cover.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every loaded source.
    #[default]
    All,
    /// Only these ids. An empty set selects nothing.
    Ids(IndexSet<SourceId>),
}

impl Selection {
    /// Whether `id` is covered by this selection.
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) => ids.contains(id),
        }
    }
}

/// Immutable view of the store at one point in time.
#[derive(Debug, Clone, Default)]
pub struct SourceSnapshot {
    /// Every loaded source, in load order.
    pub sources: Vec<Arc<DataSource>>,
    /// Sources the views are restricted to.
    pub selection: Selection,
    /// Views over the selected sources.
    pub views: Arc<DerivedViews>,
}

impl SourceSnapshot {
    /// Sources that the derived views were computed over.
    pub fn selected(&self) -> Vec<&DataSource> {
        self.sources
            .iter()
            .filter(|s| self.selection.contains(&s.id))
            .map(Arc::as_ref)
            .collect()
    }
}

/// Receives a snapshot after every store mutation.
#[cfg_attr(test, mockall::automock)]
pub trait SourceObserver: Send + Sync {
    /// Called once per mutation with the recomputed snapshot.
    fn on_change(&self, snapshot: &SourceSnapshot);
}

/// Loaded sources, selection and observers for one session.
#[derive(Default)]
pub struct SourceStore {
    snapshot: SourceSnapshot,
    observers: Vec<Box<dyn SourceObserver>>,
}

impl SourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> &SourceSnapshot {
        &self.snapshot
    }

    /// Register an observer for subsequent changes.
    pub fn subscribe(&mut self, observer: Box<dyn SourceObserver>) {
        self.observers.push(observer);
    }

    /// Add a source. A source with an already-loaded id replaces it in place.
    pub fn add(&mut self, source: DataSource) {
        let mut sources = self.snapshot.sources.clone();
        match sources.iter().position(|s| s.id == source.id) {
            Some(index) => sources[index] = Arc::new(source),
            None => sources.push(Arc::new(source)),
        }
        self.commit(sources, self.snapshot.selection.clone());
    }

    /// Add several sources with a single notification.
    pub fn extend(&mut self, new_sources: impl IntoIterator<Item = DataSource>) {
        let mut sources = self.snapshot.sources.clone();
        for source in new_sources {
            match sources.iter().position(|s| s.id == source.id) {
                Some(index) => sources[index] = Arc::new(source),
                None => sources.push(Arc::new(source)),
            }
        }
        self.commit(sources, self.snapshot.selection.clone());
    }

    /// Remove a source by id. Returns `false` when no such source exists.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.snapshot.sources.len();
        let sources: Vec<_> = self
            .snapshot
            .sources
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        if sources.len() == before {
            return false;
        }
        let mut selection = self.snapshot.selection.clone();
        if let Selection::Ids(ids) = &mut selection {
            ids.shift_remove(id);
        }
        self.commit(sources, selection);
        true
    }

    /// Remove every source and reset the selection to all sources.
    pub fn clear(&mut self) {
        self.commit(Vec::new(), Selection::All);
    }

    /// Restrict derived views to the given ids. Unknown ids are dropped, so
    /// selecting only unknown ids leaves the views empty.
    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SourceId>,
    {
        let selection: IndexSet<SourceId> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| self.snapshot.sources.iter().any(|s| &s.id == id))
            .collect();
        self.commit(self.snapshot.sources.clone(), Selection::Ids(selection));
    }

    /// Make the derived views cover every loaded source again.
    pub fn select_all(&mut self) {
        self.commit(self.snapshot.sources.clone(), Selection::All);
    }

    fn commit(&mut self, sources: Vec<Arc<DataSource>>, selection: Selection) {
        let mut snapshot = SourceSnapshot {
            sources,
            selection,
            views: Arc::default(),
        };
        let selected: Vec<DataSource> = snapshot.selected().into_iter().cloned().collect();
        snapshot.views = Arc::new(DerivedViews::compute(&selected));
        debug!(
            sources = snapshot.sources.len(),
            selected = selected.len(),
            observers = self.observers.len(),
            "Recomputed derived views"
        );

        self.snapshot = snapshot;
        for observer in &self.observers {
            observer.on_change(&self.snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(id: &str, mean: f64) -> DataSource {
        DataSource::builder()
            .id(id)
            .provider("p")
            .model_name(id)
            .timestamp("t")
            .raw_data(json!({
                "dataset_results": {"mmlu": {"results": [
                    {"file": "anatomy_test.csv", "accuracy_mean": mean}
                ]}}
            }))
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_selection_uses_all_sources() {
        let mut store = SourceStore::new();
        store.extend([source("a", 0.1), source("b", 0.2)]);

        let views = &store.snapshot().views;
        assert_eq!(views.flattened.len(), 2);
        assert_eq!(views.rankings[0].rows.len(), 2);
        assert_eq!(views.pivot[0].cells.len(), 2);
    }

    #[test]
    fn test_selection_restricts_views() {
        let mut store = SourceStore::new();
        store.extend([source("a", 0.1), source("b", 0.2)]);
        store.select(["b", "missing"]);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.selection, Selection::Ids(IndexSet::from(["b".to_string()])));
        assert_eq!(snapshot.views.rankings[0].rows.len(), 1);
        assert_eq!(snapshot.views.rankings[0].rows[0].model_name, "b");
    }

    #[test]
    fn test_remove_drops_from_selection() {
        let mut store = SourceStore::new();
        store.extend([source("a", 0.1), source("b", 0.2)]);
        store.select(["a"]);

        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.selection, Selection::Ids(IndexSet::new()));
        assert!(snapshot.views.flattened.is_empty());
        assert!(snapshot.views.rankings.is_empty());
    }

    #[test]
    fn test_unknown_ids_do_not_widen_views() {
        let mut store = SourceStore::new();
        store.extend([source("a", 0.1), source("b", 0.2)]);
        store.select(["typo"]);

        let snapshot = store.snapshot();
        assert!(snapshot.selected().is_empty());
        assert!(snapshot.views.pivot.is_empty());

        store.select_all();
        assert_eq!(store.snapshot().selection, Selection::All);
        assert_eq!(store.snapshot().views.flattened.len(), 2);
    }

    #[test]
    fn test_remove_keeps_all_selection() {
        let mut store = SourceStore::new();
        store.extend([source("a", 0.1), source("b", 0.2)]);

        assert!(store.remove("a"));
        assert_eq!(store.snapshot().selection, Selection::All);
        assert_eq!(store.snapshot().views.flattened.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_add_replaces_same_id() {
        let mut store = SourceStore::new();
        store.add(source("a", 0.1));
        store.add(source("a", 0.9));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.sources.len(), 1);
        assert_eq!(snapshot.views.rankings[0].rows[0].average, 0.9);
    }

    #[test]
    fn test_observer_notified_per_mutation() {
        let mut observer = MockSourceObserver::new();
        observer
            .expect_on_change()
            .times(3)
            .returning(|_| ());

        let mut store = SourceStore::new();
        store.subscribe(Box::new(observer));
        store.add(source("a", 0.1));
        store.select(["a"]);
        store.clear();
    }

    #[test]
    fn test_observer_sees_recomputed_views() {
        let mut observer = MockSourceObserver::new();
        observer
            .expect_on_change()
            .withf(|snapshot| snapshot.views.pivot.len() == 1 && snapshot.sources.len() == 1)
            .times(1)
            .returning(|_| ());

        let mut store = SourceStore::new();
        store.subscribe(Box::new(observer));
        store.add(source("a", 0.4));
    }

    #[test]
    fn test_clear_resets_views() {
        let mut store = SourceStore::new();
        store.add(source("a", 0.1));
        store.clear();
        assert!(store.snapshot().sources.is_empty());
        assert!(store.snapshot().views.pivot.is_empty());
    }
}
