//! Task state resolution: reconciling stored lists with catalog defaults.
//!
//! The logic is split in two layers:
//!
//! - Pure functions ([`resolve`], [`toggle`], [`progress`]) that take a scope's
//!   stored snapshot and produce the list to display plus the write to perform.
//! - [`TaskStateResolver`], a thin shell that performs the store calls and
//!   absorbs store failures.
//!
//! Once a scope has been seeded its stored list wins over the catalog, even if
//! the catalog later gains tasks for that scope. [`TaskStateResolver::reset_scope`]
//! is the only way back to the catalog default.

use super::catalog::Catalog;
use super::models::{Progress, Task};
use super::scope::{Scope, SCOPE_KEY_PREFIX};
use crate::error::Result;
use crate::traits::KeyValueStore;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Where a resolved list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// A previously persisted list, returned verbatim.
    Stored,
    /// No record existed; the catalog default was seeded.
    Seeded,
    /// The stored record could not be parsed; the catalog default replaced it.
    Reseeded,
    /// The store could not be read; the catalog default is shown unpersisted.
    Fallback,
}

/// Outcome of the pure resolution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The list to display.
    pub tasks: Vec<Task>,
    /// Where the list came from.
    pub origin: Origin,
    /// Serialized list to write under the scope key, if any.
    pub write: Option<String>,
}

/// Result of persisting a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum Persistence {
    /// Nothing needed writing.
    Unchanged,
    /// The list was written.
    Saved,
    /// The store failed; the in-memory list was kept.
    Failed(String),
}

impl Persistence {
    /// Whether a store failure occurred.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A scope's resolved task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeState {
    /// The scope that was resolved.
    pub scope: Scope,
    /// Tasks to display, in order.
    pub tasks: Vec<Task>,
    /// Where the tasks came from.
    pub origin: Origin,
    /// Whether seeding was persisted.
    pub persistence: Persistence,
}

impl ScopeState {
    /// Completion counts for the resolved list.
    #[must_use]
    pub fn progress(&self) -> Progress {
        progress(&self.tasks)
    }
}

/// Result of toggling a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toggled {
    /// The updated list. Kept even if it could not be persisted.
    pub tasks: Vec<Task>,
    /// Whether a task with the requested id existed.
    pub found: bool,
    /// Whether the updated list was persisted.
    pub persistence: Persistence,
}

/// Decide which list a scope shows, given its stored snapshot.
///
/// A parseable snapshot is returned verbatim with no write. A missing or
/// corrupt snapshot yields a copy of `default` and a write that seeds it.
pub fn resolve(stored: Option<&str>, default: &[Task]) -> Resolution {
    let origin = match stored.map(serde_json::from_str::<Vec<Task>>) {
        Some(Ok(tasks)) => return Resolution { tasks, origin: Origin::Stored, write: None },
        Some(Err(_)) => Origin::Reseeded,
        None => Origin::Seeded,
    };
    let tasks = default.to_vec();
    let write = serde_json::to_string(&tasks).ok();
    Resolution { tasks, origin, write }
}

/// Return a copy of `tasks` with the `done` flag of task `id` inverted.
///
/// Order, ids and text are preserved. An unknown id returns an unchanged copy.
pub fn toggle(tasks: &[Task], id: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task { done: !task.done, ..task.clone() }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Count completed tasks.
pub fn progress(tasks: &[Task]) -> Progress {
    Progress { completed: tasks.iter().filter(|t| t.done).count(), total: tasks.len() }
}

/// Resolves and mutates per-scope task lists against a key-value store.
///
/// Store failures on the resolve and toggle paths are logged and reported
/// through [`Persistence`]; they never surface as errors.
#[derive(Clone, Copy)]
pub struct TaskStateResolver<'a> {
    store: &'a dyn KeyValueStore,
    catalog: &'a Catalog,
}

impl<'a> TaskStateResolver<'a> {
    /// Create a resolver over the given store and catalog.
    pub fn new(store: &'a dyn KeyValueStore, catalog: &'a Catalog) -> Self {
        Self { store, catalog }
    }

    /// Resolve the task list for a scope, seeding it on first use.
    pub fn resolve_scope(&self, scope: Scope) -> ScopeState {
        let key = scope.storage_key();
        let default = self.catalog.templates(scope);

        let stored = match self.store.get(&key) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(%scope, error = %e, "could not read stored tasks, showing catalog defaults");
                return ScopeState {
                    scope,
                    tasks: default.to_vec(),
                    origin: Origin::Fallback,
                    persistence: Persistence::Failed(e.to_string()),
                };
            }
        };

        let Resolution { tasks, origin, write } = resolve(stored.as_deref(), default);
        if origin == Origin::Reseeded {
            warn!(%scope, "stored tasks were unreadable, reseeding from catalog");
        }

        let persistence = match write {
            None => Persistence::Unchanged,
            Some(json) => self.persist(scope, &key, &json),
        };
        if persistence == Persistence::Saved {
            debug!(%scope, tasks = tasks.len(), "seeded scope");
        }

        ScopeState { scope, tasks, origin, persistence }
    }

    /// Toggle one task and persist the full updated list.
    ///
    /// The returned list is the new in-memory state whether or not the
    /// write succeeded. An unknown id is not persisted.
    pub fn toggle_task(&self, scope: Scope, task_id: &str, current: &[Task]) -> Toggled {
        let found = current.iter().any(|t| t.id == task_id);
        let tasks = toggle(current, task_id);
        if !found {
            debug!(%scope, task_id, "toggle ignored, no such task");
            return Toggled { tasks, found, persistence: Persistence::Unchanged };
        }

        let persistence = match serde_json::to_string(&tasks) {
            Ok(json) => self.persist(scope, &scope.storage_key(), &json),
            Err(e) => Persistence::Failed(e.to_string()),
        };
        Toggled { tasks, found, persistence }
    }

    /// Remove a scope's stored list so the next resolve reseeds it from the catalog.
    ///
    /// Returns `true` if a record existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn reset_scope(&self, scope: Scope) -> Result<bool> {
        let key = scope.storage_key();
        let existed = self.store.get(&key)?.is_some();
        if existed {
            self.store.remove(&key)?;
            info!(%scope, "reset scope to catalog defaults");
        }
        Ok(existed)
    }

    /// List the scopes that have a stored record.
    ///
    /// Keys under the scope prefix that do not parse are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn seeded_scopes(&self) -> Result<Vec<Scope>> {
        let mut scopes: Vec<Scope> = self
            .store
            .keys_with_prefix(SCOPE_KEY_PREFIX)?
            .iter()
            .filter_map(|key| match Scope::from_storage_key(key) {
                Ok(scope) => Some(scope),
                Err(e) => {
                    debug!(key = %key, error = %e, "skipping unrecognized key");
                    None
                }
            })
            .collect();
        scopes.sort_by_key(|scope| (scope.grade, scope.month.school_year_index()));
        Ok(scopes)
    }

    /// Progress of every seeded scope, read without writing.
    ///
    /// A record that does not parse counts as the catalog default for its
    /// scope and is left in place for the next resolve to reseed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn seeded_progress(&self) -> Result<Vec<(Scope, Progress)>> {
        self.seeded_scopes()?
            .into_iter()
            .map(|scope| {
                let stored = self.store.get(&scope.storage_key())?;
                let Resolution { tasks, .. } = resolve(stored.as_deref(), self.catalog.templates(scope));
                Ok((scope, progress(&tasks)))
            })
            .collect()
    }

    /// Remove every stored scope not listed in `keep`.
    ///
    /// Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn prune_scopes(&self, keep: &[Scope]) -> Result<usize> {
        let mut removed = 0;
        for scope in self.seeded_scopes()? {
            if !keep.contains(&scope) {
                self.store.remove(&scope.storage_key())?;
                removed += 1;
            }
        }
        if removed > 0 {
            info!(removed, "pruned stale scopes");
        }
        Ok(removed)
    }

    fn persist(&self, scope: Scope, key: &str, json: &str) -> Persistence {
        match self.store.set(key, json) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                warn!(%scope, error = %e, "could not persist tasks, keeping them in memory");
                Persistence::Failed(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for TaskStateResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStateResolver").field("catalog_scopes", &self.catalog.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::models::{GradeLevel, Month};
    use crate::testing::{FailingStore, MemoryStore, ReadOnlyStore};
    use proptest::prelude::*;

    const NINTH_AUGUST: Scope = Scope::new(GradeLevel::Ninth, Month::August);
    const TWELFTH_JULY: Scope = Scope::new(GradeLevel::Twelfth, Month::July);

    fn sample_tasks() -> Vec<Task> {
        vec![Task::new("1", "First"), Task::new("2", "Second"), Task::new("3", "Third")]
    }

    // === Pure core ===

    #[test]
    fn test_resolve_without_snapshot_seeds_default() {
        let default = sample_tasks();
        let resolution = resolve(None, &default);
        assert_eq!(resolution.tasks, default);
        assert_eq!(resolution.origin, Origin::Seeded);
        let written: Vec<Task> = serde_json::from_str(resolution.write.as_deref().unwrap()).unwrap();
        assert_eq!(written, default);
    }

    #[test]
    fn test_resolve_with_snapshot_returns_it_verbatim() {
        let mut stored = sample_tasks();
        stored[1].done = true;
        let json = serde_json::to_string(&stored).unwrap();

        let resolution = resolve(Some(&json), &sample_tasks());
        assert_eq!(resolution.tasks, stored);
        assert_eq!(resolution.origin, Origin::Stored);
        assert!(resolution.write.is_none());
    }

    #[test]
    fn test_resolve_snapshot_wins_over_extended_catalog() {
        let stored = vec![Task::new("1", "First")];
        let json = serde_json::to_string(&stored).unwrap();

        let resolution = resolve(Some(&json), &sample_tasks());
        assert_eq!(resolution.tasks, stored);
    }

    #[test]
    fn test_resolve_corrupt_snapshot_reseeds() {
        let resolution = resolve(Some("{not json"), &sample_tasks());
        assert_eq!(resolution.tasks, sample_tasks());
        assert_eq!(resolution.origin, Origin::Reseeded);
        assert!(resolution.write.is_some());
    }

    #[test]
    fn test_resolve_wrong_shape_reseeds() {
        let resolution = resolve(Some(r#"{"id":"1"}"#), &sample_tasks());
        assert_eq!(resolution.origin, Origin::Reseeded);
    }

    #[test]
    fn test_resolve_empty_default() {
        let resolution = resolve(None, &[]);
        assert!(resolution.tasks.is_empty());
        assert_eq!(resolution.write.as_deref(), Some("[]"));
    }

    #[test]
    fn test_toggle_flips_only_the_matching_task() {
        let toggled = toggle(&sample_tasks(), "2");
        assert!(!toggled[0].done);
        assert!(toggled[1].done);
        assert!(!toggled[2].done);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        assert_eq!(toggle(&sample_tasks(), "99"), sample_tasks());
    }

    #[test]
    fn test_progress_counts_done() {
        let mut tasks = sample_tasks();
        tasks[0].done = true;
        tasks[2].done = true;
        assert_eq!(progress(&tasks), Progress { completed: 2, total: 3 });
        assert_eq!(progress(&[]), Progress { completed: 0, total: 0 });
    }

    fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(("[a-z ]{1,20}", any::<bool>()), 1..12).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (text, done))| Task { id: (i + 1).to_string(), text, done })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn double_toggle_is_identity(tasks in tasks_strategy(), pick in any::<prop::sample::Index>()) {
            let id = tasks[pick.index(tasks.len())].id.clone();
            prop_assert_eq!(toggle(&toggle(&tasks, &id), &id), tasks);
        }

        #[test]
        fn toggle_changes_exactly_one_flag(tasks in tasks_strategy(), pick in any::<prop::sample::Index>()) {
            let i = pick.index(tasks.len());
            let toggled = toggle(&tasks, &tasks[i].id);
            prop_assert_eq!(toggled.len(), tasks.len());
            let mut changed = 0;
            for (before, after) in tasks.iter().zip(&toggled) {
                prop_assert_eq!(&before.id, &after.id);
                prop_assert_eq!(&before.text, &after.text);
                if before.done != after.done {
                    changed += 1;
                }
            }
            prop_assert_eq!(changed, 1);
            prop_assert_ne!(toggled[i].done, tasks[i].done);
        }

        #[test]
        fn progress_never_exceeds_total(tasks in tasks_strategy()) {
            let p = progress(&tasks);
            prop_assert!(p.completed <= p.total);
            prop_assert!((0.0..=1.0).contains(&p.fraction()));
        }
    }

    // === Store-backed shell ===

    #[test]
    fn test_ninth_august_scenario() {
        let store = MemoryStore::new();
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let first = resolver.resolve_scope(NINTH_AUGUST);
        assert_eq!(first.tasks.len(), 5);
        assert_eq!(first.origin, Origin::Seeded);
        assert_eq!(first.persistence, Persistence::Saved);
        assert_eq!(first.progress(), Progress { completed: 0, total: 5 });

        let toggled = resolver.toggle_task(NINTH_AUGUST, "3", &first.tasks);
        assert!(toggled.found);
        assert_eq!(toggled.persistence, Persistence::Saved);
        assert!(toggled.tasks[2].done);
        assert_eq!(progress(&toggled.tasks).completed, 1);

        let again = resolver.resolve_scope(NINTH_AUGUST);
        assert_eq!(again.origin, Origin::Stored);
        assert_eq!(again.tasks, toggled.tasks);
        assert!(again.tasks[2].done);
        assert!(again.tasks.iter().enumerate().all(|(i, t)| t.done == (i == 2)));
    }

    #[test]
    fn test_twelfth_july_scenario() {
        let store = MemoryStore::new();
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let state = resolver.resolve_scope(TWELFTH_JULY);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.progress(), Progress { completed: 0, total: 1 });

        let toggled = resolver.toggle_task(TWELFTH_JULY, &state.tasks[0].id, &state.tasks);
        assert_eq!(progress(&toggled.tasks), Progress { completed: 1, total: 1 });
    }

    #[test]
    fn test_absent_scope_resolves_empty() {
        let store = MemoryStore::new();
        let catalog = Catalog::from_entries([(NINTH_AUGUST, sample_tasks())]);
        let resolver = TaskStateResolver::new(&store, &catalog);

        let state = resolver.resolve_scope(TWELFTH_JULY);
        assert!(state.tasks.is_empty());
        assert_eq!(state.progress(), Progress { completed: 0, total: 0 });
        assert_eq!(state.progress().percent(), 0);
    }

    #[test]
    fn test_resolve_is_idempotent_without_toggles() {
        let store = MemoryStore::new();
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let first = resolver.resolve_scope(NINTH_AUGUST);
        let writes_after_seed = store.writes();
        let second = resolver.resolve_scope(NINTH_AUGUST);

        assert_eq!(first.tasks, second.tasks);
        assert_eq!(first.tasks, Catalog::builtin().lookup(NINTH_AUGUST));
        assert_eq!(second.persistence, Persistence::Unchanged);
        assert_eq!(store.writes(), writes_after_seed);
    }

    #[test]
    fn test_seeded_scope_ignores_catalog_updates() {
        let store = MemoryStore::new();
        let old = Catalog::from_entries([(NINTH_AUGUST, vec![Task::new("1", "Old")])]);
        TaskStateResolver::new(&store, &old).resolve_scope(NINTH_AUGUST);

        let new = Catalog::from_entries([(NINTH_AUGUST, sample_tasks())]);
        let state = TaskStateResolver::new(&store, &new).resolve_scope(NINTH_AUGUST);
        assert_eq!(state.tasks, vec![Task::new("1", "Old")]);
    }

    #[test]
    fn test_corrupt_record_is_reseeded() {
        let store = MemoryStore::with_entries([("tasks_9th_August", "garbage")]);
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let state = resolver.resolve_scope(NINTH_AUGUST);
        assert_eq!(state.origin, Origin::Reseeded);
        assert_eq!(state.tasks.len(), 5);
        let stored: Vec<Task> = serde_json::from_str(&store.raw("tasks_9th_August").unwrap()).unwrap();
        assert_eq!(stored, state.tasks);
    }

    #[test]
    fn test_read_failure_falls_back_without_writing() {
        let store = FailingStore::new("unavailable");
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let state = resolver.resolve_scope(NINTH_AUGUST);
        assert_eq!(state.origin, Origin::Fallback);
        assert_eq!(state.tasks, Catalog::builtin().lookup(NINTH_AUGUST));
        assert!(state.persistence.is_failed());
    }

    #[test]
    fn test_write_failure_on_seed_still_returns_default() {
        let store = ReadOnlyStore::new(MemoryStore::new());
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let state = resolver.resolve_scope(NINTH_AUGUST);
        assert_eq!(state.origin, Origin::Seeded);
        assert_eq!(state.tasks.len(), 5);
        assert!(state.persistence.is_failed());
    }

    #[test]
    fn test_write_failure_on_toggle_keeps_in_memory_update() {
        let store = ReadOnlyStore::new(MemoryStore::new());
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());
        let tasks = Catalog::builtin().lookup(NINTH_AUGUST);

        let toggled = resolver.toggle_task(NINTH_AUGUST, "1", &tasks);
        assert!(toggled.tasks[0].done);
        assert!(toggled.persistence.is_failed());
        assert!(store.inner().raw("tasks_9th_August").is_none());
    }

    #[test]
    fn test_toggle_unknown_id_does_not_write() {
        let store = MemoryStore::new();
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());
        let tasks = Catalog::builtin().lookup(NINTH_AUGUST);

        let toggled = resolver.toggle_task(NINTH_AUGUST, "42", &tasks);
        assert!(!toggled.found);
        assert_eq!(toggled.tasks, tasks);
        assert_eq!(toggled.persistence, Persistence::Unchanged);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_last_toggle_write_wins() {
        let store = MemoryStore::new();
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());
        let tasks = resolver.resolve_scope(NINTH_AUGUST).tasks;

        // Both toggles start from the same list; the second overwrites the first.
        resolver.toggle_task(NINTH_AUGUST, "1", &tasks);
        let second = resolver.toggle_task(NINTH_AUGUST, "2", &tasks);

        let stored = resolver.resolve_scope(NINTH_AUGUST).tasks;
        assert_eq!(stored, second.tasks);
        assert!(!stored[0].done);
        assert!(stored[1].done);
    }

    #[test]
    fn test_reset_scope_reseeds_from_catalog() {
        let store = MemoryStore::new();
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());
        let tasks = resolver.resolve_scope(NINTH_AUGUST).tasks;
        resolver.toggle_task(NINTH_AUGUST, "1", &tasks);

        assert!(resolver.reset_scope(NINTH_AUGUST).unwrap());
        assert!(!resolver.reset_scope(NINTH_AUGUST).unwrap());

        let state = resolver.resolve_scope(NINTH_AUGUST);
        assert_eq!(state.origin, Origin::Seeded);
        assert_eq!(state.tasks, Catalog::builtin().lookup(NINTH_AUGUST));
    }

    #[test]
    fn test_reset_scope_propagates_store_errors() {
        let store = FailingStore::new("nope");
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());
        assert!(resolver.reset_scope(NINTH_AUGUST).is_err());
    }

    #[test]
    fn test_seeded_scopes_lists_stored_records() {
        let store = MemoryStore::with_entries([
            ("tasks_10th_March", "[]"),
            ("tasks_9th_January", "[]"),
            ("tasks_9th_September", "[]"),
            ("tasks_bogus", "[]"),
            ("userData", "{}"),
        ]);
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let scopes = resolver.seeded_scopes().unwrap();
        assert_eq!(
            scopes,
            vec![
                Scope::new(GradeLevel::Ninth, Month::September),
                Scope::new(GradeLevel::Ninth, Month::January),
                Scope::new(GradeLevel::Tenth, Month::March),
            ]
        );
    }

    #[test]
    fn test_seeded_progress_does_not_write() {
        let mut tasks = Catalog::builtin().lookup(NINTH_AUGUST);
        tasks[0].done = true;
        let json = serde_json::to_string(&tasks).unwrap();
        let store = MemoryStore::with_entries([
            ("tasks_9th_August", json.as_str()),
            ("tasks_9th_May", "garbage"),
        ]);
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let summaries = resolver.seeded_progress().unwrap();
        assert_eq!(
            summaries,
            vec![
                (NINTH_AUGUST, Progress { completed: 1, total: 5 }),
                (Scope::new(GradeLevel::Ninth, Month::May), Progress { completed: 0, total: 3 }),
            ]
        );
        assert_eq!(store.writes(), 0);
        assert_eq!(store.raw("tasks_9th_May").as_deref(), Some("garbage"));
    }

    #[test]
    fn test_prune_scopes_keeps_listed() {
        let store = MemoryStore::with_entries([
            ("tasks_9th_August", "[]"),
            ("tasks_9th_September", "[]"),
            ("tasks_12th_July", "[]"),
            ("userData", "{}"),
        ]);
        let resolver = TaskStateResolver::new(&store, Catalog::builtin());

        let removed = resolver.prune_scopes(&[NINTH_AUGUST]).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(resolver.seeded_scopes().unwrap(), vec![NINTH_AUGUST]);
        assert!(store.raw("userData").is_some());
    }
}
