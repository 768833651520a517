//! The checklist view: one user's current-month checklist.
//!
//! The month is fixed when the view is entered and does not follow the clock
//! afterwards. The grade is re-read from the profile on every
//! [`ChecklistView::refocus`], so profile edits made elsewhere show up when
//! the view regains focus.

use crate::checklist::{
    self, Catalog, GradeLevel, Month, Origin, Persistence, Progress, Scope, ScopeState, Task,
    TaskStateResolver,
};
use crate::error::Result;
use crate::navigation::Route;
use crate::profile::{load_profile, UserProfile};
use crate::traits::KeyValueStore;
use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of entering the checklist view.
#[derive(Debug)]
pub enum Entry<'a> {
    /// The view is ready to render.
    Open(Box<ChecklistView<'a>>),
    /// No usable profile; the caller should navigate to this route.
    Redirect(Route),
}

/// Everything a renderer needs for one frame of the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistSnapshot {
    /// The student's display name.
    pub user_name: String,
    /// Grade shown.
    pub grade: GradeLevel,
    /// Month shown.
    pub month: Month,
    /// Tasks in display order.
    pub tasks: Vec<Task>,
    /// Completion counts.
    pub progress: Progress,
    /// Completed percentage, 0 for an empty list.
    pub percent: u8,
    /// Whether the most recent change reached the store.
    pub persistence: Persistence,
}

/// Live state of the checklist view.
pub struct ChecklistView<'a> {
    store: &'a dyn KeyValueStore,
    resolver: TaskStateResolver<'a>,
    user_name: String,
    scope: Scope,
    tasks: Vec<Task>,
    origin: Origin,
    persistence: Persistence,
}

impl<'a> ChecklistView<'a> {
    /// Enter the view on `today`, fixing the month from the date.
    pub fn enter(
        store: &'a dyn KeyValueStore,
        catalog: &'a Catalog,
        today: &impl Datelike,
    ) -> Entry<'a> {
        Self::enter_month(store, catalog, Month::from_date(today))
    }

    /// Enter the view for an explicit month.
    pub fn enter_month(store: &'a dyn KeyValueStore, catalog: &'a Catalog, month: Month) -> Entry<'a> {
        let Some(profile) = current_profile(store) else {
            return Entry::Redirect(Route::SignUp);
        };

        let resolver = TaskStateResolver::new(store, catalog);
        let state = resolver.resolve_scope(Scope::new(profile.grade, month));
        Entry::Open(Box::new(Self {
            store,
            resolver,
            user_name: profile.name,
            scope: state.scope,
            tasks: state.tasks,
            origin: state.origin,
            persistence: state.persistence,
        }))
    }

    /// Re-read the profile after the view regains focus.
    ///
    /// A changed grade re-resolves the list for the new grade in the same
    /// month. Returns a redirect if the profile is gone.
    pub fn refocus(&mut self) -> Option<Route> {
        let Some(profile) = current_profile(self.store) else {
            return Some(Route::SignUp);
        };
        self.user_name = profile.name;

        if profile.grade != self.scope.grade {
            debug!(from = %self.scope.grade, to = %profile.grade, "grade changed, reloading");
            let state = self.resolver.resolve_scope(Scope::new(profile.grade, self.scope.month));
            self.apply(state);
        }
        None
    }

    /// Toggle a task. Returns `false` if no task has that id.
    ///
    /// If the stored list could not be read when the view was resolved, it
    /// is read again first. While it stays unreadable the toggle is applied in
    /// memory only, so the stored record is never replaced by catalog defaults.
    pub fn toggle(&mut self, task_id: &str) -> bool {
        if self.origin == Origin::Fallback {
            let state = self.resolver.resolve_scope(self.scope);
            if state.origin != Origin::Fallback {
                debug!(scope = %self.scope, "stored tasks readable again, reloaded");
                self.apply(state);
            }
        }

        if self.origin == Origin::Fallback {
            let found = self.tasks.iter().any(|t| t.id == task_id);
            if found {
                warn!(scope = %self.scope, task_id, "stored tasks unreadable, toggle kept in memory");
                self.tasks = checklist::toggle(&self.tasks, task_id);
                self.persistence =
                    Persistence::Failed("stored tasks could not be read; change not saved".into());
            }
            return found;
        }

        let toggled = self.resolver.toggle_task(self.scope, task_id, &self.tasks);
        self.tasks = toggled.tasks;
        self.persistence = toggled.persistence;
        toggled.found
    }

    /// Discard the stored list for the current scope and reseed from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record cannot be removed.
    pub fn reset(&mut self) -> Result<()> {
        self.resolver.reset_scope(self.scope)?;
        let state = self.resolver.resolve_scope(self.scope);
        self.apply(state);
        Ok(())
    }

    fn apply(&mut self, state: ScopeState) {
        self.scope = state.scope;
        self.tasks = state.tasks;
        self.origin = state.origin;
        self.persistence = state.persistence;
    }

    /// The scope being shown.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Completion counts.
    #[must_use]
    pub fn progress(&self) -> Progress {
        checklist::progress(&self.tasks)
    }

    /// Whether the most recent change reached the store.
    #[must_use]
    pub const fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Capture the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ChecklistSnapshot {
        let progress = self.progress();
        ChecklistSnapshot {
            user_name: self.user_name.clone(),
            grade: self.scope.grade,
            month: self.scope.month,
            tasks: self.tasks.clone(),
            progress,
            percent: progress.percent(),
            persistence: self.persistence.clone(),
        }
    }
}

impl std::fmt::Debug for ChecklistView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecklistView")
            .field("scope", &self.scope)
            .field("tasks", &self.tasks)
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

fn current_profile(store: &dyn KeyValueStore) -> Option<UserProfile> {
    match load_profile(store) {
        Ok(profile) => profile,
        Err(e) => {
            warn!(error = %e, "could not load profile");
            None
        }
    }
}
