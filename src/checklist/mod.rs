//! Grade- and month-indexed checklists.
//!
//! This module provides:
//! - The static [`Catalog`] of default task lists per (grade, month) scope
//! - The [`TaskStateResolver`], which seeds, loads and toggles per-scope lists
//!   in a [`KeyValueStore`](crate::traits::KeyValueStore)
//! - Progress computation over a task list
//!
//! # Example
//!
//! ```no_run
//! use ican_checklist::checklist::{Catalog, GradeLevel, Month, Scope, TaskStateResolver};
//! use ican_checklist::storage::SqliteStore;
//!
//! let store = SqliteStore::open("/tmp/checklist.sqlite3").unwrap();
//! let resolver = TaskStateResolver::new(&store, Catalog::builtin());
//!
//! let scope = Scope::new(GradeLevel::Ninth, Month::August);
//! let state = resolver.resolve_scope(scope);
//! let toggled = resolver.toggle_task(scope, "3", &state.tasks);
//! println!("{}", ican_checklist::checklist::progress(&toggled.tasks));
//! ```

pub mod catalog;
pub mod models;
pub mod resolver;
pub mod scope;

pub use catalog::Catalog;
pub use models::{GradeLevel, Month, Progress, Task};
pub use resolver::{
    progress, resolve, toggle, Origin, Persistence, Resolution, ScopeState, TaskStateResolver,
    Toggled,
};
pub use scope::{Scope, SCOPE_KEY_PREFIX};
