//! Template loading and rendering using Tera.
//!
//! Text output of the CLI is rendered from templates embedded in the binary.
//! A templates directory may be supplied to override individual templates.

use crate::checklist::{Catalog, Progress, Scope, Task};
use crate::error::{Error, Result};
use crate::view::ChecklistSnapshot;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tera::{Context, Tera};

/// Checklist view template name.
pub const CHECKLIST: &str = "checklist.tera";
/// Catalog listing template name.
pub const CATALOG: &str = "catalog.tera";
/// Seeded scope listing template name.
pub const SCOPES: &str = "scopes.tera";

/// Embedded default templates for fallback when files don't exist.
static EMBEDDED_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(CHECKLIST, include_str!("../templates/checklist.tera"));
    m.insert(CATALOG, include_str!("../templates/catalog.tera"));
    m.insert(SCOPES, include_str!("../templates/scopes.tera"));
    m
});

/// Global template engine with caching.
static TERA: Lazy<RwLock<Option<Tera>>> = Lazy::new(|| RwLock::new(None));

/// Initialize the template engine.
///
/// Templates found in `templates_dir` take precedence; every template not
/// found there is loaded from the embedded defaults.
///
/// # Errors
///
/// Returns an error if the directory contains invalid templates or an
/// embedded template fails to parse.
pub fn init_templates(templates_dir: Option<&Path>) -> Result<()> {
    let mut tera = match templates_dir {
        Some(dir) if dir.exists() => {
            let glob_pattern = format!("{}/**/*.tera", dir.display());
            Tera::new(&glob_pattern).map_err(|e| {
                Error::Template(format!("Failed to load templates from {}: {e}", dir.display()))
            })?
        }
        _ => Tera::default(),
    };

    for (name, content) in EMBEDDED_TEMPLATES.iter() {
        if tera.get_template(name).is_err() {
            tera.add_raw_template(name, content)
                .map_err(|e| Error::Template(format!("Embedded template {name} is invalid: {e}")))?;
        }
    }

    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = Some(tera);

    Ok(())
}

/// Render a template with the given context.
///
/// The engine is initialized from the embedded templates on first use.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let needs_init = TERA.read().map_err(|e| Error::Template(e.to_string()))?.is_none();

    if needs_init {
        init_templates(None)?;
    }

    let guard = TERA.read().map_err(|e| Error::Template(e.to_string()))?;
    let tera = guard.as_ref().ok_or_else(|| Error::Template("Templates not initialized".into()))?;
    let rendered = tera
        .render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))?;
    drop(guard);

    Ok(rendered)
}

/// Render the checklist view.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_checklist(snapshot: &ChecklistSnapshot) -> Result<String> {
    let mut context = Context::from_serialize(snapshot)
        .map_err(|e| Error::Template(format!("Invalid checklist context: {e}")))?;
    let warning = match &snapshot.persistence {
        crate::checklist::Persistence::Failed(e) => {
            Some(format!("changes could not be saved and will be lost on exit ({e})"))
        }
        _ => None,
    };
    context.insert("warning", &warning);
    render(CHECKLIST, &context)
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    grade: String,
    month: String,
    tasks: &'a [Task],
}

/// Render catalog templates for the given scopes.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_catalog(catalog: &Catalog, scopes: &[Scope]) -> Result<String> {
    let entries: Vec<CatalogEntry<'_>> = scopes
        .iter()
        .map(|scope| CatalogEntry {
            grade: scope.grade.to_string(),
            month: scope.month.to_string(),
            tasks: catalog.templates(*scope),
        })
        .collect();
    let mut context = Context::new();
    context.insert("entries", &entries);
    render(CATALOG, &context)
}

#[derive(Serialize)]
struct ScopeSummary {
    grade: String,
    month: String,
    progress: Progress,
}

/// Render a summary of seeded scopes and their progress.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_scopes(scopes: &[(Scope, Progress)]) -> Result<String> {
    let summaries: Vec<ScopeSummary> = scopes
        .iter()
        .map(|(scope, progress)| ScopeSummary {
            grade: scope.grade.to_string(),
            month: scope.month.to_string(),
            progress: *progress,
        })
        .collect();
    let mut context = Context::new();
    context.insert("scopes", &summaries);
    render(SCOPES, &context)
}

/// Reset the template cache, forcing re-initialization on next use.
///
/// # Errors
///
/// Returns an error if the write lock cannot be acquired.
pub fn reset_cache() -> Result<()> {
    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::{GradeLevel, Month, Persistence};
    use serial_test::serial;
    use tempfile::TempDir;

    fn snapshot(tasks: Vec<Task>, persistence: Persistence) -> ChecklistSnapshot {
        let progress = crate::checklist::progress(&tasks);
        ChecklistSnapshot {
            user_name: "Ada".to_string(),
            grade: GradeLevel::Ninth,
            month: Month::August,
            tasks,
            progress,
            percent: progress.percent(),
            persistence,
        }
    }

    #[test]
    #[serial]
    fn test_render_checklist() {
        let mut tasks = vec![Task::new("1", "Use a planner"), Task::new("2", "Volunteer")];
        tasks[1].done = true;

        let text = render_checklist(&snapshot(tasks, Persistence::Saved)).unwrap();
        assert!(text.contains("Welcome, Ada!"));
        assert!(text.contains("August Checklist"));
        assert!(text.contains("9th Grade"));
        assert!(text.contains("1 of 2 tasks completed (50%)"));
        assert!(text.contains("[ ] 1. Use a planner"));
        assert!(text.contains("[x] 2. Volunteer"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    #[serial]
    fn test_render_empty_checklist() {
        let text = render_checklist(&snapshot(vec![], Persistence::Unchanged)).unwrap();
        assert!(text.contains("0 of 0 tasks completed (0%)"));
        assert!(text.contains("No tasks for this month."));
    }

    #[test]
    #[serial]
    fn test_render_checklist_with_failed_persistence() {
        let text = render_checklist(&snapshot(
            vec![Task::new("1", "Use a planner")],
            Persistence::Failed("disk full".into()),
        ))
        .unwrap();
        assert!(text.contains("Warning: changes could not be saved"));
        assert!(text.contains("disk full"));
    }

    #[test]
    #[serial]
    fn test_render_catalog() {
        let scope = Scope::new(GradeLevel::Twelfth, Month::July);
        let text = render_catalog(Catalog::builtin(), &[scope]).unwrap();
        assert!(text.contains("12th Grade, July (1 tasks)"));
        assert!(text.contains("1. Renew FAFSA for following year"));
    }

    #[test]
    #[serial]
    fn test_render_scopes() {
        let text = render_scopes(&[]).unwrap();
        assert!(text.contains("No checklists have been started yet."));

        let scope = Scope::new(GradeLevel::Tenth, Month::May);
        let text = render_scopes(&[(scope, Progress { completed: 2, total: 3 })]).unwrap();
        assert!(text.contains("10th Grade, May: 2 of 3 done"));
    }

    #[test]
    #[serial]
    fn test_templates_dir_overrides_embedded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SCOPES), "custom scopes").unwrap();

        init_templates(Some(dir.path())).unwrap();
        assert_eq!(render_scopes(&[]).unwrap(), "custom scopes");
        // Templates not in the directory still come from the embedded set.
        assert!(render_catalog(Catalog::builtin(), &[]).is_ok());

        reset_cache().unwrap();
        assert!(render_scopes(&[]).unwrap().contains("No checklists"));
    }

    #[test]
    fn test_unknown_template_is_error() {
        assert!(render("missing.tera", &Context::new()).is_err());
    }
}
