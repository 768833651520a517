//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::checklist::{Catalog, GradeLevel, Month, Scope, TaskStateResolver};
use crate::cli::{Command, ProfileCommand};
use crate::config::AppConfig;
use crate::error::Result;
use crate::navigation::{redirect_for, Route};
use crate::profile::{self, ProfileUpdate, UserProfile};
use crate::storage::SqliteStore;
use crate::templates;
use crate::view::{ChecklistView, Entry};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Exit code used when the command needs a profile and none exists.
const EXIT_NEEDS_SIGNUP: u8 = 2;

/// Environment a command runs in.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Data directory holding the config and database.
    pub data_dir: PathBuf,
    /// Loaded configuration.
    pub config: AppConfig,
    /// The date the checklist month is derived from.
    pub today: NaiveDate,
}

impl RunContext {
    /// Load the config from `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(data_dir: PathBuf, today: NaiveDate) -> Result<Self> {
        let config = AppConfig::load_or_default(&data_dir)?;
        Ok(Self { data_dir, config, today })
    }

    /// Path of the database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.config.database_path(&self.data_dir)
    }

    fn open_store(&self) -> std::result::Result<SqliteStore, String> {
        SqliteStore::open(self.database_path())
            .map_err(|e| format!("Error opening {}: {e}", self.database_path().display()))
    }

    fn month_or_current(&self, month: Option<&String>) -> std::result::Result<Month, String> {
        month.map_or_else(
            || Ok(Month::from_date(&self.today)),
            |m| m.parse::<Month>().map_err(|e| e.to_string()),
        )
    }
}

/// Run a CLI command.
pub fn run(command: Command, ctx: &RunContext) -> CliOutput {
    if matches!(command, Command::Version) {
        return run_version();
    }

    let store = match ctx.open_store() {
        Ok(s) => s,
        Err(e) => return error_output(e),
    };

    if command.needs_profile() && redirect_for(&store, Route::Checklist).is_some() {
        return needs_signup_output();
    }

    match command {
        Command::Version => run_version(),
        Command::SignUp { name, email, password, grade } => {
            run_sign_up(&store, name, email, password, &grade)
        }
        Command::Profile(cmd) => run_profile_cmd(&store, cmd),
        Command::Logout => run_logout(&store),
        Command::Checklist { month, json } => run_checklist(&store, ctx, month.as_ref(), json),
        Command::Toggle { id, month, json } => run_toggle(&store, ctx, &id, month.as_ref(), json),
        Command::Reset { month } => run_reset(&store, ctx, month.as_ref()),
        Command::Scopes { json } => run_scopes(&store, json),
        Command::Prune => run_prune(&store, ctx),
        Command::Catalog { grade, month } => run_catalog(grade.as_ref(), month.as_ref()),
        Command::Route { current } => run_route(&store, &current),
    }
}

// === Utility Commands ===

fn run_version() -> CliOutput {
    success_output(format!("ican-checklist v{}", crate::VERSION))
}

fn run_catalog(grade: Option<&String>, month: Option<&String>) -> CliOutput {
    let grade = match grade.map(|g| g.parse::<GradeLevel>()).transpose() {
        Ok(g) => g,
        Err(e) => return error_output(e.to_string()),
    };
    let month = match month.map(|m| m.parse::<Month>()).transpose() {
        Ok(m) => m,
        Err(e) => return error_output(e.to_string()),
    };

    let catalog = Catalog::builtin();
    let scopes: Vec<Scope> = catalog
        .scopes()
        .into_iter()
        .filter(|s| grade.map_or(true, |g| s.grade == g) && month.map_or(true, |m| s.month == m))
        .collect();

    match templates::render_catalog(catalog, &scopes) {
        Ok(text) => success_output(text),
        Err(e) => error_output(e.to_string()),
    }
}

fn run_route(store: &SqliteStore, current: &str) -> CliOutput {
    #[derive(Serialize)]
    struct RouteOutput {
        current: Route,
        redirect: Option<Route>,
    }

    let current = match current {
        "signup" => Route::SignUp,
        "checklist" => Route::Checklist,
        other => {
            return error_output(format!("Unknown route: {other} (expected signup or checklist)"))
        }
    };

    json_output(&RouteOutput { current, redirect: redirect_for(store, current) })
}

// === Profile Commands ===

fn run_sign_up(
    store: &SqliteStore,
    name: String,
    email: String,
    password: String,
    grade: &str,
) -> CliOutput {
    let grade = match grade.parse::<GradeLevel>() {
        Ok(g) => g,
        Err(e) => return error_output(e.to_string()),
    };

    let profile = UserProfile::new(name, email, password, grade);
    match profile::sign_up(store, &profile) {
        Ok(()) => CliOutput {
            exit_code: ExitCode::SUCCESS,
            stdout: vec![format!("Welcome, {}! Showing {grade} grade checklists.", profile.name)],
            stderr: vec![format!("redirect: {}", Route::Checklist)],
        },
        Err(e) => error_output(e.to_string()),
    }
}

fn run_profile_cmd(store: &SqliteStore, cmd: ProfileCommand) -> CliOutput {
    match cmd {
        ProfileCommand::Show => match profile::load_profile(store) {
            Ok(Some(p)) => json_output(&p.redacted()),
            Ok(None) => needs_signup_output(),
            Err(e) => error_output(format!("Failed to load user data: {e}")),
        },
        ProfileCommand::Update { name, email, password, grade } => {
            let grade = match grade.map(|g| g.parse::<GradeLevel>()).transpose() {
                Ok(g) => g,
                Err(e) => return error_output(e.to_string()),
            };
            let update = ProfileUpdate { name, email, password, grade };
            if update.is_empty() {
                return error_output("Nothing to update".to_string());
            }
            match profile::update_profile(store, update) {
                Ok(Some(p)) => json_output(&p.redacted()),
                Ok(None) => needs_signup_output(),
                Err(e) => error_output(format!("Failed to update profile: {e}")),
            }
        }
    }
}

fn run_logout(store: &SqliteStore) -> CliOutput {
    match profile::logout(store) {
        Ok(()) => CliOutput {
            exit_code: ExitCode::SUCCESS,
            stdout: vec!["Logged out".to_string()],
            stderr: vec![format!("redirect: {}", Route::SignUp)],
        },
        Err(e) => error_output(format!("Failed to logout: {e}")),
    }
}

// === Checklist Commands ===

fn open_view<'a>(
    store: &'a SqliteStore,
    month: Month,
) -> std::result::Result<ChecklistView<'a>, CliOutput> {
    match ChecklistView::enter_month(store, Catalog::builtin(), month) {
        Entry::Open(view) => Ok(*view),
        Entry::Redirect(_) => Err(needs_signup_output()),
    }
}

fn render_view(view: &ChecklistView<'_>, json: bool) -> CliOutput {
    let snapshot = view.snapshot();
    if json {
        return json_output(&snapshot);
    }
    match templates::render_checklist(&snapshot) {
        Ok(text) => success_output(text),
        Err(e) => error_output(e.to_string()),
    }
}

fn run_checklist(
    store: &SqliteStore,
    ctx: &RunContext,
    month: Option<&String>,
    json: bool,
) -> CliOutput {
    let month = match ctx.month_or_current(month) {
        Ok(m) => m,
        Err(e) => return error_output(e),
    };
    match open_view(store, month) {
        Ok(view) => render_view(&view, json),
        Err(output) => output,
    }
}

fn run_toggle(
    store: &SqliteStore,
    ctx: &RunContext,
    id: &str,
    month: Option<&String>,
    json: bool,
) -> CliOutput {
    let month = match ctx.month_or_current(month) {
        Ok(m) => m,
        Err(e) => return error_output(e),
    };
    let mut view = match open_view(store, month) {
        Ok(view) => view,
        Err(output) => return output,
    };

    if !view.toggle(id) {
        return error_output(format!("No task with id '{id}' in the {} checklist", view.scope()));
    }
    render_view(&view, json)
}

fn run_reset(store: &SqliteStore, ctx: &RunContext, month: Option<&String>) -> CliOutput {
    let month = match ctx.month_or_current(month) {
        Ok(m) => m,
        Err(e) => return error_output(e),
    };
    let mut view = match open_view(store, month) {
        Ok(view) => view,
        Err(output) => return output,
    };

    match view.reset() {
        Ok(()) => render_view(&view, false),
        Err(e) => error_output(format!("Failed to reset checklist: {e}")),
    }
}

fn run_scopes(store: &SqliteStore, json: bool) -> CliOutput {
    let resolver = TaskStateResolver::new(store, Catalog::builtin());
    let summaries = match resolver.seeded_progress() {
        Ok(s) => s,
        Err(e) => return error_output(format!("Failed to list checklists: {e}")),
    };

    if json {
        #[derive(Serialize)]
        struct ScopeOutput {
            grade: GradeLevel,
            month: Month,
            completed: usize,
            total: usize,
        }
        let output: Vec<ScopeOutput> = summaries
            .iter()
            .map(|(scope, progress)| ScopeOutput {
                grade: scope.grade,
                month: scope.month,
                completed: progress.completed,
                total: progress.total,
            })
            .collect();
        return json_output(&output);
    }

    match templates::render_scopes(&summaries) {
        Ok(text) => success_output(text),
        Err(e) => error_output(e.to_string()),
    }
}

fn run_prune(store: &SqliteStore, ctx: &RunContext) -> CliOutput {
    let profile = match profile::load_profile(store) {
        Ok(Some(p)) => p,
        Ok(None) => return needs_signup_output(),
        Err(e) => return error_output(format!("Failed to load user data: {e}")),
    };
    let keep = Scope::new(profile.grade, Month::from_date(&ctx.today));
    let resolver = TaskStateResolver::new(store, Catalog::builtin());
    match resolver.prune_scopes(&[keep]) {
        Ok(removed) => success_output(format!("Removed {removed} stored checklist(s); kept {keep}")),
        Err(e) => error_output(format!("Failed to prune checklists: {e}")),
    }
}

// === Output helpers ===

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(e.to_string()),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}

fn needs_signup_output() -> CliOutput {
    CliOutput {
        exit_code: ExitCode::from(EXIT_NEEDS_SIGNUP),
        stdout: vec![],
        stderr: vec![
            "No profile found. Sign up first: ican-checklist signup --name <NAME> --email <EMAIL> --password <PASSWORD> --grade <GRADE>".to_string(),
            format!("redirect: {}", Route::SignUp),
        ],
    }
}
