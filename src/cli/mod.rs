//! Command-line interface for ican-checklist.
//!
//! The binary is a thin wrapper: argument parsing lives here and command
//! execution in [`run`], which returns output instead of printing so every
//! command is testable.

mod profile;
mod run;


pub use profile::ProfileCommand;
pub use run::{run, CliOutput, RunContext};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Monthly career and college planning checklists for high school students.
///
/// Sign up once with your grade level, then run `ican-checklist checklist`
/// to see this month's tasks and `ican-checklist toggle <id>` to check them off.
#[derive(Parser, Debug)]
#[command(name = "ican-checklist")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to $ICAN_CHECKLIST_HOME or ~/.ican-checklist)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create your profile.
    ///
    /// Name, email and password are required. The grade selects which
    /// checklist you see and can be changed later with `profile update`.
    #[command(name = "signup")]
    SignUp {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (stored locally, not used for authentication)
        #[arg(short, long)]
        password: String,

        /// Grade level: 9th, 10th, 11th, 12th
        #[arg(short, long, default_value = "9th")]
        grade: String,
    },

    /// Profile management - view or edit your profile.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Remove your profile. Checklist progress is kept.
    Logout,

    /// Show the checklist for your grade and the current month.
    Checklist {
        /// Show a different month instead of the current one
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check or uncheck a task.
    Toggle {
        /// Task ID as shown in the checklist
        id: String,

        /// Month of the checklist (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset a checklist to the current catalog defaults, clearing progress.
    Reset {
        /// Month of the checklist (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List every checklist that has been started, with progress.
    Scopes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove stored checklists other than your current one.
    Prune,

    /// Show the built-in catalog of default tasks.
    Catalog {
        /// Only this grade level
        #[arg(short, long)]
        grade: Option<String>,

        /// Only this month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show where a screen would redirect to (signup or checklist).
    #[command(hide = true)]
    Route {
        /// The screen being shown: signup or checklist
        current: String,
    },

    /// Show version information.
    Version,
}

impl Command {
    /// Returns true if this command needs a signed-up profile.
    #[must_use]
    pub const fn needs_profile(&self) -> bool {
        matches!(self, Self::Checklist { .. } | Self::Toggle { .. } | Self::Reset { .. } | Self::Prune)
    }
}
