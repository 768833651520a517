//! Profile CLI subcommands.

use clap::Subcommand;

/// Profile management commands.
///
/// ```bash
/// # Show the stored profile (password masked)
/// ican-checklist profile show
///
/// # Move up a grade
/// ican-checklist profile update --grade 10th
/// ```
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the stored profile.
    Show,

    /// Update profile fields.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Update {
        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New email
        #[arg(short, long)]
        email: Option<String>,

        /// New password
        #[arg(short, long)]
        password: Option<String>,

        /// New grade level: 9th, 10th, 11th, 12th
        #[arg(short, long)]
        grade: Option<String>,
    },
}
