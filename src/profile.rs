//! The student profile stored under the `userData` key.
//!
//! The profile selects which grade's checklist is shown. The password is
//! kept as entered and never checked against anything.

use crate::checklist::GradeLevel;
use crate::error::{Error, Result};
use crate::traits::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Storage key for the profile record.
pub const PROFILE_KEY: &str = "userData";

/// A student's profile.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Opaque password string. Older records may lack it.
    #[serde(default)]
    pub password: String,
    /// Grade level that selects the checklist.
    #[serde(default)]
    pub grade: GradeLevel,
}

impl UserProfile {
    /// Create a profile.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        grade: GradeLevel,
    ) -> Self {
        Self { name: name.into(), email: email.into(), password: password.into(), grade }
    }

    /// Check that name, email and password are all non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in
            [("name", &self.name), ("email", &self.email), ("password", &self.password)]
        {
            if value.trim().is_empty() {
                return Err(Error::MissingField(field));
            }
        }
        Ok(())
    }

    /// A copy suitable for display, with the password masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self { password: "*".repeat(self.password.chars().count()), ..self.clone() }
    }
}

impl std::fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserProfile")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("grade", &self.grade)
            .finish()
    }
}

/// Partial update to a profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New grade level.
    pub grade: Option<GradeLevel>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none() && self.grade.is_none()
    }

    /// Apply the update to a profile.
    #[must_use]
    pub fn apply(self, profile: UserProfile) -> UserProfile {
        UserProfile {
            name: self.name.unwrap_or(profile.name),
            email: self.email.unwrap_or(profile.email),
            password: self.password.unwrap_or(profile.password),
            grade: self.grade.unwrap_or(profile.grade),
        }
    }
}

/// Load the stored profile.
///
/// Returns `Ok(None)` when no one has signed up (or after logout).
///
/// # Errors
///
/// Returns an error if the store cannot be read or the record is corrupt.
pub fn load_profile(store: &dyn KeyValueStore) -> Result<Option<UserProfile>> {
    store.get(PROFILE_KEY)?.map(|json| serde_json::from_str(&json).map_err(Error::from)).transpose()
}

/// Validate and store a profile, replacing any existing one.
///
/// # Errors
///
/// Returns an error if a required field is empty or the store cannot be written.
pub fn save_profile(store: &dyn KeyValueStore, profile: &UserProfile) -> Result<()> {
    profile.validate()?;
    store.set(PROFILE_KEY, &serde_json::to_string(profile)?)
}

/// Create the profile for a new user.
///
/// # Errors
///
/// Returns an error if a required field is empty or the store cannot be written.
pub fn sign_up(store: &dyn KeyValueStore, profile: &UserProfile) -> Result<()> {
    save_profile(store, profile)?;
    info!(grade = %profile.grade, "signed up");
    Ok(())
}

/// Apply a partial update to the stored profile and save it.
///
/// Returns the updated profile, or `None` if there is no profile to update.
///
/// # Errors
///
/// Returns an error if the store fails or the result has an empty required field.
pub fn update_profile(
    store: &dyn KeyValueStore,
    update: ProfileUpdate,
) -> Result<Option<UserProfile>> {
    let Some(current) = load_profile(store)? else {
        return Ok(None);
    };
    let updated = update.apply(current);
    save_profile(store, &updated)?;
    Ok(Some(updated))
}

/// Remove the stored profile.
///
/// Checklist records are kept, so signing up again with the same grade
/// shows the previous progress.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn logout(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(PROFILE_KEY)?;
    info!("logged out");
    Ok(())
}
