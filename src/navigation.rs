//! Redirect decisions between the sign-up flow and the checklist.
//!
//! Routing itself belongs to the caller; this module only says where to go.

use crate::profile::PROFILE_KEY;
use crate::traits::KeyValueStore;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A top-level destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// The sign-up flow, shown when no profile exists.
    SignUp,
    /// The monthly checklist, shown once a profile exists.
    Checklist,
}

impl Route {
    /// Path-style name of the route.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignUp => "/signup",
            Self::Checklist => "/checklist",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether the caller, currently at `current`, should be redirected.
///
/// - No profile while on the checklist: go to sign-up.
/// - A profile while on sign-up: go to the checklist.
///
/// Only presence of the record matters here. A store read failure is logged
/// and yields no redirect.
pub fn redirect_for(store: &dyn KeyValueStore, current: Route) -> Option<Route> {
    let has_profile = match store.get(PROFILE_KEY) {
        Ok(value) => value.is_some(),
        Err(e) => {
            warn!(error = %e, "could not check for a profile");
            return None;
        }
    };

    match (has_profile, current) {
        (false, Route::Checklist) => Some(Route::SignUp),
        (true, Route::SignUp) => Some(Route::Checklist),
        _ => None,
    }
}
