//! Small user preferences kept next to the record collections.
//!
//! # Invariants
//! - Night mode is stored as the literal text `"true"` or `"false"`.
//! - A missing weekly goals entry reads as `None`, not as empty text.

use crate::repo::kv_repo::{KeyValueRepository, RepoResult};
use log::info;

pub const WEEKLY_GOALS_KEY: &str = "weeklyGoals";
pub const NIGHT_MODE_KEY: &str = "nightMode";

const NIGHT_STARTS_AT_HOUR: u32 = 20;
const NIGHT_ENDS_AT_HOUR: u32 = 6;

/// Preference accessors over a borrowed repository.
pub struct Preferences<'r, R: KeyValueRepository> {
    repo: &'r R,
}

impl<'r, R: KeyValueRepository> Preferences<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    pub fn weekly_goals(&self) -> RepoResult<Option<String>> {
        self.repo.get(WEEKLY_GOALS_KEY)
    }

    pub fn set_weekly_goals(&self, goals: &str) -> RepoResult<()> {
        self.repo.set(WEEKLY_GOALS_KEY, goals)
    }

    pub fn night_mode(&self) -> RepoResult<bool> {
        Ok(self.repo.get(NIGHT_MODE_KEY)?.as_deref() == Some("true"))
    }

    pub fn set_night_mode(&self, enabled: bool) -> RepoResult<()> {
        self.repo
            .set(NIGHT_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Startup resolution: during night hours the flag is switched on and
    /// persisted. Outside night hours the stored value is returned as is.
    pub fn resolve_night_mode(&self, local_hour: u32) -> RepoResult<bool> {
        let stored = self.night_mode()?;
        if !stored && is_night_hour(local_hour) {
            self.set_night_mode(true)?;
            info!("event=night_mode_auto module=preferences status=ok hour={local_hour}");
            return Ok(true);
        }
        Ok(stored)
    }
}

/// Hours in `[20, 24)` and `[0, 6)` count as night.
pub fn is_night_hour(hour: u32) -> bool {
    hour >= NIGHT_STARTS_AT_HOUR || hour < NIGHT_ENDS_AT_HOUR
}
