//! Per-day habit marks stored as free-standing key-value entries.
//!
//! # Invariants
//! - A mark exists iff its key is present.
//! - The stored value records whether marking moved the habit counter:
//!   `"1"` when it did, `"0"` when the counter already sat at its target.
//! - Pruning only touches keys that parse as `DailyMarkKey`.

use crate::model::habit::{DailyMarkKey, DAILY_MARK_PREFIX};
use crate::repo::kv_repo::{KeyValueRepository, RepoResult};
use chrono::NaiveDate;
use log::debug;

const COUNTED_VALUE: &str = "1";
const SATURATED_VALUE: &str = "0";

/// One day's mark for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkState {
    Unmarked,
    /// Marking incremented the counter; unmarking must decrement it.
    Counted,
    /// Marked while the counter was at its target; unmarking leaves it alone.
    Saturated,
}

pub fn mark_state<R: KeyValueRepository>(repo: &R, key: DailyMarkKey) -> RepoResult<MarkState> {
    Ok(match repo.get(&key.storage_key())?.as_deref() {
        None => MarkState::Unmarked,
        Some(SATURATED_VALUE) => MarkState::Saturated,
        Some(_) => MarkState::Counted,
    })
}

pub fn is_marked<R: KeyValueRepository>(repo: &R, key: DailyMarkKey) -> RepoResult<bool> {
    Ok(mark_state(repo, key)? != MarkState::Unmarked)
}

/// Stores `state`; `Unmarked` removes the key.
pub fn write_mark<R: KeyValueRepository>(
    repo: &R,
    key: DailyMarkKey,
    state: MarkState,
) -> RepoResult<()> {
    let storage_key = key.storage_key();
    match state {
        MarkState::Unmarked => repo.remove(&storage_key),
        MarkState::Counted => repo.set(&storage_key, COUNTED_VALUE),
        MarkState::Saturated => repo.set(&storage_key, SATURATED_VALUE),
    }
}

/// Removes every mark dated before `keep_from`. Returns the number removed.
pub fn prune_before<R: KeyValueRepository>(repo: &R, keep_from: NaiveDate) -> RepoResult<usize> {
    let mut removed = 0;
    for key in repo.keys_with_prefix(DAILY_MARK_PREFIX)? {
        match DailyMarkKey::parse(&key) {
            Some(mark) if mark.day < keep_from => {
                repo.remove(&key)?;
                removed += 1;
            }
            Some(_) => {}
            None => debug!("event=mark_prune module=store status=skip reason=unparsed_key"),
        }
    }
    Ok(removed)
}
