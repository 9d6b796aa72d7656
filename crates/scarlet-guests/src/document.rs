//! The persisted guest list document and the rules that mutate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    GuestError, GuestInput, GuestRecord, Host, Result, MAX_GUESTS, MAX_GUESTS_PER_HOST,
};

/// The whole guest list as stored on disk.
///
/// `next_id` is strictly greater than every id ever issued, including ids
/// of guests that have since been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    pub next_id: u64,
    pub guests: Vec<GuestRecord>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            next_id: 1,
            guests: Vec::new(),
        }
    }
}

/// Result of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The guest after the update.
    pub guest: GuestRecord,
    /// False when the update matched the stored values and nothing changed.
    pub changed: bool,
}

impl StoreDocument {
    /// Gets a guest by id.
    pub fn get(&self, id: u64) -> Result<&GuestRecord> {
        self.guests
            .iter()
            .find(|g| g.id == id)
            .ok_or(GuestError::NotFound { id })
    }

    /// Number of guests invited by `host`.
    pub fn host_count(&self, host: Host) -> usize {
        self.guests.iter().filter(|g| g.invited_by == host).count()
    }

    /// Validates `input` and appends a new guest.
    pub fn create(&mut self, input: &GuestInput, now: DateTime<Utc>) -> Result<GuestRecord> {
        let new = input.to_new_guest()?;

        if self.guests.len() >= MAX_GUESTS {
            return Err(GuestError::LimitTotalReached { limit: MAX_GUESTS });
        }
        if self.host_count(new.invited_by) >= MAX_GUESTS_PER_HOST {
            return Err(GuestError::LimitHostReached {
                host: new.invited_by,
                limit: MAX_GUESTS_PER_HOST,
            });
        }

        let following = self
            .next_id
            .checked_add(1)
            .ok_or(GuestError::IdsExhausted)?;

        let guest = GuestRecord {
            id: self.next_id,
            name: new.name,
            invited_by: new.invited_by,
            is_paid: new.is_paid,
            is_confirmed: new.is_confirmed,
            created_at: now,
            updated_at: now,
        };
        self.next_id = following;
        self.guests.push(guest.clone());
        Ok(guest)
    }

    /// Applies the fields present in `input` to guest `id`.
    ///
    /// Moving a guest to another host re-checks that host's limit. An update
    /// that changes nothing leaves `updated_at` alone and reports
    /// `changed: false`.
    pub fn update(
        &mut self,
        id: u64,
        input: &GuestInput,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        let index = self.index_of(id)?;
        let patch = input.to_patch()?;
        let current = &self.guests[index];

        if let Some(host) = patch.invited_by {
            // The guest being moved is never counted in the target host.
            if host != current.invited_by && self.host_count(host) >= MAX_GUESTS_PER_HOST {
                return Err(GuestError::LimitHostReached {
                    host,
                    limit: MAX_GUESTS_PER_HOST,
                });
            }
        }

        let mut next = current.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(host) = patch.invited_by {
            next.invited_by = host;
        }
        if let Some(paid) = patch.is_paid {
            next.is_paid = paid;
        }
        if let Some(confirmed) = patch.is_confirmed {
            next.is_confirmed = confirmed;
        }

        if next == *current {
            return Ok(UpdateOutcome {
                guest: next,
                changed: false,
            });
        }

        next.updated_at = now;
        self.guests[index] = next.clone();
        Ok(UpdateOutcome {
            guest: next,
            changed: true,
        })
    }

    /// Removes guest `id` and returns it. `next_id` is left untouched.
    pub fn delete(&mut self, id: u64) -> Result<GuestRecord> {
        let index = self.index_of(id)?;
        Ok(self.guests.remove(index))
    }

    fn index_of(&self, id: u64) -> Result<usize> {
        self.guests
            .iter()
            .position(|g| g.id == id)
            .ok_or(GuestError::NotFound { id })
    }
}
