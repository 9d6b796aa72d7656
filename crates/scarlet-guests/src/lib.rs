//! Guest list domain for Scarlet Drive.
//!
//! This crate holds the persisted document shape, the rules that validate and
//! apply a single mutation to it, and the read view derived from it. Nothing
//! here touches the filesystem; see `scarlet-storage` for persistence and
//! write serialization.
//!
//! ## Capacity
//!
//! The list is bounded globally by [`MAX_GUESTS`] and per host by
//! [`MAX_GUESTS_PER_HOST`]. Both are enforced by [`StoreDocument::create`]
//! and [`StoreDocument::update`] against the snapshot they are given.

mod document;
mod error;
mod guest;
mod host;
mod input;
mod view;

pub use document::{StoreDocument, UpdateOutcome};
pub use error::GuestError;
pub use guest::GuestRecord;
pub use host::Host;
pub use input::{parse_flag, GuestInput, GuestPatch, NewGuest};
pub use view::{Counters, GuestView, Limits, YesNo};

/// Maximum number of guests across all hosts.
pub const MAX_GUESTS: usize = 120;

/// Maximum number of guests a single host may invite.
pub const MAX_GUESTS_PER_HOST: usize = 24;

/// Maximum length of a guest name, in characters, after trimming.
pub const MAX_NAME_CHARS: usize = 120;

/// Result type for guest list operations.
pub type Result<T> = std::result::Result<T, GuestError>;
