//! Error types for guest list operations.

use thiserror::Error;

use crate::Host;

/// Errors raised while validating or applying a guest list mutation.
///
/// Every variant maps to a stable machine-readable code, see [`GuestError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestError {
    /// Name missing or blank after trimming.
    #[error("guest name is required")]
    NameRequired,

    /// Name longer than the allowed number of characters.
    #[error("guest name must be at most {max} characters")]
    NameTooLong { max: usize },

    /// `invitedBy` is not one of the known hosts.
    #[error("invitedBy must be one of: {}", Host::names().join(", "))]
    InvalidInvitedBy,

    /// A boolean field could not be interpreted.
    #[error("{field} must be a yes/no value")]
    InvalidBoolean { field: &'static str },

    /// The global guest limit has been reached.
    #[error("guest list is full ({limit} guests)")]
    LimitTotalReached { limit: usize },

    /// The host already invited as many guests as allowed.
    #[error("{host} already has {limit} guests")]
    LimitHostReached { host: Host, limit: usize },

    /// The id counter cannot advance any further.
    #[error("no guest ids left")]
    IdsExhausted,

    /// No guest with the given id.
    #[error("guest not found: {id}")]
    NotFound { id: u64 },
}

impl GuestError {
    /// Machine-readable error code returned to clients.
    pub fn code(&self) -> &'static str {
        match self {
            GuestError::NameRequired => "NAME_REQUIRED",
            GuestError::NameTooLong { .. } => "NAME_TOO_LONG",
            GuestError::InvalidInvitedBy => "INVALID_INVITED_BY",
            GuestError::InvalidBoolean { .. } => "INVALID_BOOLEAN",
            GuestError::LimitTotalReached { .. } => "LIMIT_TOTAL_REACHED",
            GuestError::LimitHostReached { .. } => "LIMIT_HOST_REACHED",
            GuestError::IdsExhausted => "IDS_EXHAUSTED",
            GuestError::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Returns true for errors caused by a missing guest rather than bad input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GuestError::NotFound { .. })
    }
}
