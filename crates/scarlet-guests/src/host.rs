//! The fixed set of hosts allowed to invite guests.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::GuestError;

/// A host (inviter). The set is closed; there is no free-text host.
///
/// Variant order is the display order used by the aggregate counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Host {
    Diogo,
    Bruna,
    Rafael,
    Camila,
    Lucas,
}

impl Host {
    /// All hosts in display order.
    pub const ALL: [Host; 5] = [
        Host::Diogo,
        Host::Bruna,
        Host::Rafael,
        Host::Camila,
        Host::Lucas,
    ];

    /// Returns the host's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Host::Diogo => "Diogo",
            Host::Bruna => "Bruna",
            Host::Rafael => "Rafael",
            Host::Camila => "Camila",
            Host::Lucas => "Lucas",
        }
    }

    /// Returns every host name in display order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Host::name).collect()
    }
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Host {
    type Err = GuestError;

    /// Parses an exact host name, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|host| host.name() == s)
            .ok_or(GuestError::InvalidInvitedBy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_hosts() {
        for host in Host::ALL {
            assert_eq!(host.name().parse::<Host>().unwrap(), host);
        }
        assert_eq!("  Camila ".parse::<Host>().unwrap(), Host::Camila);
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_variants() {
        assert_eq!("Unknown".parse::<Host>(), Err(GuestError::InvalidInvitedBy));
        assert_eq!("diogo".parse::<Host>(), Err(GuestError::InvalidInvitedBy));
        assert_eq!("".parse::<Host>(), Err(GuestError::InvalidInvitedBy));
    }

    #[test]
    fn test_serde_uses_display_name() {
        assert_eq!(serde_json::to_string(&Host::Rafael).unwrap(), "\"Rafael\"");
        let host: Host = serde_json::from_str("\"Lucas\"").unwrap();
        assert_eq!(host, Host::Lucas);
    }
}
