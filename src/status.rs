use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized view of an OS authorization state.
///
/// `NotDetermined` is the only state from which a request may be initiated;
/// the other three are terminal from the requester's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalStatus {
    Authorized,
    Denied,
    NotDetermined,
    Restricted,
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorized => write!(f, "authorized"),
            Self::Denied => write!(f, "denied"),
            Self::NotDetermined => write!(f, "not determined"),
            Self::Restricted => write!(f, "restricted"),
        }
    }
}

/// Result of one request call, delivered exactly once.
///
/// `NeedsSettingsRedirect` means the platform will not re-prompt; the user
/// has to flip the switch in system settings. `TimedOut` only occurs when the
/// authorizer was configured with a timeout and the prompt went unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RequestOutcome {
    AlreadyAuthorized,
    JustAuthorized,
    Denied,
    NeedsSettingsRedirect,
    TimedOut,
}

impl fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAuthorized => write!(f, "already authorized"),
            Self::JustAuthorized => write!(f, "just authorized"),
            Self::Denied => write!(f, "denied"),
            Self::NeedsSettingsRedirect => write!(f, "needs settings redirect"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// What a platform port reports, before canonical mapping.
///
/// The union over all kinds: the location variants only come from location
/// ports, `Unavailable` stands for an API that is missing on the running OS
/// build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NativeState {
    Granted,
    Denied,
    Restricted,
    Undetermined,
    /// Location only: "when in use" was granted while "always" is the goal.
    GrantedWhileInUse,
    /// Location only: location services are switched off system-wide.
    ServicesDisabled,
    Unavailable,
}
