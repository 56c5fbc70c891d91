//! Errors raised while resolving the device configuration.
//!
//! Every variant is an integrator mistake: the firmware refuses to boot and
//! the build script refuses to build rather than fall back to a default.
//! No variant allocates.

use core::fmt;

use crate::profile::ProfileId;
use crate::secrets::{Credential, CredentialError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No device profile is enabled.
    NoProfileSelected,

    /// More than one device profile is enabled.
    ConflictingProfiles { first: ProfileId, second: ProfileId },

    /// A selector string does not name a known profile.
    UnknownProfile,

    /// A required secret is absent from the secret store.
    MissingCredential(Credential),

    /// A secret is present but cannot be used.
    InvalidCredential {
        field: Credential,
        reason: CredentialError,
    },

    /// The telemetry endpoint is not an http(s) URL.
    InvalidEndpoint,

    /// The pin cannot drive a one-wire bus on this board.
    InvalidProbePin(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProfileSelected => write!(
                f,
                "no device selected: enable exactly one of the koelkast-a..koelkast-d features"
            ),
            Self::ConflictingProfiles { first, second } => write!(
                f,
                "multiple devices selected ({} and {}): enable exactly one",
                first.name(),
                second.name()
            ),
            Self::UnknownProfile => write!(f, "unknown device profile"),
            Self::MissingCredential(field) => {
                write!(f, "{} not defined in secrets.toml", field.as_str())
            }
            Self::InvalidCredential { field, reason } => {
                write!(f, "invalid {}: {}", field.as_str(), reason)
            }
            Self::InvalidEndpoint => write!(f, "telemetry endpoint must be an http(s) URL"),
            Self::InvalidProbePin(pin) => {
                write!(f, "GPIO{} cannot be used for the one-wire probe", pin)
            }
        }
    }
}

impl core::error::Error for Error {}
