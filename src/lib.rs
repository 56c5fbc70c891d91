//! Device configuration for the koelkast temperature sensor firmware.
//!
//! Resolves which physical unit is being built (one `koelkast-*` feature),
//! binds its hardware identifiers, and pairs them with the Wi-Fi and
//! telemetry secrets and the fallback timings.
//!
//! The library is `no_std` and allocation-free so the firmware can use it
//! directly; tests run on the host with `cargo test`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod error;
pub mod mac;
pub mod profile;
pub mod secrets;

pub use config::{DeviceConfig, NetworkConfig};
pub use constants::{SystemDefaults, SYSTEM_DEFAULTS};
pub use error::Error;
pub use mac::{MacAddress, MacError};
pub use profile::{DeviceProfile, ProfileId, PROFILES};
pub use secrets::{Credential, CredentialError, SecretSource, Secrets, BUILD_SECRETS};
