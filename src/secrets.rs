use core::fmt;

/// Fields the secret store may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    WifiSsid,
    WifiPassword,
    TelemetrySecret,
}

impl Credential {
    /// Key name in secrets.toml
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WifiSsid => "wifi_ssid",
            Self::WifiPassword => "wifi_password",
            Self::TelemetrySecret => "telemetry_secret",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    TooShort { len: usize, min: usize },
    TooLong { len: usize, max: usize },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len, min } => write!(f, "too short: {} bytes (min {})", len, min),
            Self::TooLong { len, max } => write!(f, "too long: {} bytes (max {})", len, max),
        }
    }
}

/// Source of credentials, kept apart from the versioned profile table.
///
/// Empty values are treated the same as absent ones.
pub trait SecretSource {
    fn wifi_ssid(&self) -> Option<&str>;
    fn wifi_password(&self) -> Option<&str>;
    fn telemetry_secret(&self) -> Option<&str>;

    /// Endpoint override, `None` keeps the default endpoint.
    fn telemetry_endpoint(&self) -> Option<&str> {
        None
    }
}

/// Secrets known at build time.
#[derive(Clone, Copy, Default)]
pub struct Secrets {
    // Wi-Fi SSID to connect to
    pub wifi_ssid: Option<&'static str>,

    // Wi-Fi pre-shared key, empty or absent for an open network
    pub wifi_password: Option<&'static str>,

    // Token sent with every telemetry upload
    pub telemetry_secret: Option<&'static str>,

    // Overrides the default telemetry endpoint
    pub telemetry_endpoint: Option<&'static str>,
}

impl SecretSource for Secrets {
    fn wifi_ssid(&self) -> Option<&str> {
        self.wifi_ssid
    }

    fn wifi_password(&self) -> Option<&str> {
        self.wifi_password
    }

    fn telemetry_secret(&self) -> Option<&str> {
        self.telemetry_secret
    }

    fn telemetry_endpoint(&self) -> Option<&str> {
        self.telemetry_endpoint
    }
}

// Never print credentials, only whether they are set
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("wifi_ssid", &self.wifi_ssid)
            .field("wifi_password", &self.wifi_password.map(|_| "<redacted>"))
            .field("telemetry_secret", &self.telemetry_secret.map(|_| "<redacted>"))
            .field("telemetry_endpoint", &self.telemetry_endpoint)
            .finish()
    }
}

// secrets.toml values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/secrets.rs"));
