use core::fmt;

use heapless::String;
use log::{debug, info, warn};

use crate::constants::*;
use crate::error::Error;
use crate::profile::{self, DeviceProfile, ProfileId};
use crate::secrets::{Credential, CredentialError, SecretSource, BUILD_SECRETS};

/// Network and backend settings, read-only once resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    // Wi-Fi SSID to connect to
    pub wifi_ssid: String<MAX_SSID_LEN>,

    // Wi-Fi pre-shared key, empty for an open network
    pub wifi_password: String<MAX_PASSWORD_LEN>,

    // Telemetry ingestion URL
    pub telemetry_endpoint: String<MAX_ENDPOINT_LEN>,

    // Token for the telemetry endpoint (optional)
    pub telemetry_secret: Option<String<MAX_SECRET_LEN>>,
}

/// Everything the firmware needs to know about the unit it runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub profile: &'static DeviceProfile,
    pub network: NetworkConfig,
    pub defaults: SystemDefaults,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn bounded<const N: usize>(field: Credential, value: &str) -> Result<String<N>, Error> {
    String::try_from(value).map_err(|_| Error::InvalidCredential {
        field,
        reason: CredentialError::TooLong {
            len: value.len(),
            max: N,
        },
    })
}

// http(s) scheme followed by a non-empty host
fn has_http_host(url: &str) -> bool {
    let rest = match url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")) {
        Some(rest) => rest,
        None => return false,
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !host.is_empty() && !host.starts_with(':')
}

impl NetworkConfig {
    pub fn from_secrets<S: SecretSource + ?Sized>(secrets: &S) -> Result<Self, Error> {
        let ssid = non_empty(secrets.wifi_ssid())
            .ok_or(Error::MissingCredential(Credential::WifiSsid))?;
        let wifi_ssid: String<MAX_SSID_LEN> = bounded(Credential::WifiSsid, ssid)?;

        // Empty password is OK for open networks
        let password = secrets.wifi_password().unwrap_or_default();
        if !password.is_empty() && password.len() < MIN_PASSWORD_LEN {
            return Err(Error::InvalidCredential {
                field: Credential::WifiPassword,
                reason: CredentialError::TooShort {
                    len: password.len(),
                    min: MIN_PASSWORD_LEN,
                },
            });
        }
        let wifi_password: String<MAX_PASSWORD_LEN> =
            bounded(Credential::WifiPassword, password)?;
        if wifi_password.is_empty() {
            warn!("No Wi-Fi password set, connecting to {} as an open network", ssid);
        }

        let endpoint =
            non_empty(secrets.telemetry_endpoint()).unwrap_or(DEFAULT_TELEMETRY_ENDPOINT);
        if !has_http_host(endpoint) {
            return Err(Error::InvalidEndpoint);
        }
        let telemetry_endpoint =
            String::try_from(endpoint).map_err(|_| Error::InvalidEndpoint)?;

        let telemetry_secret: Option<String<MAX_SECRET_LEN>> =
            non_empty(secrets.telemetry_secret())
                .map(|secret| bounded(Credential::TelemetrySecret, secret))
                .transpose()?;

        Ok(Self {
            wifi_ssid,
            wifi_password,
            telemetry_endpoint,
            telemetry_secret,
        })
    }

    pub fn is_open(&self) -> bool {
        self.wifi_password.is_empty()
    }

    /// Header name and value authenticating a telemetry upload.
    pub fn auth_header(&self) -> Option<(&'static str, &str)> {
        self.telemetry_secret
            .as_ref()
            .map(|secret| (TELEMETRY_SECRET_HEADER, secret.as_str()))
    }
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("wifi_ssid", &self.wifi_ssid)
            .field("wifi_password", &"<redacted>")
            .field("telemetry_endpoint", &self.telemetry_endpoint)
            .field(
                "telemetry_secret",
                &self.telemetry_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl DeviceConfig {
    /// Resolve the configuration for the single profile in `active`.
    ///
    /// Profile selection is checked before the secrets, so a build without a
    /// profile reports that first.
    pub fn resolve<I, S>(active: I, secrets: &S) -> Result<Self, Error>
    where
        I: IntoIterator<Item = ProfileId>,
        S: SecretSource + ?Sized,
    {
        let id = profile::select(active)?;
        debug!("Selected device profile {}", id);

        let profile = id.profile();
        profile.validate()?;

        let network = NetworkConfig::from_secrets(secrets)?;

        info!(
            "Resolved device {} (probe GPIO{}, sensor {})",
            profile.name, profile.probe_pin, profile.sensor_mac
        );

        Ok(Self {
            profile,
            network,
            defaults: SYSTEM_DEFAULTS,
        })
    }

    /// Resolve the profile enabled by this build's features against the
    /// secrets compiled in from secrets.toml.
    pub fn from_build() -> Result<Self, Error> {
        Self::resolve(profile::enabled(), &BUILD_SECRETS)
    }

    pub fn device_name(&self) -> &'static str {
        self.profile.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::Secrets;

    const SECRETS: Secrets = Secrets {
        wifi_ssid: Some("HomeNet"),
        wifi_password: Some("password123"),
        telemetry_secret: Some("token"),
        telemetry_endpoint: None,
    };

    #[test]
    fn test_network_defaults() {
        let network = NetworkConfig::from_secrets(&SECRETS).unwrap();
        assert_eq!(network.wifi_ssid.as_str(), "HomeNet");
        assert_eq!(network.wifi_password.as_str(), "password123");
        assert_eq!(network.telemetry_endpoint.as_str(), DEFAULT_TELEMETRY_ENDPOINT);
        assert_eq!(network.auth_header(), Some(("x-esp32-secret", "token")));
        assert!(!network.is_open());
    }

    #[test]
    fn test_missing_ssid() {
        let secrets = Secrets {
            wifi_ssid: None,
            ..SECRETS
        };
        assert_eq!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::MissingCredential(Credential::WifiSsid))
        );
    }

    #[test]
    fn test_empty_ssid_is_missing() {
        let secrets = Secrets {
            wifi_ssid: Some(""),
            ..SECRETS
        };
        assert_eq!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::MissingCredential(Credential::WifiSsid))
        );
    }

    #[test]
    fn test_ssid_too_long() {
        let long = "a".repeat(MAX_SSID_LEN + 1);
        let long: &'static str = Box::leak(long.into_boxed_str());
        let secrets = Secrets {
            wifi_ssid: Some(long),
            ..SECRETS
        };
        assert_eq!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::InvalidCredential {
                field: Credential::WifiSsid,
                reason: CredentialError::TooLong { len: 33, max: 32 },
            })
        );
    }

    #[test]
    fn test_ssid_max_length() {
        let max = "a".repeat(MAX_SSID_LEN);
        let max: &'static str = Box::leak(max.into_boxed_str());
        let secrets = Secrets {
            wifi_ssid: Some(max),
            ..SECRETS
        };
        assert!(NetworkConfig::from_secrets(&secrets).is_ok());
    }

    #[test]
    fn test_open_network() {
        let secrets = Secrets {
            wifi_password: None,
            ..SECRETS
        };
        let network = NetworkConfig::from_secrets(&secrets).unwrap();
        assert!(network.is_open());
    }

    #[test]
    fn test_password_too_short() {
        let secrets = Secrets {
            wifi_password: Some("short"),
            ..SECRETS
        };
        assert_eq!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::InvalidCredential {
                field: Credential::WifiPassword,
                reason: CredentialError::TooShort { len: 5, min: 8 },
            })
        );
    }

    #[test]
    fn test_password_too_long() {
        let long = "p".repeat(MAX_PASSWORD_LEN + 1);
        let long: &'static str = Box::leak(long.into_boxed_str());
        let secrets = Secrets {
            wifi_password: Some(long),
            ..SECRETS
        };
        assert!(matches!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::InvalidCredential {
                field: Credential::WifiPassword,
                reason: CredentialError::TooLong { .. },
            })
        ));
    }

    #[test]
    fn test_no_telemetry_secret() {
        let secrets = Secrets {
            telemetry_secret: Some(""),
            ..SECRETS
        };
        let network = NetworkConfig::from_secrets(&secrets).unwrap();
        assert_eq!(network.telemetry_secret, None);
        assert_eq!(network.auth_header(), None);
    }

    #[test]
    fn test_endpoint_override() {
        let secrets = Secrets {
            telemetry_endpoint: Some("http://192.168.1.10:8080/telemetry"),
            ..SECRETS
        };
        let network = NetworkConfig::from_secrets(&secrets).unwrap();
        assert_eq!(
            network.telemetry_endpoint.as_str(),
            "http://192.168.1.10:8080/telemetry"
        );
    }

    #[test]
    fn test_endpoint_not_http() {
        let secrets = Secrets {
            telemetry_endpoint: Some("mqtt://broker.local"),
            ..SECRETS
        };
        assert_eq!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::InvalidEndpoint)
        );
    }

    #[test]
    fn test_endpoint_without_host() {
        for endpoint in ["https://", "http://", "https:///telemetry", "http://:8080/x"] {
            let secrets = Secrets {
                telemetry_endpoint: Some(endpoint),
                ..SECRETS
            };
            assert_eq!(
                NetworkConfig::from_secrets(&secrets),
                Err(Error::InvalidEndpoint),
                "{} should be rejected",
                endpoint
            );
        }
    }

    #[test]
    fn test_endpoint_too_long() {
        let long = format!("https://{}", "a".repeat(MAX_ENDPOINT_LEN));
        let long: &'static str = Box::leak(long.into_boxed_str());
        let secrets = Secrets {
            telemetry_endpoint: Some(long),
            ..SECRETS
        };
        assert_eq!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::InvalidEndpoint)
        );
    }

    #[test]
    fn test_endpoint_max_length() {
        let max = format!("https://{}", "a".repeat(MAX_ENDPOINT_LEN - "https://".len()));
        let max: &'static str = Box::leak(max.into_boxed_str());
        let secrets = Secrets {
            telemetry_endpoint: Some(max),
            ..SECRETS
        };
        let network = NetworkConfig::from_secrets(&secrets).unwrap();
        assert_eq!(network.telemetry_endpoint.len(), MAX_ENDPOINT_LEN);
    }

    #[test]
    fn test_telemetry_secret_too_long() {
        let long = "s".repeat(MAX_SECRET_LEN + 1);
        let long: &'static str = Box::leak(long.into_boxed_str());
        let secrets = Secrets {
            telemetry_secret: Some(long),
            ..SECRETS
        };
        assert_eq!(
            NetworkConfig::from_secrets(&secrets),
            Err(Error::InvalidCredential {
                field: Credential::TelemetrySecret,
                reason: CredentialError::TooLong { len: 129, max: 128 },
            })
        );
    }

    #[test]
    fn test_debug_redacts() {
        let network = NetworkConfig::from_secrets(&SECRETS).unwrap();
        let out = format!("{:?}", network);
        assert!(out.contains("HomeNet"));
        assert!(!out.contains("password123"));
        assert!(!out.contains("\"token\""));
    }

    #[test]
    fn test_resolve_checks_profile_before_secrets() {
        assert_eq!(
            DeviceConfig::resolve(core::iter::empty::<ProfileId>(), &Secrets::default()),
            Err(Error::NoProfileSelected)
        );
    }

    #[test]
    fn test_resolve() {
        let config = DeviceConfig::resolve([ProfileId::KoelkastC], &SECRETS).unwrap();
        assert_eq!(config.device_name(), "Koelkast_C");
        assert_eq!(config.profile.probe_pin, 17);
        assert_eq!(config.defaults, SYSTEM_DEFAULTS);
    }
}
