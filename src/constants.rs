use core::time::Duration;

/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Serial console baud rate
pub const SERIAL_BAUD: u32 = 115_200;

/// Time between measurement cycles in seconds (5 minutes)
pub const SLEEP_DURATION_SECS: u32 = 300;

/// Maximum time to wait for a WiFi association in milliseconds
pub const WIFI_TIMEOUT_MS: u32 = 15_000;

/// Watchdog timeout in seconds before a hard reset
pub const WATCHDOG_TIMEOUT_SECS: u32 = 30;

/// BLE scan window in seconds
pub const SCAN_DURATION_SECS: u32 = 10;

/// Telemetry ingestion endpoint, unless overridden in secrets.toml
pub const DEFAULT_TELEMETRY_ENDPOINT: &str =
    "https://laventecareauthsystems.onrender.com/api/v1/iot/telemetry";

/// HTTP header carrying the telemetry secret
pub const TELEMETRY_SECRET_HEADER: &str = "x-esp32-secret";

/// Maximum SSID length per IEEE 802.11
pub const MAX_SSID_LEN: usize = 32;
/// Minimum WPA2 passphrase length
pub const MIN_PASSWORD_LEN: usize = 8;
/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;
/// Capacity reserved for the telemetry secret
pub const MAX_SECRET_LEN: usize = 128;
/// Capacity reserved for the telemetry endpoint URL
pub const MAX_ENDPOINT_LEN: usize = 128;

/// Fallback timings, used when the remote configuration cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemDefaults {
    pub serial_baud: u32,
    pub sleep_duration_secs: u32,
    pub wifi_timeout_ms: u32,
    pub watchdog_timeout_secs: u32,
    pub scan_duration_secs: u32,
}

pub const SYSTEM_DEFAULTS: SystemDefaults = SystemDefaults {
    serial_baud: SERIAL_BAUD,
    sleep_duration_secs: SLEEP_DURATION_SECS,
    wifi_timeout_ms: WIFI_TIMEOUT_MS,
    watchdog_timeout_secs: WATCHDOG_TIMEOUT_SECS,
    scan_duration_secs: SCAN_DURATION_SECS,
};

impl Default for SystemDefaults {
    fn default() -> Self {
        SYSTEM_DEFAULTS
    }
}

impl SystemDefaults {
    pub const fn sleep_duration(&self) -> Duration {
        Duration::from_secs(self.sleep_duration_secs as u64)
    }

    pub const fn wifi_timeout(&self) -> Duration {
        Duration::from_millis(self.wifi_timeout_ms as u64)
    }

    pub const fn watchdog_timeout(&self) -> Duration {
        Duration::from_secs(self.watchdog_timeout_secs as u64)
    }

    pub const fn scan_duration(&self) -> Duration {
        Duration::from_secs(self.scan_duration_secs as u64)
    }
}
