//! Device profiles and compile-time profile selection.
//!
//! Every physical unit is one row of [`PROFILES`]. Adding a unit means adding
//! a row, a [`ProfileId`] variant and a matching `koelkast-*` Cargo feature.
//! Rows are validated while the table is const-evaluated, so a typo in a MAC
//! address or an unusable probe pin stops the build.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::mac::MacAddress;

/// Identifier of a device profile (the closed set of selectable units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileId {
    KoelkastA,
    KoelkastB,
    KoelkastC,
    KoelkastD,
}

/// Hardware identity of one physical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub id: ProfileId,
    /// Human-readable name, also used as the telemetry sensor id
    pub name: &'static str,
    /// MAC of the ESP32 WiFi interface
    pub host_mac: MacAddress,
    /// MAC of the paired BLE sensor
    pub sensor_mac: MacAddress,
    /// GPIO of the DS18B20 one-wire probe
    pub probe_pin: u8,
    /// Development board the unit is built on
    pub board: &'static str,
}

const CH340_BOARD: &str = "ESP32 CH340";
const WEMOS_D1_R32: &str = "WeMos D1 R32";

pub static PROFILES: [DeviceProfile; ProfileId::COUNT] = [
    DeviceProfile::new(
        ProfileId::KoelkastA,
        "Koelkast_A",
        "68:25:dd:f3:1a:80",
        "a4:c1:38:c8:92:5a",
        4,
        CH340_BOARD,
    ),
    DeviceProfile::new(
        ProfileId::KoelkastB,
        "Koelkast_B",
        "14:33:5c:38:28:fc",
        "a4:c1:38:e3:4d:72",
        4,
        CH340_BOARD,
    ),
    DeviceProfile::new(
        ProfileId::KoelkastC,
        "Koelkast_C",
        "08:3a:f2:7c:d5:00",
        "a4:c1:38:c8:92:5a",
        17,
        WEMOS_D1_R32,
    ),
    // Host MAC is provisional until read back from the unit
    DeviceProfile::new(
        ProfileId::KoelkastD,
        "Koelkast_D",
        "a4:c1:38:ae:94:ec",
        "a4:c1:38:ae:94:ec",
        17,
        WEMOS_D1_R32,
    ),
];

/// Profile features as seen by this build.
const ENABLED: [(ProfileId, bool); ProfileId::COUNT] = [
    (ProfileId::KoelkastA, cfg!(feature = "koelkast-a")),
    (ProfileId::KoelkastB, cfg!(feature = "koelkast-b")),
    (ProfileId::KoelkastC, cfg!(feature = "koelkast-c")),
    (ProfileId::KoelkastD, cfg!(feature = "koelkast-d")),
];

/// Whether `pin` can drive a one-wire bus on an ESP32.
///
/// Any bidirectional GPIO except GPIO0 (boot mode), GPIO1/3 (serial console),
/// GPIO6-11 (SPI flash) and GPIO12 (flash voltage strap, breaks boot with the
/// probe's pull-up). GPIO34-39 are input only.
pub const fn is_one_wire_capable(pin: u8) -> bool {
    matches!(pin, 2 | 4 | 5 | 13..=19 | 21..=23 | 25..=27 | 32 | 33)
}

impl ProfileId {
    pub const COUNT: usize = 4;

    pub const ALL: [ProfileId; Self::COUNT] = [
        ProfileId::KoelkastA,
        ProfileId::KoelkastB,
        ProfileId::KoelkastC,
        ProfileId::KoelkastD,
    ];

    pub fn name(self) -> &'static str {
        self.profile().name
    }

    /// Cargo feature that selects this profile.
    pub const fn feature(self) -> &'static str {
        match self {
            Self::KoelkastA => "koelkast-a",
            Self::KoelkastB => "koelkast-b",
            Self::KoelkastC => "koelkast-c",
            Self::KoelkastD => "koelkast-d",
        }
    }

    pub fn profile(self) -> &'static DeviceProfile {
        &PROFILES[self as usize]
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Accepts "D", "Koelkast_D", "koelkast-d" and "USE_KOELKAST_D", in any case.
impl FromStr for ProfileId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // The build flag spelling only ever uses '_'
        let letter = if let Some(rest) = strip_prefix_ignore_case(s, "use_koelkast_") {
            rest
        } else if let Some(rest) = strip_prefix_ignore_case(s, "koelkast") {
            rest.strip_prefix(['_', '-']).ok_or(Error::UnknownProfile)?
        } else {
            s
        };

        match letter.as_bytes() {
            [b'a' | b'A'] => Ok(Self::KoelkastA),
            [b'b' | b'B'] => Ok(Self::KoelkastB),
            [b'c' | b'C'] => Ok(Self::KoelkastC),
            [b'd' | b'D'] => Ok(Self::KoelkastD),
            _ => Err(Error::UnknownProfile),
        }
    }
}

impl DeviceProfile {
    /// Build a table row. Panics (at compile time, in a const initializer) on a
    /// malformed MAC or a pin that cannot host the probe.
    pub const fn new(
        id: ProfileId,
        name: &'static str,
        host_mac: &str,
        sensor_mac: &str,
        probe_pin: u8,
        board: &'static str,
    ) -> Self {
        let host_mac = match MacAddress::parse(host_mac) {
            Ok(mac) => mac,
            Err(_) => panic!("malformed host MAC in device profile"),
        };
        let sensor_mac = match MacAddress::parse(sensor_mac) {
            Ok(mac) => mac,
            Err(_) => panic!("malformed sensor MAC in device profile"),
        };
        assert!(
            is_one_wire_capable(probe_pin),
            "probe pin cannot drive a one-wire bus"
        );

        Self {
            id,
            name,
            host_mac,
            sensor_mac,
            probe_pin,
            board,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !is_one_wire_capable(self.probe_pin) {
            return Err(Error::InvalidProbePin(self.probe_pin));
        }
        Ok(())
    }

    /// Whether this profile was written for the chip with the given factory MAC.
    pub fn matches_host(&self, mac: MacAddress) -> bool {
        self.host_mac == mac
    }
}

/// Profiles whose feature is enabled in this build.
pub fn enabled() -> impl Iterator<Item = ProfileId> {
    ENABLED.into_iter().filter(|(_, on)| *on).map(|(id, _)| id)
}

/// Pick the single active profile out of `active`.
///
/// Repeating the same profile is not a conflict.
pub fn select<I>(active: I) -> Result<ProfileId, Error>
where
    I: IntoIterator<Item = ProfileId>,
{
    let mut active = active.into_iter();
    let first = active.next().ok_or(Error::NoProfileSelected)?;

    match active.find(|id| *id != first) {
        Some(second) => Err(Error::ConflictingProfiles { first, second }),
        None => Ok(first),
    }
}

/// The profile chosen by this build's `koelkast-*` feature.
pub fn selected() -> Result<ProfileId, Error> {
    select(enabled())
}
