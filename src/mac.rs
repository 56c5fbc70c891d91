use core::fmt;
use core::str::FromStr;

/// Length of a colon-separated MAC string, e.g. "a4:c1:38:ae:94:ec"
const MAC_STR_LEN: usize = 17;

/// IEEE 802 hardware address (6 octets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

/// Why a MAC string was rejected. Positions are byte offsets into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacError {
    InvalidLength(usize),
    InvalidSeparator(usize),
    InvalidHexDigit(usize),
}

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Parse a colon-hex MAC string ("68:25:dd:f3:1a:80", either case).
    ///
    /// Usable in `const` context so the profile table is checked at compile time.
    pub const fn parse(s: &str) -> Result<Self, MacError> {
        let bytes = s.as_bytes();
        if bytes.len() != MAC_STR_LEN {
            return Err(MacError::InvalidLength(bytes.len()));
        }

        let mut octets = [0u8; 6];
        let mut i = 0;
        while i < 6 {
            let pos = i * 3;
            let hi = match hex_value(bytes[pos]) {
                Some(v) => v,
                None => return Err(MacError::InvalidHexDigit(pos)),
            };
            let lo = match hex_value(bytes[pos + 1]) {
                Some(v) => v,
                None => return Err(MacError::InvalidHexDigit(pos + 1)),
            };
            // Separator after every octet except the last
            if i < 5 && bytes[pos + 2] != b':' {
                return Err(MacError::InvalidSeparator(pos + 2));
            }
            octets[i] = (hi << 4) | lo;
            i += 1;
        }

        Ok(Self(octets))
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl FromStr for MacAddress {
    type Err = MacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim())
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

// Lowercase, as written in the profile table
impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

// Uppercase, as reported in telemetry payloads
impl fmt::UpperHex for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl fmt::Display for MacError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "MAC address must be {} characters, got {}", MAC_STR_LEN, len)
            }
            Self::InvalidSeparator(pos) => write!(f, "expected ':' at position {}", pos),
            Self::InvalidHexDigit(pos) => write!(f, "invalid hex digit at position {}", pos),
        }
    }
}
