use crate::cd::error::{MsfError, MsfResult};
use std::fmt::{self, Display};
use std::str::FromStr;

pub mod error;

pub const SECTORS_PER_SECOND: u64 = 75;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECTORS_PER_MINUTE: u64 = SECTORS_PER_SECOND * SECONDS_PER_MINUTE;

/// A `MM:SS:FF` disc position, frames being sectors (75 per second).
///
/// Each field is printed with at least two digits. Nothing stops minutes from
/// reaching 100 and beyond, in which case the field simply grows wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Msf {
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
}

impl Msf {
    pub fn from_sectors(sectors: u64) -> Self {
        Self {
            minutes: sectors / SECTORS_PER_MINUTE,
            seconds: (sectors % SECTORS_PER_MINUTE) / SECTORS_PER_SECOND,
            frames: sectors % SECTORS_PER_SECOND,
        }
    }

    pub fn to_sectors(&self) -> MsfResult<u64> {
        self.minutes
            .checked_mul(SECTORS_PER_MINUTE)
            .and_then(|s| s.checked_add(self.seconds.checked_mul(SECTORS_PER_SECOND)?))
            .and_then(|s| s.checked_add(self.frames))
            .ok_or_else(|| MsfError::Overflow(self.to_string()))
    }
}

impl Display for Msf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.minutes, self.seconds, self.frames
        )
    }
}

impl FromStr for Msf {
    type Err = MsfError;

    fn from_str(msf_str: &str) -> MsfResult<Self> {
        let parts: Vec<&str> = msf_str.split(':').collect();
        if parts.len() != 3
            || parts
                .iter()
                .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(MsfError::InvalidFormat(msf_str.to_string()));
        }

        let field = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| MsfError::Overflow(msf_str.to_string()))
        };

        Ok(Self {
            minutes: field(parts[0])?,
            seconds: field(parts[1])?,
            frames: field(parts[2])?,
        })
    }
}

pub fn sectors_to_timestamp(sectors: u64) -> String {
    Msf::from_sectors(sectors).to_string()
}

pub fn timestamp_to_sectors(timestamp: &str) -> MsfResult<u64> {
    timestamp.parse::<Msf>()?.to_sectors()
}
