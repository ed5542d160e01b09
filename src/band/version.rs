use core::fmt;
use core::str::FromStr;

use super::BandError;

/// LoRaWAN Regional Parameters revision
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhyVersion {
    /// LoRaWAN 1.0
    V1_0,
    /// LoRaWAN 1.0.1
    V1_0_1,
    /// LoRaWAN 1.0.2 Rev A
    V1_0_2RevA,
    /// LoRaWAN 1.0.2 Rev B
    V1_0_2RevB,
    /// LoRaWAN 1.0.3 Rev A
    V1_0_3RevA,
    /// LoRaWAN 1.1 Rev A
    V1_1RevA,
    /// LoRaWAN 1.1 Rev B
    V1_1RevB,
}

impl PhyVersion {
    /// Number of known revisions
    pub const COUNT: usize = 7;

    /// All known revisions, oldest first
    pub const ALL: [PhyVersion; Self::COUNT] = [
        PhyVersion::V1_0,
        PhyVersion::V1_0_1,
        PhyVersion::V1_0_2RevA,
        PhyVersion::V1_0_2RevB,
        PhyVersion::V1_0_3RevA,
        PhyVersion::V1_1RevA,
        PhyVersion::V1_1RevB,
    ];

    /// Position in [`PhyVersion::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Textual form, e.g. `1.0.2-b`
    pub fn as_str(&self) -> &'static str {
        match self {
            PhyVersion::V1_0 => "1.0",
            PhyVersion::V1_0_1 => "1.0.1",
            PhyVersion::V1_0_2RevA => "1.0.2-a",
            PhyVersion::V1_0_2RevB => "1.0.2-b",
            PhyVersion::V1_0_3RevA => "1.0.3-a",
            PhyVersion::V1_1RevA => "1.1-a",
            PhyVersion::V1_1RevB => "1.1-b",
        }
    }
}

impl fmt::Display for PhyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhyVersion {
    type Err = BandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhyVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(BandError::UnknownVersionString)
    }
}
