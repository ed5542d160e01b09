//! Class B beacon parameters

use heapless::Vec;

/// Maximum number of beacon frequencies
pub const MAX_BEACON_FREQUENCIES: usize = 8;

/// Beacon period in seconds
pub const BEACON_PERIOD: u32 = 128;

/// LoRa coding rate
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingRate {
    /// 4/5
    Cr4_5,
    /// 4/6
    Cr4_6,
    /// 4/7
    Cr4_7,
    /// 4/8
    Cr4_8,
}

/// Field sizes of the beacon frame, in bytes
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconLayout {
    /// RFU bytes before the time field
    pub rfu1: u8,
    /// RFU bytes after the gateway specific field
    pub rfu2: u8,
}

impl BeaconLayout {
    /// Time field
    pub const TIME_LEN: u8 = 4;
    /// Each of the two CRC fields
    pub const CRC_LEN: u8 = 2;
    /// Gateway specific field (info descriptor + coordinates)
    pub const GW_SPECIFIC_LEN: u8 = 7;

    /// Total beacon payload length
    pub fn payload_len(&self) -> u16 {
        self.gw_specific_offset()
            + u16::from(Self::GW_SPECIFIC_LEN)
            + u16::from(self.rfu2)
            + u16::from(Self::CRC_LEN)
    }

    /// Offset of the time field in the payload
    pub fn time_offset(&self) -> u16 {
        u16::from(self.rfu1)
    }

    /// Offset of the gateway specific field in the payload
    pub fn gw_specific_offset(&self) -> u16 {
        self.time_offset() + u16::from(Self::TIME_LEN) + u16::from(Self::CRC_LEN)
    }
}

/// Beacon transmission parameters
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Beacon {
    /// Data rate index of the beacon
    pub data_rate_index: u8,
    /// Coding rate of the beacon
    pub coding_rate: CodingRate,
    /// Broadcast frequencies, hopped per beacon period; a single one means no hopping
    pub frequencies: Vec<u32, MAX_BEACON_FREQUENCIES>,
    /// Default ping slot frequencies
    pub ping_slot_frequencies: Vec<u32, MAX_BEACON_FREQUENCIES>,
    /// Frame layout
    pub layout: BeaconLayout,
}

impl Beacon {
    /// Frequency the beacon sent at `beacon_time` (seconds since GPS epoch) uses
    pub fn broadcast_frequency(&self, beacon_time: u32) -> Option<u32> {
        if self.frequencies.is_empty() {
            return None;
        }
        let index = (beacon_time / BEACON_PERIOD) as usize % self.frequencies.len();
        self.frequencies.get(index).copied()
    }
}
