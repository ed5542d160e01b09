//! RX1 downlink window parameters derived from the uplink

use super::BandError;

/// Maps an uplink data rate and RX1DROffset to the RX1 data rate.
///
/// The shifted index `uplink + base - offset_shifts[offset]` saturates at the
/// bounds of the downlink range instead of wrapping.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rx1DataRateRule {
    /// Highest uplink data rate index accepted
    pub max_uplink_index: u8,
    /// Highest RX1DROffset accepted
    pub max_offset: u8,
    /// Added to the uplink index before the offset is applied
    pub base: i8,
    /// Data rate shift subtracted for each offset value
    pub offset_shifts: [i8; 8],
    /// Lowest downlink data rate index
    pub min: u8,
    /// Highest downlink data rate index
    pub max: u8,
    /// Lowest downlink index while downlink dwell time is limited
    pub dwell_time_min: Option<u8>,
}

/// Offset `n` shifts the data rate down by `n`
pub const LINEAR_OFFSETS: [i8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

impl Rx1DataRateRule {
    /// Rule where the downlink index is `uplink + base - offset`
    pub const fn linear(max_uplink_index: u8, max_offset: u8, base: i8, min: u8, max: u8) -> Self {
        Self {
            max_uplink_index,
            max_offset,
            base,
            offset_shifts: LINEAR_OFFSETS,
            min,
            max,
            dwell_time_min: None,
        }
    }

    /// Resolve the RX1 data rate index
    pub fn resolve(
        &self,
        uplink_index: u8,
        offset: u8,
        downlink_dwell_time: bool,
    ) -> Result<u8, BandError> {
        if uplink_index > self.max_uplink_index {
            return Err(BandError::DataRateIndexTooHigh {
                max: self.max_uplink_index,
            });
        }
        if offset > self.max_offset || offset as usize >= self.offset_shifts.len() {
            return Err(BandError::DataRateOffsetTooHigh {
                max: self.max_offset,
            });
        }
        let min = match (downlink_dwell_time, self.dwell_time_min) {
            (true, Some(min)) => min,
            _ => self.min,
        };
        let shifted = uplink_index as i16 + self.base as i16
            - self.offset_shifts[offset as usize] as i16;
        Ok(shifted.max(min as i16).min(self.max as i16) as u8)
    }
}

/// Maps an uplink channel index to the RX1 downlink channel index
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rx1ChannelRule {
    /// Downlink on the uplink channel
    Identity,
    /// Downlink on `uplink % n`
    Modulo(u8),
}

impl Rx1ChannelRule {
    /// Resolve the RX1 channel for an uplink channel already known to be valid
    pub fn resolve(&self, uplink_channel: u8) -> u8 {
        match self {
            Rx1ChannelRule::Identity => uplink_channel,
            Rx1ChannelRule::Modulo(0) => uplink_channel,
            Rx1ChannelRule::Modulo(n) => uplink_channel % n,
        }
    }
}
