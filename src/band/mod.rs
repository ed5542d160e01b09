//! Regional band parameters
//!
//! A [`Band`] describes the channels, data rates, duty cycles, timing and
//! beacon parameters a network server and its end devices share in one
//! regulatory region. Bands are built once and only read afterwards; the
//! per-revision differences are expressed as [`overlay::Overlay`]s applied to
//! a baseline.

use core::fmt;
use core::time::Duration;

use heapless::Vec;

/// Class B beacon parameters
pub mod beacon;

/// LinkADRReq channel mask codec
pub mod ch_mask;

/// Channels and channel sets
pub mod channel;

/// Data rate table
pub mod data_rate;

/// Duty cycle lookup
pub mod duty_cycle;

/// Per-revision overlays
pub mod overlay;

/// RX1 window resolution
pub mod rx_window;

/// Regional Parameters revisions
pub mod version;

pub use beacon::{Beacon, BeaconLayout, CodingRate};
pub use ch_mask::{ChMaskCodec, ChMaskConvention, ChMaskFrame, ChMaskFrames};
pub use channel::{Channel, ChannelSet};
pub use data_rate::{DataRate, DataRateSlot, DataRateTable, Modulation};
pub use duty_cycle::{DutyCycle, DutyCycleTable};
pub use overlay::{Overlay, Swap};
pub use rx_window::{Rx1ChannelRule, Rx1DataRateRule};
pub use version::PhyVersion;

/// Upper bound of uplink or downlink channels in any band
pub const MAX_CHANNELS: usize = 72;

/// Band parameter error
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandError {
    /// Channel index beyond the band's channels
    InvalidChannelIndex(u8),
    /// Illegal ChMaskCntl value
    InvalidControlIndex(u8),
    /// A channel was addressed by more than one mask frame
    OverlappingChannelMask(u8),
    /// Data rate index above the allowed maximum
    DataRateIndexTooHigh {
        /// Highest allowed index
        max: u8,
    },
    /// RX1 data rate offset above the allowed maximum
    DataRateOffsetTooHigh {
        /// Highest allowed offset
        max: u8,
    },
    /// Data rate index names a reserved slot
    ReservedDataRate(u8),
    /// TX power index above the band's maximum
    TxPowerIndexTooHigh {
        /// Highest allowed index
        max: u8,
    },
    /// Band identifier is not registered
    UnknownBand,
    /// Band does not support the requested revision
    UnsupportedVersion(PhyVersion),
    /// Revision string not recognized
    UnknownVersionString,
    /// Baseline band failed validation
    InvalidBand(InvalidBandReason),
    /// Overlay changed the channel or data rate tables
    InvalidOverlay(PhyVersion),
    /// Overlay has too many steps
    OverlayTooLong,
    /// Registry has no room for another band or revision
    RegistryFull,
    /// Band identifier already registered
    DuplicateBand,
    /// Revision listed more than once for a band
    DuplicateVersion(PhyVersion),
}

/// Why a band failed validation
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidBandReason {
    /// More channels than the band's maximum
    TooManyChannels,
    /// Channel data rate range is inverted or out of the table
    ChannelDataRateRange,
    /// Channel refers to a reserved data rate
    ChannelReservedDataRate,
    /// Duty cycle ranges overlap or have values outside (0, 1]
    DutyCycles,
    /// RX1 rule bounds are inverted or undefined
    Rx1DataRate,
    /// Default RX2 data rate is undefined
    Rx2DataRate,
    /// Beacon data rate is undefined
    BeaconDataRate,
    /// Channel mask codec does not cover the uplink channels
    ChMaskCodec,
    /// TX power index out of the offset table
    TxPower,
}

impl fmt::Display for BandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandError::InvalidChannelIndex(i) => write!(f, "invalid channel index {}", i),
            BandError::InvalidControlIndex(c) => write!(f, "invalid channel mask control {}", c),
            BandError::OverlappingChannelMask(i) => {
                write!(f, "channel {} addressed by more than one mask", i)
            }
            BandError::DataRateIndexTooHigh { max } => {
                write!(f, "data rate index too high, max {}", max)
            }
            BandError::DataRateOffsetTooHigh { max } => {
                write!(f, "data rate offset too high, max {}", max)
            }
            BandError::ReservedDataRate(i) => write!(f, "data rate {} is reserved", i),
            BandError::TxPowerIndexTooHigh { max } => {
                write!(f, "TX power index too high, max {}", max)
            }
            BandError::UnknownBand => f.write_str("unknown band"),
            BandError::UnsupportedVersion(v) => write!(f, "unsupported regional parameters {}", v),
            BandError::UnknownVersionString => f.write_str("unknown regional parameters version"),
            BandError::InvalidBand(reason) => write!(f, "invalid band: {:?}", reason),
            BandError::InvalidOverlay(v) => write!(f, "overlay for {} changes band tables", v),
            BandError::OverlayTooLong => f.write_str("overlay too long"),
            BandError::RegistryFull => f.write_str("band registry full"),
            BandError::DuplicateBand => f.write_str("band already registered"),
            BandError::DuplicateVersion(v) => write!(f, "regional parameters {} listed twice", v),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BandError {}

/// Network timing constants
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay before RX1 after an uplink
    pub receive_delay_1: Duration,
    /// Delay before RX2 after an uplink
    pub receive_delay_2: Duration,
    /// Delay before the first join-accept window
    pub join_accept_delay_1: Duration,
    /// Delay before the second join-accept window
    pub join_accept_delay_2: Duration,
    /// Largest accepted frame counter gap
    pub max_fcnt_gap: u32,
    /// Uplinks without downlink before ADRACKReq is set
    pub adr_ack_limit: u16,
    /// Further uplinks before the device backs off its data rate
    pub adr_ack_delay: u16,
    /// Lower bound of the retransmission timeout
    pub min_ack_timeout: Duration,
    /// Upper bound of the retransmission timeout
    pub max_ack_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            receive_delay_1: Duration::from_secs(1),
            receive_delay_2: Duration::from_secs(2),
            join_accept_delay_1: Duration::from_secs(5),
            join_accept_delay_2: Duration::from_secs(6),
            max_fcnt_gap: 16_384,
            adr_ack_limit: 64,
            adr_ack_delay: 32,
            // 2s +/- 1s
            min_ack_timeout: Duration::from_secs(1),
            max_ack_timeout: Duration::from_secs(3),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Timing {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Timing {{ rx1: {}ms, rx2: {}ms, ja1: {}ms, ja2: {}ms, max_fcnt_gap: {}, adr_ack: {}/{} }}",
            self.receive_delay_1.as_millis() as u32,
            self.receive_delay_2.as_millis() as u32,
            self.join_accept_delay_1.as_millis() as u32,
            self.join_accept_delay_2.as_millis() as u32,
            self.max_fcnt_gap,
            self.adr_ack_limit,
            self.adr_ack_delay,
        )
    }
}

/// Default RX2 window parameters
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rx2Parameters {
    /// Data rate index
    pub data_rate_index: u8,
    /// Frequency in Hz
    pub frequency: u32,
}

/// Content of the CFList in a join-accept
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfListType {
    /// Additional channel frequencies
    Frequencies,
    /// Channel mask
    ChannelMasks,
}

/// RX1 window parameters for a received uplink
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rx1Window {
    /// Downlink channel index
    pub channel_index: u8,
    /// Downlink frequency in Hz
    pub frequency: u32,
    /// Downlink data rate index
    pub data_rate_index: u8,
    /// Downlink data rate
    pub data_rate: DataRate,
}

/// Regional band parameters
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Band identifier, e.g. `US_902_928`
    pub id: &'static str,
    /// Maximum number of uplink channels
    pub max_uplink_channels: u8,
    /// Default uplink channels
    pub uplink_channels: Vec<Channel, MAX_CHANNELS>,
    /// Maximum number of downlink channels
    pub max_downlink_channels: u8,
    /// Default downlink channels
    pub downlink_channels: Vec<Channel, MAX_CHANNELS>,
    /// Regulated sub-bands
    pub duty_cycles: DutyCycleTable,
    /// Data rates by index
    pub data_rates: DataRateTable,
    /// Highest data rate index ADR may select
    pub max_adr_data_rate_index: u8,
    /// Timing constants
    pub timing: Timing,
    /// Default maximum EIRP in dBm
    pub default_max_eirp: f32,
    /// TX power offsets from max EIRP in dB, by TX power index
    pub tx_offset: [f32; 16],
    /// Highest valid TX power index
    pub max_tx_power_index: u8,
    /// RX1 channel rule
    pub rx1_channel: Rx1ChannelRule,
    /// RX1 data rate rule
    pub rx1_data_rate: Rx1DataRateRule,
    /// Channel mask codec
    pub ch_mask_codec: ChMaskCodec,
    /// Whether join-accepts may carry a CFList
    pub implements_cf_list: bool,
    /// CFList content
    pub cf_list_type: CfListType,
    /// Default RX2 parameters
    pub default_rx2: Rx2Parameters,
    /// Beacon parameters
    pub beacon: Beacon,
}

impl Band {
    /// Look up a data rate by index; reserved slots are an error
    pub fn data_rate(&self, index: u8) -> Result<&DataRate, BandError> {
        self.data_rates.get(index)
    }

    /// Default maximum MAC payload size at a data rate
    pub fn max_payload_size(&self, index: u8) -> Result<Option<u16>, BandError> {
        self.data_rate(index).map(|dr| dr.max_payload_size)
    }

    /// Duty cycle limit at a frequency; 1.0 where unregulated
    pub fn duty_cycle(&self, frequency: u32) -> f32 {
        self.duty_cycles.lookup(frequency)
    }

    /// TX power offset in dB for a TX power index
    pub fn tx_power_offset(&self, index: u8) -> Result<f32, BandError> {
        if index > self.max_tx_power_index {
            return Err(BandError::TxPowerIndexTooHigh {
                max: self.max_tx_power_index,
            });
        }
        Ok(self.tx_offset[index as usize])
    }

    /// Encode enabled uplink channels into LinkADRReq channel mask frames
    pub fn generate_ch_masks(
        &self,
        enabled: &ChannelSet,
        allow_all_channels: bool,
    ) -> Result<ChMaskFrames, BandError> {
        self.ch_mask_codec.encode(enabled, allow_all_channels)
    }

    /// Apply LinkADRReq channel mask frames to the enabled uplink channels
    pub fn parse_ch_masks(
        &self,
        frames: &[ChMaskFrame],
        prior: &ChannelSet,
    ) -> Result<ChannelSet, BandError> {
        self.ch_mask_codec.decode(frames, prior)
    }

    /// RX1 data rate index for an uplink data rate and RX1DROffset
    pub fn rx1_data_rate_index(
        &self,
        uplink_index: u8,
        offset: u8,
        downlink_dwell_time: bool,
    ) -> Result<u8, BandError> {
        self.rx1_data_rate
            .resolve(uplink_index, offset, downlink_dwell_time)
    }

    /// RX1 downlink channel index for an uplink channel index
    pub fn rx1_channel_index(&self, uplink_channel: u8) -> Result<u8, BandError> {
        if uplink_channel >= self.max_uplink_channels {
            return Err(BandError::InvalidChannelIndex(uplink_channel));
        }
        Ok(self.rx1_channel.resolve(uplink_channel))
    }

    /// Full RX1 window parameters for an uplink
    pub fn rx1_window(
        &self,
        uplink_channel: u8,
        uplink_data_rate: u8,
        offset: u8,
        downlink_dwell_time: bool,
    ) -> Result<Rx1Window, BandError> {
        let channel_index = self.rx1_channel_index(uplink_channel)?;
        let frequency = match self.rx1_channel {
            Rx1ChannelRule::Identity => self.uplink_channels.get(channel_index as usize),
            Rx1ChannelRule::Modulo(_) => self.downlink_channels.get(channel_index as usize),
        }
        .map(|ch| ch.frequency)
        .ok_or(BandError::InvalidChannelIndex(channel_index))?;
        let data_rate_index =
            self.rx1_data_rate_index(uplink_data_rate, offset, downlink_dwell_time)?;
        Ok(Rx1Window {
            channel_index,
            frequency,
            data_rate_index,
            data_rate: *self.data_rate(data_rate_index)?,
        })
    }

    /// Whether the channel and data rate tables of two bands are the same
    pub fn same_tables(&self, other: &Band) -> bool {
        self.max_uplink_channels == other.max_uplink_channels
            && self.uplink_channels == other.uplink_channels
            && self.max_downlink_channels == other.max_downlink_channels
            && self.downlink_channels == other.downlink_channels
            && self.data_rates == other.data_rates
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), BandError> {
        use InvalidBandReason as Reason;
        let fail = |reason| Err(BandError::InvalidBand(reason));

        if self.uplink_channels.len() > self.max_uplink_channels as usize
            || self.downlink_channels.len() > self.max_downlink_channels as usize
        {
            return fail(Reason::TooManyChannels);
        }
        for ch in self.uplink_channels.iter().chain(self.downlink_channels.iter()) {
            if ch.min_data_rate > ch.max_data_rate || ch.max_data_rate > 15 {
                return fail(Reason::ChannelDataRateRange);
            }
            if !(ch.min_data_rate..=ch.max_data_rate).all(|dr| self.data_rates.is_defined(dr)) {
                return fail(Reason::ChannelReservedDataRate);
            }
        }
        if !self.duty_cycles.is_consistent() {
            return fail(Reason::DutyCycles);
        }
        let rx1 = &self.rx1_data_rate;
        let rx1_min_ok = rx1.min <= rx1.max && rx1.dwell_time_min.map_or(true, |m| m <= rx1.max);
        if !rx1_min_ok || !(rx1.min..=rx1.max).all(|dr| self.data_rates.is_defined(dr)) {
            return fail(Reason::Rx1DataRate);
        }
        if !self.data_rates.is_defined(self.default_rx2.data_rate_index) {
            return fail(Reason::Rx2DataRate);
        }
        if !self.data_rates.is_defined(self.beacon.data_rate_index) {
            return fail(Reason::BeaconDataRate);
        }
        if self.ch_mask_codec.channel_count != self.max_uplink_channels {
            return fail(Reason::ChMaskCodec);
        }
        if self.max_tx_power_index as usize >= self.tx_offset.len() {
            return fail(Reason::TxPower);
        }
        Ok(())
    }
}
