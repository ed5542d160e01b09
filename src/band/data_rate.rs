use super::BandError;

/// Number of data rate indices addressable by the MAC layer
pub const DATA_RATE_SLOTS: usize = 16;

/// Physical modulation of a data rate
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    /// LoRa chirp spread spectrum
    LoRa {
        /// Spreading factor (7-12)
        spreading_factor: u8,
        /// Bandwidth in Hz
        bandwidth: u32,
    },
    /// Frequency shift keying
    Fsk {
        /// Bit rate in bits per second
        bit_rate: u32,
    },
}

impl Modulation {
    /// LoRa modulation
    pub const fn lora(spreading_factor: u8, bandwidth: u32) -> Self {
        Modulation::LoRa {
            spreading_factor,
            bandwidth,
        }
    }

    /// Get spreading factor, if LoRa
    pub fn spreading_factor(&self) -> Option<u8> {
        match self {
            Modulation::LoRa {
                spreading_factor, ..
            } => Some(*spreading_factor),
            Modulation::Fsk { .. } => None,
        }
    }

    /// Get bandwidth in Hz, if LoRa
    pub fn bandwidth(&self) -> Option<u32> {
        match self {
            Modulation::LoRa { bandwidth, .. } => Some(*bandwidth),
            Modulation::Fsk { .. } => None,
        }
    }
}

/// Data rate descriptor
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRate {
    /// Modulation parameters
    pub modulation: Modulation,
    /// Default maximum MAC payload size in bytes
    pub max_payload_size: Option<u16>,
}

impl DataRate {
    /// LoRa data rate with a default maximum payload size
    pub const fn lora(spreading_factor: u8, bandwidth: u32, max_payload_size: u16) -> Self {
        Self {
            modulation: Modulation::lora(spreading_factor, bandwidth),
            max_payload_size: Some(max_payload_size),
        }
    }

    /// FSK data rate with a default maximum payload size
    pub const fn fsk(bit_rate: u32, max_payload_size: u16) -> Self {
        Self {
            modulation: Modulation::Fsk { bit_rate },
            max_payload_size: Some(max_payload_size),
        }
    }
}

/// One entry of a [`DataRateTable`]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRateSlot {
    /// Reserved for future use
    Rfu,
    /// Data rate defined by the band
    Defined(DataRate),
}

/// Fixed table of 16 data rate slots
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRateTable([DataRateSlot; DATA_RATE_SLOTS]);

impl DataRateTable {
    /// Build a table; every slot must be given, reserved ones as [`DataRateSlot::Rfu`]
    pub const fn new(slots: [DataRateSlot; DATA_RATE_SLOTS]) -> Self {
        Self(slots)
    }

    /// Look up a data rate, rejecting reserved slots
    pub fn get(&self, index: u8) -> Result<&DataRate, BandError> {
        match self.0.get(index as usize) {
            None => Err(BandError::DataRateIndexTooHigh {
                max: (DATA_RATE_SLOTS - 1) as u8,
            }),
            Some(DataRateSlot::Rfu) => Err(BandError::ReservedDataRate(index)),
            Some(DataRateSlot::Defined(data_rate)) => Ok(data_rate),
        }
    }

    /// Whether the index names a defined data rate
    pub fn is_defined(&self, index: u8) -> bool {
        self.get(index).is_ok()
    }

    /// Lowest index defined with the given modulation
    pub fn find(&self, modulation: &Modulation) -> Option<u8> {
        self.0
            .iter()
            .position(|slot| match slot {
                DataRateSlot::Defined(dr) => dr.modulation == *modulation,
                DataRateSlot::Rfu => false,
            })
            .map(|i| i as u8)
    }

    /// Raw slots, indexed by data rate index
    pub fn slots(&self) -> &[DataRateSlot; DATA_RATE_SLOTS] {
        &self.0
    }
}
