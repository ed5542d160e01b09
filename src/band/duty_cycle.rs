use heapless::Vec;

/// Maximum number of regulated sub-bands per band
pub const MAX_DUTY_CYCLES: usize = 8;

/// Airtime limit for transmissions that fall in an unregulated range
pub const UNREGULATED: f32 = 1.0;

/// Duty cycle limit of a frequency range
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DutyCycle {
    /// Lowest frequency of the range in Hz, inclusive
    pub min_frequency: u32,
    /// Highest frequency of the range in Hz, inclusive
    pub max_frequency: u32,
    /// Maximum fraction of time the range may be occupied, in (0, 1]
    pub value: f32,
}

impl DutyCycle {
    /// Create a duty cycle range
    pub const fn new(min_frequency: u32, max_frequency: u32, value: f32) -> Self {
        Self {
            min_frequency,
            max_frequency,
            value,
        }
    }

    /// Whether the frequency is in range
    pub fn contains(&self, frequency: u32) -> bool {
        (self.min_frequency..=self.max_frequency).contains(&frequency)
    }

    fn overlaps(&self, other: &DutyCycle) -> bool {
        self.min_frequency <= other.max_frequency && other.min_frequency <= self.max_frequency
    }
}

/// Frequency range to duty cycle lookup
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DutyCycleTable {
    ranges: Vec<DutyCycle, MAX_DUTY_CYCLES>,
}

impl DutyCycleTable {
    /// Table with no regulated ranges
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of ranges; returns `None` if there are too many
    pub fn from_ranges(ranges: &[DutyCycle]) -> Option<Self> {
        Vec::from_slice(ranges).ok().map(|ranges| Self { ranges })
    }

    /// Duty cycle of the range containing `frequency`, [`UNREGULATED`] if none does
    pub fn lookup(&self, frequency: u32) -> f32 {
        self.ranges
            .iter()
            .find(|dc| dc.contains(frequency))
            .map(|dc| dc.value)
            .unwrap_or(UNREGULATED)
    }

    /// Regulated ranges
    pub fn ranges(&self) -> &[DutyCycle] {
        &self.ranges
    }

    /// Check the ranges are well formed and disjoint
    pub(crate) fn is_consistent(&self) -> bool {
        self.ranges.iter().enumerate().all(|(i, dc)| {
            dc.min_frequency <= dc.max_frequency
                && dc.value > 0.0
                && dc.value <= 1.0
                && self.ranges[i + 1..].iter().all(|other| !dc.overlaps(other))
        })
    }
}
