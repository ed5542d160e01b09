use core::ops::Range;

/// Radio channel definition
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    /// Channel frequency in Hz
    pub frequency: u32,
    /// Minimum data rate index
    pub min_data_rate: u8,
    /// Maximum data rate index
    pub max_data_rate: u8,
}

impl Channel {
    /// Create a channel
    pub const fn new(frequency: u32, min_data_rate: u8, max_data_rate: u8) -> Self {
        Self {
            frequency,
            min_data_rate,
            max_data_rate,
        }
    }

    /// Whether the channel accepts the given data rate index
    pub fn supports(&self, data_rate: u8) -> bool {
        (self.min_data_rate..=self.max_data_rate).contains(&data_rate)
    }
}

/// Set of channel indices, e.g. the enabled uplink channels of a device
///
/// Every `u8` index is representable, so building a set never loses an
/// index; range checks against a band happen where the set is used.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChannelSet([u128; 2]);

impl ChannelSet {
    /// Set with no channels
    pub const fn empty() -> Self {
        Self([0; 2])
    }

    /// Set holding every index in `range`
    pub fn from_range(range: Range<u8>) -> Self {
        let mut set = Self::empty();
        set.set_range(range, true);
        set
    }

    fn word_bit(index: u8) -> (usize, u128) {
        ((index >> 7) as usize, 1u128 << (index & 0x7F))
    }

    /// Add a channel; returns false if it was already present
    pub fn insert(&mut self, index: u8) -> bool {
        let (word, bit) = Self::word_bit(index);
        let added = self.0[word] & bit == 0;
        self.0[word] |= bit;
        added
    }

    /// Remove a channel
    pub fn remove(&mut self, index: u8) {
        let (word, bit) = Self::word_bit(index);
        self.0[word] &= !bit;
    }

    /// Enable or disable a channel
    pub fn set(&mut self, index: u8, enabled: bool) {
        if enabled {
            self.insert(index);
        } else {
            self.remove(index);
        }
    }

    /// Enable or disable every channel in `range`
    pub fn set_range(&mut self, range: Range<u8>, enabled: bool) {
        for index in range {
            self.set(index, enabled);
        }
    }

    /// Whether the channel is in the set
    pub fn contains(&self, index: u8) -> bool {
        let (word, bit) = Self::word_bit(index);
        self.0[word] & bit != 0
    }

    /// Number of channels in the set
    pub fn len(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0 == [0; 2]
    }

    /// Highest index in the set
    pub fn max(&self) -> Option<u8> {
        match self.0 {
            [0, 0] => None,
            [low, 0] => Some(127 - low.leading_zeros() as u8),
            [_, high] => Some(255 - high.leading_zeros() as u8),
        }
    }

    /// Number of channels of `range` in the set
    pub fn count_in(&self, range: Range<u8>) -> usize {
        range.filter(|i| self.contains(*i)).count()
    }

    /// 16 bits starting at `offset`, bit `n` standing for channel `offset + n`
    pub fn bits16(&self, offset: u8) -> u16 {
        (0..16u8)
            .filter(|n| offset.checked_add(*n).map_or(false, |i| self.contains(i)))
            .fold(0u16, |mask, n| mask | (1u16 << n))
    }

    /// Channel indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |i| self.contains(*i))
    }
}

impl FromIterator<u8> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::empty();
        for index in iter {
            set.insert(index);
        }
        set
    }
}
