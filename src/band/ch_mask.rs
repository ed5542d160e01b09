//! LinkADRReq channel mask encoding
//!
//! A channel mask command is a sequence of `(ChMaskCntl, ChMask)` pairs. Each
//! control value selects which channels the 16 mask bits address; the
//! conventions differ between dynamic (16 channel) and fixed (72 channel)
//! channel plans.

use heapless::Vec;
use log::trace;

use super::channel::ChannelSet;
use super::BandError;

/// Most frames needed to describe a full channel mask
pub const MAX_CH_MASK_FRAMES: usize = 5;

/// Channel mask command sequence
pub type ChMaskFrames = Vec<ChMaskFrame, MAX_CH_MASK_FRAMES>;

/// One `(ChMaskCntl, ChMask)` pair as carried by LinkADRReq
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChMaskFrame {
    /// Channel mask control (3 bits)
    pub ch_mask_cntl: u8,
    /// Channel mask, bit `n` for the `n`th addressed channel
    pub ch_mask: u16,
}

impl ChMaskFrame {
    /// Create a frame
    pub const fn new(ch_mask_cntl: u8, ch_mask: u16) -> Self {
        Self {
            ch_mask_cntl,
            ch_mask,
        }
    }
}

/// Group addressing convention of a band
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChMaskConvention {
    /// Up to 16 channels addressed by control 0; control 6 turns all on
    Dynamic16,
    /// 64 125 kHz channels followed by 8 500 kHz channels
    Fixed72 {
        /// Whether control 5 (block addressing) is legal
        cntl5: bool,
    },
}

/// Encoder/decoder between channel sets and channel mask frames
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChMaskCodec {
    /// Number of addressable uplink channels
    pub channel_count: u8,
    /// Control value semantics
    pub convention: ChMaskConvention,
}

const FIXED_CHANNELS: u8 = 72;
const FIXED_125KHZ: u8 = 64;

impl ChMaskCodec {
    /// Codec for a dynamic channel plan of `channel_count` (at most 16) channels
    pub const fn dynamic(channel_count: u8) -> Self {
        Self {
            channel_count,
            convention: ChMaskConvention::Dynamic16,
        }
    }

    /// Codec for a 72 channel fixed plan
    pub const fn fixed72(cntl5: bool) -> Self {
        Self {
            channel_count: FIXED_CHANNELS,
            convention: ChMaskConvention::Fixed72 { cntl5 },
        }
    }

    /// Whether the control value may appear in a command for this codec
    pub fn is_legal_cntl(&self, ch_mask_cntl: u8) -> bool {
        match self.convention {
            ChMaskConvention::Dynamic16 => matches!(ch_mask_cntl, 0 | 6),
            ChMaskConvention::Fixed72 { cntl5 } => match ch_mask_cntl {
                0..=4 | 6 | 7 => true,
                5 => cntl5,
                _ => false,
            },
        }
    }

    /// Encode the enabled channels into frames, in ascending control order.
    ///
    /// `allow_all_channels` permits the "all channels on" control value.
    /// An empty set still yields a frame disabling every channel.
    pub fn encode(
        &self,
        enabled: &ChannelSet,
        allow_all_channels: bool,
    ) -> Result<ChMaskFrames, BandError> {
        if let Some(max) = enabled.max() {
            if max >= self.channel_count {
                return Err(BandError::InvalidChannelIndex(max));
            }
        }
        let frames = match self.convention {
            ChMaskConvention::Dynamic16 => self.encode_dynamic(enabled, allow_all_channels),
            ChMaskConvention::Fixed72 { cntl5 } => {
                Self::encode_fixed72(enabled, allow_all_channels, cntl5)
            }
        };
        trace!("encoded {} channels into {} frames", enabled.len(), frames.len());
        Ok(frames)
    }

    fn encode_dynamic(&self, enabled: &ChannelSet, allow_all_channels: bool) -> ChMaskFrames {
        let mut frames = Vec::new();
        let frame = if allow_all_channels && enabled.len() == self.channel_count as usize {
            ChMaskFrame::new(6, 0)
        } else {
            ChMaskFrame::new(0, enabled.bits16(0))
        };
        // capacity is MAX_CH_MASK_FRAMES, a single frame always fits
        let _ = frames.push(frame);
        frames
    }

    fn encode_fixed72(enabled: &ChannelSet, allow_all_channels: bool, cntl5: bool) -> ChMaskFrames {
        let mut frames = Vec::new();
        let wide = enabled.bits16(FIXED_125KHZ) & 0x00FF;
        let narrow_on = enabled.count_in(0..FIXED_125KHZ);

        if narrow_on == 0 {
            let _ = frames.push(ChMaskFrame::new(7, wide));
            return frames;
        }
        if narrow_on == FIXED_125KHZ as usize && allow_all_channels {
            let _ = frames.push(ChMaskFrame::new(6, wide));
            return frames;
        }
        if cntl5 {
            if let Some(blocks) = Self::uniform_blocks(enabled, wide) {
                let _ = frames.push(ChMaskFrame::new(5, blocks));
                return frames;
            }
        }
        for cntl in 0..4u8 {
            let _ = frames.push(ChMaskFrame::new(cntl, enabled.bits16(cntl * 16)));
        }
        let _ = frames.push(ChMaskFrame::new(4, wide));
        frames
    }

    /// Block bits if every block of 8 narrow channels is uniform and matches
    /// its 500 kHz channel.
    fn uniform_blocks(enabled: &ChannelSet, wide: u16) -> Option<u16> {
        let mut blocks = 0u16;
        for block in 0..8u8 {
            let on = enabled.count_in(block * 8..block * 8 + 8);
            let state = match on {
                0 => false,
                8 => true,
                _ => return None,
            };
            if state != (wide & (1 << block) != 0) {
                return None;
            }
            if state {
                blocks |= 1 << block;
            }
        }
        Some(blocks)
    }

    /// Apply frames to the prior channel state.
    ///
    /// Channels not addressed by any frame keep their prior state. Addressing
    /// a channel twice fails with [`BandError::OverlappingChannelMask`].
    pub fn decode(&self, frames: &[ChMaskFrame], prior: &ChannelSet) -> Result<ChannelSet, BandError> {
        let mut state = *prior;
        let mut covered = ChannelSet::empty();
        for frame in frames {
            if !self.is_legal_cntl(frame.ch_mask_cntl) {
                return Err(BandError::InvalidControlIndex(frame.ch_mask_cntl));
            }
            trace!(
                "applying ChMaskCntl {} ChMask {:#06x}",
                frame.ch_mask_cntl,
                frame.ch_mask
            );
            let mut apply = |index: u8, enabled: bool| -> Result<(), BandError> {
                if index >= self.channel_count {
                    // only reachable for set bits past the plan
                    return Err(BandError::InvalidChannelIndex(index));
                }
                if covered.contains(index) {
                    return Err(BandError::OverlappingChannelMask(index));
                }
                covered.insert(index);
                state.set(index, enabled);
                Ok(())
            };
            match (self.convention, frame.ch_mask_cntl) {
                (ChMaskConvention::Dynamic16, 0) => {
                    for bit in 0..16u8 {
                        let on = frame.ch_mask & (1 << bit) != 0;
                        if bit < self.channel_count || on {
                            apply(bit, on)?;
                        }
                    }
                }
                (ChMaskConvention::Dynamic16, _) => {
                    // control 6: all defined channels on, whatever the mask holds
                    for index in 0..self.channel_count {
                        apply(index, true)?;
                    }
                }
                (ChMaskConvention::Fixed72 { .. }, cntl @ 0..=3) => {
                    for bit in 0..16u8 {
                        apply(cntl * 16 + bit, frame.ch_mask & (1 << bit) != 0)?;
                    }
                }
                (ChMaskConvention::Fixed72 { .. }, 5) => {
                    for block in 0..8u8 {
                        let on = frame.ch_mask & (1 << block) != 0;
                        for index in block * 8..block * 8 + 8 {
                            apply(index, on)?;
                        }
                        apply(FIXED_125KHZ + block, on)?;
                    }
                    Self::check_unused_bits(frame.ch_mask)?;
                }
                (ChMaskConvention::Fixed72 { .. }, cntl) => {
                    // 4: 500 kHz only, 6: 125 kHz all on, 7: 125 kHz all off
                    if cntl != 4 {
                        for index in 0..FIXED_125KHZ {
                            apply(index, cntl == 6)?;
                        }
                    }
                    for bit in 0..8u8 {
                        apply(FIXED_125KHZ + bit, frame.ch_mask & (1 << bit) != 0)?;
                    }
                    Self::check_unused_bits(frame.ch_mask)?;
                }
            }
        }
        Ok(state)
    }

    fn check_unused_bits(ch_mask: u16) -> Result<(), BandError> {
        match ch_mask >> 8 {
            0 => Ok(()),
            high => Err(BandError::InvalidChannelIndex(
                FIXED_CHANNELS + high.trailing_zeros() as u8,
            )),
        }
    }
}
