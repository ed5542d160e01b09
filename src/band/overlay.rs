//! Per-revision adjustments of a band baseline
//!
//! An [`Overlay`] is an ordered list of named [`Swap`]s. Each swap is a pure
//! `Band -> Band` function; applying the overlay runs them left to right.
//! Overlays may touch capability flags, beacon parameters and channel mask
//! control legality, never the channel or data rate tables.

use core::fmt;

use heapless::Vec;
use log::trace;

use super::beacon::{BeaconLayout, CodingRate};
use super::ch_mask::ChMaskConvention;
use super::{Band, BandError};

/// Maximum number of swaps in one overlay
pub const MAX_OVERLAY_STEPS: usize = 8;

/// Named band transformation
#[derive(Clone, Copy)]
pub struct Swap {
    /// Name used in logs and diagnostics
    pub name: &'static str,
    /// Transformation
    pub apply: fn(Band) -> Band,
}

impl fmt::Debug for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered chain of swaps
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    steps: Vec<Swap, MAX_OVERLAY_STEPS>,
}

impl Overlay {
    /// Overlay that returns the band unchanged
    pub fn identity() -> Self {
        Self::default()
    }

    /// Overlay running `swaps` in order
    pub fn of(swaps: &[Swap]) -> Result<Self, BandError> {
        let steps = Vec::from_slice(swaps).map_err(|_| BandError::OverlayTooLong)?;
        Ok(Self { steps })
    }

    /// Overlay running `self` then `next`
    pub fn compose(&self, next: &Overlay) -> Result<Self, BandError> {
        let mut steps = self.steps.clone();
        steps
            .extend_from_slice(&next.steps)
            .map_err(|_| BandError::OverlayTooLong)?;
        Ok(Self { steps })
    }

    /// Whether this is the identity overlay
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the swaps, in application order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|s| s.name)
    }

    /// Apply to a band
    pub fn apply(&self, band: Band) -> Band {
        self.steps.iter().fold(band, |band, swap| {
            trace!("{}: applying {}", band.id, swap.name);
            (swap.apply)(band)
        })
    }
}

impl From<Swap> for Overlay {
    fn from(swap: Swap) -> Self {
        let mut steps = Vec::new();
        // a single step always fits
        let _ = steps.push(swap);
        Self { steps }
    }
}

fn disable_cf_list(mut band: Band) -> Band {
    band.implements_cf_list = false;
    band
}

fn disable_ch_mask_cntl5(mut band: Band) -> Band {
    if let ChMaskConvention::Fixed72 { cntl5 } = &mut band.ch_mask_codec.convention {
        *cntl5 = false;
    }
    band
}

fn us_beacon_1_0_2(mut band: Band) -> Band {
    band.beacon.data_rate_index = 3;
    band.beacon.coding_rate = CodingRate::Cr4_5;
    band.beacon.layout = BeaconLayout { rfu1: 3, rfu2: 1 };
    band
}

/// Join-accept carries no CFList
pub const DISABLE_CF_LIST: Swap = Swap {
    name: "disable-cf-list",
    apply: disable_cf_list,
};

/// ChMaskCntl 5 is RFU
pub const DISABLE_CH_MASK_CNTL5: Swap = Swap {
    name: "disable-ch-mask-cntl5",
    apply: disable_ch_mask_cntl5,
};

/// US915/AU915 beacon as of Regional Parameters 1.0.2 Rev A
pub const US_BEACON_1_0_2: Swap = Swap {
    name: "us-beacon-1.0.2",
    apply: us_beacon_1_0_2,
};
