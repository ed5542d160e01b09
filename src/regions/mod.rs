//! Bundled regional band baselines and their revision tables

use heapless::Vec;

use crate::band::beacon::MAX_BEACON_FREQUENCIES;
use crate::band::overlay::{DISABLE_CF_LIST, DISABLE_CH_MASK_CNTL5, US_BEACON_1_0_2};
use crate::band::{BandError, Channel, DutyCycle, DutyCycleTable, InvalidBandReason, Overlay, PhyVersion};

mod as_923;
mod au_915_928;
mod eu_863_870;
mod us_902_928;

pub use as_923::{as_923, AS_923};
pub use au_915_928::{au_915_928, AU_915_928};
pub use eu_863_870::{eu_863_870, EU_863_870};
pub use us_902_928::{us_902_928, US_902_928};

/// Beacon and ping slot frequencies shared by US915 and AU915
pub const US_AU_BEACON_FREQUENCIES: [u32; 8] = [
    923_300_000,
    923_900_000,
    924_500_000,
    925_100_000,
    925_700_000,
    926_300_000,
    926_900_000,
    927_500_000,
];

pub(crate) fn beacon_frequencies(frequencies: &[u32]) -> Vec<u32, MAX_BEACON_FREQUENCIES> {
    frequencies.iter().copied().take(MAX_BEACON_FREQUENCIES).collect()
}

pub(crate) fn duty_cycles(ranges: &[DutyCycle]) -> Result<DutyCycleTable, BandError> {
    DutyCycleTable::from_ranges(ranges).ok_or(BandError::InvalidBand(InvalidBandReason::DutyCycles))
}

pub(crate) fn too_many_channels(_: Channel) -> BandError {
    BandError::InvalidBand(InvalidBandReason::TooManyChannels)
}

/// Revision table from per-revision downgrades, newest first.
///
/// Each revision inherits the downgrades of every newer one, so its overlay
/// is the composition of all steps up to and including its own.
fn downgrades<const N: usize>(
    mut steps: [(PhyVersion, Overlay); N],
) -> Result<[(PhyVersion, Overlay); N], BandError> {
    let mut inherited = Overlay::identity();
    for (_, overlay) in steps.iter_mut() {
        inherited = inherited.compose(overlay)?;
        *overlay = inherited.clone();
    }
    Ok(steps)
}

/// Revision table of the 72 channel bands (US915, AU915)
pub fn fixed_72_versions() -> Result<[(PhyVersion, Overlay); 6], BandError> {
    let rev_b = Overlay::from(DISABLE_CF_LIST).compose(&Overlay::from(DISABLE_CH_MASK_CNTL5))?;
    downgrades([
        (PhyVersion::V1_1RevA, Overlay::identity()),
        (PhyVersion::V1_0_3RevA, Overlay::identity()),
        (PhyVersion::V1_0_2RevB, rev_b),
        (PhyVersion::V1_0_2RevA, Overlay::from(US_BEACON_1_0_2)),
        (PhyVersion::V1_0_1, Overlay::identity()),
        (PhyVersion::V1_0, Overlay::identity()),
    ])
}

/// Revision table of bands without revision differences
pub fn uniform_versions() -> [(PhyVersion, Overlay); 7] {
    PhyVersion::ALL.map(|v| (v, Overlay::identity()))
}
