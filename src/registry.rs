//! Band lookup by identifier and Regional Parameters revision
//!
//! The registry is filled once during initialization and read-only afterwards.
//! Every overlay is checked against its baseline at registration, so a
//! revision that would alter channel or data rate tables is rejected before
//! any caller can resolve it.

use heapless::FnvIndexMap;
use log::{debug, warn};

use crate::band::{Band, BandError, Overlay, PhyVersion};
use crate::regions;

/// Maximum number of registered bands
pub const MAX_BANDS: usize = 8;

#[derive(Debug, Clone)]
struct Entry {
    baseline: Band,
    /// Indexed by [`PhyVersion::index`]
    overlays: [Option<Overlay>; PhyVersion::COUNT],
}

/// Bands by identifier, each with its revision overlays
#[derive(Debug, Clone, Default)]
pub struct BandRegistry {
    bands: FnvIndexMap<&'static str, Entry, MAX_BANDS>,
}

impl BandRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled bands
    pub fn with_defaults() -> Result<Self, BandError> {
        let mut registry = Self::new();
        registry.register(regions::us_902_928()?, &regions::fixed_72_versions()?)?;
        registry.register(regions::au_915_928()?, &regions::fixed_72_versions()?)?;
        registry.register(regions::eu_863_870()?, &regions::uniform_versions())?;
        registry.register(regions::as_923()?, &regions::uniform_versions())?;
        Ok(registry)
    }

    /// Register a baseline band with the overlay of each supported revision
    pub fn register(
        &mut self,
        baseline: Band,
        versions: &[(PhyVersion, Overlay)],
    ) -> Result<(), BandError> {
        let id = baseline.id;
        if self.bands.contains_key(id) {
            warn!("{}: already registered", id);
            return Err(BandError::DuplicateBand);
        }
        baseline.validate().map_err(|err| {
            warn!("{}: rejected baseline: {}", id, err);
            err
        })?;

        let mut overlays: [Option<Overlay>; PhyVersion::COUNT] = Default::default();
        for (version, overlay) in versions {
            let slot = &mut overlays[version.index()];
            if slot.is_some() {
                warn!("{}: {} listed twice", id, version);
                return Err(BandError::DuplicateVersion(*version));
            }
            let effective = overlay.apply(baseline.clone());
            if !effective.same_tables(&baseline) {
                warn!("{}: overlay for {} changes band tables", id, version);
                return Err(BandError::InvalidOverlay(*version));
            }
            effective.validate()?;
            *slot = Some(overlay.clone());
        }

        debug!(
            "{}: registered with {} revisions",
            id,
            overlays.iter().flatten().count()
        );
        self.bands
            .insert(id, Entry { baseline, overlays })
            .map_err(|_| BandError::RegistryFull)?;
        Ok(())
    }

    /// Baseline band by identifier
    pub fn lookup(&self, id: &str) -> Result<&Band, BandError> {
        self.bands
            .get(id)
            .map(|entry| &entry.baseline)
            .ok_or(BandError::UnknownBand)
    }

    /// Effective band for a revision
    pub fn resolve(&self, id: &str, version: PhyVersion) -> Result<Band, BandError> {
        let entry = self.bands.get(id).ok_or(BandError::UnknownBand)?;
        let overlay = entry.overlays[version.index()]
            .as_ref()
            .ok_or(BandError::UnsupportedVersion(version))?;
        debug!("{}: resolving for {}", id, version);
        Ok(overlay.apply(entry.baseline.clone()))
    }

    /// Revisions supported by a band
    pub fn versions(&self, id: &str) -> Result<impl Iterator<Item = PhyVersion> + '_, BandError> {
        let entry = self.bands.get(id).ok_or(BandError::UnknownBand)?;
        Ok(PhyVersion::ALL
            .into_iter()
            .filter(move |version| entry.overlays[version.index()].is_some()))
    }

    /// Identifiers of the registered bands
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bands.keys().copied()
    }
}

/// Process-wide registry of the bundled bands, built on first use
#[cfg(feature = "std")]
pub fn default_registry() -> Result<&'static BandRegistry, BandError> {
    use std::sync::OnceLock;

    static REGISTRY: OnceLock<Result<BandRegistry, BandError>> = OnceLock::new();
    REGISTRY
        .get_or_init(BandRegistry::with_defaults)
        .as_ref()
        .map_err(|err| *err)
}
