//! LoRaWAN regional band parameters in Rust
//!
//! This crate describes the regional radio profiles ("bands") a LoRaWAN
//! network server and its end devices must agree on: uplink and downlink
//! channels, data rates, duty cycle limits, receive window timing and beacon
//! parameters. Each band is a baseline plus a table of per-revision overlays
//! expressing how the Regional Parameters documents changed it over time.
//!
//! # Features
//! - Channel mask encoding and decoding for LinkADRReq (16 and 72 channel plans)
//! - RX1 data rate and channel resolution, including dwell time limits
//! - Duty cycle lookup by frequency
//! - Composable per-revision overlays, checked at registration
//! - US915, AU915, EU868 and AS923 baselines
//! - No unsafe code, no allocator
//!
//! # Example
//! ```
//! use lorawan_band::{
//!     band::{ChannelSet, PhyVersion},
//!     registry::BandRegistry,
//!     regions::US_902_928,
//! };
//!
//! let registry = BandRegistry::with_defaults().unwrap();
//! let band = registry.resolve(US_902_928, PhyVersion::V1_0_2RevB).unwrap();
//!
//! // Sub-band 2 (channels 8-15) plus its 500 kHz channel
//! let enabled: ChannelSet = (8..16).chain([65]).collect();
//! let frames = band.generate_ch_masks(&enabled, false).unwrap();
//! let parsed = band.parse_ch_masks(&frames, &ChannelSet::empty()).unwrap();
//! assert_eq!(parsed, enabled);
//!
//! // RX1 for an uplink at DR0 on channel 9
//! let rx1 = band.rx1_window(9, 0, 0, false).unwrap();
//! assert_eq!(rx1.data_rate_index, 10);
//! assert_eq!(rx1.frequency, 923_900_000);
//! ```

#![warn(missing_docs)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Band parameter types and algorithms
pub mod band;

/// Bundled regional baselines
pub mod regions;

/// Band lookup by identifier and revision
pub mod registry;

pub use band::{Band, BandError, PhyVersion};
pub use registry::BandRegistry;
