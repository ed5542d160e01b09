use lorawan_band::{
    band::{
        duty_cycle::UNREGULATED, BeaconLayout, ChannelSet, DataRateSlot, DutyCycle, DutyCycleTable,
        InvalidBandReason, Modulation, PhyVersion,
    },
    regions, BandError,
};

#[test]
fn test_duty_cycle_lookup() {
    let band = regions::us_902_928().unwrap();
    assert_eq!(band.duty_cycle(915_000_000), 1.0);
    assert_eq!(band.duty_cycle(902_000_000), 1.0);
    assert_eq!(band.duty_cycle(1_000_000_000), UNREGULATED);

    let band = regions::eu_863_870().unwrap();
    assert_eq!(band.duty_cycle(863_000_000), 0.001);
    assert_eq!(band.duty_cycle(868_100_000), 0.01);
    assert_eq!(band.duty_cycle(868_600_000), 0.01);
    assert_eq!(band.duty_cycle(869_525_000), 0.1);
    // 868.6 - 868.7 MHz is not regulated by the band
    assert_eq!(band.duty_cycle(868_650_000), UNREGULATED);

    let band = regions::as_923().unwrap();
    assert_eq!(band.duty_cycle(923_200_000), 0.01);
    assert_eq!(band.duty_cycle(868_100_000), UNREGULATED);

    assert_eq!(DutyCycleTable::new().lookup(868_100_000), UNREGULATED);
}

#[test]
fn test_overlapping_duty_cycles_rejected() {
    let mut band = regions::eu_863_870().unwrap();
    band.duty_cycles = DutyCycleTable::from_ranges(&[
        DutyCycle::new(863_000_000, 866_000_000, 0.001),
        DutyCycle::new(865_000_000, 868_000_000, 0.01),
    ])
    .unwrap();
    assert_eq!(
        band.validate(),
        Err(BandError::InvalidBand(InvalidBandReason::DutyCycles))
    );

    band.duty_cycles =
        DutyCycleTable::from_ranges(&[DutyCycle::new(863_000_000, 866_000_000, 0.0)]).unwrap();
    assert_eq!(
        band.validate(),
        Err(BandError::InvalidBand(InvalidBandReason::DutyCycles))
    );
}

#[test]
fn test_data_rate_table() {
    let band = regions::us_902_928().unwrap();

    assert_eq!(band.data_rates.slots().len(), 16);
    assert_eq!(
        band.data_rate(0).unwrap().modulation,
        Modulation::lora(10, 125_000)
    );
    assert_eq!(band.data_rate(8).unwrap().modulation.spreading_factor(), Some(12));
    assert_eq!(band.data_rate(8).unwrap().modulation.bandwidth(), Some(500_000));
    assert_eq!(band.max_payload_size(0), Ok(Some(19)));
    assert_eq!(band.max_payload_size(13), Ok(Some(230)));

    for reserved in [5, 6, 7, 14, 15] {
        assert_eq!(band.data_rates.slots()[reserved as usize], DataRateSlot::Rfu);
        assert_eq!(band.data_rate(reserved), Err(BandError::ReservedDataRate(reserved)));
    }
    assert_eq!(
        band.data_rate(16),
        Err(BandError::DataRateIndexTooHigh { max: 15 })
    );

    // DR4 and DR12 share a modulation; the lower index wins
    assert_eq!(band.data_rates.find(&Modulation::lora(8, 500_000)), Some(4));
    assert_eq!(band.data_rates.find(&Modulation::lora(12, 125_000)), None);

    let band = regions::eu_863_870().unwrap();
    assert_eq!(
        band.data_rate(7).unwrap().modulation,
        Modulation::Fsk { bit_rate: 50_000 }
    );
    assert_eq!(band.data_rate(7).unwrap().modulation.spreading_factor(), None);
    assert_eq!(band.data_rate(8), Err(BandError::ReservedDataRate(8)));
}

#[test]
fn test_tx_power() {
    let band = regions::us_902_928().unwrap();
    assert_eq!(band.tx_power_offset(0), Ok(0.0));
    assert_eq!(band.tx_power_offset(14), Ok(-28.0));
    assert_eq!(
        band.tx_power_offset(15),
        Err(BandError::TxPowerIndexTooHigh { max: 14 })
    );

    let band = regions::eu_863_870().unwrap();
    assert_eq!(band.tx_power_offset(7), Ok(-14.0));
    assert_eq!(
        band.tx_power_offset(8),
        Err(BandError::TxPowerIndexTooHigh { max: 7 })
    );
}

#[test]
fn test_bundled_bands_are_valid() {
    for band in [
        regions::us_902_928().unwrap(),
        regions::au_915_928().unwrap(),
        regions::eu_863_870().unwrap(),
        regions::as_923().unwrap(),
    ] {
        assert_eq!(band.validate(), Ok(()), "{}", band.id);
        assert_eq!(band.ch_mask_codec.channel_count, band.max_uplink_channels);
    }

    let band = regions::us_902_928().unwrap();
    assert_eq!(band.uplink_channels.len(), 72);
    assert_eq!(band.downlink_channels.len(), 8);
    assert_eq!(band.uplink_channels[0].frequency, 902_300_000);
    assert_eq!(band.uplink_channels[63].frequency, 914_900_000);
    assert_eq!(band.uplink_channels[64].frequency, 903_000_000);
    assert_eq!(band.uplink_channels[71].frequency, 914_200_000);
    assert!(band.uplink_channels[64].supports(4));
    assert!(!band.uplink_channels[64].supports(3));
    assert_eq!(band.downlink_channels[7].frequency, 927_500_000);
    assert_eq!(band.max_adr_data_rate_index, 3);
    assert_eq!(band.default_rx2.frequency, 923_300_000);
}

#[test]
fn test_invalid_baselines() {
    let mut band = regions::us_902_928().unwrap();
    band.uplink_channels[0].max_data_rate = 5;
    assert_eq!(
        band.validate(),
        Err(BandError::InvalidBand(InvalidBandReason::ChannelReservedDataRate))
    );

    let mut band = regions::us_902_928().unwrap();
    band.uplink_channels[0].min_data_rate = 4;
    band.uplink_channels[0].max_data_rate = 3;
    assert_eq!(
        band.validate(),
        Err(BandError::InvalidBand(InvalidBandReason::ChannelDataRateRange))
    );

    let mut band = regions::us_902_928().unwrap();
    band.max_uplink_channels = 64;
    assert_eq!(
        band.validate(),
        Err(BandError::InvalidBand(InvalidBandReason::TooManyChannels))
    );

    let mut band = regions::eu_863_870().unwrap();
    band.ch_mask_codec.channel_count = 8;
    assert_eq!(
        band.validate(),
        Err(BandError::InvalidBand(InvalidBandReason::ChMaskCodec))
    );

    let mut band = regions::eu_863_870().unwrap();
    band.default_rx2.data_rate_index = 9;
    assert_eq!(
        band.validate(),
        Err(BandError::InvalidBand(InvalidBandReason::Rx2DataRate))
    );
}

#[test]
fn test_beacon() {
    let band = regions::us_902_928().unwrap();
    assert_eq!(band.beacon.broadcast_frequency(0), Some(923_300_000));
    assert_eq!(band.beacon.broadcast_frequency(127), Some(923_300_000));
    assert_eq!(band.beacon.broadcast_frequency(128), Some(923_900_000));
    assert_eq!(band.beacon.broadcast_frequency(128 * 8), Some(923_300_000));
    assert_eq!(band.beacon.layout.payload_len(), 23);
    assert_eq!(band.beacon.layout.time_offset(), 5);
    assert_eq!(band.beacon.layout.gw_specific_offset(), 11);

    let band = regions::eu_863_870().unwrap();
    assert_eq!(band.beacon.broadcast_frequency(128 * 5), Some(869_525_000));
    assert_eq!(band.beacon.layout.payload_len(), 17);
}

#[test]
fn test_beacon_layout_wide_rfu() {
    let layout = BeaconLayout {
        rfu1: u8::MAX,
        rfu2: u8::MAX,
    };
    assert_eq!(layout.time_offset(), 255);
    assert_eq!(layout.gw_specific_offset(), 261);
    assert_eq!(layout.payload_len(), 525);
}

#[test]
fn test_phy_version_strings() {
    assert_eq!("1.0.2-b".parse::<PhyVersion>(), Ok(PhyVersion::V1_0_2RevB));
    assert_eq!(" 1.1-A ".parse::<PhyVersion>(), Ok(PhyVersion::V1_1RevA));
    assert_eq!("2.0".parse::<PhyVersion>(), Err(BandError::UnknownVersionString));

    for version in PhyVersion::ALL {
        assert_eq!(version.to_string().parse::<PhyVersion>(), Ok(version));
    }
    assert!(PhyVersion::V1_0 < PhyVersion::V1_1RevB);
}

#[test]
fn test_channel_set() {
    let mut set = ChannelSet::empty();
    assert!(set.is_empty());
    assert_eq!(set.max(), None);

    assert!(set.insert(3));
    assert!(set.insert(71));
    assert!(!set.insert(3));
    assert_eq!(set.len(), 2);
    assert_eq!(set.max(), Some(71));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 71]);

    // Indices past any channel plan are kept, not dropped
    assert!(set.insert(200));
    assert!(set.insert(255));
    assert_eq!(set.max(), Some(255));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 71, 200, 255]);
    assert_eq!(set.bits16(192), 0x0100);
    assert_eq!(set.bits16(250), 0x0020);
    set.remove(200);
    set.remove(255);
    assert_eq!(set.max(), Some(71));

    set.set_range(0..8, true);
    assert_eq!(set.count_in(0..8), 8);
    assert_eq!(set.bits16(0), 0x00FF);
    assert_eq!(set.bits16(64), 0x0080);

    set.remove(3);
    assert!(!set.contains(3));
    assert_eq!(ChannelSet::from_range(8..16).bits16(0), 0xFF00);
}
