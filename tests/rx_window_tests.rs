use lorawan_band::{
    band::{Modulation, Rx1DataRateRule},
    regions, BandError,
};

#[test]
fn test_us915_rx1_data_rate() {
    let band = regions::us_902_928().unwrap();

    assert_eq!(band.rx1_data_rate_index(0, 0, false), Ok(10));
    assert_eq!(band.rx1_data_rate_index(3, 0, false), Ok(13));
    assert_eq!(band.rx1_data_rate_index(2, 2, false), Ok(10));
    // Shifted past either end of DR8-DR13 saturates
    assert_eq!(band.rx1_data_rate_index(4, 0, false), Ok(13));
    assert_eq!(band.rx1_data_rate_index(0, 3, false), Ok(8));

    assert_eq!(
        band.rx1_data_rate_index(5, 0, false),
        Err(BandError::DataRateIndexTooHigh { max: 4 })
    );
    assert_eq!(
        band.rx1_data_rate_index(0, 4, false),
        Err(BandError::DataRateOffsetTooHigh { max: 3 })
    );
}

#[test]
fn test_saturating_clamp() {
    let rule = Rx1DataRateRule::linear(15, 7, 5, 8, 13);

    // raw index 0 + 5 - 3 = 2
    assert_eq!(rule.resolve(0, 3, false), Ok(8));
    // raw index 15 + 5 - 0 = 20
    assert_eq!(rule.resolve(15, 0, false), Ok(13));
    assert_eq!(rule.resolve(5, 0, false), Ok(10));
}

#[test]
fn test_rx1_data_rate_stays_in_range() {
    for band in [
        regions::us_902_928().unwrap(),
        regions::au_915_928().unwrap(),
        regions::eu_863_870().unwrap(),
        regions::as_923().unwrap(),
    ] {
        let rule = band.rx1_data_rate;
        for uplink in 0..=rule.max_uplink_index {
            for offset in 0..=rule.max_offset {
                for dwell in [false, true] {
                    let dr = band.rx1_data_rate_index(uplink, offset, dwell).unwrap();
                    assert!((rule.min..=rule.max).contains(&dr), "{} {} {}", band.id, uplink, offset);
                    assert!(band.data_rate(dr).is_ok());
                }
            }
        }
    }
}

#[test]
fn test_eu868_rx1_data_rate() {
    let band = regions::eu_863_870().unwrap();

    assert_eq!(band.rx1_data_rate_index(7, 0, false), Ok(7));
    assert_eq!(band.rx1_data_rate_index(5, 2, false), Ok(3));
    assert_eq!(band.rx1_data_rate_index(3, 5, false), Ok(0));
    assert_eq!(
        band.rx1_data_rate_index(0, 6, false),
        Err(BandError::DataRateOffsetTooHigh { max: 5 })
    );
}

#[test]
fn test_au915_rx1_data_rate() {
    let band = regions::au_915_928().unwrap();

    assert_eq!(band.rx1_data_rate_index(0, 0, false), Ok(8));
    assert_eq!(band.rx1_data_rate_index(5, 0, false), Ok(13));
    assert_eq!(band.rx1_data_rate_index(6, 0, false), Ok(13));
    assert_eq!(band.rx1_data_rate_index(6, 5, false), Ok(9));
    assert_eq!(
        band.rx1_data_rate_index(7, 0, false),
        Err(BandError::DataRateIndexTooHigh { max: 6 })
    );
}

#[test]
fn test_as923_rx1_dwell_time() {
    let band = regions::as_923().unwrap();

    // Offsets 6 and 7 raise the data rate
    assert_eq!(band.rx1_data_rate_index(2, 7, false), Ok(4));
    assert_eq!(band.rx1_data_rate_index(5, 6, false), Ok(5));

    assert_eq!(band.rx1_data_rate_index(1, 0, false), Ok(1));
    assert_eq!(band.rx1_data_rate_index(1, 0, true), Ok(2));
    assert_eq!(band.rx1_data_rate_index(0, 5, true), Ok(2));
    assert_eq!(band.rx1_data_rate_index(4, 0, true), Ok(4));
}

#[test]
fn test_rx1_channel() {
    let band = regions::us_902_928().unwrap();
    assert_eq!(band.rx1_channel_index(0), Ok(0));
    assert_eq!(band.rx1_channel_index(9), Ok(1));
    assert_eq!(band.rx1_channel_index(63), Ok(7));
    assert_eq!(band.rx1_channel_index(71), Ok(7));
    assert_eq!(band.rx1_channel_index(72), Err(BandError::InvalidChannelIndex(72)));

    // Every downlink channel is shared by nine uplink channels
    let sharing_zero = (0..72).filter(|ch| band.rx1_channel_index(*ch) == Ok(0)).count();
    assert_eq!(sharing_zero, 9);

    let band = regions::eu_863_870().unwrap();
    assert_eq!(band.rx1_channel_index(2), Ok(2));
    assert_eq!(band.rx1_channel_index(15), Ok(15));
    assert_eq!(band.rx1_channel_index(16), Err(BandError::InvalidChannelIndex(16)));
}

#[test]
fn test_rx1_window() {
    let band = regions::us_902_928().unwrap();

    let rx1 = band.rx1_window(64, 4, 0, false).unwrap();
    assert_eq!(rx1.channel_index, 0);
    assert_eq!(rx1.frequency, 923_300_000);
    assert_eq!(rx1.data_rate_index, 13);
    assert_eq!(rx1.data_rate.modulation, Modulation::lora(7, 500_000));

    let band = regions::eu_863_870().unwrap();
    let rx1 = band.rx1_window(1, 5, 1, false).unwrap();
    assert_eq!(rx1.frequency, 868_300_000);
    assert_eq!(rx1.data_rate_index, 4);
    assert_eq!(rx1.data_rate.max_payload_size, Some(250));

    // Channel 5 is legal but not part of the default plan
    assert_eq!(
        band.rx1_window(5, 5, 0, false),
        Err(BandError::InvalidChannelIndex(5))
    );
}
