use heapless::Vec;

use crate::band::{
    Band, BandError, Beacon, BeaconLayout, CfListType, ChMaskCodec, Channel, CodingRate,
    DataRate, DataRateSlot, DataRateTable, DutyCycle, Rx1ChannelRule, Rx1DataRateRule,
    Rx2Parameters, Timing, MAX_CHANNELS,
};

use super::{beacon_frequencies, duty_cycles, too_many_channels, US_AU_BEACON_FREQUENCIES};

/// Identifier of the US 902-928 MHz band
pub const US_902_928: &str = "US_902_928";

const FIXED_72_DATA_RATES: DataRateTable = DataRateTable::new([
    DataRateSlot::Defined(DataRate::lora(10, 125_000, 19)),
    DataRateSlot::Defined(DataRate::lora(9, 125_000, 61)),
    DataRateSlot::Defined(DataRate::lora(8, 125_000, 133)),
    DataRateSlot::Defined(DataRate::lora(7, 125_000, 250)),
    DataRateSlot::Defined(DataRate::lora(8, 500_000, 250)),
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Defined(DataRate::lora(12, 500_000, 41)),
    DataRateSlot::Defined(DataRate::lora(11, 500_000, 117)),
    DataRateSlot::Defined(DataRate::lora(10, 500_000, 230)),
    DataRateSlot::Defined(DataRate::lora(9, 500_000, 230)),
    DataRateSlot::Defined(DataRate::lora(8, 500_000, 230)),
    DataRateSlot::Defined(DataRate::lora(7, 500_000, 230)),
    // DR14 is used by LinkADRReq from Regional Parameters 1.1 on
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
]);

/// TX power offsets of the 902-928 MHz bands: 2 dB steps down to index 14
pub(super) fn fixed_72_tx_offset() -> [f32; 16] {
    let mut offset = [0.0; 16];
    for (i, o) in offset.iter_mut().enumerate().take(15) {
        *o = -2.0 * i as f32;
    }
    offset
}

/// 500 kHz downlink channels starting at 923.3 MHz, 600 kHz apart
pub(super) fn fixed_72_downlink_channels() -> Result<Vec<Channel, MAX_CHANNELS>, BandError> {
    let mut channels = Vec::new();
    for i in 0..8u32 {
        channels
            .push(Channel::new(923_300_000 + 600_000 * i, 8, 13))
            .map_err(too_many_channels)?;
    }
    Ok(channels)
}

/// Baseline US915 band, Regional Parameters 1.1 Rev A
pub fn us_902_928() -> Result<Band, BandError> {
    let mut uplink_channels = Vec::new();
    // 64 125 kHz upstream channels
    for i in 0..64u32 {
        uplink_channels
            .push(Channel::new(902_300_000 + 200_000 * i, 0, 3))
            .map_err(too_many_channels)?;
    }
    // 8 500 kHz upstream channels
    for i in 0..8u32 {
        uplink_channels
            .push(Channel::new(903_000_000 + 1_600_000 * i, 4, 4))
            .map_err(too_many_channels)?;
    }

    Ok(Band {
        id: US_902_928,
        max_uplink_channels: 72,
        uplink_channels,
        max_downlink_channels: 8,
        downlink_channels: fixed_72_downlink_channels()?,
        duty_cycles: duty_cycles(&[DutyCycle::new(902_000_000, 928_000_000, 1.0)])?,
        data_rates: FIXED_72_DATA_RATES,
        max_adr_data_rate_index: 3,
        timing: Timing::default(),
        default_max_eirp: 30.0,
        tx_offset: fixed_72_tx_offset(),
        max_tx_power_index: 14,
        rx1_channel: Rx1ChannelRule::Modulo(8),
        rx1_data_rate: Rx1DataRateRule::linear(4, 3, 10, 8, 13),
        ch_mask_codec: ChMaskCodec::fixed72(true),
        implements_cf_list: true,
        cf_list_type: CfListType::ChannelMasks,
        default_rx2: Rx2Parameters {
            data_rate_index: 8,
            frequency: 923_300_000,
        },
        beacon: Beacon {
            data_rate_index: 8,
            coding_rate: CodingRate::Cr4_5,
            frequencies: beacon_frequencies(&US_AU_BEACON_FREQUENCIES),
            ping_slot_frequencies: beacon_frequencies(&US_AU_BEACON_FREQUENCIES),
            layout: BeaconLayout { rfu1: 5, rfu2: 3 },
        },
    })
}
