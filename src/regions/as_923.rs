use heapless::Vec;

use crate::band::{
    Band, BandError, Beacon, BeaconLayout, CfListType, ChMaskCodec, Channel, CodingRate,
    DataRate, DataRateSlot, DataRateTable, DutyCycle, Rx1ChannelRule, Rx1DataRateRule,
    Rx2Parameters, Timing,
};

use super::{beacon_frequencies, duty_cycles, too_many_channels};

/// Identifier of the AS 923 MHz band
pub const AS_923: &str = "AS_923";

const DATA_RATES: DataRateTable = DataRateTable::new([
    DataRateSlot::Defined(DataRate::lora(12, 125_000, 59)),
    DataRateSlot::Defined(DataRate::lora(11, 125_000, 59)),
    DataRateSlot::Defined(DataRate::lora(10, 125_000, 123)),
    DataRateSlot::Defined(DataRate::lora(9, 125_000, 123)),
    DataRateSlot::Defined(DataRate::lora(8, 125_000, 250)),
    DataRateSlot::Defined(DataRate::lora(7, 125_000, 250)),
    DataRateSlot::Defined(DataRate::lora(7, 250_000, 250)),
    DataRateSlot::Defined(DataRate::fsk(50_000, 250)),
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
]);

/// Baseline AS923 band
pub fn as_923() -> Result<Band, BandError> {
    let mut uplink_channels = Vec::new();
    for frequency in [923_200_000, 923_400_000] {
        uplink_channels
            .push(Channel::new(frequency, 0, 5))
            .map_err(too_many_channels)?;
    }
    let mut tx_offset = [0.0; 16];
    for (i, o) in tx_offset.iter_mut().enumerate().take(8) {
        *o = -2.0 * i as f32;
    }

    Ok(Band {
        id: AS_923,
        max_uplink_channels: 16,
        downlink_channels: uplink_channels.clone(),
        uplink_channels,
        max_downlink_channels: 16,
        duty_cycles: duty_cycles(&[DutyCycle::new(915_000_000, 928_000_000, 0.01)])?,
        data_rates: DATA_RATES,
        max_adr_data_rate_index: 5,
        timing: Timing::default(),
        default_max_eirp: 16.0,
        tx_offset,
        max_tx_power_index: 7,
        rx1_channel: Rx1ChannelRule::Identity,
        rx1_data_rate: Rx1DataRateRule {
            max_uplink_index: 7,
            max_offset: 7,
            base: 0,
            // offsets 6 and 7 raise the downlink data rate
            offset_shifts: [0, 1, 2, 3, 4, 5, -1, -2],
            min: 0,
            max: 5,
            dwell_time_min: Some(2),
        },
        ch_mask_codec: ChMaskCodec::dynamic(16),
        implements_cf_list: true,
        cf_list_type: CfListType::Frequencies,
        default_rx2: Rx2Parameters {
            data_rate_index: 2,
            frequency: 923_200_000,
        },
        beacon: Beacon {
            data_rate_index: 3,
            coding_rate: CodingRate::Cr4_5,
            frequencies: beacon_frequencies(&[923_400_000]),
            ping_slot_frequencies: beacon_frequencies(&[923_400_000]),
            layout: BeaconLayout { rfu1: 2, rfu2: 0 },
        },
    })
}
