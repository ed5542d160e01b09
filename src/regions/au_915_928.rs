use heapless::Vec;

use crate::band::{
    Band, BandError, Beacon, BeaconLayout, CfListType, ChMaskCodec, Channel, CodingRate,
    DataRate, DataRateSlot, DataRateTable, DutyCycle, Rx1ChannelRule, Rx1DataRateRule,
    Rx2Parameters, Timing,
};

use super::us_902_928::{fixed_72_downlink_channels, fixed_72_tx_offset};
use super::{beacon_frequencies, duty_cycles, too_many_channels, US_AU_BEACON_FREQUENCIES};

/// Identifier of the AU 915-928 MHz band
pub const AU_915_928: &str = "AU_915_928";

const DATA_RATES: DataRateTable = DataRateTable::new([
    DataRateSlot::Defined(DataRate::lora(12, 125_000, 59)),
    DataRateSlot::Defined(DataRate::lora(11, 125_000, 59)),
    DataRateSlot::Defined(DataRate::lora(10, 125_000, 59)),
    DataRateSlot::Defined(DataRate::lora(9, 125_000, 123)),
    DataRateSlot::Defined(DataRate::lora(8, 125_000, 250)),
    DataRateSlot::Defined(DataRate::lora(7, 125_000, 250)),
    DataRateSlot::Defined(DataRate::lora(8, 500_000, 250)),
    DataRateSlot::Rfu,
    DataRateSlot::Defined(DataRate::lora(12, 500_000, 41)),
    DataRateSlot::Defined(DataRate::lora(11, 500_000, 117)),
    DataRateSlot::Defined(DataRate::lora(10, 500_000, 230)),
    DataRateSlot::Defined(DataRate::lora(9, 500_000, 230)),
    DataRateSlot::Defined(DataRate::lora(8, 500_000, 230)),
    DataRateSlot::Defined(DataRate::lora(7, 500_000, 230)),
    DataRateSlot::Rfu,
    DataRateSlot::Rfu,
]);

/// Baseline AU915 band
pub fn au_915_928() -> Result<Band, BandError> {
    let mut uplink_channels = Vec::new();
    for i in 0..64u32 {
        uplink_channels
            .push(Channel::new(915_200_000 + 200_000 * i, 0, 5))
            .map_err(too_many_channels)?;
    }
    for i in 0..8u32 {
        uplink_channels
            .push(Channel::new(915_900_000 + 1_600_000 * i, 6, 6))
            .map_err(too_many_channels)?;
    }

    Ok(Band {
        id: AU_915_928,
        max_uplink_channels: 72,
        uplink_channels,
        max_downlink_channels: 8,
        downlink_channels: fixed_72_downlink_channels()?,
        duty_cycles: duty_cycles(&[DutyCycle::new(915_000_000, 928_000_000, 1.0)])?,
        data_rates: DATA_RATES,
        max_adr_data_rate_index: 5,
        timing: Timing::default(),
        default_max_eirp: 30.0,
        tx_offset: fixed_72_tx_offset(),
        max_tx_power_index: 14,
        rx1_channel: Rx1ChannelRule::Modulo(8),
        rx1_data_rate: Rx1DataRateRule::linear(6, 5, 8, 8, 13),
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
