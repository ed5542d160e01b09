use heapless::Vec;

use crate::band::{
    Band, BandError, Beacon, BeaconLayout, CfListType, ChMaskCodec, Channel, CodingRate,
    DataRate, DataRateSlot, DataRateTable, DutyCycle, Rx1ChannelRule, Rx1DataRateRule,
    Rx2Parameters, Timing, MAX_CHANNELS,
};

use super::{beacon_frequencies, duty_cycles, too_many_channels};

/// Identifier of the EU 863-870 MHz band
pub const EU_863_870: &str = "EU_863_870";

const JOIN_CHANNELS: [u32; 3] = [868_100_000, 868_300_000, 868_500_000];

const DATA_RATES: DataRateTable = DataRateTable::new([
    DataRateSlot::Defined(DataRate::lora(12, 125_000, 59)),
    DataRateSlot::Defined(DataRate::lora(11, 125_000, 59)),
    DataRateSlot::Defined(DataRate::lora(10, 125_000, 59)),
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

// ETSI EN 300 220 sub-bands
const DUTY_CYCLES: [DutyCycle; 6] = [
    DutyCycle::new(863_000_000, 864_999_999, 0.001),
    DutyCycle::new(865_000_000, 867_999_999, 0.01),
    DutyCycle::new(868_000_000, 868_600_000, 0.01),
    DutyCycle::new(868_700_000, 869_200_000, 0.001),
    DutyCycle::new(869_400_000, 869_650_000, 0.1),
    DutyCycle::new(869_700_000, 870_000_000, 0.01),
];

fn join_channels() -> Result<Vec<Channel, MAX_CHANNELS>, BandError> {
    let mut channels = Vec::new();
    for frequency in JOIN_CHANNELS {
        channels
            .push(Channel::new(frequency, 0, 5))
            .map_err(too_many_channels)?;
    }
    Ok(channels)
}

/// Baseline EU868 band
pub fn eu_863_870() -> Result<Band, BandError> {
    let mut tx_offset = [0.0; 16];
    for (i, o) in tx_offset.iter_mut().enumerate().take(8) {
        *o = -2.0 * i as f32;
    }

    Ok(Band {
        id: EU_863_870,
        max_uplink_channels: 16,
        uplink_channels: join_channels()?,
        max_downlink_channels: 16,
        downlink_channels: join_channels()?,
        duty_cycles: duty_cycles(&DUTY_CYCLES)?,
        data_rates: DATA_RATES,
        max_adr_data_rate_index: 5,
        timing: Timing::default(),
        default_max_eirp: 16.0,
        tx_offset,
        max_tx_power_index: 7,
        rx1_channel: Rx1ChannelRule::Identity,
        rx1_data_rate: Rx1DataRateRule::linear(7, 5, 0, 0, 7),
        ch_mask_codec: ChMaskCodec::dynamic(16),
        implements_cf_list: true,
        cf_list_type: CfListType::Frequencies,
        default_rx2: Rx2Parameters {
            data_rate_index: 0,
            frequency: 869_525_000,
        },
        beacon: Beacon {
            data_rate_index: 3,
            coding_rate: CodingRate::Cr4_5,
            frequencies: beacon_frequencies(&[869_525_000]),
            ping_slot_frequencies: beacon_frequencies(&[869_525_000]),
            layout: BeaconLayout { rfu1: 2, rfu2: 0 },
        },
    })
}
