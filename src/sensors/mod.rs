//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces one [`RawSample`] per
//! control cycle.  Raw means raw: ADC codes for the analog channels and
//! engineering values (NaN on failure) for the digital ones.  All
//! filtering and calibration happens in the signal conditioner.

pub mod dht;
pub mod light;
pub mod ph;
pub mod tds;
pub mod water_temp;

use dht::DhtSensor;
use light::LightSensor;
pub use ph::PH_BURST_LEN;
use ph::PhProbe;
use tds::TdsProbe;
use water_temp::WaterTempSensor;

/// One cycle's unprocessed readings.  Immutable once produced; consumed
/// only by the signal conditioner.
#[derive(Debug, Clone, Copy)]
pub struct RawSample {
    /// 10 consecutive pH ADC codes, acquisition order.
    pub ph_burst: [u16; PH_BURST_LEN],
    /// Single-shot TDS ADC code; `None` if the conversion failed.
    pub tds_raw: Option<u16>,
    /// Single-shot LDR ADC code.
    pub light_raw: u16,
    /// DHT22 air temperature (°C); NaN on failure.
    pub air_temp_c: f32,
    /// DHT22 relative humidity (%); NaN on failure.
    pub humidity_pct: f32,
    /// DS18B20 water temperature (°C); NaN on failure.
    pub water_temp_c: f32,
}

/// Aggregates all sensor drivers and produces a unified raw sample.
pub struct SensorHub {
    ph: PhProbe,
    tds: TdsProbe,
    light: LightSensor,
    air: DhtSensor,
    water: WaterTempSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(
        ph: PhProbe,
        tds: TdsProbe,
        light: LightSensor,
        air: DhtSensor,
        water: WaterTempSensor,
    ) -> Self {
        Self {
            ph,
            tds,
            light,
            air,
            water,
        }
    }

    /// Read every channel once and return a unified sample.
    ///
    /// Digital sensor failures surface as NaN fields, never as errors —
    /// a single flaky sensor must not abort the control cycle.  The two
    /// blocking points (DS18B20 conversion, pH burst spacing) make this
    /// the slow phase of the cycle; everything downstream is pure math.
    pub fn read_all(&mut self) -> RawSample {
        let air = self.air.read();
        let water_temp_c = self.water.read();
        let ph_burst = self.ph.read_burst();
        let tds_raw = self.tds.read();
        let light_raw = self.light.read();

        RawSample {
            ph_burst,
            tds_raw,
            light_raw,
            air_temp_c: air.temp_c,
            humidity_pct: air.humidity_pct,
            water_temp_c,
        }
    }
}
