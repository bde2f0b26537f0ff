//! Measurement configuration.

use fugit::HertzU32 as Hertz;

use crate::registers::DEFAULT_ADDRESS;

/// Sensor configuration, applied once by [`Vcnl4020::new()`](crate::Vcnl4020::new).
///
/// # Examples
///
/// ```
/// use vcnl4020::{AmbientRate, Config};
///
/// let mut config = Config::default();
/// config.ambient_rate = AmbientRate::_2;
/// ```
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address of the sensor.
    pub address: u8,
    /// Rate of proximity measurements in self-timed mode.
    pub proximity_rate: ProximityRate,
    /// IR LED current used for proximity measurements.
    pub led_current: LedCurrent,
    /// Rate of ambient light measurements in self-timed mode.
    pub ambient_rate: AmbientRate,
    /// Number of conversions averaged into one ambient light result.
    pub ambient_averaging: Averaging,
    /// Automatic offset compensation of ambient light measurements.
    pub auto_offset_compensation: bool,
    /// Continuous conversion mode of ambient light measurements.
    pub continuous_conversion: bool,
    /// Modulation frequency of the IR LED for proximity measurements.
    pub proximity_frequency: ProximityFrequency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            proximity_rate: ProximityRate::_250,
            led_current: LedCurrent::MAX,
            ambient_rate: AmbientRate::_10,
            ambient_averaging: Averaging::_1,
            auto_offset_compensation: true,
            continuous_conversion: false,
            proximity_frequency: ProximityFrequency::_390_625k,
        }
    }
}

/// Proximity measurements per second in self-timed mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ProximityRate {
    /// 1.95 measurements/s.
    _1_95 = 0,
    /// 3.90625 measurements/s.
    _3_9 = 1,
    /// 7.8125 measurements/s.
    _7_8 = 2,
    /// 16.625 measurements/s.
    _16_6 = 3,
    /// 31.25 measurements/s.
    _31_2 = 4,
    /// 62.5 measurements/s.
    _62_5 = 5,
    /// 125 measurements/s.
    _125 = 6,
    /// 250 measurements/s.
    _250 = 7,
}

impl ProximityRate {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::_1_95,
            1 => Self::_3_9,
            2 => Self::_7_8,
            3 => Self::_16_6,
            4 => Self::_31_2,
            5 => Self::_62_5,
            6 => Self::_125,
            _ => Self::_250,
        }
    }
}

/// Ambient light measurements per second in self-timed mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AmbientRate {
    /// 1 sample/s.
    _1 = 0,
    /// 2 samples/s.
    _2 = 1,
    /// 3 samples/s.
    _3 = 2,
    /// 4 samples/s.
    _4 = 3,
    /// 5 samples/s.
    _5 = 4,
    /// 6 samples/s.
    _6 = 5,
    /// 8 samples/s.
    _8 = 6,
    /// 10 samples/s.
    _10 = 7,
}

impl AmbientRate {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::_1,
            1 => Self::_2,
            2 => Self::_3,
            3 => Self::_4,
            4 => Self::_5,
            5 => Self::_6,
            6 => Self::_8,
            _ => Self::_10,
        }
    }

    /// Returns the number of samples per second.
    #[must_use]
    pub const fn samples_per_second(self) -> u8 {
        match self {
            Self::_1 => 1,
            Self::_2 => 2,
            Self::_3 => 3,
            Self::_4 => 4,
            Self::_5 => 5,
            Self::_6 => 6,
            Self::_8 => 8,
            Self::_10 => 10,
        }
    }
}

/// Number of conversions averaged into one ambient light result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Averaging {
    /// 1 conversion.
    _1 = 0,
    /// 2 conversions.
    _2 = 1,
    /// 4 conversions.
    _4 = 2,
    /// 8 conversions.
    _8 = 3,
    /// 16 conversions.
    _16 = 4,
    /// 32 conversions.
    _32 = 5,
    /// 64 conversions.
    _64 = 6,
    /// 128 conversions.
    _128 = 7,
}

impl Averaging {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::_1,
            1 => Self::_2,
            2 => Self::_4,
            3 => Self::_8,
            4 => Self::_16,
            5 => Self::_32,
            6 => Self::_64,
            _ => Self::_128,
        }
    }

    /// Returns the number of averaged conversions.
    #[must_use]
    pub const fn samples(self) -> u8 {
        1 << (self as u8)
    }
}

/// Number of consecutive measurements beyond a threshold needed to trigger the threshold
/// interrupt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptCount {
    /// 1 measurement.
    _1 = 0,
    /// 2 measurements.
    _2 = 1,
    /// 4 measurements.
    _4 = 2,
    /// 8 measurements.
    _8 = 3,
    /// 16 measurements.
    _16 = 4,
    /// 32 measurements.
    _32 = 5,
    /// 64 measurements.
    _64 = 6,
    /// 128 measurements.
    _128 = 7,
}

impl InterruptCount {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::_1,
            1 => Self::_2,
            2 => Self::_4,
            3 => Self::_8,
            4 => Self::_16,
            5 => Self::_32,
            6 => Self::_64,
            _ => Self::_128,
        }
    }
}

/// Modulation frequency of the IR LED in proximity mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ProximityFrequency {
    /// 390.625 kHz.
    _390_625k = 0,
    /// 781.25 kHz.
    _781_25k = 1,
    /// 1.5625 MHz.
    _1_5625M = 2,
    /// 3.125 MHz.
    _3_125M = 3,
}

impl ProximityFrequency {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::_390_625k,
            1 => Self::_781_25k,
            2 => Self::_1_5625M,
            _ => Self::_3_125M,
        }
    }

    /// Returns the modulation frequency.
    #[must_use]
    pub const fn frequency(self) -> Hertz {
        match self {
            Self::_390_625k => Hertz::Hz(390_625),
            Self::_781_25k => Hertz::Hz(781_250),
            Self::_1_5625M => Hertz::Hz(1_562_500),
            Self::_3_125M => Hertz::Hz(3_125_000),
        }
    }
}

/// IR LED current for proximity measurements.
///
/// The hardware supports 0 to 200 mA in 10 mA steps.
// Do not implement From<u8>, the milliampere value must go through the clamping constructor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedCurrent(u8);

impl LedCurrent {
    /// Highest supported LED current: 200 mA.
    pub const MAX: Self = Self(20);

    /// Creates an LED current from a value in milliamperes.
    ///
    /// The value is rounded down to a multiple of 10 mA and clamped to 200 mA.
    #[must_use]
    pub const fn from_milliamps(ma: u8) -> Self {
        let steps = ma / 10;
        if steps > Self::MAX.0 {
            Self::MAX
        } else {
            Self(steps)
        }
    }

    /// Returns the current in milliamperes.
    #[must_use]
    pub const fn milliamps(self) -> u8 {
        self.0 * 10
    }

    pub(crate) const fn bits(self) -> u8 {
        self.0
    }

    pub(crate) const fn from_bits(bits: u8) -> Option<Self> {
        if bits > Self::MAX.0 {
            None
        } else {
            Some(Self(bits))
        }
    }
}

/// Interrupt sources enabled in the interrupt control register.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    /// Interrupt when the proximity result falls below the low threshold.
    pub low_threshold: bool,
    /// Interrupt when the proximity result exceeds the high threshold.
    pub high_threshold: bool,
    /// Interrupt when an ambient light result is ready.
    pub lux_ready: bool,
    /// Interrupt when a proximity result is ready.
    pub proximity_ready: bool,
}

impl InterruptConfig {
    pub(crate) fn bits(self) -> u8 {
        u8::from(self.low_threshold)
            | u8::from(self.high_threshold) << 1
            | u8::from(self.lux_ready) << 2
            | u8::from(self.proximity_ready) << 3
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        Self {
            low_threshold: bits & 0b0001 != 0,
            high_threshold: bits & 0b0010 != 0,
            lux_ready: bits & 0b0100 != 0,
            proximity_ready: bits & 0b1000 != 0,
        }
    }
}

/// Pending interrupts, as reported by the interrupt status register.
///
/// The threshold flags are swapped relative to [`InterruptConfig`]: bit 0 reports the high
/// threshold, bit 1 the low threshold.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// The proximity result exceeded the high threshold.
    pub high_threshold: bool,
    /// The proximity result fell below the low threshold.
    pub low_threshold: bool,
    /// An ambient light result is ready.
    pub lux_ready: bool,
    /// A proximity result is ready.
    pub proximity_ready: bool,
}

impl InterruptStatus {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        Self {
            high_threshold: bits & 0b0001 != 0,
            low_threshold: bits & 0b0010 != 0,
            lux_ready: bits & 0b0100 != 0,
            proximity_ready: bits & 0b1000 != 0,
        }
    }

    /// Whether any interrupt is pending.
    #[must_use]
    pub const fn any(self) -> bool {
        self.high_threshold || self.low_threshold || self.lux_ready || self.proximity_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_current() {
        assert_eq!(LedCurrent::from_milliamps(200).milliamps(), 200);
        assert_eq!(LedCurrent::from_milliamps(255), LedCurrent::MAX);
        assert_eq!(LedCurrent::from_milliamps(125).milliamps(), 120);
        assert_eq!(LedCurrent::from_milliamps(5).milliamps(), 0);
        assert_eq!(LedCurrent::from_bits(21), None);
        assert_eq!(LedCurrent::from_bits(20), Some(LedCurrent::MAX));
    }

    #[test]
    fn test_enum_bits() {
        for bits in 0..8 {
            assert_eq!(ProximityRate::from_bits(bits) as u8, bits);
            assert_eq!(AmbientRate::from_bits(bits) as u8, bits);
            assert_eq!(Averaging::from_bits(bits) as u8, bits);
            assert_eq!(InterruptCount::from_bits(bits) as u8, bits);
        }
        for bits in 0..4 {
            assert_eq!(ProximityFrequency::from_bits(bits) as u8, bits);
        }
        assert_eq!(Averaging::_128.samples(), 128);
        assert_eq!(AmbientRate::_8.samples_per_second(), 8);
        assert_eq!(ProximityFrequency::_781_25k.frequency(), Hertz::Hz(781_250));
    }

    #[test]
    fn test_interrupt_config_bits() {
        let config = InterruptConfig {
            high_threshold: true,
            proximity_ready: true,
            ..Default::default()
        };
        assert_eq!(config.bits(), 0b1010);
        assert_eq!(InterruptConfig::from_bits(0b1010), config);
    }

    #[test]
    fn test_interrupt_status_bits() {
        let status = InterruptStatus::from_bits(0b0001);
        assert!(status.high_threshold);
        assert!(!status.low_threshold);

        let status = InterruptStatus::from_bits(0b0110);
        assert!(!status.high_threshold);
        assert!(status.low_threshold);
        assert!(status.lux_ready);
        assert!(!status.proximity_ready);

        assert!(!InterruptStatus::from_bits(0).any());
        assert!(InterruptStatus::from_bits(0b1000).any());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.address, 0x13);
        assert_eq!(config.led_current.milliamps(), 200);
        assert_eq!(config.proximity_rate, ProximityRate::_250);
        assert_eq!(config.ambient_rate, AmbientRate::_10);
    }
}
