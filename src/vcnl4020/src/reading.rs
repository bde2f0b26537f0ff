//! Float-free representation of sensor readings.

/// Illuminance represented by one count of the ambient light result register, in lux.
pub const LUX_PER_COUNT: f32 = 0.25;

/// Converts a raw ambient light count to lux.
#[must_use]
pub fn count_to_lux(count: u16) -> f32 {
    f32::from(count) * LUX_PER_COUNT
}

/// Represents a value obtained from the sensor.
///
/// # Scaling
///
/// The [scaling value](ReadingAxis::scaling()) of the matching [`ReadingAxis`] must be taken into
/// account: the physical value is `Value::get() · 10^scaling`.
///
/// For instance, an ambient light [`Value`] of `2500` with a scaling of `-2` represents
/// 25.00 lx.
/// This avoids handling floats.
// NOTE(derive): we do not implement `Eq` or `PartialOrd` on purpose: interpreting the value
// requires the `ReadingAxis` associated with this `Value`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Value {
    value: i32,
}

impl Value {
    /// Creates a new value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self { value }
    }

    /// Returns the value.
    #[must_use]
    pub fn get(&self) -> i32 {
        self.value
    }
}

/// Represents a unit of measurement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum MeasurementUnit {
    /// Dimensionless ADC count.
    Count,
    /// Lux (lx).
    Lux,
}

impl core::fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Count => write!(f, ""),
            Self::Lux => write!(f, "lx"),
        }
    }
}

/// Label of a [`Value`] part of a [`Measurement`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Label {
    /// Reflected infrared, higher is closer.
    Proximity,
    /// Ambient light.
    Illuminance,
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Proximity => write!(f, "Proximity"),
            Self::Illuminance => write!(f, "Illuminance"),
        }
    }
}

/// Describes how to interpret a [`Value`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadingAxis {
    label: Label,
    scaling: i8,
    unit: MeasurementUnit,
}

impl ReadingAxis {
    const fn new(label: Label, scaling: i8, unit: MeasurementUnit) -> Self {
        Self {
            label,
            scaling,
            unit,
        }
    }

    /// Returns the label of the axis.
    #[must_use]
    pub fn label(&self) -> Label {
        self.label
    }

    /// Returns the power of ten the [`Value`] must be multiplied by.
    #[must_use]
    pub fn scaling(&self) -> i8 {
        self.scaling
    }

    /// Returns the unit of measurement.
    #[must_use]
    pub fn unit(&self) -> MeasurementUnit {
        self.unit
    }
}

/// Implemented on readings returned by the driver.
pub trait Reading: core::fmt::Debug {
    /// Returns the first value returned by [`Reading::values()`].
    fn value(&self) -> Value;

    /// Returns an iterator over [`Value`]s of a sensor reading.
    ///
    /// The order of [`Value`]s is not significant, but is fixed.
    fn values(&self) -> impl ExactSizeIterator<Item = Value> {
        [self.value()].into_iter()
    }
}

/// Both channels of the sensor, read back to back.
///
/// Returned by [`Vcnl4020::read()`](crate::Vcnl4020::read).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    proximity: u16,
    ambient: u16,
}

impl Measurement {
    /// Axes of the values returned by [`Reading::values()`], in the same order.
    pub const AXES: [ReadingAxis; 2] = [
        ReadingAxis::new(Label::Proximity, 0, MeasurementUnit::Count),
        ReadingAxis::new(Label::Illuminance, -2, MeasurementUnit::Lux),
    ];

    pub(crate) const fn new(proximity: u16, ambient: u16) -> Self {
        Self { proximity, ambient }
    }

    /// Returns the raw proximity count.
    #[must_use]
    pub fn proximity(&self) -> u16 {
        self.proximity
    }

    /// Returns the raw ambient light count.
    #[must_use]
    pub fn ambient_raw(&self) -> u16 {
        self.ambient
    }

    /// Returns the illuminance in lux.
    #[must_use]
    pub fn lux(&self) -> f32 {
        count_to_lux(self.ambient)
    }
}

impl Reading for Measurement {
    fn value(&self) -> Value {
        Value::new(i32::from(self.proximity))
    }

    fn values(&self) -> impl ExactSizeIterator<Item = Value> {
        // 0.25 lx/count is 25 centilux/count.
        [
            self.value(),
            Value::new(i32::from(self.ambient) * 25),
        ]
        .into_iter()
    }
}

#[cfg(test)]
#[expect(clippy::float_cmp, reason = "lux values are exact multiples of 0.25")]
mod tests {
    use super::*;

    #[test]
    fn test_count_to_lux() {
        assert_eq!(count_to_lux(100), 25.0);
        assert_eq!(count_to_lux(0), 0.0);
        assert_eq!(count_to_lux(u16::MAX), 16_383.75);
    }

    #[test]
    fn test_measurement_values() {
        let measurement = Measurement::new(300, 100);

        let mut values = measurement.values();
        assert_eq!(values.len(), Measurement::AXES.len());
        assert_eq!(values.next(), Some(Value::new(300)));
        assert_eq!(values.next(), Some(Value::new(2500)));
        assert_eq!(values.next(), None);

        let [proximity, illuminance] = Measurement::AXES;
        assert_eq!(proximity.label(), Label::Proximity);
        assert_eq!(illuminance.scaling(), -2);
        assert_eq!(illuminance.unit(), MeasurementUnit::Lux);
        assert_eq!(measurement.lux(), 25.0);
    }
}
