use embedded_hal::i2c::I2c;

use crate::{
    accessor::RegisterAccessor,
    config::{
        AmbientRate, Averaging, Config, InterruptConfig, InterruptCount, InterruptStatus,
        LedCurrent, ProximityFrequency, ProximityRate,
    },
    error::Error,
    log::{debug, error, info, warn},
    reading::{count_to_lux, Measurement},
    registers::{
        ambient, command, interrupt, CommandState, Field, ProductId, Register, EXPECTED_PRODUCT_ID,
        LED_CURRENT, PROXIMITY_FREQUENCY, PROXIMITY_RATE,
    },
};

/// Lifecycle state of the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// The sensor has not been configured yet.
    ///
    /// Only observable while [`Vcnl4020::new()`] is running.
    Uninitialized,
    /// Self-timed measurements are enabled.
    Running,
}

/// Driver for the VCNL4020 proximity and ambient light sensor.
///
/// The bus handle can be moved in and given back by [`Vcnl4020::release()`], or borrowed by
/// passing `&mut bus`.
///
/// Every method issues blocking bus transactions and returns as soon as they complete. Bus
/// failures are returned as [`Error::Communication`] without retrying.
#[derive(Debug)]
pub struct Vcnl4020<I2C> {
    regs: RegisterAccessor<I2C>,
}

impl<I2C: I2c> Vcnl4020<I2C> {
    /// Checks the product ID of the sensor, applies `config` and starts self-timed proximity and
    /// ambient light measurements.
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceNotFound`] if nothing acknowledges `config.address`.
    /// - [`Error::UnsupportedDevice`] if the device is not a VCNL4020.
    /// - [`Error::Communication`] if any other bus transaction fails.
    pub fn new(i2c: I2C, config: &Config) -> Result<Self, Error<I2C::Error>> {
        let mut regs = RegisterAccessor::new(i2c, config.address);

        debug!("probing VCNL4020 at {:#x}", config.address);
        let id = regs
            .read_u8(Register::ProductId)
            .map_err(Error::from_probe)?;
        if id != EXPECTED_PRODUCT_ID {
            error!("unexpected product ID {:#x}", id);
            return Err(Error::UnsupportedDevice(id));
        }

        let mut sensor = Self { regs };
        sensor.configure(config).map_err(Error::Communication)?;
        info!("VCNL4020 running at {:#x}", config.address);

        Ok(sensor)
    }

    fn configure(&mut self, config: &Config) -> Result<(), I2C::Error> {
        // Rates may only be changed while measurements are stopped.
        self.regs.write_u8(Register::Command, 0)?;

        self.regs
            .write_field(PROXIMITY_RATE, config.proximity_rate as u8)?;
        self.regs.write_field(LED_CURRENT, config.led_current.bits())?;

        let mut param = self.regs.read_u8(Register::AmbientParameter)?;
        param = ambient::AVERAGING.insert(param, config.ambient_averaging as u8);
        param = ambient::AUTO_OFFSET.insert(param, u8::from(config.auto_offset_compensation));
        param = ambient::RATE.insert(param, config.ambient_rate as u8);
        param = ambient::CONTINUOUS.insert(param, u8::from(config.continuous_conversion));
        self.regs.write_u8(Register::AmbientParameter, param)?;

        self.regs
            .write_field(PROXIMITY_FREQUENCY, config.proximity_frequency as u8)?;

        self.regs.write_u8(Register::Command, command::ENABLE_ALL)
    }

    /// Returns the lifecycle state; a constructed driver is always running.
    #[must_use]
    pub fn state(&self) -> DriverState {
        DriverState::Running
    }

    /// Returns the I2C address of the sensor.
    #[must_use]
    pub fn address(&self) -> u8 {
        self.regs.address()
    }

    /// Destroys the driver and returns the bus handle.
    ///
    /// Measurements keep running on the sensor.
    #[must_use]
    pub fn release(self) -> I2C {
        self.regs.release()
    }

    /// Returns the latest proximity result, as a raw count.
    ///
    /// Higher values generally mean a closer object. Two calls in quick succession may return the
    /// same result if the sensor has not completed a new measurement in the meantime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn proximity(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.regs
            .read_u16(Register::ProximityResult)
            .map_err(Error::Communication)
    }

    /// Returns the latest ambient light result, as a raw count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn ambient_raw(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.regs
            .read_u16(Register::AmbientResult)
            .map_err(Error::Communication)
    }

    /// Returns the latest ambient light result, in lux.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn lux(&mut self) -> Result<f32, Error<I2C::Error>> {
        self.ambient_raw().map(count_to_lux)
    }

    /// Returns the latest results of both channels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn read(&mut self) -> Result<Measurement, Error<I2C::Error>> {
        let proximity = self.proximity()?;
        let ambient = self.ambient_raw()?;

        Ok(Measurement::new(proximity, ambient))
    }

    /// Returns the product ID and revision of the sensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn product_revision(&mut self) -> Result<ProductId, Error<I2C::Error>> {
        self.read_u8(Register::ProductId).map(ProductId::from)
    }

    /// Returns the flags of the command register.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn command(&mut self) -> Result<CommandState, Error<I2C::Error>> {
        self.read_u8(Register::Command).map(CommandState::from_bits)
    }

    /// Returns whether new proximity data is available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn proximity_ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command().map(CommandState::proximity_ready)
    }

    /// Returns whether new ambient light data is available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn lux_ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command().map(CommandState::lux_ready)
    }

    /// Returns whether self-timed measurements are enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn selftimed_enabled(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command().map(CommandState::selftimed_enabled)
    }

    /// Enables or disables self-timed measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_selftimed_enabled(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        debug!("self-timed measurements enabled: {}", enabled);
        self.write_flag(command::SELFTIMED_EN, enabled)
    }

    /// Returns whether periodic proximity measurements are enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn proximity_enabled(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command().map(CommandState::proximity_enabled)
    }

    /// Enables or disables periodic proximity measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_proximity_enabled(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        debug!("proximity measurements enabled: {}", enabled);
        self.write_flag(command::PROX_EN, enabled)
    }

    /// Returns whether periodic ambient light measurements are enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn lux_enabled(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command().map(CommandState::lux_enabled)
    }

    /// Enables or disables periodic ambient light measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_lux_enabled(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        debug!("ambient light measurements enabled: {}", enabled);
        self.write_flag(command::ALS_EN, enabled)
    }

    /// Triggers (or cancels) a single proximity measurement.
    ///
    /// The sensor clears the bit once the measurement is done, see
    /// [`Vcnl4020::proximity_ready()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_proximity_on_demand(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write_flag(command::PROX_OD, enabled)
    }

    /// Triggers (or cancels) a single ambient light measurement.
    ///
    /// The sensor clears the bit once the measurement is done, see [`Vcnl4020::lux_ready()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_lux_on_demand(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write_flag(command::ALS_OD, enabled)
    }

    /// Returns the rate of proximity measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn proximity_rate(&mut self) -> Result<ProximityRate, Error<I2C::Error>> {
        self.read_field(PROXIMITY_RATE).map(ProximityRate::from_bits)
    }

    /// Sets the rate of proximity measurements.
    ///
    /// The sensor only accepts the new rate while self-timed proximity measurements are
    /// disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_proximity_rate(&mut self, rate: ProximityRate) -> Result<(), Error<I2C::Error>> {
        debug!("proximity rate: {}", rate as u8);
        self.write_field(PROXIMITY_RATE, rate as u8)
    }

    /// Returns the IR LED current.
    ///
    /// # Errors
    ///
    /// - [`Error::Communication`] if the bus transaction fails.
    /// - [`Error::InvalidValue`] if the register holds a current above 200 mA.
    pub fn led_current(&mut self) -> Result<LedCurrent, Error<I2C::Error>> {
        let bits = self.read_field(LED_CURRENT)?;
        LedCurrent::from_bits(bits).ok_or_else(|| {
            warn!("LED current register out of range: {:#x}", bits);
            Error::InvalidValue(bits)
        })
    }

    /// Sets the IR LED current.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_led_current(&mut self, current: LedCurrent) -> Result<(), Error<I2C::Error>> {
        debug!("LED current: {} mA", current.milliamps());
        self.write_field(LED_CURRENT, current.bits())
    }

    /// Returns the rate of ambient light measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn lux_rate(&mut self) -> Result<AmbientRate, Error<I2C::Error>> {
        self.read_field(ambient::RATE).map(AmbientRate::from_bits)
    }

    /// Sets the rate of ambient light measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_lux_rate(&mut self, rate: AmbientRate) -> Result<(), Error<I2C::Error>> {
        debug!("ambient light rate: {} samples/s", rate.samples_per_second());
        self.write_field(ambient::RATE, rate as u8)
    }

    /// Returns the number of conversions averaged into one ambient light result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn lux_averaging(&mut self) -> Result<Averaging, Error<I2C::Error>> {
        self.read_field(ambient::AVERAGING).map(Averaging::from_bits)
    }

    /// Sets the number of conversions averaged into one ambient light result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_lux_averaging(&mut self, averaging: Averaging) -> Result<(), Error<I2C::Error>> {
        debug!("ambient light averaging: {} samples", averaging.samples());
        self.write_field(ambient::AVERAGING, averaging as u8)
    }

    /// Returns whether automatic offset compensation of ambient light measurements is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn auto_offset_compensation(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.read_flag(ambient::AUTO_OFFSET)
    }

    /// Enables or disables automatic offset compensation of ambient light measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_auto_offset_compensation(
        &mut self,
        enabled: bool,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_flag(ambient::AUTO_OFFSET, enabled)
    }

    /// Returns whether continuous conversion of ambient light measurements is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn continuous_conversion(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.read_flag(ambient::CONTINUOUS)
    }

    /// Enables or disables continuous conversion of ambient light measurements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_continuous_conversion(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write_flag(ambient::CONTINUOUS, enabled)
    }

    /// Returns the modulation frequency of the IR LED.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn proximity_frequency(&mut self) -> Result<ProximityFrequency, Error<I2C::Error>> {
        self.read_field(PROXIMITY_FREQUENCY)
            .map(ProximityFrequency::from_bits)
    }

    /// Sets the modulation frequency of the IR LED.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_proximity_frequency(
        &mut self,
        frequency: ProximityFrequency,
    ) -> Result<(), Error<I2C::Error>> {
        debug!("proximity frequency: {} Hz", frequency.frequency().raw());
        self.write_field(PROXIMITY_FREQUENCY, frequency as u8)
    }

    /// Returns the low threshold of the proximity interrupt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn low_threshold(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.regs
            .read_u16(Register::LowThreshold)
            .map_err(Error::Communication)
    }

    /// Sets the low threshold of the proximity interrupt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn set_low_threshold(&mut self, threshold: u16) -> Result<(), Error<I2C::Error>> {
        self.regs
            .write_u16(Register::LowThreshold, threshold)
            .map_err(Error::Communication)
    }

    /// Returns the high threshold of the proximity interrupt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn high_threshold(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.regs
            .read_u16(Register::HighThreshold)
            .map_err(Error::Communication)
    }

    /// Sets the high threshold of the proximity interrupt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn set_high_threshold(&mut self, threshold: u16) -> Result<(), Error<I2C::Error>> {
        self.regs
            .write_u16(Register::HighThreshold, threshold)
            .map_err(Error::Communication)
    }

    /// Returns how many consecutive measurements beyond a threshold trigger the interrupt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn interrupt_count(&mut self) -> Result<InterruptCount, Error<I2C::Error>> {
        self.read_field(interrupt::COUNT)
            .map(InterruptCount::from_bits)
    }

    /// Sets how many consecutive measurements beyond a threshold trigger the interrupt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_interrupt_count(&mut self, count: InterruptCount) -> Result<(), Error<I2C::Error>> {
        self.write_field(interrupt::COUNT, count as u8)
    }

    /// Returns the enabled interrupt sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn interrupts(&mut self) -> Result<InterruptConfig, Error<I2C::Error>> {
        self.read_field(interrupt::ENABLES)
            .map(InterruptConfig::from_bits)
    }

    /// Selects the enabled interrupt sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if a bus transaction fails.
    pub fn set_interrupts(&mut self, interrupts: InterruptConfig) -> Result<(), Error<I2C::Error>> {
        debug!("interrupt enables: {:#x}", interrupts.bits());
        self.write_field(interrupt::ENABLES, interrupts.bits())
    }

    /// Returns the pending interrupts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn interrupt_status(&mut self) -> Result<InterruptStatus, Error<I2C::Error>> {
        self.read_field(interrupt::STATUS)
            .map(InterruptStatus::from_bits)
    }

    /// Clears all pending interrupts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the bus transaction fails.
    pub fn clear_interrupts(&mut self) -> Result<(), Error<I2C::Error>> {
        // Status bits are cleared by writing ones.
        self.regs
            .write_u8(Register::InterruptStatus, interrupt::STATUS.mask())
            .map_err(Error::Communication)
    }

    fn read_u8(&mut self, reg: Register) -> Result<u8, Error<I2C::Error>> {
        self.regs.read_u8(reg).map_err(Error::Communication)
    }

    fn read_field(&mut self, field: Field) -> Result<u8, Error<I2C::Error>> {
        self.regs.read_field(field).map_err(Error::Communication)
    }

    fn write_field(
        &mut self,
        field: Field,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.regs
            .write_field(field, value)
            .map_err(Error::Communication)
    }

    fn read_flag(&mut self, field: Field) -> Result<bool, Error<I2C::Error>> {
        self.regs.read_flag(field).map_err(Error::Communication)
    }

    fn write_flag(
        &mut self,
        field: Field,
        enabled: bool,
    ) -> Result<(), Error<I2C::Error>> {
        self.regs
            .write_flag(field, enabled)
            .map_err(Error::Communication)
    }
}
