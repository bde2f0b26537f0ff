//! Typed register access over an I2C bus.

use embedded_hal::i2c::I2c;

use crate::{
    log::trace,
    registers::{Field, Register},
};

/// Reads and writes registers of a device at a fixed 7-bit address.
///
/// Writes send the register address followed by the data bytes. Reads write the register address
/// and read the data back in the same transaction (repeated start).
#[derive(Debug)]
pub(crate) struct RegisterAccessor<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> RegisterAccessor<I2C> {
    pub(crate) fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub(crate) fn address(&self) -> u8 {
        self.address
    }

    #[must_use]
    pub(crate) fn release(self) -> I2C {
        self.i2c
    }

    pub(crate) fn read_u8(&mut self, reg: Register) -> Result<u8, I2C::Error> {
        debug_assert_eq!(reg.width(), 8);

        let mut buf = [0u8];
        self.i2c.write_read(self.address, &[reg.addr()], &mut buf)?;
        let [value] = buf;
        Ok(value)
    }

    /// Reads a 16-bit register, high byte first.
    pub(crate) fn read_u16(&mut self, reg: Register) -> Result<u16, I2C::Error> {
        debug_assert_eq!(reg.width(), 16);

        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[reg.addr()], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    pub(crate) fn write_u8(&mut self, reg: Register, value: u8) -> Result<(), I2C::Error> {
        debug_assert_eq!(reg.width(), 8);

        trace!("write {:#x} <- {:#x}", reg.addr(), value);
        self.i2c.write(self.address, &[reg.addr(), value])
    }

    /// Writes a 16-bit register, high byte first.
    pub(crate) fn write_u16(&mut self, reg: Register, value: u16) -> Result<(), I2C::Error> {
        debug_assert_eq!(reg.width(), 16);

        let [high, low] = value.to_be_bytes();
        trace!("write {:#x} <- {:#x}", reg.addr(), value);
        self.i2c.write(self.address, &[reg.addr(), high, low])
    }

    pub(crate) fn read_field(&mut self, field: Field) -> Result<u8, I2C::Error> {
        let reg = self.read_u8(field.register)?;
        Ok(field.extract(reg))
    }

    /// Read-modify-write of a bit-field; the other bits of the register are preserved.
    pub(crate) fn write_field(&mut self, field: Field, value: u8) -> Result<(), I2C::Error> {
        let reg = self.read_u8(field.register)?;
        self.write_u8(field.register, field.insert(reg, value))
    }

    pub(crate) fn read_flag(&mut self, field: Field) -> Result<bool, I2C::Error> {
        debug_assert_eq!(field.width, 1);

        Ok(self.read_field(field)? != 0)
    }

    pub(crate) fn write_flag(&mut self, field: Field, enabled: bool) -> Result<(), I2C::Error> {
        debug_assert_eq!(field.width, 1);

        self.write_field(field, u8::from(enabled))
    }
}
