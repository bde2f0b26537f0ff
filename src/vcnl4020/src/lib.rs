//! Driver for the Vishay VCNL4020 proximity and ambient light sensor, using the
//! [`embedded-hal`](https://docs.rs/embedded-hal) I2C traits.
//!
//! The driver enables self-timed measurements of both channels when it is created, so results
//! can be read at any time afterwards without triggering conversions.
//!
//! # Examples
//!
//! ```
//! # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! # let expectations = [
//! #     I2cTransaction::write_read(0x13, vec![0x81], vec![0x21]),
//! #     I2cTransaction::write(0x13, vec![0x80, 0x00]),
//! #     I2cTransaction::write_read(0x13, vec![0x82], vec![0x00]),
//! #     I2cTransaction::write(0x13, vec![0x82, 0x07]),
//! #     I2cTransaction::write_read(0x13, vec![0x83], vec![0x02]),
//! #     I2cTransaction::write(0x13, vec![0x83, 0x14]),
//! #     I2cTransaction::write_read(0x13, vec![0x84], vec![0x1d]),
//! #     I2cTransaction::write(0x13, vec![0x84, 0x78]),
//! #     I2cTransaction::write_read(0x13, vec![0x8f], vec![0x01]),
//! #     I2cTransaction::write(0x13, vec![0x8f, 0x01]),
//! #     I2cTransaction::write(0x13, vec![0x80, 0x07]),
//! #     I2cTransaction::write_read(0x13, vec![0x87], vec![0x01, 0x2c]),
//! #     I2cTransaction::write_read(0x13, vec![0x85], vec![0x00, 0x64]),
//! # ];
//! # let mut i2c = I2cMock::new(&expectations);
//! use vcnl4020::{Config, Vcnl4020};
//!
//! let mut sensor = Vcnl4020::new(&mut i2c, &Config::default()).unwrap();
//!
//! assert_eq!(sensor.proximity().unwrap(), 300);
//! assert_eq!(sensor.lux().unwrap(), 25.0);
//! # drop(sensor);
//! # i2c.done();
//! ```
//!
//! # Cargo features
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]
#![deny(clippy::pedantic)]
#![deny(missing_docs)]

mod accessor;
pub mod config;
mod driver;
mod error;
mod log;
pub mod reading;
pub mod registers;

pub use config::{
    AmbientRate, Averaging, Config, InterruptConfig, InterruptCount, InterruptStatus, LedCurrent,
    ProximityFrequency, ProximityRate,
};
pub use driver::{DriverState, Vcnl4020};
pub use error::Error;
pub use reading::{Measurement, Reading};
pub use registers::{CommandState, ProductId, DEFAULT_ADDRESS};
