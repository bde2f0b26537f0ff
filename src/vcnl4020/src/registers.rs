//! Register map of the VCNL4020.
//!
//! All addresses and bit layouts are fixed by the datasheet.

/// Default 7-bit I2C address of the VCNL4020.
///
/// The address is fixed in silicon and cannot be changed on this part.
pub const DEFAULT_ADDRESS: u8 = 0x13;

/// Value of the product ID register for the supported part (product ID 2, revision 1).
pub const EXPECTED_PRODUCT_ID: u8 = 0x21;

/// How a register may be accessed from the bus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Read-only.
    ReadOnly,
    /// Readable and writable.
    ReadWrite,
}

/// A register of the VCNL4020.
///
/// 16-bit registers are stored big-endian: the high byte lives at [`Register::addr()`], the low
/// byte at the following address. The device auto-increments the register pointer, so both bytes
/// can be read in a single transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Command register: enable bits, on-demand triggers and data-ready flags.
    Command,
    /// Product ID and revision.
    ProductId,
    /// Rate of proximity measurements in self-timed mode.
    ProximityRate,
    /// IR LED current for proximity mode.
    IrLedCurrent,
    /// Ambient light parameters: rate, averaging, offset compensation and continuous conversion.
    AmbientParameter,
    /// Ambient light measurement result.
    AmbientResult,
    /// Proximity measurement result.
    ProximityResult,
    /// Interrupt control.
    InterruptControl,
    /// Low threshold for the proximity interrupt.
    LowThreshold,
    /// High threshold for the proximity interrupt.
    HighThreshold,
    /// Interrupt status; bits are cleared by writing ones.
    InterruptStatus,
    /// Proximity modulator timing adjustment.
    ProximityAdjust,
}

impl Register {
    /// All registers, ordered by address.
    pub const ALL: [Register; 12] = [
        Register::Command,
        Register::ProductId,
        Register::ProximityRate,
        Register::IrLedCurrent,
        Register::AmbientParameter,
        Register::AmbientResult,
        Register::ProximityResult,
        Register::InterruptControl,
        Register::LowThreshold,
        Register::HighThreshold,
        Register::InterruptStatus,
        Register::ProximityAdjust,
    ];

    /// Returns the address of the register (of its high byte for 16-bit registers).
    #[must_use]
    pub const fn addr(self) -> u8 {
        match self {
            Self::Command => 0x80,
            Self::ProductId => 0x81,
            Self::ProximityRate => 0x82,
            Self::IrLedCurrent => 0x83,
            Self::AmbientParameter => 0x84,
            Self::AmbientResult => 0x85,
            Self::ProximityResult => 0x87,
            Self::InterruptControl => 0x89,
            Self::LowThreshold => 0x8a,
            Self::HighThreshold => 0x8c,
            Self::InterruptStatus => 0x8e,
            Self::ProximityAdjust => 0x8f,
        }
    }

    /// Returns the width of the register in bits.
    #[must_use]
    pub const fn width(self) -> u8 {
        match self {
            Self::AmbientResult
            | Self::ProximityResult
            | Self::LowThreshold
            | Self::HighThreshold => 16,
            _ => 8,
        }
    }

    /// Returns how the register may be accessed.
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::ProductId | Self::AmbientResult | Self::ProximityResult => Access::ReadOnly,
            _ => Access::ReadWrite,
        }
    }
}

/// Describes a bit-field inside an 8-bit register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    /// Register containing the field.
    pub register: Register,
    /// Position of the least significant bit of the field.
    pub shift: u8,
    /// Number of bits of the field.
    pub width: u8,
}

impl Field {
    const fn new(register: Register, shift: u8, width: u8) -> Self {
        Self { register, shift, width }
    }

    /// Returns the mask of the field, already shifted into place.
    #[must_use]
    pub const fn mask(self) -> u8 {
        (u8::MAX >> (8 - self.width)) << self.shift
    }

    /// Extracts the field from a register value.
    #[must_use]
    pub const fn extract(self, reg: u8) -> u8 {
        (reg & self.mask()) >> self.shift
    }

    /// Replaces the field inside `reg` with `value`, leaving other bits untouched.
    ///
    /// Bits of `value` not fitting into the field are discarded.
    #[must_use]
    pub const fn insert(self, reg: u8, value: u8) -> u8 {
        (reg & !self.mask()) | ((value << self.shift) & self.mask())
    }
}

pub(crate) mod command {
    use super::{Field, Register};

    pub const SELFTIMED_EN: Field = Field::new(Register::Command, 0, 1);
    pub const PROX_EN: Field = Field::new(Register::Command, 1, 1);
    pub const ALS_EN: Field = Field::new(Register::Command, 2, 1);
    pub const PROX_OD: Field = Field::new(Register::Command, 3, 1);
    pub const ALS_OD: Field = Field::new(Register::Command, 4, 1);

    /// Enable bits written at initialization.
    pub const ENABLE_ALL: u8 = SELFTIMED_EN.mask() | PROX_EN.mask() | ALS_EN.mask();
}

pub(crate) mod product_id {
    use super::{Field, Register};

    pub const REVISION: Field = Field::new(Register::ProductId, 0, 4);
    pub const PRODUCT: Field = Field::new(Register::ProductId, 4, 4);
}

pub(crate) const PROXIMITY_RATE: Field = Field::new(Register::ProximityRate, 0, 3);

pub(crate) const LED_CURRENT: Field = Field::new(Register::IrLedCurrent, 0, 6);

pub(crate) mod ambient {
    use super::{Field, Register};

    pub const AVERAGING: Field = Field::new(Register::AmbientParameter, 0, 3);
    pub const AUTO_OFFSET: Field = Field::new(Register::AmbientParameter, 3, 1);
    pub const RATE: Field = Field::new(Register::AmbientParameter, 4, 3);
    pub const CONTINUOUS: Field = Field::new(Register::AmbientParameter, 7, 1);
}

pub(crate) mod interrupt {
    use super::{Field, Register};

    pub const ENABLES: Field = Field::new(Register::InterruptControl, 0, 4);
    pub const COUNT: Field = Field::new(Register::InterruptControl, 5, 3);

    pub const STATUS: Field = Field::new(Register::InterruptStatus, 0, 4);
}

pub(crate) const PROXIMITY_FREQUENCY: Field = Field::new(Register::ProximityAdjust, 3, 2);

/// Flags of the command register.
///
/// Obtained from [`Vcnl4020::command()`](crate::Vcnl4020::command).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandState(u8);

impl CommandState {
    const PROX_DATA_RDY: u8 = 1 << 5;
    const ALS_DATA_RDY: u8 = 1 << 6;
    const CONFIG_LOCK: u8 = 1 << 7;

    /// Creates the state from a raw command register value.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw command register value.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether self-timed (periodic) measurements are enabled.
    #[must_use]
    pub const fn selftimed_enabled(self) -> bool {
        command::SELFTIMED_EN.extract(self.0) != 0
    }

    /// Whether periodic proximity measurements are enabled.
    #[must_use]
    pub const fn proximity_enabled(self) -> bool {
        command::PROX_EN.extract(self.0) != 0
    }

    /// Whether periodic ambient light measurements are enabled.
    #[must_use]
    pub const fn lux_enabled(self) -> bool {
        command::ALS_EN.extract(self.0) != 0
    }

    /// Whether an on-demand proximity measurement is in progress.
    #[must_use]
    pub const fn proximity_on_demand(self) -> bool {
        command::PROX_OD.extract(self.0) != 0
    }

    /// Whether an on-demand ambient light measurement is in progress.
    #[must_use]
    pub const fn lux_on_demand(self) -> bool {
        command::ALS_OD.extract(self.0) != 0
    }

    /// Whether new proximity data is available.
    #[must_use]
    pub const fn proximity_ready(self) -> bool {
        self.0 & Self::PROX_DATA_RDY != 0
    }

    /// Whether new ambient light data is available.
    #[must_use]
    pub const fn lux_ready(self) -> bool {
        self.0 & Self::ALS_DATA_RDY != 0
    }

    /// Whether the configuration is locked (always set by the hardware).
    #[must_use]
    pub const fn config_locked(self) -> bool {
        self.0 & Self::CONFIG_LOCK != 0
    }
}

/// Content of the product ID register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProductId {
    /// Product ID (upper nibble).
    pub product: u8,
    /// Revision ID (lower nibble).
    pub revision: u8,
}

impl From<u8> for ProductId {
    fn from(reg: u8) -> Self {
        Self {
            product: product_id::PRODUCT.extract(reg),
            revision: product_id::REVISION.extract(reg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_map() {
        let mut prev = None;
        for reg in Register::ALL {
            if let Some(prev) = prev {
                assert!(reg.addr() > prev);
            }
            prev = Some(reg.addr());
        }

        assert_eq!(Register::ProximityResult.addr(), 0x87);
        assert_eq!(Register::ProximityResult.width(), 16);
        assert_eq!(Register::ProductId.access(), Access::ReadOnly);
        assert_eq!(Register::Command.access(), Access::ReadWrite);
    }

    #[test]
    fn test_field_insert_extract() {
        assert_eq!(ambient::RATE.mask(), 0b0111_0000);
        assert_eq!(ambient::RATE.insert(0b1000_1101, 0b101), 0b1101_1101);
        assert_eq!(ambient::RATE.extract(0b1101_1101), 0b101);
        // Out-of-range bits are dropped.
        assert_eq!(PROXIMITY_RATE.insert(0, 0xff), 0b0000_0111);
        assert_eq!(command::ENABLE_ALL, 0b0000_0111);
    }

    #[test]
    fn test_command_state() {
        let state = CommandState::from_bits(0b1110_0111);
        assert!(state.selftimed_enabled());
        assert!(state.proximity_enabled());
        assert!(state.lux_enabled());
        assert!(!state.proximity_on_demand());
        assert!(!state.lux_on_demand());
        assert!(state.proximity_ready());
        assert!(state.lux_ready());
        assert!(state.config_locked());
    }

    #[test]
    fn test_product_id() {
        let id = ProductId::from(EXPECTED_PRODUCT_ID);
        assert_eq!(id.product, 2);
        assert_eq!(id.revision, 1);
    }
}
