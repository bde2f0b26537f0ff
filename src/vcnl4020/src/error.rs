use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// An error returned by the driver.
///
/// `E` is the error type of the underlying I2C bus.
// NOTE(eq): not deriving `Eq` so that bus error types only implementing `PartialEq` are usable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// No device acknowledged the configured address during initialization.
    DeviceNotFound,
    /// A device answered, but its product ID register does not identify a VCNL4020.
    ///
    /// Contains the product ID register value that was read.
    UnsupportedDevice(u8),
    /// A bus transaction failed.
    ///
    /// The driver is left usable; the next call may succeed.
    Communication(E),
    /// A register held a value that does not correspond to any documented setting.
    InvalidValue(u8),
}

impl<E> Error<E> {
    /// Returns whether retrying the failed operation later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Communication(_))
    }
}

impl<E: embedded_hal::i2c::Error> Error<E> {
    /// Classifies the failure of the first transaction sent to the device.
    ///
    /// A missing acknowledgement of the address (or of an unknown part of the transaction) means
    /// nothing is listening at that address.
    pub(crate) fn from_probe(err: E) -> Self {
        match err.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address | NoAcknowledgeSource::Unknown) => {
                Self::DeviceNotFound
            }
            _ => Self::Communication(err),
        }
    }

    /// Returns the [`ErrorKind`] of the underlying bus error, if any.
    #[must_use]
    pub fn bus_error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Communication(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DeviceNotFound => write!(f, "no device acknowledged the I2C address"),
            Self::UnsupportedDevice(id) => write!(f, "unsupported product ID {id:#04x}"),
            Self::Communication(err) => write!(f, "I2C communication error: {err:?}"),
            Self::InvalidValue(value) => write!(f, "invalid register value {value:#04x}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_classification() {
        let err = Error::from_probe(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        assert_eq!(err, Error::DeviceNotFound);

        let err = Error::from_probe(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown));
        assert_eq!(err, Error::DeviceNotFound);

        let err = Error::from_probe(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
        assert_eq!(
            err,
            Error::Communication(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data))
        );

        let err = Error::from_probe(ErrorKind::ArbitrationLoss);
        assert!(err.is_transient());
        assert_eq!(err.bus_error_kind(), Some(ErrorKind::ArbitrationLoss));
    }

    #[test]
    fn test_display() {
        let err: Error<ErrorKind> = Error::UnsupportedDevice(0x42);
        assert_eq!(err.to_string(), "unsupported product ID 0x42");
        assert!(!err.is_transient());
    }
}
