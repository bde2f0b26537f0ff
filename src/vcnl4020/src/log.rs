//! Crate-internal logging facade.
//!
//! With the `defmt` feature the macros forward to [`defmt`](https://docs.rs/defmt), with the
//! `log` feature to the [`log`](https://docs.rs/log) facade. `defmt` wins if both are enabled.
//! Otherwise they expand to nothing, but still type-check their arguments.

// The declarative macros are required because the defmt macros need to see the literal format
// string.

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => {{
        ::defmt::trace!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => {{
        ::defmt::debug!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! info {
    ($($arg:tt)*) => {{
        ::defmt::info!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! warn_ {
    ($($arg:tt)*) => {{
        ::defmt::warn!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! error {
    ($($arg:tt)*) => {{
        ::defmt::error!($($arg)*);
    }};
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        ::log::trace!($($arg)*);
    }};
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        ::log::debug!($($arg)*);
    }};
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! info {
    ($($arg:tt)*) => {{
        ::log::info!($($arg)*);
    }};
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! warn_ {
    ($($arg:tt)*) => {{
        ::log::warn!($($arg)*);
    }};
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! error {
    ($($arg:tt)*) => {{
        ::log::error!($($arg)*);
    }};
}

/// No-op log macro.
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

/// No-op log macro.
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

/// No-op log macro.
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! info {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

/// No-op log macro.
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! warn_ {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

/// No-op log macro.
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! error {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

pub(crate) use {debug, error, info, trace};
// Re-exported under an alias: a bare `use warn` is ambiguous with the built-in `#[warn]` attribute.
pub(crate) use warn_ as warn;
