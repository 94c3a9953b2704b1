//! Unified error type for menukit.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Nothing here is fatal: capacity and storage failures are normal
//! results the caller is expected to absorb.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The menu already holds its maximum number of items.
    MenuFull,

    /// The menu stack is at its maximum nesting depth.
    StackFull,

    /// The settings resource could not be opened, read, or written.
    Storage,

    /// The persisted settings document could not be decoded.
    Codec,
}
