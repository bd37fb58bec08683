//! Error types for drinking-session input
//!
//! [`InputError`] covers problems with the user-reported data itself: body
//! weight, ABV, durations and test thresholds. These are raised before any
//! estimation starts and can be propagated from
//! [`EstimateError`](crate::estimate::EstimateError) via its [`From`] impl.

use thiserror::Error;

/// Errors arising from drinking-session and profile input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Body weight is missing, zero, negative or not a number
    #[error("Invalid body weight: {value}")]
    InvalidWeight {
        /// The rejected weight, in the unit it was given
        value: f64,
    },

    /// A custom drink was reported without a usable ABV
    #[error("Session {session}: custom drinks need an ABV above 0%")]
    InvalidCustomAbv {
        /// Zero-based index of the session in the input order
        session: usize,
    },

    /// ABV above 100%
    #[error("Session {session}: ABV {abv}% is out of range")]
    AbvOutOfRange {
        /// Zero-based index of the session in the input order
        session: usize,
        /// The rejected ABV in percent
        abv: f64,
    },

    /// Drinking duration is negative or not a number
    #[error("Session {session}: invalid drinking duration {value}")]
    InvalidDuration {
        /// Zero-based index of the session in the input order
        session: usize,
        /// The rejected duration, in the unit it was given
        value: f64,
    },

    /// Test threshold is not a positive concentration
    #[error("Invalid test threshold: {value} ng/mL")]
    InvalidThreshold {
        /// The rejected threshold
        value: f64,
    },

    /// Every session was skipped or none were given
    #[error("At least one drinking session with a time and a positive amount is required")]
    NoValidSessions,
}
