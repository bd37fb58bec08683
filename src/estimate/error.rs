//! Estimation error types

use thiserror::Error;

use crate::data::InputError;

/// Errors that can occur while estimating an EtG curve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// The reported sessions or profile are unusable
    #[error(transparent)]
    Input(#[from] InputError),

    /// A model constant or option is out of range
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },

    /// The threshold crossing could not be located
    #[error("Curve inversion failed: {reason}")]
    Inversion { reason: String },

    /// A computed instant is outside the representable calendar range
    #[error("Time out of range: {what}")]
    TimeOutOfRange { what: String },
}

impl EstimateError {
    pub(crate) fn invalid(param: &str, value: f64) -> Self {
        EstimateError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
        }
    }
}
