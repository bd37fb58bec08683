use thiserror::Error;

use crate::data::parser::ParseError;
use crate::data::InputError;
use crate::estimate::EstimateError;

#[derive(Error, Debug)]
pub enum EtgError {
    #[error("Invalid input: {0}")]
    InputError(#[from] InputError),
    #[error("Error reading data: {0}")]
    ParseError(#[from] ParseError),
    #[error("Estimation failed: {0}")]
    EstimateError(#[from] EstimateError),
}
