pub mod builder;
pub mod drink;
pub mod input_error;
pub mod parser;
pub mod profile;
pub mod structs;
pub mod time;

pub use drink::*;
pub use input_error::InputError;
pub use profile::*;
pub use structs::{Cohort, Drinker, NormalizedSessions, Scenario, DEFAULT_THRESHOLD};
