#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod backfill;
mod catalog;
mod error;
mod name;
mod profile;
mod service;
mod session;
mod timer;
mod training;
mod validation;
mod workout;

pub use backfill::*;
pub use catalog::*;
pub use error::*;
pub use name::*;
pub use profile::*;
pub use service::*;
pub use session::*;
pub use timer::*;
pub use training::*;
pub use validation::*;
pub use workout::*;

/// Small string values persisted on the device.
pub trait KeyValueRepository {
    fn read_value(&self, key: &str) -> Result<Option<String>, ReadError>;
    fn write_value(&self, key: &str, value: &str) -> Result<(), WriteError>;
    fn delete_value(&self, key: &str) -> Result<(), WriteError>;
}
