pub mod average;
pub mod calculator;
pub mod comparator;
pub mod input;
pub mod message;
pub mod reporter;

pub use crate::domain::model::{Category, ConsumptionInput, EmissionFactors, RawForm};
pub use crate::domain::ports::{ConfigProvider, Publisher};
pub use crate::utils::error::Result;
