pub use crate::error::ContractError;

pub mod contract;
mod error;
pub mod msg;
pub mod state;
