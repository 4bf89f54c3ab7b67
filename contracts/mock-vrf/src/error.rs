use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("UnknownRequest: {request_id}")]
    UnknownRequest { request_id: u64 },
}
