use cosmwasm_std::StdError;
use cw_controllers::AdminError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Base(#[from] cw721_base::ContractError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("MintingPaused")]
    MintingPaused {},

    #[error("ZeroMintAmount")]
    ZeroMintAmount {},

    #[error("CapExceeded")]
    CapExceeded {},

    #[error("OverPerAddressLimit")]
    OverPerAddressLimit {},

    #[error("Incorrect payment, got: {got}, expected {expected}")]
    IncorrectPayment { got: u128, expected: u128 },

    #[error("OutsideWhitelistWindow")]
    OutsideWhitelistWindow {},

    #[error("InvalidProof")]
    InvalidProof {},

    #[error("InvalidMerkleRoot")]
    InvalidMerkleRoot {},

    #[error("InvalidWhitelistWindow")]
    InvalidWindow {},

    #[error("EmptyRevealBatch")]
    EmptyRevealBatch {},

    #[error("InvalidRevealTarget: token {token_id}")]
    InvalidRevealTarget { token_id: u64 },

    #[error("UnknownRequest: {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("MalformedFulfillment: expected {expected} words, got {got}")]
    MalformedFulfillment { expected: usize, got: usize },

    #[error("RequestIdReused: {request_id}")]
    RequestIdReused { request_id: u64 },

    #[error("Coordinator response missing request id")]
    MissingRequestId {},

    #[error("Invalid reply ID: {id}")]
    InvalidReplyId { id: u64 },
}
