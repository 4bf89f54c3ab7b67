use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::HexBinary;

use crate::state::PendingRequest;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Coordinator interface; serde-compatible with
    /// `vrf_oracle::VrfExecuteMsg::RequestRandomness`. The oracle parameters
    /// are accepted and ignored.
    RequestRandomness {
        key_hash: HexBinary,
        subscription_id: u64,
        request_confirmations: u32,
        callback_gas_limit: u64,
        num_words: u32,
    },
    /// Test-driver entry: deliver `request_id` to its consumer. Words default
    /// to a deterministic derivation from the request id. No length or
    /// replay checks here; the consumer is expected to defend itself.
    Fulfill {
        request_id: u64,
        words: Option<Vec<HexBinary>>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Number of requests assigned so far; 0 before the first request.
    #[returns(u64)]
    RequestCount {},
    #[returns(Option<PendingRequest>)]
    Request { request_id: u64 },
}
