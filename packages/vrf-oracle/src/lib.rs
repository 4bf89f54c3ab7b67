use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_binary, Addr, CosmosMsg, HexBinary, QuerierWrapper, QueryRequest, StdResult, WasmMsg,
    WasmQuery,
};

/// Event emitted by a coordinator when it assigns a request id. Consumers
/// read it back from the submessage reply (namespaced as `wasm-` + this).
pub const REQUEST_RANDOMNESS_EVENT: &str = "request_randomness";
pub const ATTR_REQUEST_ID: &str = "request_id";

/// Execute interface every coordinator implementation accepts.
#[cw_serde]
pub enum VrfExecuteMsg {
    /// Ask for `num_words` random words. The assigned request id comes back
    /// in the response data as [`RequestRandomnessResponse`] and as the
    /// `request_id` attribute of the `request_randomness` event. Delivery
    /// happens later, on an unrelated call path, by executing
    /// [`VrfReceiverExecuteMsg::FulfillRandomness`] on the requester.
    RequestRandomness {
        key_hash: HexBinary,
        subscription_id: u64,
        request_confirmations: u32,
        callback_gas_limit: u64,
        num_words: u32,
    },
}

/// Response-data payload of [`VrfExecuteMsg::RequestRandomness`].
#[cw_serde]
pub struct RequestRandomnessResponse {
    pub request_id: u64,
}

/// Message a coordinator executes on the requesting contract at delivery
/// time. Consumers embed a serde-compatible variant in their own
/// `ExecuteMsg` and gate it on the coordinator address.
#[cw_serde]
pub enum VrfReceiverExecuteMsg {
    FulfillRandomness {
        request_id: u64,
        randomness: Vec<HexBinary>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum VrfQueryMsg {
    /// Number of requests assigned so far; also the most recent request id.
    #[returns(u64)]
    RequestCount {},
}

/// VrfCoordinatorContract is a wrapper around Addr that provides helpers
/// for talking to a coordinator.
#[cw_serde]
pub struct VrfCoordinatorContract(pub Addr);

impl VrfCoordinatorContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: VrfExecuteMsg) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg)?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn request_count(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&VrfQueryMsg::RequestCount {})?,
        }))
    }
}
