use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct PendingRequest {
    pub consumer: Addr,
    pub num_words: u32,
}

/// Also the most recently assigned request id; 0 before the first request.
pub const REQUEST_COUNT: Item<u64> = Item::new("request-count");

/// Requests are kept after delivery on purpose: the mock happily relays the
/// same request twice so consumer-side replay protection can be exercised.
pub const REQUESTS: Map<u64, PendingRequest> = Map::new("requests");
