use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Empty, HexBinary, Timestamp};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};

/// The embedded cw721 contract; token ownership and approvals live in its
/// `tokens` IndexedMap. Token ids are dense 1-based integers rendered as
/// decimal strings.
pub type TokenContract<'a> = cw721_base::Cw721Contract<'a, Metadata, Empty, Empty, Empty>;

#[cw_serde]
#[derive(Default, Copy)]
pub enum RevealStatus {
    #[default]
    Unrevealed,
    RevealRequested,
    Revealed,
}

/// Per-token extension. `seed` is set exactly once, when the token reveals.
#[cw_serde]
#[derive(Default)]
pub struct Metadata {
    pub reveal_status: RevealStatus,
    pub seed: Option<HexBinary>,
}

/// Immutable after instantiate.
#[cw_serde]
pub struct MintParams {
    /// Exact payment per token, public and whitelist paths alike.
    pub unit_price: Coin,
    pub max_supply: u64,
    pub pub_mint_reserve: u64,
    pub whitelist_supply: u64,
    pub dev_reserve: u64,
    pub per_address_limit: u32,
    pub whitelist_per_address_limit: u32,
    /// 32-byte allowlist commitment. The all-zero root is the open-list
    /// sentinel used by test configurations: it accepts only the empty proof.
    pub whitelist_merkle_root: HexBinary,
    pub base_token_uri: String,
    pub unrevealed_token_uri: String,
}

/// Coordinator connection. Opaque to the mint logic; forwarded verbatim with
/// every randomness request.
#[cw_serde]
pub struct OracleConfig {
    pub coordinator: Addr,
    pub key_hash: HexBinary,
    pub subscription_id: u64,
    pub request_confirmations: u32,
    pub callback_gas_limit: u64,
}

/// Sudo-adjustable; everything else in the configuration is frozen.
#[cw_serde]
pub struct WhitelistWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

#[cw_serde]
#[derive(Default)]
pub struct MintCounts {
    pub total: u64,
    pub public: u64,
    pub whitelist: u64,
    pub dev: u64,
}

/// One outstanding (or consumed) randomness request. Entries are kept after
/// fulfillment so a replayed callback looks exactly like an unknown id.
#[cw_serde]
pub struct RevealRequest {
    /// Submission order; fulfillment words bind to these positions.
    pub token_ids: Vec<u64>,
    pub fulfilled: bool,
}

pub const PARAMS: Item<MintParams> = Item::new("params");

pub const ORACLE: Item<OracleConfig> = Item::new("oracle");

pub const WHITELIST_WINDOW: Item<WhitelistWindow> = Item::new("wl-window");

pub const MINT_COUNTS: Item<MintCounts> = Item::new("mint-counts");

/// Address -> tokens minted through the public sale.
pub const PUBLIC_MINTED_BY: Map<&Addr, u32> = Map::new("pub-minted");

/// Address -> tokens minted through the whitelist.
pub const WHITELIST_MINTED_BY: Map<&Addr, u32> = Map::new("wl-minted");

/// Oracle-assigned request id -> submitted batch.
pub const REVEAL_REQUESTS: Map<u64, RevealRequest> = Map::new("reveal-requests");

/// Count of tokens in `Revealed` state.
pub const REVEALED_COUNT: Item<u64> = Item::new("revealed-count");

/// Batch handed from the request submission to the submessage reply.
pub const PENDING_SUBMISSION: Item<Vec<u64>> = Item::new("pending-submission");

/// Controls if minting is paused or not by admin
pub const PAUSED: Item<bool> = Item::new("paused");

pub const ADMIN: Admin = Admin::new("admin");
