use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Coin, HexBinary, Timestamp};
use cw_utils::Expiration;

use crate::state::{
    MintCounts, MintParams, OracleConfig, RevealRequest, RevealStatus, WhitelistWindow,
};

#[cw_serde]
pub struct InstantiateMsg {
    /// cw721 contract info
    pub name: String,
    pub symbol: String,
    /// Privileged identity for dev mints and pausing. None burns it.
    pub admin: Option<String>,

    /// Randomness coordinator wiring, forwarded verbatim with each request.
    pub coordinator: String,
    pub key_hash: HexBinary,
    pub subscription_id: u64,
    pub request_confirmations: u32,
    pub callback_gas_limit: u64,

    pub unit_price: Coin,
    pub max_supply: u64,
    pub pub_mint_reserve: u64,
    pub whitelist_supply: u64,
    pub dev_reserve: u64,
    pub per_address_limit: u32,
    pub whitelist_per_address_limit: u32,
    pub whitelist_start: Timestamp,
    pub whitelist_end: Timestamp,
    pub whitelist_merkle_root: HexBinary,

    pub base_token_uri: String,
    pub unrevealed_token_uri: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Public sale mint at exact unit price.
    Mint { amount: u32 },
    /// Allowlist mint inside the whitelist window.
    MintWhitelist { amount: u32, proof: Vec<HexBinary> },
    /// Allowlist mint that also submits the fresh tokens for reveal in the
    /// same transaction.
    MintWhitelistAndReveal { amount: u32, proof: Vec<HexBinary> },
    /// Mint from the dev reserve to `recipient` (sender by default).
    /// Admin only, no payment, no proof.
    AdminMint {
        amount: u32,
        recipient: Option<String>,
    },
    /// Submit unrevealed tokens for randomized reveal. Sender must own every
    /// listed token (the admin may submit any).
    RequestReveal { token_ids: Vec<u64> },
    /// Randomness delivery. Only the configured coordinator may call this.
    FulfillRandomness {
        request_id: u64,
        randomness: Vec<HexBinary>,
    },
    /// Change the admin. None burns it.
    UpdateAdmin { admin: Option<String> },
    /// Circuit breaker for the three mint paths.
    SetPaused { paused: bool },

    // standard cw721 surface, delegated to the embedded contract
    TransferNft {
        recipient: String,
        token_id: String,
    },
    SendNft {
        contract: String,
        token_id: String,
        msg: Binary,
    },
    Approve {
        spender: String,
        token_id: String,
        expires: Option<Expiration>,
    },
    Revoke {
        spender: String,
        token_id: String,
    },
    ApproveAll {
        operator: String,
        expires: Option<Expiration>,
    },
    RevokeAll {
        operator: String,
    },
}

#[cw_serde]
pub enum SudoMsg {
    /// Move the whitelist window. The only post-deployment parameter change;
    /// everything else is frozen at instantiate.
    UpdateWhitelistWindow { start: Timestamp, end: Timestamp },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(MintCounts)]
    MintCounts {},
    #[returns(u64)]
    RevealedTokensAmount {},
    #[returns(AddressMintCountsResponse)]
    AddressMintCounts { address: String },
    #[returns(RevealStatusResponse)]
    RevealStatus { token_id: u64 },
    #[returns(Option<RevealRequest>)]
    RevealRequest { request_id: u64 },
    /// Number of tokens owned by `address`.
    #[returns(u64)]
    BalanceOf { address: String },
    #[returns(bool)]
    Paused {},
    #[returns(cw_controllers::AdminResponse)]
    Admin {},

    // standard cw721 surface, delegated to the embedded contract
    #[returns(cw721::OwnerOfResponse)]
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
    #[returns(cw721::NumTokensResponse)]
    NumTokens {},
    #[returns(cw721::ContractInfoResponse)]
    ContractInfo {},
    #[returns(cw721::NftInfoResponse<crate::state::Metadata>)]
    NftInfo { token_id: String },
    #[returns(cw721::AllNftInfoResponse<crate::state::Metadata>)]
    AllNftInfo {
        token_id: String,
        include_expired: Option<bool>,
    },
    #[returns(cw721::TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(cw721::TokensResponse)]
    AllTokens {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub params: MintParams,
    pub oracle: OracleConfig,
    pub whitelist_window: WhitelistWindow,
    pub paused: bool,
}

#[cw_serde]
pub struct AddressMintCountsResponse {
    pub public: u32,
    pub whitelist: u32,
}

#[cw_serde]
pub struct RevealStatusResponse {
    pub status: RevealStatus,
    pub seed: Option<HexBinary>,
}
