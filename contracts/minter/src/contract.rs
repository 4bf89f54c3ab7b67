use std::ops::RangeInclusive;

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, Addr, Coin, DepsMut, Empty, Env, HexBinary, MessageInfo, Reply, Response, StdError,
    Storage,
};
use cw2::set_contract_version;
use cw721_base::state::TokenInfo;
use cw721_base::ExecuteMsg as Cw721ExecuteMsg;
use cw_utils::{maybe_addr, must_pay, nonpayable};
use semver::Version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg};
use crate::reveal;
use crate::state::{
    Metadata, MintCounts, MintParams, OracleConfig, TokenContract, WhitelistWindow, ADMIN,
    MINT_COUNTS, ORACLE, PARAMS, PAUSED, REVEALED_COUNT, WHITELIST_WINDOW,
};
use crate::supply::{self, Bucket};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:club-minter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.whitelist_merkle_root.len() != 32 {
        return Err(ContractError::InvalidMerkleRoot {});
    }
    if msg.whitelist_start >= msg.whitelist_end {
        return Err(ContractError::InvalidWindow {});
    }
    // NOTE: bucket caps are deliberately not reconciled against max_supply;
    // the aggregate cap bounds over-provisioned buckets at reservation time.

    let api = deps.api;
    ADMIN.set(deps.branch(), maybe_addr(api, msg.admin)?)?;

    ORACLE.save(
        deps.storage,
        &OracleConfig {
            coordinator: deps.api.addr_validate(&msg.coordinator)?,
            key_hash: msg.key_hash,
            subscription_id: msg.subscription_id,
            request_confirmations: msg.request_confirmations,
            callback_gas_limit: msg.callback_gas_limit,
        },
    )?;
    PARAMS.save(
        deps.storage,
        &MintParams {
            unit_price: msg.unit_price,
            max_supply: msg.max_supply,
            pub_mint_reserve: msg.pub_mint_reserve,
            whitelist_supply: msg.whitelist_supply,
            dev_reserve: msg.dev_reserve,
            per_address_limit: msg.per_address_limit,
            whitelist_per_address_limit: msg.whitelist_per_address_limit,
            whitelist_merkle_root: msg.whitelist_merkle_root,
            base_token_uri: msg.base_token_uri,
            unrevealed_token_uri: msg.unrevealed_token_uri,
        },
    )?;
    WHITELIST_WINDOW.save(
        deps.storage,
        &WhitelistWindow {
            start: msg.whitelist_start,
            end: msg.whitelist_end,
        },
    )?;
    MINT_COUNTS.save(deps.storage, &MintCounts::default())?;
    REVEALED_COUNT.save(deps.storage, &0)?;
    PAUSED.save(deps.storage, &false)?;

    let res = TokenContract::default().instantiate(
        deps,
        env.clone(),
        info,
        cw721_base::InstantiateMsg {
            name: msg.name,
            symbol: msg.symbol,
            minter: env.contract.address.to_string(),
        },
    )?;

    Ok(res
        .add_attribute("action", "instantiate")
        .add_attribute("minter_addr", env.contract.address.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let api = deps.api;

    match msg {
        ExecuteMsg::Mint { amount } => execute_mint(deps, info, amount),
        ExecuteMsg::MintWhitelist { amount, proof } => {
            execute_mint_whitelist(deps, env, info, amount, proof, false)
        }
        ExecuteMsg::MintWhitelistAndReveal { amount, proof } => {
            execute_mint_whitelist(deps, env, info, amount, proof, true)
        }
        ExecuteMsg::AdminMint { amount, recipient } => {
            execute_admin_mint(deps, info, amount, recipient)
        }
        ExecuteMsg::RequestReveal { token_ids } => {
            reveal::execute_request_reveal(deps, info, token_ids)
        }
        ExecuteMsg::FulfillRandomness {
            request_id,
            randomness,
        } => reveal::execute_fulfill_randomness(deps, info, request_id, randomness),
        ExecuteMsg::UpdateAdmin { admin } => {
            Ok(ADMIN.execute_update_admin(deps, info, maybe_addr(api, admin)?)?)
        }
        ExecuteMsg::SetPaused { paused } => execute_set_paused(deps, info, paused),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => Ok(TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::TransferNft {
                recipient,
                token_id,
            },
        )?),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => Ok(TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::SendNft {
                contract,
                token_id,
                msg,
            },
        )?),
        ExecuteMsg::Approve {
            spender,
            token_id,
            expires,
        } => Ok(TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::Approve {
                spender,
                token_id,
                expires,
            },
        )?),
        ExecuteMsg::Revoke { spender, token_id } => Ok(TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::Revoke { spender, token_id },
        )?),
        ExecuteMsg::ApproveAll { operator, expires } => Ok(TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::ApproveAll { operator, expires },
        )?),
        ExecuteMsg::RevokeAll { operator } => Ok(TokenContract::default().execute(
            deps,
            env,
            info,
            Cw721ExecuteMsg::RevokeAll { operator },
        )?),
    }
}

pub fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    amount: u32,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    ensure!(amount > 0, ContractError::ZeroMintAmount {});

    let params = PARAMS.load(deps.storage)?;
    check_exact_payment(&info, &params.unit_price, amount)?;

    let token_ids = supply::reserve(deps.storage, &params, Bucket::Public, &info.sender, amount)?;
    mint_tokens(deps.storage, &params, &info.sender, token_ids.clone())?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("sender", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("first_token_id", token_ids.start().to_string()))
}

pub fn execute_mint_whitelist(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: u32,
    proof: Vec<HexBinary>,
    eager_reveal: bool,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    ensure!(amount > 0, ContractError::ZeroMintAmount {});

    let window = WHITELIST_WINDOW.load(deps.storage)?;
    if env.block.time < window.start || env.block.time >= window.end {
        return Err(ContractError::OutsideWhitelistWindow {});
    }

    let params = PARAMS.load(deps.storage)?;
    check_whitelist_proof(&params, &info.sender, &proof)?;
    check_exact_payment(&info, &params.unit_price, amount)?;

    let token_ids =
        supply::reserve(deps.storage, &params, Bucket::Whitelist, &info.sender, amount)?;
    mint_tokens(deps.storage, &params, &info.sender, token_ids.clone())?;

    let mut res = Response::new()
        .add_attribute("action", "mint_whitelist")
        .add_attribute("sender", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("first_token_id", token_ids.start().to_string());

    if eager_reveal {
        let submsg = reveal::request_reveal_submsg(deps.storage, token_ids.collect())?;
        res = res
            .add_submessage(submsg)
            .add_attribute("eager_reveal", "true");
    }

    Ok(res)
}

pub fn execute_admin_mint(
    deps: DepsMut,
    info: MessageInfo,
    amount: u32,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    ensure_not_paused(deps.storage)?;
    ensure!(amount > 0, ContractError::ZeroMintAmount {});

    let recipient = recipient
        .map(|r| deps.api.addr_validate(&r))
        .transpose()?
        .unwrap_or_else(|| info.sender.clone());

    let params = PARAMS.load(deps.storage)?;
    let token_ids = supply::reserve(deps.storage, &params, Bucket::Dev, &recipient, amount)?;
    mint_tokens(deps.storage, &params, &recipient, token_ids.clone())?;

    Ok(Response::new()
        .add_attribute("action", "admin_mint")
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("first_token_id", token_ids.start().to_string()))
}

pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;

    PAUSED.save(deps.storage, &paused)?;

    Ok(Response::new()
        .add_attribute("action", "set_paused")
        .add_attribute("paused", paused.to_string()))
}

fn ensure_not_paused(storage: &dyn Storage) -> Result<(), ContractError> {
    ensure!(!PAUSED.load(storage)?, ContractError::MintingPaused {});
    Ok(())
}

fn check_exact_payment(
    info: &MessageInfo,
    unit_price: &Coin,
    amount: u32,
) -> Result<(), ContractError> {
    let expected = unit_price.amount.u128() * u128::from(amount);
    let got = must_pay(info, &unit_price.denom)?.u128();
    if got != expected {
        return Err(ContractError::IncorrectPayment { got, expected });
    }
    Ok(())
}

fn check_whitelist_proof(
    params: &MintParams,
    sender: &Addr,
    proof: &[HexBinary],
) -> Result<(), ContractError> {
    let root: [u8; 32] = params
        .whitelist_merkle_root
        .to_array()
        .map_err(|_| ContractError::InvalidMerkleRoot {})?;

    // the all-zero root is unreachable for any real tree; it is the
    // open-list sentinel of test configurations and admits only the
    // empty proof
    if root == [0u8; 32] {
        ensure!(proof.is_empty(), ContractError::InvalidProof {});
        return Ok(());
    }

    let proof: Vec<[u8; 32]> = proof
        .iter()
        .map(|hash| hash.to_array())
        .collect::<Result<_, _>>()
        .map_err(|_| ContractError::InvalidProof {})?;
    let leaf = whitelist_merkle::leaf_hash(sender.as_str());
    ensure!(
        whitelist_merkle::verify(&root, &leaf, &proof),
        ContractError::InvalidProof {}
    );
    Ok(())
}

/// Write the freshly reserved ids into the token table. Ids come out of the
/// supply ledger, so they are always unoccupied.
fn mint_tokens(
    storage: &mut dyn Storage,
    params: &MintParams,
    owner: &Addr,
    token_ids: RangeInclusive<u64>,
) -> Result<(), ContractError> {
    let contract = TokenContract::default();
    for token_id in token_ids {
        let token = TokenInfo {
            owner: owner.clone(),
            approvals: vec![],
            token_uri: Some(params.unrevealed_token_uri.clone()),
            extension: Metadata::default(),
        };
        contract
            .tokens
            .save(storage, &token_id.to_string(), &token)?;
    }
    let total = MINT_COUNTS.load(storage)?.total;
    contract.token_count.save(storage, &total)?;
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        reveal::REQUEST_RANDOMNESS_REPLY_ID => reveal::reply_request_randomness(deps, msg),
        id => Err(ContractError::InvalidReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: Empty) -> Result<Response, ContractError> {
    let current_version = cw2::get_contract_version(deps.storage)?;
    if current_version.contract != CONTRACT_NAME {
        return Err(StdError::generic_err("Cannot upgrade to a different contract").into());
    }
    let version: Version = current_version
        .version
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;
    let new_version: Version = CONTRACT_VERSION
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;

    if version > new_version {
        return Err(StdError::generic_err("Cannot upgrade to a previous contract version").into());
    }
    // if same version return
    if version == new_version {
        return Ok(Response::new());
    }

    // set new contract version
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new())
}
