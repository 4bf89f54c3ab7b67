#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, Empty, Env, Order, StdResult};
use cw721_base::QueryMsg as Cw721QueryMsg;

use crate::msg::{AddressMintCountsResponse, ConfigResponse, QueryMsg, RevealStatusResponse};
use crate::state::{
    RevealRequest, TokenContract, ADMIN, MINT_COUNTS, ORACLE, PARAMS, PAUSED, PUBLIC_MINTED_BY,
    REVEALED_COUNT, REVEAL_REQUESTS, WHITELIST_MINTED_BY, WHITELIST_WINDOW,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::MintCounts {} => to_binary(&MINT_COUNTS.load(deps.storage)?),
        QueryMsg::RevealedTokensAmount {} => to_binary(&REVEALED_COUNT.load(deps.storage)?),
        QueryMsg::AddressMintCounts { address } => {
            to_binary(&query_address_mint_counts(deps, address)?)
        }
        QueryMsg::RevealStatus { token_id } => to_binary(&query_reveal_status(deps, token_id)?),
        QueryMsg::RevealRequest { request_id } => {
            to_binary(&query_reveal_request(deps, request_id)?)
        }
        QueryMsg::BalanceOf { address } => to_binary(&query_balance_of(deps, address)?),
        QueryMsg::Paused {} => to_binary(&PAUSED.load(deps.storage)?),
        QueryMsg::Admin {} => to_binary(&ADMIN.query_admin(deps)?),

        QueryMsg::OwnerOf {
            token_id,
            include_expired,
        } => base_query(
            deps,
            env,
            Cw721QueryMsg::OwnerOf {
                token_id,
                include_expired,
            },
        ),
        QueryMsg::NumTokens {} => base_query(deps, env, Cw721QueryMsg::NumTokens {}),
        QueryMsg::ContractInfo {} => base_query(deps, env, Cw721QueryMsg::ContractInfo {}),
        QueryMsg::NftInfo { token_id } => base_query(deps, env, Cw721QueryMsg::NftInfo { token_id }),
        QueryMsg::AllNftInfo {
            token_id,
            include_expired,
        } => base_query(
            deps,
            env,
            Cw721QueryMsg::AllNftInfo {
                token_id,
                include_expired,
            },
        ),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => base_query(
            deps,
            env,
            Cw721QueryMsg::Tokens {
                owner,
                start_after,
                limit,
            },
        ),
        QueryMsg::AllTokens { start_after, limit } => {
            base_query(deps, env, Cw721QueryMsg::AllTokens { start_after, limit })
        }
    }
}

fn base_query(deps: Deps, env: Env, msg: Cw721QueryMsg<Empty>) -> StdResult<Binary> {
    TokenContract::default().query(deps, env, msg)
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    Ok(ConfigResponse {
        params: PARAMS.load(deps.storage)?,
        oracle: ORACLE.load(deps.storage)?,
        whitelist_window: WHITELIST_WINDOW.load(deps.storage)?,
        paused: PAUSED.load(deps.storage)?,
    })
}

fn query_address_mint_counts(deps: Deps, address: String) -> StdResult<AddressMintCountsResponse> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(AddressMintCountsResponse {
        public: PUBLIC_MINTED_BY
            .may_load(deps.storage, &addr)?
            .unwrap_or_default(),
        whitelist: WHITELIST_MINTED_BY
            .may_load(deps.storage, &addr)?
            .unwrap_or_default(),
    })
}

fn query_reveal_status(deps: Deps, token_id: u64) -> StdResult<RevealStatusResponse> {
    let token = TokenContract::default()
        .tokens
        .load(deps.storage, &token_id.to_string())?;
    Ok(RevealStatusResponse {
        status: token.extension.reveal_status,
        seed: token.extension.seed,
    })
}

fn query_reveal_request(deps: Deps, request_id: u64) -> StdResult<Option<RevealRequest>> {
    REVEAL_REQUESTS.may_load(deps.storage, request_id)
}

fn query_balance_of(deps: Deps, address: String) -> StdResult<u64> {
    let addr = deps.api.addr_validate(&address)?;
    let count = TokenContract::default()
        .tokens
        .idx
        .owner
        .prefix(addr)
        .keys(deps.storage, None, None, Order::Ascending)
        .count();
    Ok(count as u64)
}
