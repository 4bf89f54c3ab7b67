#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{DepsMut, Env, Event, Response, Timestamp};

use crate::msg::SudoMsg;
use crate::state::{WhitelistWindow, WHITELIST_WINDOW};
use crate::ContractError;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, _env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::UpdateWhitelistWindow { start, end } => {
            sudo_update_whitelist_window(deps, start, end)
        }
    }
}

pub fn sudo_update_whitelist_window(
    deps: DepsMut,
    start: Timestamp,
    end: Timestamp,
) -> Result<Response, ContractError> {
    if start >= end {
        return Err(ContractError::InvalidWindow {});
    }
    WHITELIST_WINDOW.save(deps.storage, &WhitelistWindow { start, end })?;

    let event = Event::new("update_whitelist_window")
        .add_attribute("start", start.to_string())
        .add_attribute("end", end.to_string());
    Ok(Response::new().add_event(event))
}
