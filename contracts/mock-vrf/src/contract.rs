#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Binary, Deps, DepsMut, Env, Event, HexBinary, MessageInfo, Response, StdResult,
    WasmMsg,
};
use cw2::set_contract_version;
use sha2::{Digest, Sha256};
use vrf_oracle::{
    RequestRandomnessResponse, VrfReceiverExecuteMsg, ATTR_REQUEST_ID, REQUEST_RANDOMNESS_EVENT,
};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{PendingRequest, REQUESTS, REQUEST_COUNT};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:mock-vrf";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    REQUEST_COUNT.save(deps.storage, &0)?;

    Ok(Response::new().add_attribute("action", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RequestRandomness { num_words, .. } => {
            execute_request_randomness(deps, info, num_words)
        }
        ExecuteMsg::Fulfill { request_id, words } => execute_fulfill(deps, request_id, words),
    }
}

pub fn execute_request_randomness(
    deps: DepsMut,
    info: MessageInfo,
    num_words: u32,
) -> Result<Response, ContractError> {
    let request_id = REQUEST_COUNT.load(deps.storage)? + 1;
    REQUEST_COUNT.save(deps.storage, &request_id)?;
    REQUESTS.save(
        deps.storage,
        request_id,
        &PendingRequest {
            consumer: info.sender,
            num_words,
        },
    )?;

    Ok(Response::new()
        .set_data(to_binary(&RequestRandomnessResponse { request_id })?)
        .add_event(
            Event::new(REQUEST_RANDOMNESS_EVENT)
                .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
                .add_attribute("num_words", num_words.to_string()),
        )
        .add_attribute("action", "request_randomness"))
}

pub fn execute_fulfill(
    deps: DepsMut,
    request_id: u64,
    words: Option<Vec<HexBinary>>,
) -> Result<Response, ContractError> {
    let request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::UnknownRequest { request_id })?;

    let words = words.unwrap_or_else(|| derive_words(request_id, request.num_words));

    let msg = WasmMsg::Execute {
        contract_addr: request.consumer.to_string(),
        msg: to_binary(&VrfReceiverExecuteMsg::FulfillRandomness {
            request_id,
            randomness: words,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "fulfill")
        .add_attribute(ATTR_REQUEST_ID, request_id.to_string()))
}

fn derive_words(request_id: u64, num_words: u32) -> Vec<HexBinary> {
    (0..num_words)
        .map(|i| {
            let mut hasher = Sha256::new();
            hasher.update(request_id.to_be_bytes());
            hasher.update(i.to_be_bytes());
            HexBinary::from(hasher.finalize().to_vec())
        })
        .collect()
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::RequestCount {} => to_binary(&REQUEST_COUNT.load(deps.storage)?),
        QueryMsg::Request { request_id } => {
            to_binary(&REQUESTS.may_load(deps.storage, request_id)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{from_binary, CosmosMsg};

    fn request_msg(num_words: u32) -> ExecuteMsg {
        ExecuteMsg::RequestRandomness {
            key_hash: HexBinary::from([0u8; 32]),
            subscription_id: 1,
            request_confirmations: 3,
            callback_gas_limit: 500_000,
            num_words,
        }
    }

    #[test]
    fn assigns_sequential_request_ids() {
        let mut deps = mock_dependencies();
        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("deployer", &[]),
            InstantiateMsg {},
        )
        .unwrap();

        let count: u64 =
            from_binary(&query(deps.as_ref(), mock_env(), QueryMsg::RequestCount {}).unwrap())
                .unwrap();
        assert_eq!(count, 0, "initial request count should be 0");

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("consumer", &[]),
            request_msg(5),
        )
        .unwrap();
        let data: RequestRandomnessResponse = from_binary(&res.data.unwrap()).unwrap();
        assert_eq!(data.request_id, 1);

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("consumer", &[]),
            request_msg(2),
        )
        .unwrap();
        let data: RequestRandomnessResponse = from_binary(&res.data.unwrap()).unwrap();
        assert_eq!(data.request_id, 2);

        let count: u64 =
            from_binary(&query(deps.as_ref(), mock_env(), QueryMsg::RequestCount {}).unwrap())
                .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn fulfill_relays_to_the_requesting_consumer() {
        let mut deps = mock_dependencies();
        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("deployer", &[]),
            InstantiateMsg {},
        )
        .unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("consumer", &[]),
            request_msg(3),
        )
        .unwrap();

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("driver", &[]),
            ExecuteMsg::Fulfill {
                request_id: 1,
                words: None,
            },
        )
        .unwrap();

        assert_eq!(res.messages.len(), 1);
        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, "consumer");
                let receive: VrfReceiverExecuteMsg = from_binary(msg).unwrap();
                let VrfReceiverExecuteMsg::FulfillRandomness {
                    request_id,
                    randomness,
                } = receive;
                assert_eq!(request_id, 1);
                assert_eq!(randomness.len(), 3);
                // derived words are deterministic and position dependent
                assert_eq!(randomness, derive_words(1, 3));
                assert_ne!(randomness[0], randomness[1]);
            }
            msg => panic!("unexpected message {:?}", msg),
        }
    }

    #[test]
    fn fulfill_unknown_request_errors() {
        let mut deps = mock_dependencies();
        instantiate(
            deps.as_mut(),
            mock_env(),
            mock_info("deployer", &[]),
            InstantiateMsg {},
        )
        .unwrap();

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("driver", &[]),
            ExecuteMsg::Fulfill {
                request_id: 9,
                words: None,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::UnknownRequest { request_id: 9 }
        ));
    }
}
