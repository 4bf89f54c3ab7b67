use cosmwasm_std::{
    DepsMut, HexBinary, MessageInfo, Reply, Response, StdError, Storage, SubMsg, SubMsgResponse,
};
use vrf_oracle::{VrfCoordinatorContract, VrfExecuteMsg, ATTR_REQUEST_ID, REQUEST_RANDOMNESS_EVENT};

use crate::error::ContractError;
use crate::state::{
    RevealRequest, RevealStatus, TokenContract, ADMIN, ORACLE, PARAMS, PENDING_SUBMISSION,
    REVEALED_COUNT, REVEAL_REQUESTS,
};

pub const REQUEST_RANDOMNESS_REPLY_ID: u64 = 1;

pub fn execute_request_reveal(
    deps: DepsMut,
    info: MessageInfo,
    token_ids: Vec<u64>,
) -> Result<Response, ContractError> {
    // holders reveal their own tokens; the admin may sweep any
    if !ADMIN.is_admin(deps.as_ref(), &info.sender)? {
        let contract = TokenContract::default();
        for &token_id in &token_ids {
            let token = contract
                .tokens
                .may_load(deps.storage, &token_id.to_string())?
                .ok_or(ContractError::InvalidRevealTarget { token_id })?;
            if token.owner != info.sender {
                return Err(ContractError::Unauthorized {});
            }
        }
    }

    let batch_size = token_ids.len();
    let submsg = request_reveal_submsg(deps.storage, token_ids)?;

    Ok(Response::new()
        .add_submessage(submsg)
        .add_attribute("action", "request_reveal")
        .add_attribute("sender", info.sender)
        .add_attribute("num_tokens", batch_size.to_string()))
}

/// Move every listed token to `RevealRequested`, stash the ordered batch for
/// the reply, and build the coordinator submessage. Shared by
/// `RequestReveal` and the eager whitelist mint path.
pub fn request_reveal_submsg(
    storage: &mut dyn Storage,
    token_ids: Vec<u64>,
) -> Result<SubMsg, ContractError> {
    if token_ids.is_empty() {
        return Err(ContractError::EmptyRevealBatch {});
    }

    let contract = TokenContract::default();
    for &token_id in &token_ids {
        contract
            .tokens
            .update(storage, &token_id.to_string(), |token| match token {
                Some(mut token)
                    if token.extension.reveal_status == RevealStatus::Unrevealed =>
                {
                    token.extension.reveal_status = RevealStatus::RevealRequested;
                    Ok(token)
                }
                _ => Err(ContractError::InvalidRevealTarget { token_id }),
            })?;
    }

    PENDING_SUBMISSION.save(storage, &token_ids)?;

    let oracle = ORACLE.load(storage)?;
    let msg = VrfCoordinatorContract(oracle.coordinator).call(VrfExecuteMsg::RequestRandomness {
        key_hash: oracle.key_hash,
        subscription_id: oracle.subscription_id,
        request_confirmations: oracle.request_confirmations,
        callback_gas_limit: oracle.callback_gas_limit,
        num_words: token_ids.len() as u32,
    })?;

    Ok(SubMsg::reply_on_success(msg, REQUEST_RANDOMNESS_REPLY_ID))
}

/// Correlate the coordinator's assigned id with the batch stashed by the
/// submitting call.
pub fn reply_request_randomness(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let res = msg.result.into_result().map_err(StdError::generic_err)?;
    let request_id = parse_request_id(&res)?;

    let token_ids = PENDING_SUBMISSION.load(deps.storage)?;
    PENDING_SUBMISSION.remove(deps.storage);

    if REVEAL_REQUESTS.has(deps.storage, request_id) {
        return Err(ContractError::RequestIdReused { request_id });
    }
    REVEAL_REQUESTS.save(
        deps.storage,
        request_id,
        &RevealRequest {
            token_ids,
            fulfilled: false,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "reveal_requested")
        .add_attribute(ATTR_REQUEST_ID, request_id.to_string()))
}

/// The coordinator reports the assigned id as an event attribute; submessage
/// events come back namespaced with the `wasm-` prefix.
fn parse_request_id(res: &SubMsgResponse) -> Result<u64, ContractError> {
    res.events
        .iter()
        .filter(|event| event.ty.ends_with(REQUEST_RANDOMNESS_EVENT))
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == ATTR_REQUEST_ID)
        .ok_or(ContractError::MissingRequestId {})
        .and_then(|attr| {
            attr.value
                .parse::<u64>()
                .map_err(|_| ContractError::MissingRequestId {})
        })
}

pub fn execute_fulfill_randomness(
    deps: DepsMut,
    info: MessageInfo,
    request_id: u64,
    randomness: Vec<HexBinary>,
) -> Result<Response, ContractError> {
    let oracle = ORACLE.load(deps.storage)?;
    if info.sender != oracle.coordinator {
        return Err(ContractError::Unauthorized {});
    }

    // a consumed id is indistinguishable from an unknown one, so a replaying
    // coordinator cannot touch already-revealed tokens
    let mut request = REVEAL_REQUESTS
        .may_load(deps.storage, request_id)?
        .filter(|request| !request.fulfilled)
        .ok_or(ContractError::UnknownRequest { request_id })?;

    if randomness.len() != request.token_ids.len() {
        return Err(ContractError::MalformedFulfillment {
            expected: request.token_ids.len(),
            got: randomness.len(),
        });
    }

    let params = PARAMS.load(deps.storage)?;
    let contract = TokenContract::default();
    // positional binding: word i belongs to the token submitted at index i
    for (&token_id, seed) in request.token_ids.iter().zip(randomness.iter()) {
        contract
            .tokens
            .update(deps.storage, &token_id.to_string(), |token| match token {
                Some(mut token) => {
                    token.extension.reveal_status = RevealStatus::Revealed;
                    token.extension.seed = Some(seed.clone());
                    token.token_uri = Some(format!("{}/{}", params.base_token_uri, token_id));
                    Ok(token)
                }
                None => Err(ContractError::InvalidRevealTarget { token_id }),
            })?;
    }

    request.fulfilled = true;
    REVEAL_REQUESTS.save(deps.storage, request_id, &request)?;

    let batch_size = request.token_ids.len() as u64;
    let revealed = REVEALED_COUNT.load(deps.storage)? + batch_size;
    REVEALED_COUNT.save(deps.storage, &revealed)?;

    Ok(Response::new()
        .add_attribute("action", "fulfill_randomness")
        .add_attribute(ATTR_REQUEST_ID, request_id.to_string())
        .add_attribute("num_revealed", batch_size.to_string())
        .add_attribute("revealed_total", revealed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::Event;

    fn response_with(events: Vec<Event>) -> SubMsgResponse {
        SubMsgResponse { events, data: None }
    }

    #[test]
    fn parses_request_id_from_coordinator_event() {
        let res = response_with(vec![Event::new("wasm-request_randomness")
            .add_attribute("num_words", "3")
            .add_attribute(ATTR_REQUEST_ID, "42")]);
        assert_eq!(parse_request_id(&res).unwrap(), 42);
    }

    #[test]
    fn ignores_unrelated_events() {
        let res = response_with(vec![
            Event::new("wasm").add_attribute("action", "request_randomness"),
            Event::new("wasm-request_randomness").add_attribute(ATTR_REQUEST_ID, "7"),
        ]);
        assert_eq!(parse_request_id(&res).unwrap(), 7);
    }

    #[test]
    fn missing_or_garbled_id_is_rejected() {
        let res = response_with(vec![Event::new("wasm-request_randomness")
            .add_attribute("num_words", "3")]);
        assert!(matches!(
            parse_request_id(&res),
            Err(ContractError::MissingRequestId {})
        ));

        let res = response_with(vec![Event::new("wasm-request_randomness")
            .add_attribute(ATTR_REQUEST_ID, "not-a-number")]);
        assert!(matches!(
            parse_request_id(&res),
            Err(ContractError::MissingRequestId {})
        ));

        let res = response_with(vec![]);
        assert!(matches!(
            parse_request_id(&res),
            Err(ContractError::MissingRequestId {})
        ));
    }
}
