use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Addr, CosmosMsg, QuerierWrapper, QueryRequest, StdResult, WasmMsg, WasmQuery,
};

use crate::msg::{ExecuteMsg, QueryMsg};
use crate::state::MintCounts;

/// MinterContract is a wrapper around Addr that provides a lot of helpers
#[cw_serde]
pub struct MinterContract(pub Addr);

impl MinterContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: ExecuteMsg) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg)?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn mint_counts(&self, querier: &QuerierWrapper) -> StdResult<MintCounts> {
        querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&QueryMsg::MintCounts {})?,
        }))
    }

    pub fn revealed_tokens_amount(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&QueryMsg::RevealedTokensAmount {})?,
        }))
    }

    pub fn balance_of(&self, querier: &QuerierWrapper, address: String) -> StdResult<u64> {
        querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&QueryMsg::BalanceOf { address })?,
        }))
    }
}
