use std::ops::RangeInclusive;

use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::{MintParams, MINT_COUNTS, PUBLIC_MINTED_BY, WHITELIST_MINTED_BY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    Public,
    Whitelist,
    Dev,
}

/// Reserve `amount` token ids from `bucket` for `owner`.
///
/// Every check runs before the first write, so a failed reservation leaves
/// all counters untouched. On success the bucket counter, the aggregate
/// counter, and the owner's per-bucket counter advance together and the
/// contiguous 1-based id range is returned.
pub fn reserve(
    storage: &mut dyn Storage,
    params: &MintParams,
    bucket: Bucket,
    owner: &Addr,
    amount: u32,
) -> Result<RangeInclusive<u64>, ContractError> {
    let mut counts = MINT_COUNTS.load(storage)?;
    let added = u64::from(amount);

    let (minted_in_bucket, cap) = match bucket {
        Bucket::Public => (counts.public, params.pub_mint_reserve),
        Bucket::Whitelist => (counts.whitelist, params.whitelist_supply),
        Bucket::Dev => (counts.dev, params.dev_reserve),
    };
    if counts.total + added > params.max_supply || minted_in_bucket + added > cap {
        return Err(ContractError::CapExceeded {});
    }

    // the dev reserve has no personal limit; it is admin-gated instead
    let personal = match bucket {
        Bucket::Public => Some((&PUBLIC_MINTED_BY, params.per_address_limit)),
        Bucket::Whitelist => Some((&WHITELIST_MINTED_BY, params.whitelist_per_address_limit)),
        Bucket::Dev => None,
    };
    if let Some((minted_by, limit)) = personal {
        let minted = minted_by.may_load(storage, owner)?.unwrap_or_default();
        if minted + amount > limit {
            return Err(ContractError::OverPerAddressLimit {});
        }
        minted_by.save(storage, owner, &(minted + amount))?;
    }

    let start = counts.total + 1;
    counts.total += added;
    match bucket {
        Bucket::Public => counts.public += added,
        Bucket::Whitelist => counts.whitelist += added,
        Bucket::Dev => counts.dev += added,
    }
    MINT_COUNTS.save(storage, &counts)?;

    Ok(start..=counts.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MintCounts;
    use cosmwasm_std::coin;
    use cosmwasm_std::testing::MockStorage;
    use cosmwasm_std::HexBinary;

    fn params() -> MintParams {
        MintParams {
            unit_price: coin(100, "ucosm"),
            max_supply: 100,
            pub_mint_reserve: 60,
            whitelist_supply: 30,
            dev_reserve: 20,
            per_address_limit: 5,
            whitelist_per_address_limit: 2,
            whitelist_merkle_root: HexBinary::from([0u8; 32]),
            base_token_uri: "ipfs://base".to_string(),
            unrevealed_token_uri: "ipfs://hidden".to_string(),
        }
    }

    fn storage() -> MockStorage {
        let mut storage = MockStorage::new();
        MINT_COUNTS
            .save(&mut storage, &MintCounts::default())
            .unwrap();
        storage
    }

    #[test]
    fn allocates_contiguous_ids_in_mint_order() {
        let mut storage = storage();
        let params = params();
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");

        let first = reserve(&mut storage, &params, Bucket::Public, &alice, 3).unwrap();
        assert_eq!(first, 1..=3);

        let second = reserve(&mut storage, &params, Bucket::Whitelist, &bob, 2).unwrap();
        assert_eq!(second, 4..=5);

        let third = reserve(&mut storage, &params, Bucket::Dev, &alice, 1).unwrap();
        assert_eq!(third, 6..=6);

        let counts = MINT_COUNTS.load(&storage).unwrap();
        assert_eq!(counts.total, 6);
        assert_eq!(counts.total, counts.public + counts.whitelist + counts.dev);
    }

    #[test]
    fn bucket_cap_rejected_without_side_effects() {
        let mut storage = storage();
        let mut params = params();
        params.whitelist_per_address_limit = 50;
        let addr = Addr::unchecked("alice");

        reserve(&mut storage, &params, Bucket::Whitelist, &addr, 30).unwrap();
        let before = MINT_COUNTS.load(&storage).unwrap();

        let err = reserve(&mut storage, &params, Bucket::Whitelist, &addr, 1).unwrap_err();
        assert!(matches!(err, ContractError::CapExceeded {}));

        assert_eq!(MINT_COUNTS.load(&storage).unwrap(), before);
        assert_eq!(
            WHITELIST_MINTED_BY.load(&storage, &addr).unwrap(),
            30,
            "per-address counter must not advance on a failed reservation"
        );
    }

    #[test]
    fn max_supply_bounds_overprovisioned_buckets() {
        let mut storage = storage();
        // caps sum to 110 on purpose; the aggregate cap still wins
        let mut params = params();
        params.per_address_limit = 100;

        for i in 0..12 {
            let addr = Addr::unchecked(format!("buyer{}", i));
            reserve(&mut storage, &params, Bucket::Public, &addr, 5).unwrap();
        }
        reserve(
            &mut storage,
            &params,
            Bucket::Whitelist,
            &Addr::unchecked("wl0"),
            2,
        )
        .unwrap();
        reserve(
            &mut storage,
            &params,
            Bucket::Dev,
            &Addr::unchecked("team"),
            20,
        )
        .unwrap();
        // 60 + 2 + 20 = 82; 19 more whitelist mints would clear the bucket
        // cap but breach max_supply
        let err = reserve(
            &mut storage,
            &params,
            Bucket::Whitelist,
            &Addr::unchecked("wl1"),
            19,
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::CapExceeded {}));

        let counts = MINT_COUNTS.load(&storage).unwrap();
        assert_eq!(counts.total, 82);
    }

    #[test]
    fn per_address_limit_enforced_per_bucket() {
        let mut storage = storage();
        let params = params();
        let addr = Addr::unchecked("alice");

        reserve(&mut storage, &params, Bucket::Public, &addr, 5).unwrap();
        let err = reserve(&mut storage, &params, Bucket::Public, &addr, 1).unwrap_err();
        assert!(matches!(err, ContractError::OverPerAddressLimit {}));

        // the whitelist counter is independent of the public one
        reserve(&mut storage, &params, Bucket::Whitelist, &addr, 2).unwrap();
        let err = reserve(&mut storage, &params, Bucket::Whitelist, &addr, 1).unwrap_err();
        assert!(matches!(err, ContractError::OverPerAddressLimit {}));
    }

    #[test]
    fn dev_bucket_has_no_personal_limit() {
        let mut storage = storage();
        let params = params();
        let team = Addr::unchecked("team");

        reserve(&mut storage, &params, Bucket::Dev, &team, 20).unwrap();
        assert_eq!(PUBLIC_MINTED_BY.may_load(&storage, &team).unwrap(), None);
        assert_eq!(WHITELIST_MINTED_BY.may_load(&storage, &team).unwrap(), None);
    }
}
