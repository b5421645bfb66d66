//! Unique-ownership share ledger for membership tokens.
//!
//! Implements the transferable token substrate the membership contract
//! builds on: monotonic id allocation, ownership, per-owner enumeration,
//! and transfers. This module only mutates storage; events are emitted by
//! the contract surface.

use soroban_sdk::{contracttype, Address, Env, Vec};

/// Collection name reported by the contract.
pub const TOKEN_NAME: &str = "CSA Share";
/// Collection symbol reported by the contract.
pub const TOKEN_SYMBOL: &str = "CSAS";

/// Storage keys for the share ledger.
#[contracttype]
#[derive(Clone)]
pub enum ShareTokenKey {
    /// Next token id to allocate; doubles as the total minted count.
    NextTokenId,
    /// Owner of a token id.
    Owner(u64),
    /// Token ids held by an address, in acquisition order.
    OwnedTokens(Address),
}

/// Mint a new share to `to` and return its id.
///
/// Ids come from a single monotonic counter shared by every season, so a
/// token id never repeats and never resets.
pub fn mint(env: &Env, to: &Address) -> u64 {
    let token_id: u64 = env
        .storage()
        .instance()
        .get(&ShareTokenKey::NextTokenId)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&ShareTokenKey::Owner(token_id), to);
    env.storage()
        .instance()
        .set(&ShareTokenKey::NextTokenId, &(token_id + 1));

    let mut owned = tokens_of(env, to);
    owned.push_back(token_id);
    env.storage()
        .instance()
        .set(&ShareTokenKey::OwnedTokens(to.clone()), &owned);

    token_id
}

/// Owner of a share. Panics for ids that were never minted.
pub fn owner_of(env: &Env, token_id: u64) -> Address {
    env.storage()
        .instance()
        .get(&ShareTokenKey::Owner(token_id))
        .expect("token not found")
}

/// Number of shares held by an address.
pub fn balance_of(env: &Env, owner: &Address) -> u32 {
    tokens_of(env, owner).len()
}

/// All share ids held by an address.
pub fn tokens_of(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&ShareTokenKey::OwnedTokens(owner.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

/// Share id at `index` in an owner's holdings.
pub fn token_of_owner_by_index(env: &Env, owner: &Address, index: u32) -> u64 {
    tokens_of(env, owner).get(index).expect("index out of bounds")
}

/// Total number of shares minted.
pub fn total_minted(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&ShareTokenKey::NextTokenId)
        .unwrap_or(0)
}

/// Move a share from `from` to `to`. The stored owner must match `from`.
pub fn transfer(env: &Env, from: &Address, to: &Address, token_id: u64) {
    let owner = owner_of(env, token_id);
    assert!(owner == *from, "from is not the token owner");

    env.storage()
        .instance()
        .set(&ShareTokenKey::Owner(token_id), to);

    // Rebuild the sender's holdings without the transferred id.
    let owned = tokens_of(env, from);
    let mut remaining = Vec::new(env);
    for i in 0..owned.len() {
        let id = owned.get(i).unwrap();
        if id != token_id {
            remaining.push_back(id);
        }
    }
    env.storage()
        .instance()
        .set(&ShareTokenKey::OwnedTokens(from.clone()), &remaining);

    let mut received = tokens_of(env, to);
    received.push_back(token_id);
    env.storage()
        .instance()
        .set(&ShareTokenKey::OwnedTokens(to.clone()), &received);
}
