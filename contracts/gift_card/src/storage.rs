use soroban_sdk::{Address, Env};

use crate::errors::GiftCardError;
use crate::types::{DataKey, GiftCard, GiftCardConfig};

const TTL_THRESHOLD: u32 = 100_000;
const TTL_EXTEND_TO: u32 = 500_000;

/// Keep the contract instance (config, counters, custody) alive.
pub fn bump_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &GiftCardConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<GiftCardConfig, GiftCardError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(GiftCardError::NotInitialized)
}

pub fn get_next_token_id(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::NextTokenId).unwrap_or(0)
}

/// Hand out the next token id and advance the counter.
pub fn allocate_token_id(env: &Env) -> Result<u64, GiftCardError> {
    let id = get_next_token_id(env);
    let next = id.checked_add(1).ok_or(GiftCardError::MathOverflow)?;
    env.storage().instance().set(&DataKey::NextTokenId, &next);
    Ok(id)
}

pub fn get_custody(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::Custody).unwrap_or(0)
}

pub fn set_custody(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::Custody, &amount);
}

pub fn get_card(env: &Env, token_id: u64) -> Option<GiftCard> {
    env.storage().persistent().get(&DataKey::Card(token_id))
}

pub fn set_card(env: &Env, token_id: u64, card: &GiftCard) {
    let key = DataKey::Card(token_id);
    env.storage().persistent().set(&key, card);
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_balance(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, owner: &Address, count: u32) {
    let key = DataKey::Balance(owner.clone());
    if count == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &count);
        env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

pub fn get_approval(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Approval(token_id))
}

pub fn set_approval(env: &Env, token_id: u64, approved: &Address) {
    let key = DataKey::Approval(token_id);
    env.storage().persistent().set(&key, approved);
    env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn clear_approval(env: &Env, token_id: u64) {
    env.storage().persistent().remove(&DataKey::Approval(token_id));
}

pub fn is_operator(env: &Env, owner: &Address, operator: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Operator(owner.clone(), operator.clone()))
        .unwrap_or(false)
}

pub fn set_operator(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    let key = DataKey::Operator(owner.clone(), operator.clone());
    if approved {
        env.storage().persistent().set(&key, &true);
        env.storage().persistent().extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    } else {
        env.storage().persistent().remove(&key);
    }
}
