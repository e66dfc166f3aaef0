use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

const MINTED: Symbol = symbol_short!("minted");
const REDEEMED: Symbol = symbol_short!("redeemed");
const TRANSFER: Symbol = symbol_short!("transfer");
const APPROVE: Symbol = symbol_short!("approve");
const APPROVE_ALL: Symbol = symbol_short!("appr_all");

pub fn minted(env: &Env, owner: &Address, token_id: u64, text: &String, deposit: i128) {
    env.events()
        .publish((MINTED, owner.clone()), (token_id, text.clone(), deposit));
}

pub fn redeemed(env: &Env, owner: &Address, token_id: u64, amount: i128) {
    env.events()
        .publish((REDEEMED, owner.clone()), (token_id, amount));
}

pub fn transfer(env: &Env, from: &Address, to: &Address, token_id: u64) {
    env.events()
        .publish((TRANSFER, from.clone(), to.clone()), token_id);
}

pub fn approve(env: &Env, owner: &Address, token_id: u64, approved: &Address) {
    env.events()
        .publish((APPROVE, owner.clone(), token_id), approved.clone());
}

pub fn approve_for_all(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    env.events()
        .publish((APPROVE_ALL, owner.clone()), (operator.clone(), approved));
}
