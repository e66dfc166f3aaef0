//! Mock Price Feed Contract
//!
//! Stand-in for a V3 price aggregator on development networks. It reports a
//! fixed number of decimals and an answer that tests and deploy scripts can
//! move around at will. Every update opens a new round stamped with the
//! current ledger timestamp.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Env, String};


const DESCRIPTION: &str = "v0.8/tests/MockV3Aggregator.sol";
const VERSION: u32 = 0;

// ──────────────────────────────────────────────────────────
// ERRORS
// ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PriceFeedError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    RoundNotFound = 3,
    RoundOverflow = 4,
}

// ──────────────────────────────────────────────────────────
// DATA STRUCTURES
// ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

#[contracttype]
pub enum DataKey {
    Decimals,
    LatestRound,
    Round(u64),
}

// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn initialize(env: Env, decimals: u32, initial_answer: i128) -> Result<(), PriceFeedError> {
        if env.storage().instance().has(&DataKey::Decimals) {
            return Err(PriceFeedError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::LatestRound, &0u64);
        Self::update_answer(env, initial_answer)
    }

    /// Open a new round with `answer`, stamped with the ledger timestamp.
    pub fn update_answer(env: Env, answer: i128) -> Result<(), PriceFeedError> {
        let round_id = Self::latest_round(env.clone())?
            .checked_add(1)
            .ok_or(PriceFeedError::RoundOverflow)?;
        let now = env.ledger().timestamp();
        Self::write_round(&env, round_id, answer, now, now);
        Ok(())
    }

    /// Overwrite a round explicitly; used to simulate stale or broken feeds.
    pub fn update_round_data(
        env: Env,
        round_id: u64,
        answer: i128,
        updated_at: u64,
        started_at: u64,
    ) -> Result<(), PriceFeedError> {
        // fails before initialize
        Self::decimals(env.clone())?;
        Self::write_round(&env, round_id, answer, updated_at, started_at);
        Ok(())
    }

    pub fn decimals(env: Env) -> Result<u32, PriceFeedError> {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .ok_or(PriceFeedError::NotInitialized)
    }

    pub fn description(env: Env) -> String {
        String::from_str(&env, DESCRIPTION)
    }

    pub fn version(_env: Env) -> u32 {
        VERSION
    }

    pub fn latest_round(env: Env) -> Result<u64, PriceFeedError> {
        env.storage()
            .instance()
            .get(&DataKey::LatestRound)
            .ok_or(PriceFeedError::NotInitialized)
    }

    pub fn latest_answer(env: Env) -> Result<i128, PriceFeedError> {
        Ok(Self::latest_round_data(env)?.answer)
    }

    pub fn latest_timestamp(env: Env) -> Result<u64, PriceFeedError> {
        Ok(Self::latest_round_data(env)?.updated_at)
    }

    pub fn latest_round_data(env: Env) -> Result<RoundData, PriceFeedError> {
        let latest = Self::latest_round(env.clone())?;
        Self::get_round_data(env, latest)
    }

    pub fn get_round_data(env: Env, round_id: u64) -> Result<RoundData, PriceFeedError> {
        env.storage()
            .persistent()
            .get(&DataKey::Round(round_id))
            .ok_or(PriceFeedError::RoundNotFound)
    }

    // ----------------------------------------------------------
    // Internal helpers
    // ----------------------------------------------------------

    fn write_round(env: &Env, round_id: u64, answer: i128, updated_at: u64, started_at: u64) {
        let round = RoundData {
            round_id,
            answer,
            started_at,
            updated_at,
            answered_in_round: round_id,
        };
        env.storage().persistent().set(&DataKey::Round(round_id), &round);
        env.storage().instance().set(&DataKey::LatestRound, &round_id);
    }
}
