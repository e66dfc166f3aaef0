//! Price feed adapter.
//!
//! Only the slice of the aggregator interface the gift card needs. Readings
//! with a non-positive answer, a zero timestamp, or older than the configured
//! age are all refused. Only USD-dependent paths come through here.

use soroban_sdk::{contractclient, log, Env};

use crate::errors::GiftCardError;
use crate::types::{GiftCardConfig, PriceSnapshot, RoundData};

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn decimals(env: Env) -> u32;
    fn latest_round_data(env: Env) -> RoundData;
}

pub fn latest_price(env: &Env, config: &GiftCardConfig) -> Result<PriceSnapshot, GiftCardError> {
    let feed = PriceFeedClient::new(env, &config.price_feed);

    let decimals = match feed.try_decimals() {
        Ok(Ok(decimals)) => decimals,
        _ => return Err(GiftCardError::OracleUnavailable),
    };
    let round = match feed.try_latest_round_data() {
        Ok(Ok(round)) => round,
        _ => return Err(GiftCardError::OracleUnavailable),
    };

    if round.answer <= 0 || round.updated_at == 0 {
        log!(env, "price feed returned unusable round {}", round.round_id);
        return Err(GiftCardError::OracleUnavailable);
    }

    let snapshot = PriceSnapshot {
        price: round.answer,
        decimals,
        updated_at: round.updated_at,
    };

    let now = env.ledger().timestamp();
    if config.max_price_age > 0 && snapshot.age(now) > config.max_price_age {
        log!(env, "price feed is stale: updated_at={} now={}", snapshot.updated_at, now);
        return Err(GiftCardError::OracleUnavailable);
    }

    Ok(snapshot)
}

/// Whole US dollars `value` native units are worth, rounded down.
pub fn usd_value(value: i128, snapshot: &PriceSnapshot, token_decimals: u32) -> Result<i128, GiftCardError> {
    let scaled = value
        .checked_mul(snapshot.price)
        .ok_or(GiftCardError::MathOverflow)?;
    Ok(scaled / scale(snapshot.decimals, token_decimals)?)
}

/// Whether `value` native units are worth strictly more than `floor_usd`.
pub fn exceeds_usd(
    value: i128,
    snapshot: &PriceSnapshot,
    token_decimals: u32,
    floor_usd: i128,
) -> Result<bool, GiftCardError> {
    let scaled = value
        .checked_mul(snapshot.price)
        .ok_or(GiftCardError::MathOverflow)?;
    let floor = floor_usd
        .checked_mul(scale(snapshot.decimals, token_decimals)?)
        .ok_or(GiftCardError::MathOverflow)?;
    Ok(scaled > floor)
}

fn scale(price_decimals: u32, token_decimals: u32) -> Result<i128, GiftCardError> {
    let exponent = price_decimals
        .checked_add(token_decimals)
        .ok_or(GiftCardError::MathOverflow)?;
    10i128.checked_pow(exponent).ok_or(GiftCardError::MathOverflow)
}
