//! GiftCard Contract
//!
//! Gift cards as NFTs. Minting locks a deposit of the native token inside the
//! contract; redeeming burns the card and pays the locked value out to the
//! caller. A price feed converts locked value into USD for the card artwork
//! and for an optional USD floor on new deposits.

#![no_std]

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String};

mod errors;
mod events;
mod metadata;
mod oracle;
mod storage;
pub mod types;


pub use crate::errors::GiftCardError;
use crate::types::*;

const NAME: &str = "GiftCard";
const SYMBOL: &str = "GCN";

#[contract]
pub struct GiftCardContract;

#[contractimpl]
impl GiftCardContract {
    // ==================== INITIALIZATION ====================

    /// Initialize the contract with its price feed, deposit token and floors.
    pub fn initialize(
        env: Env,
        admin: Address,
        price_feed: Address,
        native_token: Address,
        min_deposit: i128,
        min_usd: i128,
        max_price_age: u64,
    ) -> Result<(), GiftCardError> {
        if storage::has_config(&env) {
            return Err(GiftCardError::AlreadyInitialized);
        }
        admin.require_auth();

        if min_deposit < 0 || min_usd < 0 {
            return Err(GiftCardError::InvalidConfig);
        }

        let token_decimals = token::Client::new(&env, &native_token).decimals();

        let config = GiftCardConfig {
            admin,
            price_feed,
            native_token,
            token_decimals,
            min_deposit,
            min_usd,
            max_price_age,
        };
        storage::set_config(&env, &config);
        storage::set_custody(&env, 0);
        storage::bump_instance(&env);

        Ok(())
    }

    // ==================== MINT / REDEEM ====================

    /// Mint a card for `to`, locking `deposit` native units paid by `payer`.
    pub fn mint(
        env: Env,
        payer: Address,
        to: Address,
        text: String,
        deposit: i128,
    ) -> Result<u64, GiftCardError> {
        payer.require_auth();
        let config = storage::get_config(&env)?;

        metadata::validate_text(&text)?;
        if deposit <= config.min_deposit {
            return Err(GiftCardError::InsufficientFunds);
        }
        if config.min_usd > 0 {
            let snapshot = oracle::latest_price(&env, &config)?;
            if !oracle::exceeds_usd(deposit, &snapshot, config.token_decimals, config.min_usd)? {
                return Err(GiftCardError::InsufficientFunds);
            }
        }

        let custody = storage::get_custody(&env)
            .checked_add(deposit)
            .ok_or(GiftCardError::MathOverflow)?;
        let owner_balance = storage::get_balance(&env, &to)
            .checked_add(1)
            .ok_or(GiftCardError::MathOverflow)?;
        let token_id = storage::allocate_token_id(&env)?;

        let card = GiftCard {
            owner: to.clone(),
            value: deposit,
            text: text.clone(),
            minted_at: env.ledger().timestamp(),
            status: CardStatus::Minted,
        };
        storage::set_card(&env, token_id, &card);
        storage::set_balance(&env, &to, owner_balance);
        storage::set_custody(&env, custody);
        storage::bump_instance(&env);

        events::minted(&env, &to, token_id, &text, deposit);

        // State is final before the deposit moves.
        token::Client::new(&env, &config.native_token).transfer(
            &payer,
            &env.current_contract_address(),
            &deposit,
        );

        log!(&env, "Gift card minted: id={} value={}", token_id, deposit);
        Ok(token_id)
    }

    /// Burn a card and pay its locked value to `caller`.
    ///
    /// `caller` must own the card, be approved for it, or be an operator of
    /// its owner. The card is retired before any value leaves the contract,
    /// so a nested call for the same id finds nothing to redeem.
    pub fn redeem(env: Env, caller: Address, token_id: u64) -> Result<i128, GiftCardError> {
        caller.require_auth();
        let config = storage::get_config(&env)?;

        let mut card = Self::live_card(&env, token_id)?;
        if !Self::is_authorized(&env, &caller, &card.owner, token_id) {
            return Err(GiftCardError::NotOwner);
        }

        let amount = card.value;
        let custody = storage::get_custody(&env)
            .checked_sub(amount)
            .ok_or(GiftCardError::MathOverflow)?;
        let owner_balance = storage::get_balance(&env, &card.owner).saturating_sub(1);

        card.status = CardStatus::Redeemed;
        card.value = 0;
        storage::set_card(&env, token_id, &card);
        storage::clear_approval(&env, token_id);
        storage::set_balance(&env, &card.owner, owner_balance);
        storage::set_custody(&env, custody);
        storage::bump_instance(&env);

        events::redeemed(&env, &card.owner, token_id, amount);

        token::Client::new(&env, &config.native_token).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        log!(&env, "Gift card redeemed: id={} amount={}", token_id, amount);
        Ok(amount)
    }

    // ==================== CARD VIEWS ====================

    /// Native units locked in a live card.
    pub fn value_of(env: Env, token_id: u64) -> Result<i128, GiftCardError> {
        Ok(Self::live_card(&env, token_id)?.value)
    }

    /// Self-contained `data:` URI describing the card.
    pub fn token_uri(env: Env, token_id: u64) -> Result<String, GiftCardError> {
        let config = storage::get_config(&env)?;
        let card = storage::get_card(&env, token_id).ok_or(GiftCardError::TokenNotFound)?;
        if !card.is_live() {
            return Err(GiftCardError::TokenBurned);
        }

        let snapshot = oracle::latest_price(&env, &config)?;
        let usd = oracle::usd_value(card.value, &snapshot, config.token_decimals)?;
        metadata::token_uri(&env, &card.text, usd)
    }

    pub fn get_card(env: Env, token_id: u64) -> Result<GiftCard, GiftCardError> {
        storage::get_card(&env, token_id).ok_or(GiftCardError::TokenNotFound)
    }

    /// Total value held on behalf of live cards.
    pub fn custody(env: Env) -> i128 {
        storage::get_custody(&env)
    }

    pub fn next_token_id(env: Env) -> u64 {
        storage::get_next_token_id(&env)
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, SYMBOL)
    }

    // ==================== OWNERSHIP ====================

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, GiftCardError> {
        Ok(Self::live_card(&env, token_id)?.owner)
    }

    pub fn balance(env: Env, owner: Address) -> u32 {
        storage::get_balance(&env, &owner)
    }

    /// Let `approved` move or redeem a single card.
    pub fn approve(
        env: Env,
        owner: Address,
        approved: Address,
        token_id: u64,
    ) -> Result<(), GiftCardError> {
        owner.require_auth();

        let card = Self::live_card(&env, token_id)?;
        if card.owner != owner && !storage::is_operator(&env, &card.owner, &owner) {
            return Err(GiftCardError::NotOwner);
        }

        storage::set_approval(&env, token_id, &approved);
        events::approve(&env, &card.owner, token_id, &approved);
        Ok(())
    }

    pub fn get_approved(env: Env, token_id: u64) -> Result<Option<Address>, GiftCardError> {
        Self::live_card(&env, token_id)?;
        Ok(storage::get_approval(&env, token_id))
    }

    /// Let `operator` move or redeem every card `owner` holds.
    pub fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();
        storage::set_operator(&env, &owner, &operator, approved);
        events::approve_for_all(&env, &owner, &operator, approved);
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        storage::is_operator(&env, &owner, &operator)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), GiftCardError> {
        spender.require_auth();

        let mut card = Self::live_card(&env, token_id)?;
        if card.owner != from || !Self::is_authorized(&env, &spender, &from, token_id) {
            return Err(GiftCardError::NotOwner);
        }

        if from != to {
            let to_balance = storage::get_balance(&env, &to)
                .checked_add(1)
                .ok_or(GiftCardError::MathOverflow)?;
            let from_balance = storage::get_balance(&env, &from).saturating_sub(1);
            storage::set_balance(&env, &from, from_balance);
            storage::set_balance(&env, &to, to_balance);
        }

        card.owner = to.clone();
        storage::set_card(&env, token_id, &card);
        storage::clear_approval(&env, token_id);

        events::transfer(&env, &from, &to, token_id);
        Ok(())
    }

    // ==================== PRICE FEED ====================

    pub fn get_price_feed(env: Env) -> Result<Address, GiftCardError> {
        Ok(storage::get_config(&env)?.price_feed)
    }

    /// Latest usable answer from the price feed, in feed decimals.
    pub fn get_latest_price(env: Env) -> Result<i128, GiftCardError> {
        let config = storage::get_config(&env)?;
        Ok(oracle::latest_price(&env, &config)?.price)
    }

    // ==================== ADMINISTRATION ====================

    pub fn get_config(env: Env) -> Result<GiftCardConfig, GiftCardError> {
        storage::get_config(&env)
    }

    /// Update deposit floors and the staleness window (admin only).
    pub fn update_config(
        env: Env,
        admin: Address,
        min_deposit: Option<i128>,
        min_usd: Option<i128>,
        max_price_age: Option<u64>,
    ) -> Result<(), GiftCardError> {
        let mut config = Self::require_admin(&env, &admin)?;

        if let Some(amount) = min_deposit {
            config.min_deposit = amount;
        }
        if let Some(amount) = min_usd {
            config.min_usd = amount;
        }
        if let Some(age) = max_price_age {
            config.max_price_age = age;
        }
        if config.min_deposit < 0 || config.min_usd < 0 {
            return Err(GiftCardError::InvalidConfig);
        }

        storage::set_config(&env, &config);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Point the contract at a different price feed (admin only).
    pub fn set_price_feed(env: Env, admin: Address, price_feed: Address) -> Result<(), GiftCardError> {
        let mut config = Self::require_admin(&env, &admin)?;
        config.price_feed = price_feed;
        storage::set_config(&env, &config);
        storage::bump_instance(&env);
        Ok(())
    }

    // ----------------------------------------------------------
    // Internal helpers
    // ----------------------------------------------------------

    fn require_admin(env: &Env, admin: &Address) -> Result<GiftCardConfig, GiftCardError> {
        admin.require_auth();
        let config = storage::get_config(env)?;
        if config.admin != *admin {
            return Err(GiftCardError::Unauthorized);
        }
        Ok(config)
    }

    fn live_card(env: &Env, token_id: u64) -> Result<GiftCard, GiftCardError> {
        storage::get_card(env, token_id)
            .filter(GiftCard::is_live)
            .ok_or(GiftCardError::TokenNotFound)
    }

    fn is_authorized(env: &Env, spender: &Address, owner: &Address, token_id: u64) -> bool {
        spender == owner
            || storage::get_approval(env, token_id).as_ref() == Some(spender)
            || storage::is_operator(env, owner, spender)
    }
}
