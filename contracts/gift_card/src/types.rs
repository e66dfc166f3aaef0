use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// GiftCardConfig
    Config,
    /// u64, id handed to the next mint
    NextTokenId,
    /// i128, value held on behalf of live cards
    Custody,
    /// token_id -> GiftCard
    Card(u64),
    /// owner -> u32 live card count
    Balance(Address),
    /// token_id -> Address allowed to move or redeem that card
    Approval(u64),
    /// (owner, operator) -> bool
    Operator(Address, Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CardStatus {
    Minted = 0,
    Redeemed = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GiftCard {
    pub owner: Address,
    /// Native token units locked at mint; zero once redeemed.
    pub value: i128,
    pub text: String,
    pub minted_at: u64,
    pub status: CardStatus,
}

impl GiftCard {
    pub fn is_live(&self) -> bool {
        self.status == CardStatus::Minted
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GiftCardConfig {
    pub admin: Address,
    /// Aggregator reporting the USD price of the native token.
    pub price_feed: Address,
    /// Token contract deposits are paid in.
    pub native_token: Address,
    pub token_decimals: u32,
    /// Deposits must be strictly above this many native units.
    pub min_deposit: i128,
    /// Deposits must be worth strictly more than this many USD; 0 disables the check.
    pub min_usd: i128,
    /// Readings older than this many seconds are refused; 0 disables the check.
    pub max_price_age: u64,
}

/// Answer returned by the aggregator interface.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// A validated price reading. Never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PriceSnapshot {
    pub price: i128,
    pub decimals: u32,
    pub updated_at: u64,
}

impl PriceSnapshot {
    /// Seconds since the feed last updated, as seen at `now`.
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.updated_at)
    }
}
