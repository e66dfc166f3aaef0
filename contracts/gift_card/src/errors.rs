use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GiftCardError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// The card text is empty.
    EmptyText = 3,
    /// The card text does not fit the rendered artwork.
    TextTooLong = 4,
    /// The deposit does not clear the configured floor.
    InsufficientFunds = 5,
    /// The caller is neither owner, approved address nor operator.
    NotOwner = 6,
    /// The token was never minted, or no longer holds value.
    TokenNotFound = 7,
    /// The token was redeemed and its metadata is gone.
    TokenBurned = 8,
    /// The price feed did not return a usable reading.
    OracleUnavailable = 9,
    /// Checked arithmetic failed, or all token ids are in use.
    MathOverflow = 10,
    /// The rendered metadata does not fit its buffer.
    MetadataOverflow = 11,
    Unauthorized = 12,
    InvalidConfig = 13,
    /// The card text is not UTF-8 or holds control characters.
    InvalidText = 14,
}
