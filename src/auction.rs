use serde::Deserialize;
use thiserror::Error;

pub type SaleId = String;
pub type SaleIdRef<'s> = &'s str;
pub type Amount = u64;

/// Rejection code the API uses when a max bid does not clear the current increment
pub const ERR_MAX_BID_BELOW_INCREMENT: &str = "ERR_MAX_BID_BELOW_INCREMENT";
pub const UNPROCESSABLE_STATUS: u16 = 422;

/// How much a corrective bid adds on top of the amount found in a rejection
pub const CORRECTIVE_BID_MARGIN: Amount = 3;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidSummary {
    pub sale_id: SaleId,
    pub is_leading_bid: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BidList {
    #[serde(default)]
    pub items: Vec<BidSummary>,
}

impl BidList {
    /// Only the first entry is ever acted upon
    pub fn first(&self) -> Option<&BidSummary> {
        self.items.first()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AuctionStatus {
    Active,
    Other(String),
}

impl From<String> for AuctionStatus {
    fn from(status: String) -> Self {
        if status == "active" {
            AuctionStatus::Active
        } else {
            AuctionStatus::Other(status)
        }
    }
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuctionStatus::Active => f.write_str("active"),
            AuctionStatus::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub id: SaleId,
    pub status: AuctionStatus,
    pub min_bid: Amount,
}

impl Auction {
    pub fn is_active(&self) -> bool {
        self.status == AuctionStatus::Active
    }

    /// Worth bidding on: open, and still cheaper than what we are willing to chase
    pub fn is_biddable(&self, min_bid_threshold: Amount) -> bool {
        self.is_active() && self.min_bid < min_bid_threshold
    }
}

/// A bid the API took
///
/// Anything besides the leading flag is kept as-is, so it can be logged.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidAccepted {
    pub is_leading_bid: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A structured refusal, returned with HTTP 422
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BidRejection {
    pub code: String,
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

impl BidRejection {
    pub fn is_below_increment(&self) -> bool {
        self.code == ERR_MAX_BID_BELOW_INCREMENT && self.status == UNPROCESSABLE_STATUS
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BidResult {
    Accepted(BidAccepted),
    Rejected(BidRejection),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no amount found in rejection message: {0:?}")]
    NoDigits(String),
    #[error("amount {0} in rejection message is out of range")]
    OutOfRange(String),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BidError {
    #[error("bid of {amount} does not exceed the minimum bid of {min_bid}")]
    TooLow { amount: Amount, min_bid: Amount },
    #[error("bid amount overflows")]
    Overflow,
}

/// Largest integer embedded anywhere in a free-text rejection message
///
/// `"current bid is 150, minimum increment 10"` yields `150`.
pub fn max_amount_in_message(message: &str) -> Result<Amount, ParseError> {
    let mut max = None;
    for digits in message
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
    {
        let amount: Amount = digits
            .parse()
            .map_err(|_| ParseError::OutOfRange(digits.to_owned()))?;
        max = Some(max.map_or(amount, |m: Amount| m.max(amount)));
    }
    max.ok_or_else(|| ParseError::NoDigits(message.to_owned()))
}

pub fn first_bid_amount(min_bid: Amount) -> Result<Amount, BidError> {
    min_bid.checked_add(1).ok_or(BidError::Overflow)
}

pub fn corrective_bid_amount(amount_to_beat: Amount) -> Result<Amount, BidError> {
    amount_to_beat
        .checked_add(CORRECTIVE_BID_MARGIN)
        .ok_or(BidError::Overflow)
}

pub fn ensure_valid_bid(amount: Amount, min_bid: Amount) -> Result<(), BidError> {
    if amount == 0 || amount <= min_bid {
        return Err(BidError::TooLow { amount, min_bid });
    }
    Ok(())
}
