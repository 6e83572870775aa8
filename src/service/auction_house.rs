use std::sync::Arc;

use crate::auction::{Amount, Auction, BidList, BidResult, SaleIdRef};
use thiserror::Error;

mod http;
pub use self::http::*;

#[cfg(test)]
mod in_memory;
#[cfg(test)]
pub use self::in_memory::*;

/// A call to the auction house that did not produce a usable answer
#[derive(Error, Debug)]
pub enum CallError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// The remote auction API, as seen by the bidding agent
pub trait AuctionHouseClient {
    /// Our current bids, filtered to one sale
    fn list_my_bids(&self, sale_filter: SaleIdRef) -> Result<BidList, CallError>;

    fn get_auction(&self, sale_id: SaleIdRef) -> Result<Auction, CallError>;

    /// Submit a max bid
    ///
    /// A structured rejection is a successful call: it comes back as
    /// `BidResult::Rejected`, not as an `Err`.
    fn place_bid(&self, auction_id: SaleIdRef, amount: Amount) -> Result<BidResult, CallError>;
}

pub type SharedAuctionHouseClient = Arc<dyn AuctionHouseClient + Send + Sync + 'static>;
