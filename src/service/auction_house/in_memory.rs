use super::*;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Fake in-memory auction house.
///
/// Answers with scripted responses and records every bid sent to it.
/// Useful for unit-tests.
#[derive(Default)]
pub struct InMemoryAuctionHouseClient {
    bids: Mutex<Option<Result<BidList, CallError>>>,
    auction: Mutex<Option<Result<Auction, CallError>>>,
    bid_responses: Mutex<VecDeque<Result<BidResult, CallError>>>,
    calls: Mutex<Vec<Call>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ListMyBids(String),
    GetAuction(String),
    PlaceBid(String, Amount),
}

impl InMemoryAuctionHouseClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bids(self, bids: Result<BidList, CallError>) -> Self {
        *self.bids.lock() = Some(bids);
        self
    }

    pub fn with_auction(self, auction: Result<Auction, CallError>) -> Self {
        *self.auction.lock() = Some(auction);
        self
    }

    /// Queue the answer to the next `place_bid` call
    pub fn with_bid_response(self, response: Result<BidResult, CallError>) -> Self {
        self.bid_responses.lock().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Amounts of every bid placed, in order
    pub fn placed_bids(&self) -> Vec<Amount> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::PlaceBid(_, amount) => Some(*amount),
                _ => None,
            })
            .collect()
    }
}

fn unscripted(what: &str) -> CallError {
    CallError::Transport(format!("no scripted response for {}", what))
}

impl AuctionHouseClient for InMemoryAuctionHouseClient {
    fn list_my_bids(&self, sale_filter: SaleIdRef) -> Result<BidList, CallError> {
        self.calls
            .lock()
            .push(Call::ListMyBids(sale_filter.to_owned()));
        self.bids
            .lock()
            .take()
            .unwrap_or_else(|| Err(unscripted("list_my_bids")))
    }

    fn get_auction(&self, sale_id: SaleIdRef) -> Result<Auction, CallError> {
        self.calls.lock().push(Call::GetAuction(sale_id.to_owned()));
        self.auction
            .lock()
            .take()
            .unwrap_or_else(|| Err(unscripted("get_auction")))
    }

    fn place_bid(&self, auction_id: SaleIdRef, amount: Amount) -> Result<BidResult, CallError> {
        self.calls
            .lock()
            .push(Call::PlaceBid(auction_id.to_owned(), amount));
        self.bid_responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("place_bid")))
    }
}
