//! Bidding Agent
//!
//! One pass of: check our bids, look at the auction, decide, bid, and
//! when the bid is refused for being below the increment, bid once more
//! with an amount taken from the refusal.
use crate::auction::{
    self, Amount, Auction, BidError, BidResult, BidSummary, ParseError, SaleId,
};
use crate::config::Config;
use crate::service::auction_house::{CallError, SharedAuctionHouseClient};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// What the agent needs to know to decide on a bid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentSettings {
    pub min_bid_threshold: Amount,
    pub sale_filter: String,
}

impl From<&Config> for AgentSettings {
    fn from(config: &Config) -> Self {
        Self {
            min_bid_threshold: config.min_bid_threshold,
            sale_filter: config.sale_filter.clone(),
        }
    }
}

/// Failures that end a pass and are surfaced to the caller
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("could not fetch auction {sale_id}: {source}")]
    AuctionUnavailable {
        sale_id: SaleId,
        #[source]
        source: CallError,
    },
    #[error("cannot compute a corrective bid: {0}")]
    MalformedRejection(#[from] ParseError),
    #[error("refusing to bid: {0}")]
    InvalidBid(#[from] BidError),
}

/// A single bid we sent, and what came back
#[derive(Debug)]
pub struct BidAttempt {
    pub auction_id: SaleId,
    pub amount: Amount,
    pub result: Result<BidResult, CallError>,
}

impl BidAttempt {
    fn rejection_below_increment(&self) -> Option<&auction::BidRejection> {
        match &self.result {
            Ok(BidResult::Rejected(rejection)) if rejection.is_below_increment() => {
                Some(rejection)
            }
            _ => None,
        }
    }
}

/// How a pass ended
#[derive(Debug)]
pub enum PassOutcome {
    /// Listing our bids failed; nothing else was attempted
    BidsUnavailable,
    /// We hold no bids for the filtered sale
    NoBids,
    /// Our bid is already the leading one
    AlreadyLeading(SaleId),
    /// Auction closed, or too expensive
    NotEligible(Auction),
    /// One bid placed, whatever its outcome
    Bid(BidAttempt),
    /// First bid refused as below the increment, then one corrective bid
    Corrected {
        initial: BidAttempt,
        corrective: BidAttempt,
    },
}

impl PassOutcome {
    /// The sale the pass ended on, when it got that far
    pub fn sale_id(&self) -> Option<&str> {
        match self {
            PassOutcome::BidsUnavailable | PassOutcome::NoBids => None,
            PassOutcome::AlreadyLeading(sale_id) => Some(sale_id.as_str()),
            PassOutcome::NotEligible(auction) => Some(auction.id.as_str()),
            PassOutcome::Bid(attempt) | PassOutcome::Corrected { initial: attempt, .. } => {
                Some(attempt.auction_id.as_str())
            }
        }
    }

    /// Every bid sent during the pass, in order
    pub fn bids(&self) -> Vec<Amount> {
        match self {
            PassOutcome::Bid(attempt) => vec![attempt.amount],
            PassOutcome::Corrected {
                initial,
                corrective,
            } => vec![initial.amount, corrective.amount],
            _ => vec![],
        }
    }
}

pub struct BiddingAgent {
    client: SharedAuctionHouseClient,
    settings: AgentSettings,
}

impl BiddingAgent {
    pub fn new(client: SharedAuctionHouseClient, settings: AgentSettings) -> Self {
        Self { client, settings }
    }

    /// Run a single bidding pass
    ///
    /// Call failures are logged and end the pass quietly, except for the
    /// auction fetch, which is returned as `AgentError::AuctionUnavailable`.
    pub fn run_once(&self) -> Result<PassOutcome, AgentError> {
        let bids = match self.client.list_my_bids(&self.settings.sale_filter) {
            Ok(bids) => bids,
            Err(e) => {
                warn!(error = %e, "could not list our bids");
                return Ok(PassOutcome::BidsUnavailable);
            }
        };

        let BidSummary {
            sale_id,
            is_leading_bid,
        } = match bids.first() {
            Some(summary) => summary.clone(),
            None => {
                info!(sale_filter = %self.settings.sale_filter, "no bids to look after");
                return Ok(PassOutcome::NoBids);
            }
        };

        if is_leading_bid {
            info!(%sale_id, "Do nothing... we hold the leading bid");
            return Ok(PassOutcome::AlreadyLeading(sale_id));
        }

        let auction = self
            .client
            .get_auction(&sale_id)
            .map_err(|source| AgentError::AuctionUnavailable {
                sale_id: sale_id.clone(),
                source,
            })?;
        debug!(?auction, "auction");

        if !auction.is_biddable(self.settings.min_bid_threshold) {
            info!(
                auction_id = %auction.id,
                status = %auction.status,
                min_bid = auction.min_bid,
                threshold = self.settings.min_bid_threshold,
                "not bidding"
            );
            return Ok(PassOutcome::NotEligible(auction));
        }

        let initial = self.bid(&auction, auction::first_bid_amount(auction.min_bid)?)?;

        let amount_to_beat = match initial.rejection_below_increment() {
            Some(rejection) => auction::max_amount_in_message(&rejection.message)?,
            None => return Ok(PassOutcome::Bid(initial)),
        };

        let corrective_amount = auction::corrective_bid_amount(amount_to_beat)?;
        info!(
            auction_id = %auction.id,
            amount_to_beat,
            corrective_amount,
            "bid below increment, bidding again"
        );
        // one corrective bid per pass, no matter how it goes
        let corrective = self.bid(&auction, corrective_amount)?;

        Ok(PassOutcome::Corrected {
            initial,
            corrective,
        })
    }

    fn bid(&self, auction: &Auction, amount: Amount) -> Result<BidAttempt, AgentError> {
        auction::ensure_valid_bid(amount, auction.min_bid)?;

        let result = self.client.place_bid(&auction.id, amount);
        match &result {
            Ok(BidResult::Accepted(accepted)) => match accepted.is_leading_bid {
                Some(leading) => info!(
                    auction_id = %auction.id,
                    amount,
                    leading,
                    extra = ?accepted.extra,
                    "bid accepted"
                ),
                None => warn!(
                    auction_id = %auction.id,
                    amount,
                    ?accepted,
                    "bid accepted, but the response has no leading flag"
                ),
            },
            Ok(BidResult::Rejected(rejection)) => info!(
                auction_id = %auction.id,
                amount,
                code = %rejection.code,
                status = rejection.status,
                message = %rejection.message,
                "bid rejected"
            ),
            Err(e) => error!(auction_id = %auction.id, amount, error = %e, "bid failed"),
        }

        Ok(BidAttempt {
            auction_id: auction.id.clone(),
            amount,
            result,
        })
    }
}
