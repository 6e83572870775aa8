use super::*;
use crate::{auction::BidAccepted, auction::BidRejection, config::Config};
use anyhow::{bail, Context};
use reqwest::{blocking::Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Auction house client talking to the REST API over HTTP
pub struct HttpAuctionHouseClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl std::fmt::Debug for HttpAuctionHouseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAuctionHouseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpAuctionHouseClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid API base URL {}", config.api_base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("API base URL {} cannot hold a path", base_url);
        }

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// `base_url` extended with `segments`, each one percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn new_shared(config: &Config) -> anyhow::Result<SharedAuctionHouseClient> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Send a request and hand back the raw status and body
    ///
    /// Every response is logged here, before anyone looks at it.
    fn execute(
        &self,
        what: &'static str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<(u16, String), CallError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| CallError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| CallError::Transport(e.to_string()))?;
        info!(what, status, %body, "api response");
        Ok((status, body))
    }
}

impl AuctionHouseClient for HttpAuctionHouseClient {
    fn list_my_bids(&self, sale_filter: SaleIdRef) -> Result<BidList, CallError> {
        let url = self.endpoint(&["api", "user", "bids"]);
        debug!(%url, sale_filter, "listing bids");
        let (status, body) = self.execute(
            "list_my_bids",
            self.client.get(url).query(&[("sale", sale_filter)]),
        )?;
        interpret_ok(status, &body)
    }

    fn get_auction(&self, sale_id: SaleIdRef) -> Result<Auction, CallError> {
        let url = self.endpoint(&["api", "sales", sale_id]);
        debug!(%url, "fetching auction");
        let (status, body) = self.execute("get_auction", self.client.get(url))?;
        interpret_ok(status, &body)
    }

    fn place_bid(&self, auction_id: SaleIdRef, amount: Amount) -> Result<BidResult, CallError> {
        let url = self.endpoint(&["api", "sales", auction_id, "bids"]);
        debug!(%url, amount, "sending bid");
        let (status, body) = self.execute(
            "place_bid",
            self.client.post(url).form(&[("maxAmount", amount)]),
        )?;
        interpret_bid_response(status, &body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, CallError> {
    serde_json::from_str(body).map_err(|e| CallError::Decode(e.to_string()))
}

/// A plain `200 OK` carrying `T`; any other status is a failed call
pub fn interpret_ok<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, CallError> {
    if status != StatusCode::OK.as_u16() {
        return Err(CallError::Status {
            status,
            body: body.to_owned(),
        });
    }
    decode(body)
}

/// Bids come back either accepted (200) or as a structured rejection (422)
pub fn interpret_bid_response(status: u16, body: &str) -> Result<BidResult, CallError> {
    if status == StatusCode::OK.as_u16() {
        decode::<BidAccepted>(body).map(BidResult::Accepted)
    } else if status == StatusCode::UNPROCESSABLE_ENTITY.as_u16() {
        decode::<BidRejection>(body).map(BidResult::Rejected)
    } else {
        warn!(status, %body, "bid call failed");
        Err(CallError::Status {
            status,
            body: body.to_owned(),
        })
    }
}
