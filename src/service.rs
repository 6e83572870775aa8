pub mod auction_house;
pub mod bidding_agent;

pub use self::{auction_house::*, bidding_agent::*};
use anyhow::{bail, Result};

/// Run one unit of service work, turning a panic into an error
///
/// Whatever goes wrong inside `f` comes back as an `Err`, so the caller
/// can log it and still terminate normally.
pub fn run_guarded<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_owned());
            bail!("service panicked: {}", message)
        }
        Ok(res) => res,
    }
}
