use strum_macros::Display;
use thiserror::Error;

use crate::config::EndpointsConfig;
use crate::lookup::{
    resolve_coordinates, resolve_my_ip, resolve_pass_times, Coordinates, HttpGet, LookupError,
    PassList,
};

/// Shown to the user whenever any lookup in the chain fails
pub const USER_MESSAGE: &str = "It didn't work!";

/// A failed chain: the fixed user message plus the untouched stage error
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ChainFailure {
    pub message: &'static str,
    #[source]
    pub source: LookupError,
}

impl From<LookupError> for ChainFailure {
    fn from(source: LookupError) -> Self {
        log::debug!("{} lookup failed: {}", source.stage(), source);
        ChainFailure {
            message: USER_MESSAGE,
            source,
        }
    }
}

#[derive(Debug, Display)]
enum ChainState {
    Start,
    HaveIp(String),
    HaveCoords(Coordinates),
    Done(PassList),
}

/// Runs IP -> coordinates -> passes, one request at a time, stopping at the first failure
pub struct PassChain<'a> {
    http: &'a dyn HttpGet,
    endpoints: &'a EndpointsConfig,
}

impl<'a> PassChain<'a> {
    pub fn new(http: &'a dyn HttpGet, endpoints: &'a EndpointsConfig) -> Self {
        Self { http, endpoints }
    }

    pub async fn next_passes_for_caller(&self) -> Result<PassList, ChainFailure> {
        let mut state = ChainState::Start;
        loop {
            state = match state {
                ChainState::Start => {
                    ChainState::HaveIp(resolve_my_ip(self.http, &self.endpoints.ip_url).await?)
                }
                ChainState::HaveIp(ip) => ChainState::HaveCoords(
                    resolve_coordinates(self.http, &self.endpoints.geo_url, &ip).await?,
                ),
                ChainState::HaveCoords(coords) => ChainState::Done(
                    resolve_pass_times(self.http, &self.endpoints.passes_url, coords).await?,
                ),
                ChainState::Done(passes) => return Ok(passes),
            };
            log::debug!("chain -> {}", state);
        }
    }
}
