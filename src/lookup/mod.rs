mod error;
mod geo;
mod ip;
mod passes;
mod transport;
mod types;

pub use error::{LookupError, Stage};
pub use geo::resolve_coordinates;
pub use ip::resolve_my_ip;
pub use passes::resolve_pass_times;
pub use transport::{HttpGet, HttpResponse, ReqwestTransport};
pub use types::{Coordinates, PassList, PassWindow};

#[cfg(test)]
pub use transport::mock;

/// Single GET; a missing response becomes a transport error for `stage`
async fn fetch(http: &dyn HttpGet, stage: Stage, url: &str) -> Result<HttpResponse, LookupError> {
    http.get(url)
        .await
        .map_err(|e| LookupError::Transport {
            stage,
            message: e.to_string(),
        })
}

/// Body of a 200 response, or the status error carrying the raw body
fn require_ok(stage: Stage, response: HttpResponse) -> Result<String, LookupError> {
    if response.status != 200 {
        return Err(LookupError::HttpStatus {
            stage,
            status: response.status,
            body: response.body,
        });
    }
    Ok(response.body)
}
