use serde::Deserialize;

use super::{fetch, require_ok, HttpGet, LookupError, Stage};

#[derive(Debug, Deserialize)]
struct IpReply {
    ip: String,
}

/// Ask the IP-echo service at `url` for our public address
pub async fn resolve_my_ip(http: &dyn HttpGet, url: &str) -> Result<String, LookupError> {
    let response = fetch(http, Stage::Ip, url).await?;
    let body = require_ok(Stage::Ip, response)?;

    let reply: IpReply =
        serde_json::from_str(&body).map_err(|e| LookupError::parse(Stage::Ip, e))?;
    if reply.ip.is_empty() {
        return Err(LookupError::invalid_field(Stage::Ip, "ip", "empty string"));
    }

    log::debug!("public IP is {}", reply.ip);
    Ok(reply.ip)
}
