use serde_json::Value;

use super::{fetch, require_ok, Coordinates, HttpGet, LookupError, Stage};

/// Geolocate `ip` through the service at `url_template` (`{ip}` is substituted)
pub async fn resolve_coordinates(
    http: &dyn HttpGet,
    url_template: &str,
    ip: &str,
) -> Result<Coordinates, LookupError> {
    let url = url_template.replace("{ip}", ip);
    let response = fetch(http, Stage::Coordinates, &url).await?;
    let body = require_ok(Stage::Coordinates, response)?;

    let reply: Value =
        serde_json::from_str(&body).map_err(|e| LookupError::parse(Stage::Coordinates, e))?;
    if !reply.is_object() {
        return Err(LookupError::invalid_field(
            Stage::Coordinates,
            "body",
            "expected a JSON object",
        ));
    }

    // the success flag is checked before any other field is interpreted
    if !reply.get("success").and_then(Value::as_bool).unwrap_or(false) {
        return Err(LookupError::GeolocationRejected {
            message: text_field(&reply, "message"),
            ip: text_field(&reply, "ip"),
        });
    }

    let latitude = number_field(&reply, "latitude")?;
    let longitude = number_field(&reply, "longitude")?;

    log::debug!("{} is at {}, {}", ip, latitude, longitude);
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

/// Strings verbatim, absent or null as empty, anything else as its JSON text
fn text_field(reply: &Value, field: &str) -> String {
    match reply.get(field) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn number_field(reply: &Value, field: &'static str) -> Result<f64, LookupError> {
    match reply.get(field) {
        None | Some(Value::Null) => Err(LookupError::missing_field(Stage::Coordinates, field)),
        Some(value) => value.as_f64().ok_or_else(|| {
            LookupError::invalid_field(
                Stage::Coordinates,
                field,
                &format!("{} is not a number", value),
            )
        }),
    }
}
