use serde::Deserialize;

use super::{fetch, require_ok, Coordinates, HttpGet, LookupError, PassList, Stage};

/// Literal body the prediction service sends for out-of-range coordinates
const INVALID_COORDINATES: &str = "invalid coordinates";

#[derive(Debug, Deserialize)]
struct PassesReply {
    response: PassList,
}

/// Fetch upcoming passes over `coords` from the service at `url_template`
/// (`{lat}` and `{lon}` are substituted)
pub async fn resolve_pass_times(
    http: &dyn HttpGet,
    url_template: &str,
    coords: Coordinates,
) -> Result<PassList, LookupError> {
    let url = url_template
        .replace("{lat}", &coords.latitude.to_string())
        .replace("{lon}", &coords.longitude.to_string());
    let response = fetch(http, Stage::PassTimes, &url).await?;

    // sentinel takes precedence over the status code
    if response.body == INVALID_COORDINATES {
        return Err(LookupError::InvalidCoordinates);
    }
    let body = require_ok(Stage::PassTimes, response)?;

    let reply: PassesReply =
        serde_json::from_str(&body).map_err(|e| LookupError::parse(Stage::PassTimes, e))?;

    log::debug!("{} passes predicted", reply.response.len());
    Ok(reply.response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::mock::MockTransport;
    use crate::lookup::PassWindow;
    use serde_json::json;

    const TEMPLATE: &str = "https://iss-flyover.herokuapp.com/json/?lat={lat}&lon={lon}";
    const PREFIX: &str = "https://iss-flyover.herokuapp.com/json/";

    fn kingston() -> Coordinates {
        Coordinates {
            latitude: 44.224,
            longitude: -76.498,
        }
    }

    #[tokio::test]
    async fn returns_response_array_verbatim() {
        let http = MockTransport::new().respond(
            PREFIX,
            200,
            r#"{"message":"success","request":{"passes":2},
                "response":[{"risetime":1234,"duration":600},{"risetime":99,"extra":"kept"}]}"#,
        );
        let passes = resolve_pass_times(&http, TEMPLATE, kingston()).await.unwrap();
        assert_eq!(
            passes,
            vec![
                PassWindow(json!({"risetime":1234,"duration":600})),
                PassWindow(json!({"risetime":99,"extra":"kept"})),
            ]
        );
        assert_eq!(
            http.requests(),
            vec![
                "https://iss-flyover.herokuapp.com/json/?lat=44.224&lon=-76.498".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn invalid_coordinates_sentinel_on_200() {
        let http = MockTransport::new().respond(PREFIX, 200, "invalid coordinates");
        let err = resolve_pass_times(&http, TEMPLATE, kingston())
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidCoordinates));
        assert_eq!(err.to_string(), "invalid coordinates");
    }

    #[tokio::test]
    async fn invalid_coordinates_sentinel_beats_status() {
        for status in [400, 404, 500] {
            let http = MockTransport::new().respond(PREFIX, status, "invalid coordinates");
            let err = resolve_pass_times(&http, TEMPLATE, kingston())
                .await
                .unwrap_err();
            assert!(matches!(err, LookupError::InvalidCoordinates), "status {}", status);
        }
    }

    #[tokio::test]
    async fn sentinel_must_match_exactly() {
        let http = MockTransport::new().respond(PREFIX, 400, "invalid coordinates\n");
        let err = resolve_pass_times(&http, TEMPLATE, kingston())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::HttpStatus {
                stage: Stage::PassTimes,
                status: 400,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn non_200_carries_status_and_body() {
        let http = MockTransport::new().respond(PREFIX, 503, "Application Error");
        let err = resolve_pass_times(&http, TEMPLATE, kingston())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status Code 503 when fetching ISS pass times: Application Error"
        );
    }

    #[tokio::test]
    async fn missing_response_is_parse_error() {
        let http = MockTransport::new().respond(PREFIX, 200, r#"{"message":"success"}"#);
        let err = resolve_pass_times(&http, TEMPLATE, kingston())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::Parse {
                stage: Stage::PassTimes,
                ..
            }
        ));
    }
}
