use strum_macros::Display;
use thiserror::Error;

/// Which upstream lookup an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[strum(to_string = "IP")]
    Ip,
    #[strum(to_string = "Coordinates")]
    Coordinates,
    #[strum(to_string = "ISS pass times")]
    PassTimes,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("error: {message} when fetching {stage}")]
    Transport { stage: Stage, message: String },
    #[error("Status Code {status} when fetching {stage}: {body}")]
    HttpStatus {
        stage: Stage,
        status: u16,
        body: String,
    },
    #[error(
        "Success status was false. Server message says: {message} when fetching for IP {ip}"
    )]
    GeolocationRejected { message: String, ip: String },
    #[error("invalid coordinates")]
    InvalidCoordinates,
    #[error("failed to parse {stage} response: {source}")]
    Parse {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },
}

impl LookupError {
    pub fn parse(stage: Stage, source: serde_json::Error) -> Self {
        LookupError::Parse { stage, source }
    }

    /// Parse error for a body that is valid JSON but lacks a usable field.
    pub fn missing_field(stage: Stage, field: &'static str) -> Self {
        LookupError::Parse {
            stage,
            source: <serde_json::Error as serde::de::Error>::missing_field(field),
        }
    }

    /// Parse error for a field that is present but unusable
    pub fn invalid_field(stage: Stage, field: &'static str, reason: &str) -> Self {
        LookupError::Parse {
            stage,
            source: <serde_json::Error as serde::de::Error>::custom(format!(
                "invalid value for `{}`: {}",
                field, reason
            )),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            LookupError::Transport { stage, .. }
            | LookupError::HttpStatus { stage, .. }
            | LookupError::Parse { stage, .. } => *stage,
            LookupError::GeolocationRejected { .. } => Stage::Coordinates,
            LookupError::InvalidCoordinates => Stage::PassTimes,
        }
    }
}
