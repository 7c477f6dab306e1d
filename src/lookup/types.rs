use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One predicted overhead pass, kept exactly as the prediction service sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassWindow(pub serde_json::Value);

impl PassWindow {
    /// Rise time in unix seconds, if the record carries one
    pub fn risetime(&self) -> Option<i64> {
        self.0.get("risetime").and_then(|v| v.as_i64())
    }

    /// Visibility duration in seconds, if the record carries one
    pub fn duration(&self) -> Option<u64> {
        self.0.get("duration").and_then(|v| v.as_u64())
    }
}

/// Passes in the order returned upstream
pub type PassList = Vec<PassWindow>;
