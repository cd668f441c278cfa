// --- File: crates/pingrelay_common/src/models.rs ---

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the single device slot the relay supports.
pub const PRIMARY_RECEIVER: &str = "primary_receiver";

/// The currently registered receiver device.
///
/// There is at most one of these at a time; registering again replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
    /// FCM registration token of the receiving device
    pub token: String,

    /// Set by the store when the token was written
    pub last_updated: DateTime<Utc>,
}

impl DeviceRegistration {
    pub fn new(token: impl Into<String>, last_updated: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            last_updated,
        }
    }
}

/// JSON body of every gateway response, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    /// Human readable outcome
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_registration_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(DeviceRegistration::new("abc", at)).unwrap();

        assert_eq!(json["token"], "abc");
        assert_eq!(json["lastUpdated"], "2025-03-01T12:00:00Z");
    }
}
