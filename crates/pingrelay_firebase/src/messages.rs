//! The two fixed alerts the relay can send.

use std::collections::HashMap;

use crate::client::{
    AndroidConfig, AndroidMessagePriority, AndroidNotification, FcmMessage, Message, Notification,
};

pub const NORMAL_TITLE: &str = "Ping! 👋";
pub const NORMAL_BODY: &str = "Just letting you know I'm thinking of you.";

pub const PANIC_TITLE: &str = "🚨 PANIC ALERT! 🚨";
pub const PANIC_BODY: &str = "This is an urgent alert. Please check in immediately.";

/// Value of the `type` data field, used by the receiving app to tell alerts apart
pub const PANIC_DATA_TYPE: &str = "panic";

/// Sound resource the receiving app ships for panic alerts
pub const PANIC_SOUND: &str = "alarm";

/// Channel the receiving app registers with high importance
pub const PANIC_CHANNEL_ID: &str = "high_importance_channel";

/// Which of the two alerts to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Normal,
    Panic,
}

impl AlertKind {
    /// Builds the complete FCM message for this alert.
    pub fn message(self, token: &str) -> FcmMessage {
        match self {
            AlertKind::Normal => normal_message(token),
            AlertKind::Panic => panic_message(token),
        }
    }
}

/// A friendly ping with default delivery options.
pub fn normal_message(token: &str) -> FcmMessage {
    FcmMessage {
        message: Message {
            token: token.to_string(),
            notification: Some(Notification {
                title: NORMAL_TITLE.to_string(),
                body: NORMAL_BODY.to_string(),
            }),
            data: None,
            android: None,
        },
    }
}

/// An urgent alert delivered at high priority on a dedicated channel.
pub fn panic_message(token: &str) -> FcmMessage {
    let data = HashMap::from([("type".to_string(), PANIC_DATA_TYPE.to_string())]);

    FcmMessage {
        message: Message {
            token: token.to_string(),
            notification: Some(Notification {
                title: PANIC_TITLE.to_string(),
                body: PANIC_BODY.to_string(),
            }),
            data: Some(data),
            android: Some(AndroidConfig {
                priority: Some(AndroidMessagePriority::High),
                notification: Some(AndroidNotification {
                    sound: Some(PANIC_SOUND.to_string()),
                    channel_id: Some(PANIC_CHANNEL_ID.to_string()),
                }),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normal_message_wire_format() {
        let json = serde_json::to_value(normal_message("abc")).unwrap();
        assert_eq!(
            json,
            json!({
                "message": {
                    "token": "abc",
                    "notification": {
                        "title": "Ping! 👋",
                        "body": "Just letting you know I'm thinking of you."
                    }
                }
            })
        );
    }

    #[test]
    fn test_panic_message_wire_format() {
        let json = serde_json::to_value(panic_message("abc")).unwrap();
        assert_eq!(
            json,
            json!({
                "message": {
                    "token": "abc",
                    "notification": {
                        "title": "🚨 PANIC ALERT! 🚨",
                        "body": "This is an urgent alert. Please check in immediately."
                    },
                    "data": { "type": "panic" },
                    "android": {
                        "priority": "HIGH",
                        "notification": {
                            "sound": "alarm",
                            "channel_id": "high_importance_channel"
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_alert_kind_selects_payload() {
        assert_eq!(AlertKind::Normal.message("t"), normal_message("t"));
        assert_eq!(AlertKind::Panic.message("t"), panic_message("t"));
    }
}
