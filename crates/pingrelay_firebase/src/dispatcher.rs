//! Notification dispatcher
//!
//! Turns "send a normal ping" or "send a panic alert" into one FCM send for a
//! given device token. There are no retries: a failed send is reported to the
//! caller as a delivery error.

use pingrelay_common::{delivery_error, RelayError};
use std::sync::Arc;
use tracing::{error, info};

use crate::client::PushSender;
use crate::messages::AlertKind;

#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: Arc<dyn PushSender>,
}

impl NotificationDispatcher {
    pub fn new(sender: Arc<dyn PushSender>) -> Self {
        Self { sender }
    }

    /// Sends the friendly "Ping!" notification to `token`.
    pub async fn send_normal(&self, token: &str) -> Result<String, RelayError> {
        self.dispatch(AlertKind::Normal, token).await
    }

    /// Sends the high priority panic alert to `token`.
    pub async fn send_panic(&self, token: &str) -> Result<String, RelayError> {
        self.dispatch(AlertKind::Panic, token).await
    }

    /// Builds the payload for `kind` and hands it to the push sender once.
    pub async fn dispatch(&self, kind: AlertKind, token: &str) -> Result<String, RelayError> {
        match self.sender.send(kind.message(token)).await {
            Ok(message_id) => {
                info!("{:?} notification accepted as {}", kind, message_id);
                Ok(message_id)
            }
            Err(err) => {
                error!("Failed to send {:?} notification: {}", kind, err);
                Err(delivery_error(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AndroidMessagePriority, FirebaseError, MockPushSender};
    use crate::messages::{NORMAL_TITLE, PANIC_DATA_TYPE};
    use pingrelay_common::HttpStatusCode;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_send_normal_sends_ping_to_token() {
        let mut sender = MockPushSender::new();
        sender
            .expect_send()
            .withf(|m| {
                m.message.token == "abc"
                    && m.message.notification.as_ref().map(|n| n.title.as_str())
                        == Some(NORMAL_TITLE)
            })
            .times(1)
            .returning(|_| Ok("projects/p/messages/1".to_string()));

        let dispatcher = NotificationDispatcher::new(Arc::new(sender));
        let id = dispatcher.send_normal("abc").await.unwrap();
        assert_eq!(id, "projects/p/messages/1");
    }

    #[tokio::test]
    async fn test_send_panic_always_carries_panic_hints() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let recorded = sent.clone();
        let mut sender = MockPushSender::new();
        sender.expect_send().times(4).returning(move |m| {
            recorded.lock().unwrap().push(m);
            Ok("id".to_string())
        });

        let dispatcher = NotificationDispatcher::new(Arc::new(sender));
        dispatcher.send_normal("abc").await.unwrap();
        dispatcher.send_panic("abc").await.unwrap();
        dispatcher.send_normal("abc").await.unwrap();
        dispatcher.send_panic("abc").await.unwrap();

        let sent = sent.lock().unwrap();
        let panics: Vec<_> = sent
            .iter()
            .filter(|m| m.message.data.is_some())
            .collect();
        assert_eq!(panics.len(), 2);
        for message in panics {
            let data = message.message.data.as_ref().unwrap();
            assert_eq!(data.get("type").map(String::as_str), Some(PANIC_DATA_TYPE));
            let android = message.message.android.as_ref().unwrap();
            assert_eq!(android.priority, Some(AndroidMessagePriority::High));
        }
    }

    #[tokio::test]
    async fn test_rejected_send_is_delivery_error() {
        let mut sender = MockPushSender::new();
        sender
            .expect_send()
            .times(1)
            .returning(|_| Err(FirebaseError::InvalidToken("not found".to_string())));

        let dispatcher = NotificationDispatcher::new(Arc::new(sender));
        let err = dispatcher.send_panic("stale").await.unwrap_err();
        assert!(matches!(err, RelayError::Delivery(_)));
        assert_eq!(err.status_code(), 500);
    }
}
