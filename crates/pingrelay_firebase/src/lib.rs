//! Firebase integration for PingRelay
//!
//! This crate sends the relay's two alerts through the Firebase Cloud
//! Messaging (FCM) HTTP v1 API.
//!
//! # Features
//!
//! - Service account authentication shared with other Google APIs
//! - The fixed "normal" and "panic" payloads
//! - A [`NotificationDispatcher`] over any [`client::PushSender`]
//!
//! # Example
//!
//! ```rust,no_run
//! use pingrelay_firebase::auth::ServiceAccountCredentials;
//! use pingrelay_firebase::client::FirebaseClient;
//! use pingrelay_firebase::NotificationDispatcher;
//! use std::sync::Arc;
//!
//! async fn ping() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(ServiceAccountCredentials::load("./serviceAccountKey.json").await?);
//!     let client = FirebaseClient::new("https://fcm.googleapis.com", "my-project", credentials);
//!     let dispatcher = NotificationDispatcher::new(Arc::new(client));
//!     dispatcher.send_normal("device-token").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod dispatcher;
pub mod messages;

pub use dispatcher::NotificationDispatcher;
pub use messages::AlertKind;
