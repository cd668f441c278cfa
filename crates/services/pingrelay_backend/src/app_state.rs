// --- File: crates/services/pingrelay_backend/src/app_state.rs ---
use pingrelay_firebase::NotificationDispatcher;
use pingrelay_store::DeviceRegistry;

/// State shared by every gateway handler.
///
/// Built once at startup and handed to the router; handlers never reach for
/// globals.
#[derive(Clone)]
pub struct RelayState {
    pub registry: DeviceRegistry,
    pub dispatcher: NotificationDispatcher,
}

impl RelayState {
    pub fn new(registry: DeviceRegistry, dispatcher: NotificationDispatcher) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }
}
