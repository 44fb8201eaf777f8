use async_trait::async_trait;

use crate::domain::errors::StorageResult;

/// Storage contract for the bus runtime's topic-subscription registry.
#[async_trait]
pub trait SubscriptionStorage: Send + Sync {
    /// True when this registry is the authoritative single source of truth,
    /// as opposed to topic-owner-held lists.
    fn is_centralized(&self) -> bool;

    /// All subscriber addresses currently registered for the topic. An
    /// unknown topic is an empty list, not an error.
    async fn get_subscriber_addresses(&self, topic: &str) -> StorageResult<Vec<String>>;

    /// Registers the address for the topic. Idempotent.
    async fn register_subscriber(&self, topic: &str, subscriber_address: &str)
        -> StorageResult<()>;

    /// Removes the registration. Unregistering an address that was never
    /// registered surfaces as not-found.
    async fn unregister_subscriber(
        &self,
        topic: &str,
        subscriber_address: &str,
    ) -> StorageResult<()>;
}
