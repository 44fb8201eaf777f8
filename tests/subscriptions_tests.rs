use std::sync::Arc;

use bus_cloud_storage::{
    CloudSubscriptionStorage, InMemoryStorageClient, StorageError, SubscriptionOptions,
    SubscriptionStorage,
};

const BUCKET: &str = "bus-subscriptions";

async fn registry(client: &InMemoryStorageClient) -> CloudSubscriptionStorage {
    CloudSubscriptionStorage::new(
        Arc::new(client.clone()),
        SubscriptionOptions::new("test-project", BUCKET).unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn the_registry_is_centralized() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;
    assert!(registry.is_centralized());
}

#[tokio::test]
async fn registered_addresses_come_back_per_topic() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;

    registry.register_subscriber("orders", "queue-a").await.unwrap();
    registry.register_subscriber("orders", "queue-b").await.unwrap();
    registry.register_subscriber("invoices", "queue-c").await.unwrap();

    let mut addresses = registry.get_subscriber_addresses("orders").await.unwrap();
    addresses.sort();
    assert_eq!(addresses, ["queue-a", "queue-b"]);

    let addresses = registry.get_subscriber_addresses("invoices").await.unwrap();
    assert_eq!(addresses, ["queue-c"]);
}

#[tokio::test]
async fn an_unknown_topic_is_an_empty_list() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;

    let addresses = registry.get_subscriber_addresses("silence").await.unwrap();
    assert!(addresses.is_empty());
}

#[tokio::test]
async fn double_registration_yields_a_single_entry() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;

    registry.register_subscriber("orders", "queue-a").await.unwrap();
    registry.register_subscriber("orders", "queue-a").await.unwrap();

    let addresses = registry.get_subscriber_addresses("orders").await.unwrap();
    assert_eq!(addresses, ["queue-a"]);
}

#[tokio::test]
async fn unregistering_removes_the_address() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;

    registry.register_subscriber("orders", "queue-a").await.unwrap();
    registry.register_subscriber("orders", "queue-b").await.unwrap();
    registry.unregister_subscriber("orders", "queue-a").await.unwrap();

    let addresses = registry.get_subscriber_addresses("orders").await.unwrap();
    assert_eq!(addresses, ["queue-b"]);
}

#[tokio::test]
async fn unregistering_an_unknown_address_raises_not_found() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;

    let err = registry
        .unregister_subscriber("orders", "never-registered")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ObjectNotFound { .. }));
}

#[tokio::test]
async fn addresses_survive_verbatim_even_with_separators() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;

    let address = "amqp://broker.internal/queues/orders";
    registry.register_subscriber("orders", address).await.unwrap();

    let addresses = registry.get_subscriber_addresses("orders").await.unwrap();
    assert_eq!(addresses, [address]);

    registry.unregister_subscriber("orders", address).await.unwrap();
    assert!(registry
        .get_subscriber_addresses("orders")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn topics_sharing_a_prefix_stay_separate() {
    let client = InMemoryStorageClient::new();
    let registry = registry(&client).await;

    registry.register_subscriber("orders", "queue-a").await.unwrap();
    registry.register_subscriber("orders-eu", "queue-b").await.unwrap();

    let addresses = registry.get_subscriber_addresses("orders").await.unwrap();
    assert_eq!(addresses, ["queue-a"]);
}
