//! # Mock Framework
//!
//! Stand-in actors for testing clients in isolation.
//!
//! [`create_mock_client`] returns a client together with the receiving end of
//! its channel; the `expect_*` helpers pull the next request off that channel
//! so a test can inspect it and script the reply.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, Filter, ResourceClient, ResourceRequest, Response};

pub type MockReceiver<T> = mpsc::Receiver<ResourceRequest<T>>;

pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, MockReceiver<T>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request must be a Create.
pub async fn expect_create<T: Entity>(
    receiver: &mut MockReceiver<T>,
) -> Option<(T::CreatePayload, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Next request must be a Get.
pub async fn expect_get<T: Entity>(receiver: &mut MockReceiver<T>) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request must be a List.
pub async fn expect_list<T: Entity>(receiver: &mut MockReceiver<T>) -> Option<(Filter<T>, Response<Vec<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next request must be an Action.
pub async fn expect_action<T: Entity>(
    receiver: &mut MockReceiver<T>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::domain::{Product, ProductCreate};
    use crate::product_actor::ProductError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move { client.create(ProductCreate::new("Gravel", "seller_1", 30.0, 9)).await });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.title, "Gravel");
        responder.send(Ok("product_1".to_string())).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok("product_1".to_string()));
    }

    #[tokio::test]
    async fn list_filters_travel_with_the_request() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let task = tokio::spawn(async move {
            client
                .list(Filter::new(|p: &Product| p.seller_id == "seller_1"))
                .await
        });

        let (filter, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        let mine = Product::new("p1", "Sand", "seller_1", 10.0, 1);
        let theirs = Product::new("p2", "Sand", "seller_2", 10.0, 1);
        assert!(filter.matches(&mine));
        assert!(!filter.matches(&theirs));
        responder
            .send(Err(FrameworkError::Entity(ProductError::ValidationError("boom".into()))))
            .unwrap();

        assert!(matches!(task.await.unwrap(), Err(FrameworkError::Entity(_))));
    }
}
