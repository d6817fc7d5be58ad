//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Instead of spinning up a full `ResourceActor` just to test client
//! logic (e.g. `OrderClient` event emission), [`create_mock_client`]
//! yields a client plus the receiving end of its channel. Tests inspect
//! the messages arriving there and answer through the bundled oneshot
//! senders, simulating the actor's behavior deterministically.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request.
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request.
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request.
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request.
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{OrderClient, OrderEvent};
    use crate::domain::{
        FulfillmentType, Order, OrderCreate, OrderLineItem, OrderStatus, PaymentMethod, Size,
    };
    use crate::order_actor::{OrderAction, OrderActionResult, OrderPatch};
    use std::time::{Duration, SystemTime};

    fn sample_payload() -> OrderCreate {
        let now = SystemTime::now();
        OrderCreate {
            items: vec![OrderLineItem {
                item_id: "m1".into(),
                number: "1".into(),
                name: "Margherita".into(),
                unit_price: 24.99,
                quantity: 2,
                size: Size::Medium,
                ingredients: Vec::new(),
            }],
            fulfillment: FulfillmentType::DineIn,
            payment_method: PaymentMethod::Cash,
            is_paid: false,
            address: None,
            phone: None,
            notes: None,
            order_time: now,
            pickup_time: now + Duration::from_secs(1800),
        }
    }

    fn stored_order(id: &str) -> Order {
        use crate::actor_framework::Entity;
        Order::from_create(id.to_string(), sample_payload()).unwrap()
    }

    #[tokio::test]
    async fn commit_flow_emits_new_order_event() {
        let (inner, mut store_rx) = create_mock_client::<Order>(10);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let client = OrderClient::new(inner, events_tx);

        let commit_task = tokio::spawn(async move { client.commit_order(sample_payload()).await });

        // Expect the Create, answer with a generated id.
        let (payload, responder) = expect_create(&mut store_rx).await.expect("Expected Create");
        assert_eq!(payload.items.len(), 1);
        responder.send(Ok("order_1".to_string())).unwrap();

        // Expect the read-back Get, answer with the stored order.
        let (id, responder) = expect_get(&mut store_rx).await.expect("Expected Get");
        assert_eq!(id, "order_1");
        responder.send(Ok(Some(stored_order("order_1")))).unwrap();

        let result = commit_task.await.unwrap();
        assert_eq!(result, Ok("order_1".to_string()));

        match events_rx.recv().await {
            Some(OrderEvent::NewOrder(order)) => {
                assert_eq!(order.id, "order_1");
                assert_eq!(order.status, OrderStatus::Pending);
            }
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn advance_at_terminal_status_emits_no_event() {
        let (inner, mut store_rx) = create_mock_client::<Order>(10);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let client = OrderClient::new(inner, events_tx);

        let advance_task = tokio::spawn(async move { client.advance_status("order_1".into()).await });

        let (id, action, responder) = expect_action(&mut store_rx).await.expect("Expected Action");
        assert_eq!(id, "order_1");
        assert!(matches!(action, OrderAction::AdvanceStatus));
        responder
            .send(Ok(OrderActionResult::StatusAdvanced {
                previous: OrderStatus::Delivered,
                current: OrderStatus::Delivered,
            }))
            .unwrap();

        let result = advance_task.await.unwrap();
        assert_eq!(result, Ok(Some(OrderStatus::Delivered)));
        assert!(events_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_silently_ignored() {
        let (inner, mut store_rx) = create_mock_client::<Order>(10);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let client = OrderClient::new(inner, events_tx);

        let update_task = tokio::spawn(async move {
            client
                .update_order(
                    "ghost".into(),
                    OrderPatch { is_paid: Some(true), ..OrderPatch::default() },
                )
                .await
        });

        let (id, _patch, responder) = expect_update(&mut store_rx).await.expect("Expected Update");
        responder.send(Err(FrameworkError::NotFound(id))).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Ok(None));
        assert!(events_rx.try_recv().is_err());
    }
}
