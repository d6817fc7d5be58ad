mod actor_framework;
mod app_system;
mod clients;
mod domain;
mod menu_actor;
mod order_actor;
mod waiter_actor;

#[cfg(test)]
mod mock_framework;

use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, PosSystem};
use crate::clients::OrderEvent;
use crate::domain::{DraftField, FulfillmentType, MenuCatalog, PaymentMethod};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting pizzeria POS demo");

    let mut system = PosSystem::new(MenuCatalog::sample(), Vec::new());
    let mut events = system
        .take_events()
        .ok_or_else(|| "event stream already taken".to_string())?;

    // Waiter builds a delivery order: two Margheritas, one Pepperoni pizza.
    let span = tracing::info_span!("order_entry");
    let order_id = async {
        info!("Taking a new order");
        system.waiter_client.add_item("m1".into(), None).await.map_err(|e| e.to_string())?;
        system.waiter_client.add_item("m1".into(), None).await.map_err(|e| e.to_string())?;
        system.waiter_client.add_item("m2".into(), None).await.map_err(|e| e.to_string())?;
        system
            .waiter_client
            .add_ingredient("m2".into(), "i5".into())
            .await
            .map_err(|e| e.to_string())?;

        system
            .waiter_client
            .set_field(DraftField::Fulfillment(FulfillmentType::Delivery))
            .await
            .map_err(|e| e.to_string())?;
        system
            .waiter_client
            .set_field(DraftField::Address("10 Oven Street".into()))
            .await
            .map_err(|e| e.to_string())?;
        system
            .waiter_client
            .set_field(DraftField::Phone("555 0134".into()))
            .await
            .map_err(|e| e.to_string())?;
        system
            .waiter_client
            .set_field(DraftField::Notes("Ring twice".into()))
            .await
            .map_err(|e| e.to_string())?;
        system
            .waiter_client
            .set_field(DraftField::PaymentMethod(PaymentMethod::Card))
            .await
            .map_err(|e| e.to_string())?;

        let draft = system.waiter_client.draft().await.map_err(|e| e.to_string())?;
        for line in &draft.items {
            info!(
                quantity = line.quantity,
                number = %line.number,
                name = %line.name,
                unit_price = line.unit_price,
                "Ticket line"
            );
        }
        info!(line_count = draft.items.len(), total = draft.total, "Draft ready");

        system
            .waiter_client
            .commit()
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| "commit of a non-empty draft produced no order".to_string())
    }
    .instrument(span)
    .await?;

    info!(order_id = %order_id, "Order committed");

    if let Some(order) = system
        .order_client
        .get_order(order_id.clone())
        .await
        .map_err(|e| e.to_string())?
    {
        info!(
            payment = ?order.payment_method,
            address = order.address.as_deref().unwrap_or("-"),
            pickup = ?order.pickup_time,
            "Order stored"
        );
    }

    // Kitchen walks the order through the whole fulfillment pipeline.
    let span = tracing::info_span!("kitchen");
    async {
        loop {
            let Some(order) = system
                .order_client
                .get_order(order_id.clone())
                .await
                .map_err(|e| e.to_string())?
            else {
                return Err("committed order vanished from the store".to_string());
            };

            if order.status.is_terminal() {
                break;
            }
            if let Some(label) = order.status.advance_label(order.fulfillment) {
                info!(action = label, "Advancing order");
            }
            system
                .order_client
                .advance_status(order_id.clone())
                .await
                .map_err(|e| e.to_string())?;
        }

        let board = system.order_client.status_board().await.map_err(|e| e.to_string())?;
        info!(delivered = board.delivered.len(), "Kitchen board after service");
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Waiter settles the bill.
    system
        .order_client
        .set_paid(order_id.clone(), true)
        .await
        .map_err(|e| e.to_string())?;

    // Drain the notifications the kitchen display would have rendered.
    while let Ok(event) = events.try_recv() {
        match event {
            OrderEvent::NewOrder(order) => {
                info!(order_id = %order.id, total = order.total, "event: new order")
            }
            OrderEvent::OrderUpdated(order) => {
                info!(order_id = %order.id, is_paid = order.is_paid, "event: order updated")
            }
            OrderEvent::StatusChanged { order_id, status } => {
                info!(order_id = %order_id, status = ?status, "event: status changed")
            }
        }
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
