use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::{MenuClient, OrderClient, OrderEvent, WaiterClient};
use crate::domain::{MenuCatalog, Order};
use crate::menu_actor::MenuService;
use crate::waiter_actor::WaiterService;

/// The main application system that orchestrates all actors.
///
/// Responsible for starting the catalog, the order store, and the waiter
/// actor, wiring them together, and handling graceful shutdown.
pub struct PosSystem {
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    pub waiter_client: WaiterClient,
    events: Option<mpsc::UnboundedReceiver<OrderEvent>>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    /// Starts the entire system.
    ///
    /// `existing_orders` lets a session begin with orders already on the
    /// kitchen board; their ids must not collide with the `order_N` ids
    /// the store generates.
    pub fn new(catalog: MenuCatalog, existing_orders: Vec<Order>) -> Self {
        let mut handles = Vec::new();

        info!("Starting POS system");

        // Sub-actors first: catalog, then the order store.
        let (menu_service, menu_client) = MenuService::new(32, catalog);
        handles.push(tokio::spawn(menu_service.run()));

        let order_id_counter = Arc::new(AtomicU64::new(1));
        let next_order_id = move || {
            let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("order_{}", id)
        };
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(32, next_order_id);
        let order_actor = order_actor.seed(existing_orders);
        handles.push(tokio::spawn(order_actor.run()));

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let order_client = OrderClient::new(order_resource_client, events_tx);

        // Root actor last, with its dependencies injected.
        let (waiter_service, waiter_client) =
            WaiterService::new(32, menu_client.clone(), order_client.clone());
        handles.push(tokio::spawn(waiter_service.run()));

        info!("POS system started");

        Self {
            menu_client,
            order_client,
            waiter_client,
            events: Some(events_rx),
            handles,
        }
    }

    /// Takes the order event stream. Yields `None` after the first call;
    /// there is exactly one consumer per session.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<OrderEvent>> {
        self.events.take()
    }

    /// Gracefully shuts the system down: root actor first, then the
    /// catalog; the order store exits once its last client handle drops.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down POS system");

        let _ = self.waiter_client.shutdown().await;
        let _ = self.menu_client.shutdown().await;

        drop(self.waiter_client);
        drop(self.menu_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service task failed: {:?}", e));
            }
        }

        info!("POS system shutdown complete");
        Ok(())
    }
}
