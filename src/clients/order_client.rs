use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Order, OrderCreate, OrderStatus, StatusBoard};
use crate::impl_client_methods;
use crate::order_actor::{OrderAction, OrderActionResult, OrderError, OrderPatch};

/// Notifications pushed toward read-only consumers (the kitchen board and
/// the waiter's active-orders tab), one per accepted store mutation.
///
/// A terminal-status advance mutates nothing and therefore emits nothing.
#[derive(Debug, Clone)]
pub enum OrderEvent {
    /// Exactly once per successful commit, carrying the stored order.
    NewOrder(Order),
    /// Once per accepted field update, carrying the full updated order.
    OrderUpdated(Order),
    /// Once per actual status advance.
    StatusChanged {
        order_id: String,
        status: OrderStatus,
    },
}

/// Client for the committed-order store.
///
/// Handles orchestration around the generic resource actor: event
/// emission, the silent-ignore contract for unknown ids, and status-board
/// grouping for the kitchen view.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    events: mpsc::UnboundedSender<OrderEvent>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, events: mpsc::UnboundedSender<OrderEvent>) -> Self {
        Self { inner, events }
    }

    /// Appends a committed draft to the store and announces the new order.
    #[instrument(skip(self, payload))]
    pub async fn commit_order(&self, payload: OrderCreate) -> Result<String, OrderError> {
        debug!("Sending request");

        let id = self.inner.create(payload).await.map_err(OrderError::from)?;

        // Read the order back so the notification carries exactly what the
        // store holds (generated id, derived total, pending status).
        match self.inner.get(id.clone()).await {
            Ok(Some(order)) => {
                let _ = self.events.send(OrderEvent::NewOrder(order));
            }
            _ => error!(order_id = %id, "Committed order could not be read back"),
        }

        info!(order_id = %id, "Order committed to store");
        Ok(id)
    }

    /// Merges a patch into a committed order.
    ///
    /// An unknown id resolves to `Ok(None)`: updates of non-existent
    /// orders are silently ignored, not surfaced as errors.
    #[instrument(fields(order_id = %id), skip(self, patch))]
    pub async fn update_order(
        &self,
        id: String,
        patch: OrderPatch,
    ) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");

        match self.inner.update(id.clone(), patch).await {
            Ok(order) => {
                let _ = self.events.send(OrderEvent::OrderUpdated(order.clone()));
                info!("Order updated");
                Ok(Some(order))
            }
            Err(FrameworkError::NotFound(_)) => {
                debug!("Unknown order id; update ignored");
                Ok(None)
            }
            Err(e) => Err(OrderError::from(e)),
        }
    }

    /// Toggles the paid flag; the waiter's active-orders tab uses this.
    #[instrument(fields(order_id = %id), skip(self))]
    pub async fn set_paid(&self, id: String, is_paid: bool) -> Result<Option<Order>, OrderError> {
        self.update_order(
            id,
            OrderPatch {
                is_paid: Some(is_paid),
                ..OrderPatch::default()
            },
        )
        .await
    }

    /// Moves an order one step forward in the fulfillment pipeline and
    /// returns its resulting status.
    ///
    /// Unknown ids resolve to `Ok(None)`; advancing a delivered order is
    /// accepted but changes nothing and emits no event.
    #[instrument(fields(order_id = %id), skip(self))]
    pub async fn advance_status(&self, id: String) -> Result<Option<OrderStatus>, OrderError> {
        debug!("Sending request");

        match self
            .inner
            .perform_action(id.clone(), OrderAction::AdvanceStatus)
            .await
        {
            Ok(OrderActionResult::StatusAdvanced { previous, current }) => {
                if previous != current {
                    let _ = self.events.send(OrderEvent::StatusChanged {
                        order_id: id,
                        status: current,
                    });
                    info!(status = ?current, "Order advanced");
                } else {
                    debug!("Order already at terminal status");
                }
                Ok(Some(current))
            }
            Err(FrameworkError::NotFound(_)) => {
                debug!("Unknown order id; advance ignored");
                Ok(None)
            }
            Err(e) => Err(OrderError::from(e)),
        }
    }

    /// All orders partitioned into the five kitchen-board columns,
    /// insertion order preserved within each column.
    #[instrument(skip(self))]
    pub async fn status_board(&self) -> Result<StatusBoard, OrderError> {
        let orders = self.inner.list().await.map_err(OrderError::from)?;
        Ok(StatusBoard::from_orders(&orders))
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order);
