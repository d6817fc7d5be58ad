use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{order_total, Order, OrderCreate, OrderStatus};

use super::actions::{OrderAction, OrderActionResult};
use super::dtos::OrderPatch;

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = OrderPatch;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    /// Freezes a committed draft into a stored order.
    ///
    /// The total is recomputed from the line items rather than taken from
    /// the payload, and every new order enters the pipeline at `Pending`.
    /// An empty item list is rejected; the waiter service never sends one,
    /// but the store does not rely on that.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, FrameworkError> {
        if payload.items.is_empty() {
            return Err(FrameworkError::Invalid(
                "order must contain at least one line item".into(),
            ));
        }
        let total = order_total(&payload.items);
        Ok(Self {
            id,
            items: payload.items,
            fulfillment: payload.fulfillment,
            payment_method: payload.payment_method,
            is_paid: payload.is_paid,
            address: payload.address,
            phone: payload.phone,
            notes: payload.notes,
            total,
            is_saved: true,
            status: OrderStatus::Pending,
            order_time: payload.order_time,
            pickup_time: payload.pickup_time,
        })
    }

    /// Applies in-place edits to the fields that remain mutable after
    /// commit. Line items, total, and status are untouchable here.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), FrameworkError> {
        if let Some(fulfillment) = patch.fulfillment {
            self.fulfillment = fulfillment;
        }
        if let Some(payment_method) = patch.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(is_paid) = patch.is_paid {
            self.is_paid = is_paid;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(pickup_time) = patch.pickup_time {
            self.pickup_time = pickup_time;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, FrameworkError> {
        match action {
            OrderAction::AdvanceStatus => {
                let previous = self.status;
                self.status = previous.next();
                Ok(OrderActionResult::StatusAdvanced {
                    previous,
                    current: self.status,
                })
            }
        }
    }
}
