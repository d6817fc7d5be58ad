use std::time::SystemTime;

use crate::domain::{FulfillmentType, PaymentMethod};

/// Partial update for a committed order.
///
/// Only the fields that stay mutable after commit appear here; id, line
/// items, status, and the derived total are out of reach by construction.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub fulfillment: Option<FulfillmentType>,
    pub payment_method: Option<PaymentMethod>,
    pub is_paid: Option<bool>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub pickup_time: Option<SystemTime>,
}
