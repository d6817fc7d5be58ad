//! Committed orders, the fulfillment status pipeline, and price math.

use std::time::SystemTime;

use super::menu::{Ingredient, Size};

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentType {
    DineIn,
    Takeout,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// Position in the kitchen/delivery pipeline.
///
/// The pipeline is strictly forward: pending → preparing → ready →
/// delivering → delivered. There is no skip, no backward transition, and
/// no cancel once committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivering,
    Delivered,
}

impl OrderStatus {
    /// The single next status. `Delivered` is a fixed point.
    pub fn next(self) -> Self {
        match self {
            OrderStatus::Pending => OrderStatus::Preparing,
            OrderStatus::Preparing => OrderStatus::Ready,
            OrderStatus::Ready => OrderStatus::Delivering,
            OrderStatus::Delivering => OrderStatus::Delivered,
            OrderStatus::Delivered => OrderStatus::Delivered,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Button text shown on the kitchen board for advancing out of this
    /// status. The fulfillment type only changes the label at `Ready`,
    /// never the status sequence. `None` at the terminal status.
    pub fn advance_label(self, fulfillment: FulfillmentType) -> Option<&'static str> {
        match self {
            OrderStatus::Pending => Some("Start preparing"),
            OrderStatus::Preparing => Some("Mark as ready"),
            OrderStatus::Ready => Some(match fulfillment {
                FulfillmentType::Delivery => "Hand over for delivery",
                _ => "Hand over",
            }),
            OrderStatus::Delivering => Some("Mark as delivered"),
            OrderStatus::Delivered => None,
        }
    }
}

/// One line of an order: a catalog snapshot plus quantity and customization.
///
/// `unit_price` starts at the menu item's base price and absorbs ingredient
/// surcharges as they are attached, so the catalog is never consulted again
/// for pricing an existing line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    pub item_id: String,
    pub number: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub size: Size,
    pub ingredients: Vec<Ingredient>,
}

impl OrderLineItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Full recomputation of an order total from its line items.
///
/// Always recompute rather than patching deltas; incremental adjustment is
/// where drift bugs live.
pub fn order_total(items: &[OrderLineItem]) -> f64 {
    items.iter().map(OrderLineItem::line_total).sum()
}

/// A committed order held by the order store.
///
/// Identifier and line items are frozen at commit; status, payment,
/// delivery fields, notes, and pickup time stay mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderLineItem>,
    pub fulfillment: FulfillmentType,
    pub payment_method: PaymentMethod,
    pub is_paid: bool,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub total: f64,
    pub is_saved: bool,
    pub status: OrderStatus,
    pub order_time: SystemTime,
    pub pickup_time: SystemTime,
}

/// Payload for promoting a draft into the order store.
///
/// Carries no id, status, or total: the store generates the id and derives
/// status (`Pending`) and total from the line items.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub items: Vec<OrderLineItem>,
    pub fulfillment: FulfillmentType,
    pub payment_method: PaymentMethod,
    pub is_paid: bool,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub order_time: SystemTime,
    pub pickup_time: SystemTime,
}

/// Orders partitioned into the five status columns of the kitchen board.
///
/// Each bucket preserves the store's insertion order. Display grouping
/// only; the board owns clones, not the orders themselves.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub ready: Vec<Order>,
    pub delivering: Vec<Order>,
    pub delivered: Vec<Order>,
}

impl StatusBoard {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut board = Self::default();
        for order in orders {
            let bucket = match order.status {
                OrderStatus::Pending => &mut board.pending,
                OrderStatus::Preparing => &mut board.preparing,
                OrderStatus::Ready => &mut board.ready,
                OrderStatus::Delivering => &mut board.delivering,
                OrderStatus::Delivered => &mut board.delivered,
            };
            bucket.push(order.clone());
        }
        board
    }
}
