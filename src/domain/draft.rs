//! The order draft builder: one in-progress, uncommitted order per waiter
//! session.
//!
//! All mutations are infallible or silent no-ops; the only precondition in
//! this module is that an empty draft cannot be turned into a commit
//! payload. The derived `total` is re-established by full recomputation
//! after every mutation.

use std::time::{Duration, SystemTime};

use super::menu::{Ingredient, MenuItem, Size};
use super::order::{
    order_total, FulfillmentType, OrderCreate, OrderLineItem, PaymentMethod,
};

/// Default lead time stamped on `pickup_time` when the waiter never set one.
pub const DEFAULT_PICKUP_LEAD: Duration = Duration::from_secs(30 * 60);

/// A scalar draft field update, as issued by the order controls.
#[derive(Debug, Clone)]
pub enum DraftField {
    Fulfillment(FulfillmentType),
    PaymentMethod(PaymentMethod),
    Paid(bool),
    Address(String),
    Phone(String),
    Notes(String),
    PickupTime(SystemTime),
}

/// An uncommitted order under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub items: Vec<OrderLineItem>,
    pub fulfillment: FulfillmentType,
    pub payment_method: PaymentMethod,
    pub is_paid: bool,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub pickup_time: Option<SystemTime>,
    pub total: f64,
    pub is_saved: bool,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            fulfillment: FulfillmentType::DineIn,
            payment_method: PaymentMethod::Cash,
            is_paid: false,
            address: None,
            phone: None,
            notes: None,
            pickup_time: None,
            total: 0.0,
            is_saved: false,
        }
    }
}

impl OrderDraft {
    /// Adds one unit of a menu item to the draft.
    ///
    /// A line with the same catalog id and size is merged by bumping its
    /// quantity; otherwise a new line is appended with the item's base
    /// price, its default (or given) size, and its default ingredients.
    /// Always succeeds.
    pub fn add_item(&mut self, item: &MenuItem, size: Option<Size>) {
        let size = size.or(item.size).unwrap_or(Size::Medium);

        match self
            .items
            .iter_mut()
            .find(|line| line.item_id == item.id && line.size == size)
        {
            Some(line) => line.quantity += 1,
            None => self.items.push(OrderLineItem {
                item_id: item.id.clone(),
                number: item.number.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: 1,
                size,
                ingredients: item.ingredients.clone(),
            }),
        }

        self.touch();
    }

    /// Removes every line carrying the given catalog id. No-op when absent.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|line| line.item_id != item_id);
        self.touch();
    }

    /// Attaches an ingredient to a line, raising its unit price by
    /// `surcharge`. Idempotent by ingredient id; no-op when the line is
    /// missing.
    pub fn add_ingredient(&mut self, item_id: &str, ingredient: Ingredient, surcharge: f64) {
        if let Some(line) = self.items.iter_mut().find(|l| l.item_id == item_id) {
            if line.ingredients.iter().any(|i| i.id == ingredient.id) {
                return;
            }
            line.ingredients.push(ingredient);
            line.unit_price += surcharge;
        } else {
            return;
        }
        self.touch();
    }

    /// Detaches an ingredient, lowering the line's unit price by the same
    /// amount it was attached for. No-op when line or ingredient is absent.
    pub fn remove_ingredient(&mut self, item_id: &str, ingredient_id: &str, surcharge: f64) {
        if let Some(line) = self.items.iter_mut().find(|l| l.item_id == item_id) {
            let before = line.ingredients.len();
            line.ingredients.retain(|i| i.id != ingredient_id);
            if line.ingredients.len() == before {
                return;
            }
            line.unit_price -= surcharge;
        } else {
            return;
        }
        self.touch();
    }

    /// Updates one scalar order field.
    pub fn set_field(&mut self, field: DraftField) {
        match field {
            DraftField::Fulfillment(v) => self.fulfillment = v,
            DraftField::PaymentMethod(v) => self.payment_method = v,
            DraftField::Paid(v) => self.is_paid = v,
            DraftField::Address(v) => self.address = Some(v),
            DraftField::Phone(v) => self.phone = Some(v),
            DraftField::Notes(v) => self.notes = Some(v),
            DraftField::PickupTime(v) => self.pickup_time = Some(v),
        }
        self.is_saved = false;
    }

    /// The size of the line carrying the given catalog id, if any. Needed
    /// to resolve an ingredient surcharge before attaching it.
    pub fn line_size(&self, item_id: &str) -> Option<Size> {
        self.items
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.size)
    }

    /// Builds the commit payload, or `None` for an empty draft.
    ///
    /// Stamps `order_time = now` and defaults `pickup_time` to
    /// `now + DEFAULT_PICKUP_LEAD` when the waiter never picked one. The
    /// draft itself is untouched; the caller resets it with [`clear`]
    /// once the store accepted the order.
    ///
    /// [`clear`]: OrderDraft::clear
    pub fn to_create(&self, now: SystemTime) -> Option<OrderCreate> {
        if self.items.is_empty() {
            return None;
        }
        Some(OrderCreate {
            items: self.items.clone(),
            fulfillment: self.fulfillment,
            payment_method: self.payment_method,
            is_paid: self.is_paid,
            address: self.address.clone(),
            phone: self.phone.clone(),
            notes: self.notes.clone(),
            order_time: now,
            pickup_time: self.pickup_time.unwrap_or(now + DEFAULT_PICKUP_LEAD),
        })
    }

    /// Resets the draft to its documented defaults: no items, dine-in,
    /// cash, unpaid.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Re-establishes the total invariant and marks the draft dirty.
    fn touch(&mut self) {
        self.total = order_total(&self.items);
        self.is_saved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::MenuItemKind;

    fn pizza(id: &str, name: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.into(),
            number: id.into(),
            name: name.into(),
            category: "c1".into(),
            price,
            kind: MenuItemKind::Pizza,
            size: Some(Size::Medium),
            ingredients: Vec::new(),
        }
    }

    fn meat(id: &str, name: &str) -> Ingredient {
        Ingredient {
            id: id.into(),
            name: name.into(),
            category: "Meats".into(),
        }
    }

    #[test]
    fn add_item_merges_same_id_and_size() {
        let mut draft = OrderDraft::default();
        let margherita = pizza("m1", "Margherita", 24.99);

        draft.add_item(&margherita, None);
        draft.add_item(&margherita, None);

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].quantity, 2);
        assert!((draft.total - 49.98).abs() < 1e-9);
    }

    #[test]
    fn add_item_with_different_size_appends_new_line() {
        let mut draft = OrderDraft::default();
        let margherita = pizza("m1", "Margherita", 24.99);

        draft.add_item(&margherita, Some(Size::Medium));
        draft.add_item(&margherita, Some(Size::Large));

        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].quantity, 1);
        assert_eq!(draft.items[1].size, Size::Large);
    }

    #[test]
    fn total_invariant_holds_after_every_mutation() {
        let mut draft = OrderDraft::default();
        let margherita = pizza("m1", "Margherita", 24.99);
        let pepperoni_pizza = pizza("m2", "Pepperoni", 27.99);

        draft.add_item(&margherita, None);
        draft.add_item(&margherita, None);
        draft.add_item(&pepperoni_pizza, None);
        assert!((draft.total - order_total(&draft.items)).abs() < 1e-9);
        assert!((draft.total - 77.97).abs() < 1e-9);

        draft.add_ingredient("m1", meat("i4", "Pepperoni"), 4.99);
        assert!((draft.total - order_total(&draft.items)).abs() < 1e-9);

        draft.remove_item("m2");
        assert!((draft.total - order_total(&draft.items)).abs() < 1e-9);

        draft.remove_ingredient("m1", "i4", 4.99);
        assert!((draft.total - order_total(&draft.items)).abs() < 1e-9);
        assert!((draft.total - 49.98).abs() < 1e-9);
    }

    #[test]
    fn remove_missing_item_is_a_noop() {
        let mut draft = OrderDraft::default();
        draft.add_item(&pizza("m1", "Margherita", 24.99), None);

        draft.remove_item("nope");

        assert_eq!(draft.items.len(), 1);
        assert!((draft.total - 24.99).abs() < 1e-9);
    }

    #[test]
    fn ingredient_attach_is_idempotent() {
        let mut draft = OrderDraft::default();
        draft.add_item(&pizza("m1", "Margherita", 24.99), None);

        draft.add_ingredient("m1", meat("i4", "Pepperoni"), 4.99);
        draft.add_ingredient("m1", meat("i4", "Pepperoni"), 4.99);

        assert_eq!(draft.items[0].ingredients.len(), 1);
        assert!((draft.items[0].unit_price - 29.98).abs() < 1e-9);
    }

    #[test]
    fn ingredient_remove_restores_unit_price() {
        let mut draft = OrderDraft::default();
        draft.add_item(&pizza("m1", "Margherita", 24.99), None);
        draft.add_ingredient("m1", meat("i4", "Pepperoni"), 4.99);
        assert!((draft.items[0].unit_price - 29.98).abs() < 1e-9);

        draft.remove_ingredient("m1", "i4", 4.99);

        assert!((draft.items[0].unit_price - 24.99).abs() < 1e-9);
        assert!(draft.items[0].ingredients.is_empty());

        // Removing again changes nothing.
        draft.remove_ingredient("m1", "i4", 4.99);
        assert!((draft.items[0].unit_price - 24.99).abs() < 1e-9);
    }

    #[test]
    fn ingredient_ops_on_missing_line_are_noops() {
        let mut draft = OrderDraft::default();

        draft.add_ingredient("nope", meat("i4", "Pepperoni"), 4.99);
        draft.remove_ingredient("nope", "i4", 4.99);

        assert!(draft.items.is_empty());
        assert_eq!(draft.total, 0.0);
    }

    #[test]
    fn set_field_clears_saved_flag() {
        let mut draft = OrderDraft::default();
        draft.is_saved = true;

        draft.set_field(DraftField::Fulfillment(FulfillmentType::Delivery));

        assert!(!draft.is_saved);
        assert_eq!(draft.fulfillment, FulfillmentType::Delivery);
    }

    #[test]
    fn empty_draft_never_produces_a_commit_payload() {
        let draft = OrderDraft::default();
        assert!(draft.to_create(SystemTime::now()).is_none());
    }

    #[test]
    fn commit_payload_defaults_pickup_time_to_lead() {
        let mut draft = OrderDraft::default();
        draft.add_item(&pizza("m1", "Margherita", 24.99), None);

        let now = SystemTime::now();
        let create = draft.to_create(now).unwrap();

        assert_eq!(create.order_time, now);
        assert_eq!(create.pickup_time, now + DEFAULT_PICKUP_LEAD);
    }

    #[test]
    fn commit_payload_keeps_explicit_pickup_time() {
        let mut draft = OrderDraft::default();
        draft.add_item(&pizza("m1", "Margherita", 24.99), None);
        let pickup = SystemTime::now() + Duration::from_secs(90 * 60);
        draft.set_field(DraftField::PickupTime(pickup));

        let create = draft.to_create(SystemTime::now()).unwrap();

        assert_eq!(create.pickup_time, pickup);
    }

    #[test]
    fn clear_restores_documented_defaults() {
        let mut draft = OrderDraft::default();
        draft.add_item(&pizza("m1", "Margherita", 24.99), None);
        draft.set_field(DraftField::Fulfillment(FulfillmentType::Delivery));
        draft.set_field(DraftField::PaymentMethod(PaymentMethod::Card));
        draft.set_field(DraftField::Paid(true));
        draft.set_field(DraftField::Address("10 Oven St".into()));

        draft.clear();

        assert!(draft.items.is_empty());
        assert_eq!(draft.fulfillment, FulfillmentType::DineIn);
        assert_eq!(draft.payment_method, PaymentMethod::Cash);
        assert!(!draft.is_paid);
        assert!(draft.address.is_none());
        assert_eq!(draft.total, 0.0);
    }
}
