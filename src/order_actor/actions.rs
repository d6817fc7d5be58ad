use crate::domain::OrderStatus;

/// Custom actions on committed orders beyond plain field patches.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order one step forward in the fulfillment pipeline.
    /// A no-op at the terminal status.
    AdvanceStatus,
}

/// Results from [`OrderAction`] - variants match 1:1 with the actions.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// Status before and after the advance. Equal at the terminal status.
    StatusAdvanced {
        previous: OrderStatus,
        current: OrderStatus,
    },
}
