//! Channel clients: thin cloneable handles over the service actors.

pub mod macros;
pub mod menu_client;
pub mod order_client;
pub mod waiter_client;

pub use menu_client::*;
pub use order_client::*;
pub use waiter_client::*;
