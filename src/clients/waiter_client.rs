use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{DraftField, OrderDraft, Size};
use crate::waiter_actor::{WaiterError, WaiterRequest};

/// Client for the waiter draft actor.
///
/// `commit` resolves to `Ok(None)` when the draft is empty; the caller
/// gets no order id and no error, matching the silent commit
/// precondition.
#[derive(Clone)]
pub struct WaiterClient {
    sender: mpsc::Sender<WaiterRequest>,
}

impl WaiterClient {
    pub fn new(sender: mpsc::Sender<WaiterRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), WaiterError> {
        debug!("Sending shutdown request");
        self.sender
            .send(WaiterRequest::Shutdown)
            .await
            .map_err(|e| WaiterError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(WaiterClient => fn add_item(item_id: String, size: Option<Size>) -> () as WaiterRequest::AddItem, Error = WaiterError);
client_method!(WaiterClient => fn remove_item(item_id: String) -> () as WaiterRequest::RemoveItem, Error = WaiterError);
client_method!(WaiterClient => fn add_ingredient(item_id: String, ingredient_id: String) -> () as WaiterRequest::AddIngredient, Error = WaiterError);
client_method!(WaiterClient => fn remove_ingredient(item_id: String, ingredient_id: String) -> () as WaiterRequest::RemoveIngredient, Error = WaiterError);
client_method!(WaiterClient => fn set_field(field: DraftField) -> () as WaiterRequest::SetField, Error = WaiterError);
client_method!(WaiterClient => fn draft() -> OrderDraft as WaiterRequest::Draft, Error = WaiterError);
client_method!(WaiterClient => fn commit() -> Option<String> as WaiterRequest::Commit, Error = WaiterError);
