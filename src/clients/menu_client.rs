use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{Ingredient, MenuCategory, MenuItem, Size};
use crate::menu_actor::{MenuError, MenuRequest};

/// Client for the read-only menu catalog actor.
#[derive(Clone)]
pub struct MenuClient {
    sender: mpsc::Sender<MenuRequest>,
}

impl MenuClient {
    pub fn new(sender: mpsc::Sender<MenuRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), MenuError> {
        debug!("Sending shutdown request");
        self.sender
            .send(MenuRequest::Shutdown)
            .await
            .map_err(|e| MenuError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(MenuClient => fn get_item(id: String) -> Option<MenuItem> as MenuRequest::GetItem, Error = MenuError);
client_method!(MenuClient => fn list_items() -> Vec<MenuItem> as MenuRequest::ListItems, Error = MenuError);
client_method!(MenuClient => fn list_categories() -> Vec<MenuCategory> as MenuRequest::ListCategories, Error = MenuError);
client_method!(MenuClient => fn list_ingredients() -> Vec<Ingredient> as MenuRequest::ListIngredients, Error = MenuError);
client_method!(MenuClient => fn ingredient_surcharge(id: String, size: Size) -> Option<(Ingredient, f64)> as MenuRequest::IngredientSurcharge, Error = MenuError);
