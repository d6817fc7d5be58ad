//! Read-only catalog actor: menu items, categories, and ingredient pricing.
//!
//! The catalog is supplied once at construction and never mutated; every
//! handler is a synchronous in-memory lookup.

pub mod error;

pub use error::*;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::actor_framework::ServiceResponse;
use crate::clients::MenuClient;
use crate::domain::{Ingredient, MenuCatalog, MenuCategory, MenuItem, Size};

#[derive(Debug)]
pub enum MenuRequest {
    GetItem {
        id: String,
        respond_to: ServiceResponse<Option<MenuItem>, MenuError>,
    },
    ListItems {
        respond_to: ServiceResponse<Vec<MenuItem>, MenuError>,
    },
    ListCategories {
        respond_to: ServiceResponse<Vec<MenuCategory>, MenuError>,
    },
    ListIngredients {
        respond_to: ServiceResponse<Vec<Ingredient>, MenuError>,
    },
    /// Resolve an ingredient together with its add-on price for a size.
    /// The price is 0.0 when the ingredient's category has no price table.
    IngredientSurcharge {
        id: String,
        size: Size,
        respond_to: ServiceResponse<Option<(Ingredient, f64)>, MenuError>,
    },
    Shutdown,
}

pub struct MenuService {
    receiver: mpsc::Receiver<MenuRequest>,
    catalog: MenuCatalog,
}

impl MenuService {
    pub fn new(buffer_size: usize, catalog: MenuCatalog) -> (Self, MenuClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, catalog };
        let client = MenuClient::new(sender);
        (service, client)
    }

    #[instrument(name = "menu_service", skip(self))]
    pub async fn run(mut self) {
        info!(
            item_count = self.catalog.items.len(),
            ingredient_count = self.catalog.ingredients.len(),
            "MenuService starting"
        );

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                MenuRequest::GetItem { id, respond_to } => {
                    self.handle_get_item(id, respond_to);
                }
                MenuRequest::ListItems { respond_to } => {
                    debug!("Processing list_items request");
                    let _ = respond_to.send(Ok(self.catalog.items.clone()));
                }
                MenuRequest::ListCategories { respond_to } => {
                    debug!("Processing list_categories request");
                    let _ = respond_to.send(Ok(self.catalog.categories.clone()));
                }
                MenuRequest::ListIngredients { respond_to } => {
                    debug!("Processing list_ingredients request");
                    let _ = respond_to.send(Ok(self.catalog.ingredients.clone()));
                }
                MenuRequest::IngredientSurcharge { id, size, respond_to } => {
                    self.handle_ingredient_surcharge(id, size, respond_to);
                }
                MenuRequest::Shutdown => {
                    info!("MenuService shutting down");
                    break;
                }
            }
        }

        info!("MenuService stopped");
    }

    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_get_item(
        &self,
        id: String,
        respond_to: ServiceResponse<Option<MenuItem>, MenuError>,
    ) {
        debug!("Processing get_item request");

        let item = self.catalog.item(&id).cloned();
        match &item {
            Some(item) => debug!(item_name = %item.name, "Menu item found"),
            None => debug!("Menu item not found"),
        }

        let _ = respond_to.send(Ok(item));
    }

    #[instrument(fields(ingredient_id = %id, size = %size), skip(self, respond_to))]
    fn handle_ingredient_surcharge(
        &self,
        id: String,
        size: Size,
        respond_to: ServiceResponse<Option<(Ingredient, f64)>, MenuError>,
    ) {
        debug!("Processing ingredient_surcharge request");

        let resolved = self.catalog.ingredient(&id).map(|ingredient| {
            let surcharge = self.catalog.surcharge(ingredient, size);
            debug!(ingredient_name = %ingredient.name, surcharge, "Ingredient priced");
            (ingredient.clone(), surcharge)
        });

        let _ = respond_to.send(Ok(resolved));
    }
}
