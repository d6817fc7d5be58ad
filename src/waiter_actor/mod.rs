//! Waiter actor: owns the one in-progress order draft for a session and
//! orchestrates the catalog and order-store clients around it.
//!
//! This is the root actor of the system. Pricing decisions (base prices,
//! size-dependent ingredient surcharges) are resolved through the menu
//! client at mutation time and snapshotted into the draft, so committed
//! orders never observe later catalog changes.

pub mod error;

pub use error::*;

use std::time::SystemTime;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::actor_framework::ServiceResponse;
use crate::clients::{MenuClient, OrderClient, WaiterClient};
use crate::domain::{DraftField, OrderDraft, Size};

#[derive(Debug)]
pub enum WaiterRequest {
    AddItem {
        item_id: String,
        size: Option<Size>,
        respond_to: ServiceResponse<(), WaiterError>,
    },
    RemoveItem {
        item_id: String,
        respond_to: ServiceResponse<(), WaiterError>,
    },
    AddIngredient {
        item_id: String,
        ingredient_id: String,
        respond_to: ServiceResponse<(), WaiterError>,
    },
    RemoveIngredient {
        item_id: String,
        ingredient_id: String,
        respond_to: ServiceResponse<(), WaiterError>,
    },
    SetField {
        field: DraftField,
        respond_to: ServiceResponse<(), WaiterError>,
    },
    /// Snapshot of the current draft for display.
    Draft {
        respond_to: ServiceResponse<OrderDraft, WaiterError>,
    },
    /// Promote the draft into the order store. `Ok(None)` when the draft
    /// is empty: the commit precondition failing is silent, not an error.
    Commit {
        respond_to: ServiceResponse<Option<String>, WaiterError>,
    },
    Shutdown,
}

pub struct WaiterService {
    receiver: mpsc::Receiver<WaiterRequest>,
    draft: OrderDraft,
    menu_client: MenuClient,
    order_client: OrderClient,
}

impl WaiterService {
    pub fn new(
        buffer_size: usize,
        menu_client: MenuClient,
        order_client: OrderClient,
    ) -> (Self, WaiterClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            draft: OrderDraft::default(),
            menu_client,
            order_client,
        };
        let client = WaiterClient::new(sender);
        (service, client)
    }

    #[instrument(name = "waiter_service", skip(self))]
    pub async fn run(mut self) {
        info!("WaiterService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                WaiterRequest::AddItem { item_id, size, respond_to } => {
                    self.handle_add_item(item_id, size, respond_to).await;
                }
                WaiterRequest::RemoveItem { item_id, respond_to } => {
                    self.handle_remove_item(item_id, respond_to);
                }
                WaiterRequest::AddIngredient { item_id, ingredient_id, respond_to } => {
                    self.handle_add_ingredient(item_id, ingredient_id, respond_to)
                        .await;
                }
                WaiterRequest::RemoveIngredient { item_id, ingredient_id, respond_to } => {
                    self.handle_remove_ingredient(item_id, ingredient_id, respond_to)
                        .await;
                }
                WaiterRequest::SetField { field, respond_to } => {
                    debug!(?field, "Processing set_field request");
                    self.draft.set_field(field);
                    let _ = respond_to.send(Ok(()));
                }
                WaiterRequest::Draft { respond_to } => {
                    debug!("Processing draft snapshot request");
                    let _ = respond_to.send(Ok(self.draft.clone()));
                }
                WaiterRequest::Commit { respond_to } => {
                    self.handle_commit(respond_to).await;
                }
                WaiterRequest::Shutdown => {
                    info!("WaiterService shutting down");
                    break;
                }
            }
        }

        info!("WaiterService stopped");
    }

    /// Resolves the catalog item and adds one unit of it to the draft.
    #[instrument(fields(item_id = %item_id), skip(self, respond_to))]
    async fn handle_add_item(
        &mut self,
        item_id: String,
        size: Option<Size>,
        respond_to: ServiceResponse<(), WaiterError>,
    ) {
        debug!("Processing add_item request");

        let result = match self.menu_client.get_item(item_id.clone()).await {
            Ok(Some(item)) => {
                self.draft.add_item(&item, size);
                info!(
                    item_name = %item.name,
                    draft_total = self.draft.total,
                    "Item added to draft"
                );
                Ok(())
            }
            Ok(None) => {
                error!("Menu item not found");
                Err(WaiterError::UnknownMenuItem(item_id))
            }
            Err(e) => {
                error!(error = %e, "Catalog lookup failed");
                Err(WaiterError::ActorCommunicationError(e.to_string()))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(item_id = %item_id), skip(self, respond_to))]
    fn handle_remove_item(&mut self, item_id: String, respond_to: ServiceResponse<(), WaiterError>) {
        debug!("Processing remove_item request");

        self.draft.remove_item(&item_id);
        info!(draft_total = self.draft.total, "Item removed from draft");

        let _ = respond_to.send(Ok(()));
    }

    /// Prices the ingredient for the line's current size, then attaches it.
    /// A missing line or a non-pizza line is a silent no-op; an ingredient
    /// the catalog does not know is an error.
    #[instrument(fields(item_id = %item_id, ingredient_id = %ingredient_id), skip(self, respond_to))]
    async fn handle_add_ingredient(
        &mut self,
        item_id: String,
        ingredient_id: String,
        respond_to: ServiceResponse<(), WaiterError>,
    ) {
        debug!("Processing add_ingredient request");

        let Some(size) = self.draft.line_size(&item_id) else {
            debug!("No such line in draft; ignoring");
            let _ = respond_to.send(Ok(()));
            return;
        };

        match self.menu_client.get_item(item_id.clone()).await {
            Ok(Some(item)) if !item.accepts_ingredients() => {
                debug!("Line is not a pizza; ignoring");
                let _ = respond_to.send(Ok(()));
                return;
            }
            Err(e) => {
                error!(error = %e, "Catalog lookup failed");
                let _ = respond_to.send(Err(WaiterError::ActorCommunicationError(e.to_string())));
                return;
            }
            _ => {}
        }

        let result = match self
            .menu_client
            .ingredient_surcharge(ingredient_id.clone(), size)
            .await
        {
            Ok(Some((ingredient, surcharge))) => {
                self.draft.add_ingredient(&item_id, ingredient, surcharge);
                info!(surcharge, draft_total = self.draft.total, "Ingredient attached");
                Ok(())
            }
            Ok(None) => {
                error!("Ingredient not found in catalog");
                Err(WaiterError::UnknownIngredient(ingredient_id))
            }
            Err(e) => {
                error!(error = %e, "Ingredient lookup failed");
                Err(WaiterError::ActorCommunicationError(e.to_string()))
            }
        };

        let _ = respond_to.send(result);
    }

    /// Detaches an ingredient, refunding the surcharge it was attached for
    /// at the line's current size. Absent line or ingredient: silent no-op.
    #[instrument(fields(item_id = %item_id, ingredient_id = %ingredient_id), skip(self, respond_to))]
    async fn handle_remove_ingredient(
        &mut self,
        item_id: String,
        ingredient_id: String,
        respond_to: ServiceResponse<(), WaiterError>,
    ) {
        debug!("Processing remove_ingredient request");

        let Some(size) = self.draft.line_size(&item_id) else {
            debug!("No such line in draft; ignoring");
            let _ = respond_to.send(Ok(()));
            return;
        };

        let result = match self
            .menu_client
            .ingredient_surcharge(ingredient_id.clone(), size)
            .await
        {
            Ok(Some((_, surcharge))) => {
                self.draft.remove_ingredient(&item_id, &ingredient_id, surcharge);
                info!(draft_total = self.draft.total, "Ingredient detached");
                Ok(())
            }
            Ok(None) => {
                // Unknown to the catalog means it was never attached with a
                // surcharge either; nothing to undo.
                debug!("Ingredient not in catalog; ignoring");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Ingredient lookup failed");
                Err(WaiterError::ActorCommunicationError(e.to_string()))
            }
        };

        let _ = respond_to.send(result);
    }

    /// Publishes the draft to the order store, then resets it.
    ///
    /// The draft is cleared only after the store accepted the order, so a
    /// failed commit loses nothing.
    #[instrument(skip(self, respond_to))]
    async fn handle_commit(&mut self, respond_to: ServiceResponse<Option<String>, WaiterError>) {
        debug!("Processing commit request");

        let Some(payload) = self.draft.to_create(SystemTime::now()) else {
            info!("Commit ignored: draft has no line items");
            let _ = respond_to.send(Ok(None));
            return;
        };

        let result = match self.order_client.commit_order(payload).await {
            Ok(order_id) => {
                info!(order_id = %order_id, "Draft committed");
                self.draft.clear();
                Ok(Some(order_id))
            }
            Err(e) => {
                error!(error = %e, "Commit failed; draft kept");
                Err(WaiterError::CommitFailed(e.to_string()))
            }
        };

        let _ = respond_to.send(result);
    }
}
