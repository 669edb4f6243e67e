use crate::model::{ClientId, Visit};
use crate::shop::{Shop, ShopError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument};

/// One arrival. Visits the shop once and is done.
#[derive(Clone)]
pub struct Client {
    id: ClientId,
    shop: Arc<Shop>,
}

impl Client {
    pub fn new(id: ClientId, shop: Arc<Shop>) -> Self {
        Self { id, shop }
    }

    /// Asks for a haircut. An interruption is logged here and handed back to
    /// the caller; the client never retries.
    #[instrument(name = "client", skip_all, fields(client = %self.id))]
    pub async fn visit(self, cancel: CancellationToken) -> Result<Visit, ShopError> {
        match self.shop.request_haircut(self.id, &cancel).await {
            Ok(visit) => {
                debug!(served = visit.is_served(), "Visit finished");
                Ok(visit)
            }
            Err(e) => {
                error!(error = %e, "Client interrupted");
                Err(e)
            }
        }
    }
}
