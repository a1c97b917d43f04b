//! Feed and pin service

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortHandle, Abortable, Aborted};

use crate::error::{CoreError, CoreResult};
use crate::events::AppEvent;
use crate::services::{into_load_state, ServiceContext};
use crate::types::{
    CreatePinRequest, Group, LoadState, NearbyQuery, Pin, PinQuery, StatsSummary,
};

/// Longest description accepted for a new pin.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Feed and pin service
pub struct FeedService {
    ctx: Arc<ServiceContext>,
    /// Handle of the nearby search in flight, if any.
    nearby_in_flight: Mutex<Option<AbortHandle>>,
}

impl FeedService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            nearby_in_flight: Mutex::new(None),
        }
    }

    /// Community feed page. Failures become [`LoadState::Failed`].
    pub async fn load_feed(&self, query: &PinQuery) -> LoadState<Vec<Pin>> {
        let result = self
            .ctx
            .provider
            .list_pins(query)
            .await
            .map_err(CoreError::from);
        into_load_state(result, "load feed")
    }

    /// Pins around a point. Starting a new search aborts the previous one,
    /// which then resolves to [`CoreError::Superseded`].
    pub async fn nearby(&self, query: NearbyQuery) -> CoreResult<Vec<Pin>> {
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut slot = self
                .nearby_in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = slot.replace(handle) {
                previous.abort();
            }
        }

        let search = Abortable::new(self.ctx.provider.nearby_pins(&query), registration);
        match search.await {
            Ok(result) => Ok(result?),
            Err(Aborted) => {
                log::debug!("nearby search at {:.5},{:.5} superseded", query.lat, query.lng);
                Err(CoreError::Superseded)
            }
        }
    }

    /// Abort the nearby search in flight, if any.
    pub fn cancel_nearby(&self) {
        if let Some(handle) = self
            .nearby_in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    /// Create a pin and announce it.
    pub async fn create_pin(&self, req: &CreatePinRequest) -> CoreResult<Pin> {
        let description = req.description.trim();
        if description.is_empty() {
            return Err(CoreError::Validation("description must not be empty".into()));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(CoreError::Validation(format!(
                "description exceeds {MAX_DESCRIPTION_LEN} characters"
            )));
        }

        let pin = self.ctx.provider.create_pin(req).await?;
        log::info!("pin {} created at {:.5},{:.5}", pin.id, pin.lat, pin.lng);
        self.ctx.bus.publish(AppEvent::PinCreated { pin: pin.clone() });
        Ok(pin)
    }

    pub async fn load_groups(&self) -> LoadState<Vec<Group>> {
        let result = self.ctx.provider.list_groups().await.map_err(CoreError::from);
        into_load_state(result, "load groups")
    }

    pub async fn load_stats(&self) -> LoadState<StatsSummary> {
        let result = self
            .ctx
            .provider
            .stats_summary()
            .await
            .map_err(CoreError::from);
        into_load_state(result, "load stats")
    }
}
