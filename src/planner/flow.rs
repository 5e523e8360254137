//! Async glue between a shared [`PlanningSession`] and the gateways.
//!
//! The session lock is never held across an `.await`; each fetch takes a
//! ticket under the lock, releases it, awaits the backend, then locks
//! again to apply the result.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::handoff::ReportHandoff;
use super::session::PlanningSession;
use crate::api::{self, ApiClient};
use crate::error::{ApiError, PlanError};
use crate::models::{CountryCode, GeneratedItinerary, ItineraryRequest};

pub type SharedSession = Arc<Mutex<PlanningSession>>;

pub fn new_shared_session() -> SharedSession {
    Arc::new(Mutex::new(PlanningSession::new()))
}

pub fn lock(session: &SharedSession) -> MutexGuard<'_, PlanningSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the "generating" flag for the lifetime of one submission.
///
/// Dropping the guard without calling [`GenerationGuard::finish`] (an
/// early return, a panic, or the request future being cancelled) still
/// clears the flag so the user can retry.
pub struct GenerationGuard {
    session: SharedSession,
    armed: bool,
}

impl GenerationGuard {
    pub fn begin(session: &SharedSession) -> Result<(Self, ItineraryRequest), PlanError> {
        let request = lock(session).begin_generation()?;
        Ok((
            GenerationGuard {
                session: Arc::clone(session),
                armed: true,
            },
            request,
        ))
    }

    pub fn finish(mut self, result: Result<GeneratedItinerary, ApiError>) -> Result<ReportHandoff, PlanError> {
        self.armed = false;
        lock(&self.session).finish_generation(result)
    }
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Generation abandoned before completion");
            lock(&self.session).abandon_generation();
        }
    }
}

/// Reload the region list for the selected country. Returns whether the
/// result was applied (it is dropped when the country changed meanwhile).
pub async fn refresh_regions(session: &SharedSession, api: &ApiClient) -> bool {
    let Some((ticket, country)) = lock(session).begin_regions() else {
        return false;
    };
    let result = api::load_regions(api, country).await;
    lock(session).apply_regions(ticket, result)
}

pub async fn refresh_overview(session: &SharedSession, api: &ApiClient) -> bool {
    let Some((ticket, country, region)) = lock(session).begin_overview() else {
        return false;
    };
    let result = api::load_overview(api, country, &region).await;
    lock(session).apply_overview(ticket, result)
}

pub async fn refresh_weather(session: &SharedSession, api: &ApiClient) -> Result<bool, PlanError> {
    let (ticket, q) = lock(session).begin_weather()?;
    let result = api::load_forecast(api, q.lat, q.lon, q.start_date, q.end_date).await;
    Ok(lock(session).apply_weather(ticket, result))
}

/// Switch country and load its regions and the first region's overview.
pub async fn choose_country(session: &SharedSession, api: &ApiClient, country: CountryCode) {
    let changed = lock(session).set_country(country);
    let needs_regions = changed || lock(session).regions().is_empty();
    if needs_regions {
        refresh_regions(session, api).await;
    }
    let needs_overview = {
        let s = lock(session);
        s.overview().is_none() && s.selection().region.is_some()
    };
    if needs_overview {
        refresh_overview(session, api).await;
    }
}

/// Switch region and load its overview.
pub async fn choose_region(session: &SharedSession, api: &ApiClient, region_code: &str) -> Result<(), PlanError> {
    lock(session).set_region(region_code)?;
    if lock(session).overview().is_none() {
        refresh_overview(session, api).await;
    }
    Ok(())
}

/// Build and submit the itinerary request. Refused while another
/// submission of the same session is outstanding.
pub async fn generate(session: &SharedSession, api: &ApiClient) -> Result<ReportHandoff, PlanError> {
    let (guard, request) = GenerationGuard::begin(session)?;
    let result = api::generate_itinerary(api, &request).await;
    guard.finish(result)
}
