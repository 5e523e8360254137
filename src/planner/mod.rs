//! Client-side trip planning: what the user picked, how it turns into a
//! generation request, and the per-visitor state machine around it.

mod flow;
mod handoff;
mod request;
mod selection;
mod sequence;
mod session;

pub use flow::{
    choose_country, choose_region, generate, lock, new_shared_session, refresh_overview, refresh_regions,
    refresh_weather, GenerationGuard, SharedSession,
};
pub use handoff::ReportHandoff;
pub use request::build_request;
pub use selection::{calc_days, parse_date, DateRange, Selection};
pub use sequence::{Slot, SlotSequencer, Ticket};
pub use session::{Phase, PlanningSession, WeatherQuery};
