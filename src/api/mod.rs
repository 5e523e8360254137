// Backend gateways, one module per resource
pub mod client;
pub mod countries;
pub mod regions;
pub mod overview;
pub mod weather;
pub mod itineraries;

// Re-export commonly used functions
pub use client::{set_silent, ApiClient};
pub use countries::{load_countries, load_countries_or_fallback};
pub use regions::load_regions;
pub use overview::{load_overview, parse_overview};
pub use weather::load_forecast;
pub use itineraries::{csv_filename, download_csv, download_csv_to, generate_itinerary, load_report};
