pub mod elevation;
pub mod google_maps;
pub mod itinerary;
pub mod landmarks;
pub mod localizer;
pub mod oracle;
pub mod route_planner;
