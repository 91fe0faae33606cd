pub mod agreement_routes;
pub mod analytics_routes;
pub mod export_routes;
pub mod vehicle_routes;
pub mod vor_routes;
