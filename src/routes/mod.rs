pub mod notification_routes;
pub mod vehicle_routes;
