pub mod notification_controller;
pub mod vehicle_controller;
