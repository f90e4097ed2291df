pub mod notification_repository;
pub mod reminder_state_repository;
pub mod vehicle_repository;
