//! DTOs de la API

pub mod notification_dto;
pub mod vehicle_dto;
