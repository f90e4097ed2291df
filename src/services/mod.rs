//! Services module
//!
//! Este módulo contiene la lógica de negocio: la calculadora pura de
//! estado de servicio y el scheduler de recordatorios en background.

pub mod reminder_scheduler;
pub mod status_calculator;

pub use reminder_scheduler::*;
pub use status_calculator::*;
