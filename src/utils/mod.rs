//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, parseo de
//! timestamps y normalización de IDs de vehículo.

pub mod errors;
pub mod timestamps;
pub mod vehicle_id;
