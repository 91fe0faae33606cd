//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: la
//! derivación de ciclo de vida compartida, la agregación VOR, el
//! resumen de compliance y el formateo de exports.

pub mod compliance_service;
pub mod export_service;
pub mod lifecycle_service;
pub mod vor_service;
