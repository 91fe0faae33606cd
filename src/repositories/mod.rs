//! Repositorios de datos
//!
//! El store de flota en memoria (detrás de un trait inyectable) y las
//! consultas SQLite del subsistema de informes.

pub mod fleet_repository;
pub mod report_repository;
