//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos de la flota y de los
//! contratos, más el vocabulario derivado (VOR, compliance).

pub mod agreement;
pub mod compliance;
pub mod vehicle;
pub mod vor;
