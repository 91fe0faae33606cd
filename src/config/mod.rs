//! Configuración del sistema
//!
//! Configuración de entorno y base de datos.

pub mod database;
pub mod environment;
