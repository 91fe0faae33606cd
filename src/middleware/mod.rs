//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS del dashboard.

pub mod cors;

pub use cors::*;
