//! Módulo de base de datos
//!
//! Maneja la conexión y el sembrado del fichero SQLite de informes.

pub mod connection;

pub use connection::DatabaseConnection;
