//! Controllers de la API
//!
//! Orquestación entre rutas, repositorios y servicios. Sin lógica de
//! derivación propia: todo cálculo vive en services.

pub mod agreement_controller;
pub mod compliance_controller;
pub mod export_controller;
pub mod vehicle_controller;
pub mod vor_controller;
