//! DTOs de la API
//!
//! Requests y responses por grupo de rutas, más la response genérica.

pub mod agreement_dto;
pub mod api;
pub mod compliance_dto;
pub mod export_dto;
pub mod vehicle_dto;
pub mod vor_dto;
