use serde::{Deserialize, Serialize};

use crate::models::vor::FlaggedVehicle;

// Query del listado VOR. `top` trunca a los N más urgentes; sin él se
// devuelve el conjunto completo.
#[derive(Debug, Deserialize)]
pub struct VorQuery {
    pub top: Option<usize>,
}

// Response del agregado VOR
#[derive(Debug, Serialize)]
pub struct VorResponse {
    pub flagged_count: usize,
    pub vehicles: Vec<FlaggedVehicle>,
}
