use serde::Deserialize;
use validator::Validate;

// Query del resumen de compliance
#[derive(Debug, Deserialize, Validate)]
pub struct ComplianceQuery {
    #[validate(range(min = 1, max = 365))]
    pub window_days: Option<i64>,
}
