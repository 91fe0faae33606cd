//! Repositorio de flota en memoria
//!
//! El dataset de la flota vive en memoria detrás de un trait, inyectado
//! en el estado de la aplicación: el núcleo de derivación nunca toca
//! estado a nivel de módulo y los tests le pasan fixtures arbitrarios.
//! La normalización de IDs ocurre aquí, una sola vez, en la frontera.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::agreement::{
    Agreement, AgreementStage, AgreementStatus, AgreementTimestamps, Breach, BreachSeverity,
    Penalty, PenaltyStatus,
};
use crate::models::vehicle::{
    AvailabilityStatus, RiskLevel, StageTimestamps, Vehicle, VehicleHealth,
};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::vehicle_id::normalize_vehicle_id;

/// Acceso a los datos de flota y contratos
#[async_trait]
pub trait FleetRepository: Send + Sync {
    async fn list_vehicles(&self) -> Vec<Vehicle>;
    async fn get_vehicle(&self, id: &str) -> Option<Vehicle>;
    async fn update_vehicle_status(
        &self,
        id: &str,
        status: AvailabilityStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Vehicle>;
    async fn list_agreements(&self) -> Vec<Agreement>;
    async fn get_agreement(&self, id: Uuid) -> Option<Agreement>;
}

struct FleetData {
    vehicles: Vec<Vehicle>,
    agreements: Vec<Agreement>,
}

/// Implementación en memoria, sembrada con el fixture estático
pub struct InMemoryFleetRepository {
    inner: RwLock<FleetData>,
}

impl InMemoryFleetRepository {
    pub fn new(vehicles: Vec<Vehicle>, agreements: Vec<Agreement>) -> Self {
        let vehicles = vehicles
            .into_iter()
            .map(|mut v| {
                v.id = normalize_vehicle_id(&v.id);
                v
            })
            .collect();
        let agreements = agreements
            .into_iter()
            .map(|mut a| {
                a.vehicle_id = normalize_vehicle_id(&a.vehicle_id);
                a
            })
            .collect();
        Self {
            inner: RwLock::new(FleetData {
                vehicles,
                agreements,
            }),
        }
    }

    pub fn seeded() -> Self {
        let (vehicles, agreements) = seed_fleet();
        log::info!(
            "Fleet store seeded: {} vehicles, {} agreements",
            vehicles.len(),
            agreements.len()
        );
        Self::new(vehicles, agreements)
    }
}

#[async_trait]
impl FleetRepository for InMemoryFleetRepository {
    async fn list_vehicles(&self) -> Vec<Vehicle> {
        self.inner.read().await.vehicles.clone()
    }

    async fn get_vehicle(&self, id: &str) -> Option<Vehicle> {
        let canonical = normalize_vehicle_id(id);
        self.inner
            .read()
            .await
            .vehicles
            .iter()
            .find(|v| v.id == canonical)
            .cloned()
    }

    async fn update_vehicle_status(
        &self,
        id: &str,
        status: AvailabilityStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Vehicle> {
        let canonical = normalize_vehicle_id(id);
        let mut data = self.inner.write().await;
        let vehicle = data
            .vehicles
            .iter_mut()
            .find(|v| v.id == canonical)
            .ok_or_else(|| not_found_error("Vehicle", &canonical))?;

        vehicle.availability_status = status;
        // Sellar el timestamp de entrada de la etapa que corresponde al
        // nuevo estado. Los timestamps son append-only: nunca se limpian.
        match status {
            AvailabilityStatus::InWorkshop => {
                vehicle.stage_timestamps.workshop_in_at = Some(now);
            }
            AvailabilityStatus::AwaitingParts => {
                vehicle.stage_timestamps.parts_requested_at = Some(now);
            }
            AvailabilityStatus::AwaitingValet => {
                if vehicle.stage_timestamps.returned_at.is_none() {
                    vehicle.stage_timestamps.returned_at = Some(now);
                }
            }
            AvailabilityStatus::Available => {
                vehicle.stage_timestamps.valeted_at = Some(now);
            }
            _ => {}
        }

        Ok(vehicle.clone())
    }

    async fn list_agreements(&self) -> Vec<Agreement> {
        self.inner.read().await.agreements.clone()
    }

    async fn get_agreement(&self, id: Uuid) -> Option<Agreement> {
        self.inner
            .read()
            .await
            .agreements
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }
}

fn health(score: u8, battery: u8, faults: &[&str]) -> VehicleHealth {
    VehicleHealth {
        health_score: score,
        battery_health: battery,
        mot_expiry: chrono::NaiveDate::from_ymd_opt(2027, 4, 12).unwrap(),
        last_ota: chrono::NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
        fault_codes: faults.iter().map(|f| f.to_string()).collect(),
    }
}

/// Fixture estático de la flota. Los offsets son relativos al arranque
/// para que el dashboard muestre incidencias vivas desde el primer poll.
pub fn seed_fleet() -> (Vec<Vehicle>, Vec<Agreement>) {
    let now = Utc::now();

    let vehicles = vec![
        Vehicle {
            id: "V001".to_string(),
            vin: "LGXCE4CB1N0000101".to_string(),
            registration: "LR24 KXA".to_string(),
            availability_status: AvailabilityStatus::Available,
            stage_timestamps: StageTimestamps {
                returned_at: Some(now - Duration::days(3)),
                inspected_at: Some(now - Duration::days(3) + Duration::hours(2)),
                valeted_at: Some(now - Duration::days(2)),
                ..Default::default()
            },
            health: health(92, 88, &[]),
            risk_score: 12,
            risk_level: RiskLevel::Low,
            created_at: now - Duration::days(400),
        },
        Vehicle {
            id: "V002".to_string(),
            vin: "LGXCE4CB1N0000102".to_string(),
            registration: "LR24 KXB".to_string(),
            availability_status: AvailabilityStatus::InWorkshop,
            stage_timestamps: StageTimestamps {
                returned_at: Some(now - Duration::hours(60)),
                inspected_at: Some(now - Duration::hours(56)),
                workshop_in_at: Some(now - Duration::hours(50)),
                ..Default::default()
            },
            health: health(61, 74, &["P0A80"]),
            risk_score: 48,
            risk_level: RiskLevel::Medium,
            created_at: now - Duration::days(380),
        },
        // ID con prefijo de fabricante a propósito: el store lo
        // canonicaliza al sembrar.
        Vehicle {
            id: "BYD-V003".to_string(),
            vin: "LGXCE4CB1N0000103".to_string(),
            registration: "LR24 KXC".to_string(),
            availability_status: AvailabilityStatus::OnHire,
            stage_timestamps: StageTimestamps {
                parts_requested_at: Some(now - Duration::hours(80)),
                ..Default::default()
            },
            health: health(55, 70, &["C1A00", "U0111"]),
            risk_score: 77,
            risk_level: RiskLevel::High,
            created_at: now - Duration::days(365),
        },
        Vehicle {
            id: "V004".to_string(),
            vin: "LGXCE4CB1N0000104".to_string(),
            registration: "LR24 KXD".to_string(),
            availability_status: AvailabilityStatus::AwaitingValet,
            stage_timestamps: StageTimestamps {
                returned_at: Some(now - Duration::hours(5)),
                inspected_at: Some(now - Duration::hours(4)),
                ..Default::default()
            },
            health: health(84, 90, &[]),
            risk_score: 20,
            risk_level: RiskLevel::Low,
            created_at: now - Duration::days(300),
        },
        Vehicle {
            id: "V005".to_string(),
            vin: "LGXCE4CB1N0000105".to_string(),
            registration: "LR24 KXE".to_string(),
            availability_status: AvailabilityStatus::AwaitingDocuments,
            stage_timestamps: StageTimestamps {
                returned_at: Some(now - Duration::days(1)),
                ..Default::default()
            },
            health: health(78, 82, &[]),
            risk_score: 33,
            risk_level: RiskLevel::Medium,
            created_at: now - Duration::days(290),
        },
        Vehicle {
            id: "V006".to_string(),
            vin: "LGXCE4CB1N0000106".to_string(),
            registration: "LR24 KXF".to_string(),
            availability_status: AvailabilityStatus::Delivering,
            stage_timestamps: StageTimestamps::default(),
            health: health(95, 93, &[]),
            risk_score: 8,
            risk_level: RiskLevel::Low,
            created_at: now - Duration::days(120),
        },
    ];

    let agreements = vec![
        Agreement {
            id: Uuid::new_v4(),
            contract_number: "AGR-2026-0117".to_string(),
            vehicle_id: "V003".to_string(),
            stage: AgreementStage::Collected,
            status: AgreementStatus::Active,
            timestamps: AgreementTimestamps {
                created_at: Some(now - Duration::days(40)),
                prepared_at: Some(now - Duration::days(39)),
                signed_at: Some(now - Duration::days(38)),
                collected_at: Some(now - Duration::days(37)),
                ..Default::default()
            },
            start_at: now - Duration::days(37),
            end_at: now + Duration::days(14),
            penalties: vec![Penalty {
                penalty_type: "late_fee".to_string(),
                amount: Decimal::new(12_000, 2),
                currency: "GBP".to_string(),
                status: PenaltyStatus::Pending,
                date: (now - Duration::days(5)).date_naive(),
            }],
            breaches: vec![Breach {
                breach_type: "unauthorised_driver".to_string(),
                severity: BreachSeverity::Critical,
                resolved: false,
                description: "second driver not named on the agreement".to_string(),
            }],
            mileage_limit: 8_000,
            mileage_at_start: 12_400,
            current_mileage: 19_900,
            mileage_at_return: None,
            mileage_overage: None,
        },
        Agreement {
            id: Uuid::new_v4(),
            contract_number: "AGR-2026-0132".to_string(),
            vehicle_id: "V006".to_string(),
            stage: AgreementStage::Signed,
            status: AgreementStatus::Active,
            timestamps: AgreementTimestamps {
                created_at: Some(now - Duration::days(3)),
                prepared_at: Some(now - Duration::days(2)),
                signed_at: Some(now - Duration::days(1)),
                ..Default::default()
            },
            start_at: now,
            end_at: now + Duration::days(90),
            penalties: vec![],
            breaches: vec![],
            mileage_limit: 12_000,
            mileage_at_start: 8_100,
            current_mileage: 8_100,
            mileage_at_return: None,
            mileage_overage: None,
        },
        Agreement {
            id: Uuid::new_v4(),
            contract_number: "AGR-2026-0098".to_string(),
            vehicle_id: "V001".to_string(),
            stage: AgreementStage::Closed,
            status: AgreementStatus::Completed,
            timestamps: AgreementTimestamps {
                created_at: Some(now - Duration::days(120)),
                prepared_at: Some(now - Duration::days(119)),
                signed_at: Some(now - Duration::days(118)),
                collected_at: Some(now - Duration::days(117)),
                returned_at: Some(now - Duration::days(4)),
                damage_check_completed_at: Some(now - Duration::days(3)),
                closed_at: Some(now - Duration::days(2)),
                ..Default::default()
            },
            start_at: now - Duration::days(117),
            end_at: now - Duration::days(4),
            penalties: vec![Penalty {
                penalty_type: "excess_mileage".to_string(),
                amount: Decimal::new(8_550, 2),
                currency: "GBP".to_string(),
                status: PenaltyStatus::Paid,
                date: (now - Duration::days(3)).date_naive(),
            }],
            breaches: vec![Breach {
                breach_type: "late_return".to_string(),
                severity: BreachSeverity::Minor,
                resolved: true,
                description: "returned 6 hours after the agreed slot".to_string(),
            }],
            mileage_limit: 10_000,
            mileage_at_start: 2_000,
            current_mileage: 12_350,
            mileage_at_return: Some(12_350),
            mileage_overage: Some(350),
        },
        Agreement {
            id: Uuid::new_v4(),
            contract_number: "AGR-2026-0141".to_string(),
            vehicle_id: "BYD-V003".to_string(),
            stage: AgreementStage::Collected,
            status: AgreementStatus::Overdue,
            timestamps: AgreementTimestamps {
                created_at: Some(now - Duration::days(70)),
                prepared_at: Some(now - Duration::days(69)),
                signed_at: Some(now - Duration::days(68)),
                collected_at: Some(now - Duration::days(67)),
                ..Default::default()
            },
            start_at: now - Duration::days(67),
            end_at: now - Duration::days(2),
            penalties: vec![Penalty {
                penalty_type: "late_fee".to_string(),
                amount: Decimal::new(6_000, 2),
                currency: "EUR".to_string(),
                status: PenaltyStatus::Disputed,
                date: (now - Duration::days(1)).date_naive(),
            }],
            breaches: vec![],
            mileage_limit: 9_000,
            mileage_at_start: 5_000,
            current_mileage: 13_600,
            mileage_at_return: None,
            mileage_overage: None,
        },
    ];

    (vehicles, agreements)
}
