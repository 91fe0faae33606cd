//! Servicio de agregación VOR
//!
//! Pasa toda la flota por la derivación etapa → duración → severidad,
//! filtra los vehículos sin incidencia y ordena por urgencia. La capa de
//! presentación decide si trunca a top-N; aquí se devuelve el conjunto
//! completo sin paginación.

use chrono::{DateTime, Utc};
use std::cmp::Reverse;

use crate::models::vehicle::Vehicle;
use crate::models::vor::{FlaggedVehicle, Severity};
use crate::services::lifecycle_service::{classify, resolve_stage, seconds_in_stage};

/// Agregar la flota completa a la lista de vehículos marcados.
///
/// Orden: Critical antes que Warning (ordinal de severidad), y dentro de
/// la misma severidad el que más lleva esperando primero (duración
/// descendente, `None` cuenta como 0). El sort es estable, así los
/// empates exactos conservan el orden de entrada para fixtures
/// deterministas.
pub fn aggregate(vehicles: &[Vehicle], now: DateTime<Utc>) -> Vec<FlaggedVehicle> {
    let mut flagged: Vec<FlaggedVehicle> = vehicles
        .iter()
        .filter_map(|vehicle| {
            let stage = resolve_stage(vehicle);
            let duration_seconds = seconds_in_stage(stage, &vehicle.stage_timestamps, now);
            let severity = classify(stage, duration_seconds);
            if severity == Severity::Ok {
                return None;
            }
            Some(FlaggedVehicle {
                vehicle_id: vehicle.id.clone(),
                registration: vehicle.registration.clone(),
                vin: vehicle.vin.clone(),
                stage,
                duration_seconds,
                severity,
            })
        })
        .collect();

    flagged.sort_by_key(|entry| {
        (
            Reverse(entry.severity),
            Reverse(entry.duration_seconds.unwrap_or(0)),
        )
    });

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::vehicle::{
        AvailabilityStatus, RiskLevel, StageTimestamps, VehicleHealth,
    };
    use crate::models::vor::Stage;

    fn vehicle(
        registration: &str,
        status: AvailabilityStatus,
        timestamps: StageTimestamps,
    ) -> Vehicle {
        Vehicle {
            id: format!("V-{}", registration),
            vin: format!("VIN-{}", registration),
            registration: registration.to_string(),
            availability_status: status,
            stage_timestamps: timestamps,
            health: VehicleHealth {
                health_score: 80,
                battery_health: 75,
                mot_expiry: chrono::NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
                last_ota: chrono::NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                fault_codes: vec![],
            },
            risk_score: 20,
            risk_level: RiskLevel::Low,
            created_at: Utc::now(),
        }
    }

    fn workshop_since(now: DateTime<Utc>, hours: i64) -> StageTimestamps {
        StageTimestamps {
            workshop_in_at: Some(now - Duration::hours(hours)),
            ..Default::default()
        }
    }

    fn valet_since(now: DateTime<Utc>, hours: i64) -> StageTimestamps {
        StageTimestamps {
            valeted_at: Some(now - Duration::hours(hours)),
            ..Default::default()
        }
    }

    #[test]
    fn ok_vehicles_are_filtered_out() {
        let now = Utc::now();
        let fleet = vec![
            vehicle("OK-1", AvailabilityStatus::Available, StageTimestamps::default()),
            vehicle("OK-2", AvailabilityStatus::InWorkshop, workshop_since(now, 1)),
        ];
        assert!(aggregate(&fleet, now).is_empty());
    }

    #[test]
    fn critical_sorts_before_warning_then_duration_desc() {
        let now = Utc::now();
        let fleet = vec![
            vehicle("WARN-SHORT", AvailabilityStatus::AwaitingValet, valet_since(now, 4)),
            vehicle("CRIT-SHORT", AvailabilityStatus::InWorkshop, workshop_since(now, 49)),
            vehicle("WARN-LONG", AvailabilityStatus::AwaitingValet, valet_since(now, 8)),
            vehicle("CRIT-LONG", AvailabilityStatus::InWorkshop, workshop_since(now, 60)),
        ];

        let flagged = aggregate(&fleet, now);
        let order: Vec<&str> = flagged.iter().map(|f| f.registration.as_str()).collect();
        assert_eq!(order, vec!["CRIT-LONG", "CRIT-SHORT", "WARN-LONG", "WARN-SHORT"]);
    }

    #[test]
    fn exact_ties_keep_insertion_order() {
        let now = Utc::now();
        let fleet = vec![
            vehicle("FIRST", AvailabilityStatus::InWorkshop, workshop_since(now, 50)),
            vehicle("SECOND", AvailabilityStatus::InWorkshop, workshop_since(now, 50)),
            vehicle("THIRD", AvailabilityStatus::InWorkshop, workshop_since(now, 50)),
        ];

        let flagged = aggregate(&fleet, now);
        let order: Vec<&str> = flagged.iter().map(|f| f.registration.as_str()).collect();
        assert_eq!(order, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn flagged_entry_carries_stage_duration_and_passthrough_fields() {
        let now = Utc::now();
        let fleet = vec![vehicle(
            "LR24 ABC",
            AvailabilityStatus::OnHire,
            StageTimestamps {
                parts_requested_at: Some(now - Duration::hours(80)),
                ..Default::default()
            },
        )];

        let flagged = aggregate(&fleet, now);
        assert_eq!(flagged.len(), 1);
        let entry = &flagged[0];
        assert_eq!(entry.stage, Stage::AwaitingParts);
        assert_eq!(entry.severity, Severity::Critical);
        assert_eq!(entry.duration_seconds, Some(288_000));
        assert_eq!(entry.registration, "LR24 ABC");
        assert_eq!(entry.vin, "VIN-LR24 ABC");
    }
}
