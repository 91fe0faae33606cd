//! Servicio de ciclo de vida del vehículo
//!
//! Única implementación compartida de la derivación etapa → duración →
//! severidad. Todos los consumidores (VOR, widgets de resumen, export)
//! llaman aquí; no se duplica esta lógica en ningún otro sitio.
//!
//! Las funciones son puras: reciben `now` explícito y no tocan estado
//! global, así los tests fijan el reloj con fixtures arbitrarios.

use chrono::{DateTime, Utc};

use crate::models::vehicle::{AvailabilityStatus, StageTimestamps, Vehicle};
use crate::models::vor::{Severity, Stage};

/// Umbral crítico para taller: 48h en segundos
pub const WORKSHOP_CRITICAL_SECS: i64 = 172_800;
/// Umbral crítico para espera de piezas: 72h en segundos
pub const PARTS_CRITICAL_SECS: i64 = 259_200;
/// Umbral de aviso para valet: 3h en segundos
pub const VALET_WARNING_SECS: i64 = 10_800;

/// Duración por defecto para `Available` sin `valeted_at`. El origen
/// devolvía 0 en esta rama y null en todas las demás; se conserva el
/// comportamiento tal cual, con el default explícito en vez de implícito.
pub const AVAILABLE_DEFAULT_SECS: i64 = 0;

/// Resolver la etapa actual del vehículo.
///
/// El orden de decisión es prioridad de diseño, no accidente: el estado
/// de disponibilidad manda sobre cualquier timestamp, y `AwaitingParts`
/// solo aplica si el vehículo no está ya disponible.
pub fn resolve_stage(vehicle: &Vehicle) -> Stage {
    match vehicle.availability_status {
        AvailabilityStatus::InWorkshop => Stage::InWorkshop,
        AvailabilityStatus::AwaitingDocuments => Stage::AwaitingDocuments,
        AvailabilityStatus::AwaitingValet => Stage::AwaitingValet,
        status if vehicle.stage_timestamps.parts_requested_at.is_some()
            && status != AvailabilityStatus::Available =>
        {
            Stage::AwaitingParts
        }
        _ => Stage::Available,
    }
}

/// Segundos transcurridos en la etapa actual, contra `now`.
///
/// Devuelve `None` cuando falta el timestamp de entrada de la etapa:
/// un vehículo sin dato nunca se marca. La única excepción es
/// `Available`, que conserva el default 0 del origen.
pub fn seconds_in_stage(
    stage: Stage,
    timestamps: &StageTimestamps,
    now: DateTime<Utc>,
) -> Option<i64> {
    let since = |entered: DateTime<Utc>| (now - entered).num_seconds().max(0);

    match stage {
        Stage::InWorkshop => timestamps
            .workshop_in_at
            .or(timestamps.inspected_at)
            .map(since),
        Stage::AwaitingParts => timestamps.parts_requested_at.map(since),
        // En el origen esta etapa se calculaba con valeted_at en un
        // widget y con returned_at en otro; la implementación única usa
        // valeted_at con fallback a returned_at.
        Stage::AwaitingValet => timestamps
            .valeted_at
            .or(timestamps.returned_at)
            .map(since),
        Stage::Available => Some(
            timestamps
                .valeted_at
                .map(since)
                .unwrap_or(AVAILABLE_DEFAULT_SECS),
        ),
        Stage::AwaitingDocuments => None,
    }
}

/// Clasificar severidad contra los umbrales fijos por etapa.
///
/// Una duración `None` nunca dispara aviso ni crítico. Cualquier
/// combinación etapa/duración sin umbral clasifica como Ok.
pub fn classify(stage: Stage, duration_seconds: Option<i64>) -> Severity {
    let Some(duration) = duration_seconds else {
        return Severity::Ok;
    };

    match stage {
        Stage::InWorkshop if duration > WORKSHOP_CRITICAL_SECS => Severity::Critical,
        Stage::AwaitingParts if duration > PARTS_CRITICAL_SECS => Severity::Critical,
        Stage::AwaitingValet if duration > VALET_WARNING_SECS => Severity::Warning,
        _ => Severity::Ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::vehicle::{RiskLevel, VehicleHealth};

    fn test_vehicle(status: AvailabilityStatus, timestamps: StageTimestamps) -> Vehicle {
        Vehicle {
            id: "V001".to_string(),
            vin: "WVWZZZ1KZAW000001".to_string(),
            registration: "LR24 XYZ".to_string(),
            availability_status: status,
            stage_timestamps: timestamps,
            health: VehicleHealth {
                health_score: 90,
                battery_health: 85,
                mot_expiry: chrono::NaiveDate::from_ymd_opt(2027, 3, 1).unwrap(),
                last_ota: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                fault_codes: vec![],
            },
            risk_score: 10,
            risk_level: RiskLevel::Low,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn workshop_status_wins_over_any_timestamps() {
        let now = Utc::now();
        let timestamps = StageTimestamps {
            returned_at: Some(now),
            inspected_at: Some(now),
            workshop_in_at: None,
            parts_requested_at: Some(now),
            valeted_at: Some(now),
        };
        let vehicle = test_vehicle(AvailabilityStatus::InWorkshop, timestamps);
        assert_eq!(resolve_stage(&vehicle), Stage::InWorkshop);
    }

    #[test]
    fn parts_requested_only_flags_when_not_available() {
        let now = Utc::now();
        let timestamps = StageTimestamps {
            parts_requested_at: Some(now),
            ..Default::default()
        };
        let on_hire = test_vehicle(AvailabilityStatus::OnHire, timestamps.clone());
        assert_eq!(resolve_stage(&on_hire), Stage::AwaitingParts);

        let available = test_vehicle(AvailabilityStatus::Available, timestamps);
        assert_eq!(resolve_stage(&available), Stage::Available);
    }

    #[test]
    fn workshop_duration_falls_back_to_inspected_at() {
        let now = Utc::now();
        let timestamps = StageTimestamps {
            inspected_at: Some(now - Duration::hours(2)),
            ..Default::default()
        };
        let secs = seconds_in_stage(Stage::InWorkshop, &timestamps, now).unwrap();
        assert_eq!(secs, 7200);
    }

    #[test]
    fn missing_entry_timestamp_yields_none() {
        let now = Utc::now();
        let timestamps = StageTimestamps::default();
        assert_eq!(seconds_in_stage(Stage::InWorkshop, &timestamps, now), None);
        assert_eq!(seconds_in_stage(Stage::AwaitingParts, &timestamps, now), None);
        assert_eq!(seconds_in_stage(Stage::AwaitingValet, &timestamps, now), None);
        // Available conserva el default 0 del origen
        assert_eq!(seconds_in_stage(Stage::Available, &timestamps, now), Some(0));
    }

    #[test]
    fn future_timestamp_clamps_to_zero() {
        let now = Utc::now();
        let timestamps = StageTimestamps {
            workshop_in_at: Some(now + Duration::hours(1)),
            ..Default::default()
        };
        assert_eq!(seconds_in_stage(Stage::InWorkshop, &timestamps, now), Some(0));
    }

    #[test]
    fn fifty_hours_in_workshop_is_critical() {
        let now = Utc::now();
        let timestamps = StageTimestamps {
            workshop_in_at: Some(now - Duration::hours(50)),
            ..Default::default()
        };
        let vehicle = test_vehicle(AvailabilityStatus::InWorkshop, timestamps);

        let stage = resolve_stage(&vehicle);
        assert_eq!(stage, Stage::InWorkshop);

        let secs = seconds_in_stage(stage, &vehicle.stage_timestamps, now).unwrap();
        assert_eq!(secs, 180_000);
        assert_eq!(classify(stage, Some(secs)), Severity::Critical);
    }

    #[test]
    fn severity_is_monotone_in_duration() {
        for stage in [
            Stage::InWorkshop,
            Stage::AwaitingParts,
            Stage::AwaitingValet,
            Stage::AwaitingDocuments,
            Stage::Available,
        ] {
            let mut previous = Severity::Ok;
            for secs in [0, 3600, 10_801, 86_400, 172_801, 259_201, 1_000_000] {
                let current = classify(stage, Some(secs));
                assert!(
                    current >= previous,
                    "severity regressed at {}s for {:?}",
                    secs,
                    stage
                );
                previous = current;
            }
        }
    }

    #[test]
    fn null_duration_never_flags() {
        for stage in [Stage::InWorkshop, Stage::AwaitingParts, Stage::AwaitingValet] {
            assert_eq!(classify(stage, None), Severity::Ok);
        }
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(
            classify(Stage::InWorkshop, Some(WORKSHOP_CRITICAL_SECS)),
            Severity::Ok
        );
        assert_eq!(
            classify(Stage::InWorkshop, Some(WORKSHOP_CRITICAL_SECS + 1)),
            Severity::Critical
        );
        assert_eq!(classify(Stage::AwaitingParts, Some(PARTS_CRITICAL_SECS)), Severity::Ok);
        assert_eq!(
            classify(Stage::AwaitingParts, Some(PARTS_CRITICAL_SECS + 1)),
            Severity::Critical
        );
        assert_eq!(classify(Stage::AwaitingValet, Some(VALET_WARNING_SECS)), Severity::Ok);
        assert_eq!(
            classify(Stage::AwaitingValet, Some(VALET_WARNING_SECS + 1)),
            Severity::Warning
        );
    }
}
