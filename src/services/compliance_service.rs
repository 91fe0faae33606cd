//! Servicio de compliance contractual
//!
//! Deriva los agregados de incumplimientos, penalizaciones, vencimientos
//! y kilometraje sobre la colección de contratos. Corre independiente del
//! pipeline de etapas de vehículo: solo mira contratos.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::agreement::{
    Agreement, AgreementStage, AgreementStatus, BreachSeverity, PenaltyStatus,
};
use crate::models::compliance::{ComplianceSummary, ExpiringAgreement};

/// Resumir el cumplimiento de la lista completa de contratos.
///
/// Cada derivado es una sola pasada de reduce. Con lista vacía el
/// porcentaje de cumplimiento es 100 por definición: el guard contra la
/// división por cero es explícito, nunca un NaN implícito.
pub fn summarize(
    agreements: &[Agreement],
    now: DateTime<Utc>,
    window_days: i64,
) -> ComplianceSummary {
    let total = agreements.len();

    let compliant_count = agreements.iter().filter(|a| a.is_compliant()).count();

    let compliance_percent = if total == 0 {
        100
    } else {
        ((compliant_count as f64 / total as f64) * 100.0).round() as u32
    };

    // Totales de pendientes agrupados por divisa: nunca se suma a través
    // de divisas distintas.
    let mut pending_penalty_totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for agreement in agreements {
        for penalty in &agreement.penalties {
            if penalty.status == PenaltyStatus::Pending {
                *pending_penalty_totals
                    .entry(penalty.currency.clone())
                    .or_insert(Decimal::ZERO) += penalty.amount;
            }
        }
    }

    let unresolved_breach_count = agreements
        .iter()
        .flat_map(|a| a.breaches.iter())
        .filter(|b| !b.resolved)
        .count();

    let critical_breach_count = agreements
        .iter()
        .flat_map(|a| a.breaches.iter())
        .filter(|b| b.severity == BreachSeverity::Critical)
        .count();

    let expiring_soon = expiring_soon(agreements, now, window_days);

    let mileage_overage_count = agreements
        .iter()
        .filter(|a| has_mileage_overage(a))
        .count();

    ComplianceSummary {
        total_agreements: total,
        compliant_count,
        compliance_percent,
        pending_penalty_totals,
        unresolved_breach_count,
        critical_breach_count,
        expiring_soon,
        mileage_overage_count,
    }
}

/// Contratos cuyo `end_at` cae en [now, now + window_days], excluyendo
/// cerrados y vencidos (esos ya tienen su propio tratamiento).
pub fn expiring_soon(
    agreements: &[Agreement],
    now: DateTime<Utc>,
    window_days: i64,
) -> Vec<ExpiringAgreement> {
    let window_end = now + Duration::days(window_days);

    agreements
        .iter()
        .filter(|a| a.stage != AgreementStage::Closed)
        .filter(|a| a.status != AgreementStatus::Overdue)
        .filter(|a| a.end_at >= now && a.end_at <= window_end)
        .map(|a| ExpiringAgreement {
            agreement_id: a.id,
            contract_number: a.contract_number.clone(),
            vehicle_id: a.vehicle_id.clone(),
            end_at: a.end_at,
            days_remaining: (a.end_at - now).num_days(),
        })
        .collect()
}

/// Exceso de kilometraje: o el campo explícito del contrato, o el margen
/// restante calculado es negativo o queda por debajo del 10% del límite.
fn has_mileage_overage(agreement: &Agreement) -> bool {
    if agreement.mileage_overage.unwrap_or(0) > 0 {
        return true;
    }
    let consumed = agreement.current_mileage - agreement.mileage_at_start;
    let remaining = agreement.mileage_limit - consumed;
    remaining < 0 || remaining * 10 < agreement.mileage_limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agreement::{AgreementTimestamps, Breach, Penalty};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn agreement(contract_number: &str) -> Agreement {
        let now = Utc::now();
        Agreement {
            id: Uuid::new_v4(),
            contract_number: contract_number.to_string(),
            vehicle_id: "V001".to_string(),
            stage: AgreementStage::Collected,
            status: AgreementStatus::Active,
            timestamps: AgreementTimestamps::default(),
            start_at: now - Duration::days(30),
            end_at: now + Duration::days(60),
            penalties: vec![],
            breaches: vec![],
            mileage_limit: 10_000,
            mileage_at_start: 1_000,
            current_mileage: 2_000,
            mileage_at_return: None,
            mileage_overage: None,
        }
    }

    fn breach(severity: BreachSeverity, resolved: bool) -> Breach {
        Breach {
            breach_type: "late_return".to_string(),
            severity,
            resolved,
            description: "returned after the agreed window".to_string(),
        }
    }

    fn pending_penalty(amount: i64, currency: &str) -> Penalty {
        Penalty {
            penalty_type: "late_fee".to_string(),
            amount: Decimal::from(amount),
            currency: currency.to_string(),
            status: PenaltyStatus::Pending,
            date: Utc::now().date_naive(),
        }
    }

    #[test]
    fn empty_input_is_exactly_one_hundred_percent() {
        let summary = summarize(&[], Utc::now(), 30);
        assert_eq!(summary.compliance_percent, 100);
        assert_eq!(summary.total_agreements, 0);
        assert!(summary.pending_penalty_totals.is_empty());
    }

    #[test]
    fn one_unresolved_critical_breach_out_of_four() {
        let mut flagged = agreement("AGR-0004");
        flagged.breaches.push(breach(BreachSeverity::Critical, false));

        let agreements = vec![
            agreement("AGR-0001"),
            agreement("AGR-0002"),
            agreement("AGR-0003"),
            flagged,
        ];

        let summary = summarize(&agreements, Utc::now(), 30);
        assert_eq!(summary.compliant_count, 3);
        assert_eq!(summary.compliance_percent, 75);
        assert_eq!(summary.critical_breach_count, 1);
        assert_eq!(summary.unresolved_breach_count, 1);
    }

    #[test]
    fn resolved_breaches_still_count_as_compliant() {
        let mut resolved = agreement("AGR-0010");
        resolved.breaches.push(breach(BreachSeverity::Major, true));
        resolved.breaches.push(breach(BreachSeverity::Minor, true));

        let summary = summarize(&[resolved], Utc::now(), 30);
        assert_eq!(summary.compliant_count, 1);
        assert_eq!(summary.compliance_percent, 100);
        assert_eq!(summary.unresolved_breach_count, 0);
    }

    #[test]
    fn compliance_percent_stays_in_bounds() {
        let mut all_breached: Vec<Agreement> = (0..5)
            .map(|i| agreement(&format!("AGR-{i:04}")))
            .collect();
        for a in &mut all_breached {
            a.breaches.push(breach(BreachSeverity::Minor, false));
        }

        let summary = summarize(&all_breached, Utc::now(), 30);
        assert_eq!(summary.compliance_percent, 0);
    }

    #[test]
    fn pending_penalties_group_by_currency() {
        let mut a = agreement("AGR-0020");
        a.penalties.push(pending_penalty(120, "GBP"));
        a.penalties.push(pending_penalty(80, "GBP"));
        a.penalties.push(pending_penalty(50, "EUR"));
        a.penalties.push(Penalty {
            status: PenaltyStatus::Paid,
            ..pending_penalty(999, "GBP")
        });

        let summary = summarize(&[a], Utc::now(), 30);
        assert_eq!(summary.pending_penalty_totals.len(), 2);
        assert_eq!(summary.pending_penalty_totals["GBP"], Decimal::from(200));
        assert_eq!(summary.pending_penalty_totals["EUR"], Decimal::from(50));
    }

    #[test]
    fn expiring_soon_respects_window_stage_and_status() {
        let now = Utc::now();

        let mut in_window = agreement("AGR-0030");
        in_window.end_at = now + Duration::days(10);

        let mut outside_window = agreement("AGR-0031");
        outside_window.end_at = now + Duration::days(45);

        let mut closed = agreement("AGR-0032");
        closed.end_at = now + Duration::days(10);
        closed.stage = AgreementStage::Closed;

        let mut overdue = agreement("AGR-0033");
        overdue.end_at = now + Duration::days(10);
        overdue.status = AgreementStatus::Overdue;

        let mut already_ended = agreement("AGR-0034");
        already_ended.end_at = now - Duration::days(1);

        let agreements = vec![in_window, outside_window, closed, overdue, already_ended];
        let expiring = expiring_soon(&agreements, now, 30);

        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].contract_number, "AGR-0030");
        assert_eq!(expiring[0].days_remaining, 10);
    }

    #[test]
    fn mileage_overage_explicit_and_computed() {
        let mut explicit = agreement("AGR-0040");
        explicit.mileage_overage = Some(150);

        let mut negative_remaining = agreement("AGR-0041");
        negative_remaining.current_mileage = negative_remaining.mileage_at_start + 11_000;

        // consumido 9100 de 10000: queda 900, por debajo del 10%
        let mut under_ten_percent = agreement("AGR-0042");
        under_ten_percent.current_mileage = under_ten_percent.mileage_at_start + 9_100;

        // consumido 9000 justo: queda el 10% exacto, no cuenta
        let mut at_ten_percent = agreement("AGR-0043");
        at_ten_percent.current_mileage = at_ten_percent.mileage_at_start + 9_000;

        let healthy = agreement("AGR-0044");

        let agreements = vec![
            explicit,
            negative_remaining,
            under_ten_percent,
            at_ten_percent,
            healthy,
        ];
        let summary = summarize(&agreements, Utc::now(), 30);
        assert_eq!(summary.mileage_overage_count, 3);
    }
}
