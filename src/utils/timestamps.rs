//! Parseo de timestamps en la frontera de datos
//!
//! Los timestamps llegan como texto ISO-8601 desde SQLite y fixtures.
//! Un valor imposible de parsear devuelve `None` aquí, una sola vez, en
//! vez de propagar un valor basura: un registro sin timestamp nunca se
//! marca ni entra en ventanas de fechas.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parsear un timestamp ISO-8601. Acepta RFC 3339 con zona y el formato
/// `YYYY-MM-DDTHH:MM:SS` sin zona (se asume UTC). Devuelve `None` como
/// centinela explícito para entradas no parseables.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_zone() {
        let parsed = parse_timestamp("2026-08-29T10:15:00+01:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-08-29T09:15:00+00:00");
    }

    #[test]
    fn parses_naive_iso_as_utc() {
        let parsed = parse_timestamp("2026-08-29T10:15:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-08-29T10:15:00+00:00");
    }

    #[test]
    fn garbage_yields_none_not_a_crash() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2026-13-45T99:99:99"), None);
    }
}
