//! Normalización de IDs de vehículo
//!
//! Los datos históricos mezclan códigos de flota con y sin prefijo de
//! fabricante ("V001" vs "BYD-V001"). Esta es la única función de
//! canonicalización; se aplica en la frontera de acceso a datos y en
//! ningún otro sitio.

use regex::Regex;
use std::sync::OnceLock;

fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Prefijo de fabricante: 2-4 letras seguidas de guion, antes del
    // código V-numérico.
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{2,4}-(?P<code>V\d+)$").unwrap())
}

/// Canonicalizar un ID de vehículo: quita el prefijo de fabricante si lo
/// hay y pasa a mayúsculas. IDs que no siguen el patrón se devuelven en
/// mayúsculas sin más transformación.
pub fn normalize_vehicle_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(captures) = prefix_pattern().captures(trimmed) {
        return captures["code"].to_uppercase();
    }
    trimmed.to_uppercase()
}
