//! Modelos de Quote (cotización de inspección)
//!
//! Una cotización registra la inspección de un vehículo: notas, estimado
//! de reparación, banderas de revisión, más exactamente un checklist de
//! condición (VehicleCheck) y un registro de trabajos solicitados
//! (VehicleServiceRequest). En cada actualización los registros hijos se
//! eliminan y recrean completos (reemplazo destructivo, no merge).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Cotización - mapea a la tabla quotes
#[derive(Debug, Clone, FromRow)]
pub struct Quote {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub client_name: String,
    pub notes: Option<String>,
    pub repair_estimate: Decimal,
    pub purchase_check: bool,
    pub full_inspection: bool,
    pub quote_date: NaiveDate,
    pub responsible_user: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Checklist de condición por componente - mapea a vehicle_checks.
/// Una fila por cotización; cada campo guarda la condición observada
/// como texto libre corto ("bien", "regular", "cambiar", etc.).
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, serde::Serialize, serde::Deserialize)]
pub struct VehicleCheck {
    #[serde(skip_deserializing)]
    pub quote_id: Uuid,

    // Niveles de fluidos
    pub engine_oil: Option<String>,
    pub coolant: Option<String>,
    pub brake_fluid: Option<String>,
    pub power_steering_fluid: Option<String>,
    pub transmission_fluid: Option<String>,
    pub windshield_washer_fluid: Option<String>,

    // Batería y carga
    pub battery_condition: Option<String>,
    pub battery_terminals: Option<String>,
    pub alternator: Option<String>,

    // Llantas y frenos
    pub front_tires: Option<String>,
    pub rear_tires: Option<String>,
    pub spare_tire: Option<String>,
    pub front_brakes: Option<String>,
    pub rear_brakes: Option<String>,
    pub parking_brake: Option<String>,

    // Componentes mecánicos
    pub engine_condition: Option<String>,
    pub transmission_condition: Option<String>,
    pub clutch: Option<String>,
    pub suspension: Option<String>,
    pub shock_absorbers: Option<String>,
    pub steering: Option<String>,
    pub exhaust_system: Option<String>,
    pub belts: Option<String>,
    pub hoses: Option<String>,
    pub radiator: Option<String>,
    pub air_filter: Option<String>,
    pub fuel_system: Option<String>,
    pub ignition_system: Option<String>,

    // Eléctrico y luces
    pub headlights: Option<String>,
    pub tail_lights: Option<String>,
    pub turn_signals: Option<String>,
    pub horn: Option<String>,
    pub wipers: Option<String>,
    pub interior_lights: Option<String>,
    pub dashboard_indicators: Option<String>,
    pub air_conditioning: Option<String>,
}

/// Trabajos solicitados - mapea a vehicle_service_requests.
/// Una fila por cotización; banderas por categoría de trabajo.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VehicleServiceRequest {
    #[serde(skip_deserializing)]
    pub quote_id: Uuid,

    pub engine_repair: bool,
    pub transmission_repair: bool,
    pub brake_service: bool,
    pub suspension_service: bool,
    pub electrical_repair: bool,
    pub air_conditioning_service: bool,
    pub bodywork: bool,
    pub painting: bool,
    pub oil_change: bool,
    pub tire_change: bool,
    pub alignment_balancing: bool,
    pub diagnostics: bool,
    pub general_maintenance: bool,
    pub washing_detailing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // El reemplazo destructivo (delete-then-insert sobre la PK quote_id)
    // es idempotente siempre que el mismo payload produzca las mismas
    // filas hijas; estas pruebas fijan esa precondición.

    #[test]
    fn test_same_check_payload_yields_identical_rows() {
        let payload = r#"{"engine_oil": "cambiar", "front_brakes": "regular"}"#;

        let first: VehicleCheck = serde_json::from_str(payload).unwrap();
        let second: VehicleCheck = serde_json::from_str(payload).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.engine_oil.as_deref(), Some("cambiar"));
        assert_eq!(first.coolant, None);
    }

    #[test]
    fn test_check_payload_cannot_retarget_quote() {
        // quote_id lo asigna el repositorio, nunca el cliente
        let payload = r#"{"quote_id": "7f2c1a10-0000-0000-0000-000000000001", "horn": "bien"}"#;
        let check: VehicleCheck = serde_json::from_str(payload).unwrap();

        assert_eq!(check.quote_id, Uuid::nil());
        assert_eq!(check.horn.as_deref(), Some("bien"));
    }

    #[test]
    fn test_same_request_payload_yields_identical_rows() {
        let payload = r#"{"oil_change": true, "diagnostics": true}"#;

        let first: VehicleServiceRequest = serde_json::from_str(payload).unwrap();
        let second: VehicleServiceRequest = serde_json::from_str(payload).unwrap();

        assert_eq!(first, second);
        assert!(first.oil_change);
        assert!(!first.bodywork);
    }
}
