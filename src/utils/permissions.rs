//! Catálogo de permisos y guardia de autorización
//!
//! El conjunto de permisos es cerrado: 5 recursos × 4 verbos CRUD,
//! más el acceso al dashboard y la búsqueda por QR (22 en total).
//! `can()` es el único predicado de autorización del sistema: toda
//! acción mutante (y varias de lectura) pasa por aquí.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Permiso atómico del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionName {
    ViewUsers,
    CreateUsers,
    EditUsers,
    DeleteUsers,
    ViewVehicles,
    CreateVehicles,
    EditVehicles,
    DeleteVehicles,
    ViewQuotes,
    CreateQuotes,
    EditQuotes,
    DeleteQuotes,
    ViewContracts,
    CreateContracts,
    EditContracts,
    DeleteContracts,
    ViewPayments,
    CreatePayments,
    EditPayments,
    DeletePayments,
    ViewDashboard,
    QrSearch,
}

impl PermissionName {
    /// Clave canónica almacenada en BD y embebida en la sesión
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionName::ViewUsers => "users:view",
            PermissionName::CreateUsers => "users:create",
            PermissionName::EditUsers => "users:edit",
            PermissionName::DeleteUsers => "users:delete",
            PermissionName::ViewVehicles => "vehicles:view",
            PermissionName::CreateVehicles => "vehicles:create",
            PermissionName::EditVehicles => "vehicles:edit",
            PermissionName::DeleteVehicles => "vehicles:delete",
            PermissionName::ViewQuotes => "quotes:view",
            PermissionName::CreateQuotes => "quotes:create",
            PermissionName::EditQuotes => "quotes:edit",
            PermissionName::DeleteQuotes => "quotes:delete",
            PermissionName::ViewContracts => "contracts:view",
            PermissionName::CreateContracts => "contracts:create",
            PermissionName::EditContracts => "contracts:edit",
            PermissionName::DeleteContracts => "contracts:delete",
            PermissionName::ViewPayments => "payments:view",
            PermissionName::CreatePayments => "payments:create",
            PermissionName::EditPayments => "payments:edit",
            PermissionName::DeletePayments => "payments:delete",
            PermissionName::ViewDashboard => "dashboard:view",
            PermissionName::QrSearch => "qr:search",
        }
    }

    /// Nombre legible con el que el permiso se muestra en la administración
    pub fn display_name(&self) -> &'static str {
        match self {
            PermissionName::ViewUsers => "View_Users",
            PermissionName::CreateUsers => "Create_Users",
            PermissionName::EditUsers => "Edit_Users",
            PermissionName::DeleteUsers => "Delete_Users",
            PermissionName::ViewVehicles => "View_Vehicles",
            PermissionName::CreateVehicles => "Create_Vehicles",
            PermissionName::EditVehicles => "Edit_Vehicles",
            PermissionName::DeleteVehicles => "Delete_Vehicles",
            PermissionName::ViewQuotes => "View_Quotes",
            PermissionName::CreateQuotes => "Create_Quotes",
            PermissionName::EditQuotes => "Edit_Quotes",
            PermissionName::DeleteQuotes => "Delete_Quotes",
            PermissionName::ViewContracts => "View_Contracts",
            PermissionName::CreateContracts => "Create_Contracts",
            PermissionName::EditContracts => "Edit_Contracts",
            PermissionName::DeleteContracts => "Delete_Contracts",
            PermissionName::ViewPayments => "View_Payments",
            PermissionName::CreatePayments => "Create_Payments",
            PermissionName::EditPayments => "Edit_Payments",
            PermissionName::DeletePayments => "Delete_Payments",
            PermissionName::ViewDashboard => "View_Dashboard",
            PermissionName::QrSearch => "QR_Search",
        }
    }

    /// Todos los permisos del catálogo cerrado
    pub fn all() -> &'static [PermissionName] {
        &[
            PermissionName::ViewUsers,
            PermissionName::CreateUsers,
            PermissionName::EditUsers,
            PermissionName::DeleteUsers,
            PermissionName::ViewVehicles,
            PermissionName::CreateVehicles,
            PermissionName::EditVehicles,
            PermissionName::DeleteVehicles,
            PermissionName::ViewQuotes,
            PermissionName::CreateQuotes,
            PermissionName::EditQuotes,
            PermissionName::DeleteQuotes,
            PermissionName::ViewContracts,
            PermissionName::CreateContracts,
            PermissionName::EditContracts,
            PermissionName::DeleteContracts,
            PermissionName::ViewPayments,
            PermissionName::CreatePayments,
            PermissionName::EditPayments,
            PermissionName::DeletePayments,
            PermissionName::ViewDashboard,
            PermissionName::QrSearch,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        PermissionName::all()
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
    }
}

lazy_static! {
    /// Tabla bidireccional nombre-visible ↔ clave canónica.
    /// Se resuelve una sola vez, al emitir la sesión (no por llamada).
    static ref DISPLAY_TO_KEY: HashMap<&'static str, &'static str> = {
        PermissionName::all()
            .iter()
            .map(|p| (p.display_name(), p.as_str()))
            .collect()
    };
    static ref KEY_TO_DISPLAY: HashMap<&'static str, &'static str> = {
        PermissionName::all()
            .iter()
            .map(|p| (p.as_str(), p.display_name()))
            .collect()
    };
}

/// Normaliza un nombre de permiso (visible o canónico) a su clave canónica.
/// Los nombres desconocidos se descartan devolviendo None.
pub fn normalize_permission(name: &str) -> Option<&'static str> {
    if let Some(key) = DISPLAY_TO_KEY.get(name) {
        return Some(key);
    }
    // Puede venir ya como clave canónica
    PermissionName::from_str(name).map(|p| p.as_str())
}

/// Clave canónica → nombre visible (para respuestas de administración)
pub fn display_permission(key: &str) -> Option<&'static str> {
    KEY_TO_DISPLAY.get(key).copied()
}

/// Guardia de autorización: true si y solo si el permiso requerido
/// está en el conjunto otorgado. Pura y total: conjunto vacío → false,
/// nunca entra en pánico.
pub fn can(granted: &HashSet<String>, required: PermissionName) -> bool {
    granted.contains(required.as_str())
}

/// Variante con error: 403 con el nombre visible del permiso faltante
pub fn require_permission(
    granted: &HashSet<String>,
    required: PermissionName,
) -> Result<(), crate::utils::errors::AppError> {
    if can(granted, required) {
        Ok(())
    } else {
        Err(crate::utils::errors::AppError::Forbidden(format!(
            "Se requiere el permiso '{}'",
            required.display_name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_can_membership() {
        let granted = set(&["contracts:view", "payments:create"]);
        assert!(can(&granted, PermissionName::ViewContracts));
        assert!(can(&granted, PermissionName::CreatePayments));
        assert!(!can(&granted, PermissionName::DeleteContracts));
    }

    #[test]
    fn test_can_empty_set_is_false() {
        let granted = HashSet::new();
        for p in PermissionName::all() {
            assert!(!can(&granted, *p));
        }
    }

    #[test]
    fn test_can_is_deterministic() {
        let granted = set(&["qr:search"]);
        for _ in 0..3 {
            assert!(can(&granted, PermissionName::QrSearch));
            assert!(!can(&granted, PermissionName::ViewUsers));
        }
    }

    #[test]
    fn test_catalog_has_22_members() {
        assert_eq!(PermissionName::all().len(), 22);
    }

    #[test]
    fn test_normalize_display_names() {
        assert_eq!(normalize_permission("View_Contracts"), Some("contracts:view"));
        assert_eq!(normalize_permission("Edit_Payments"), Some("payments:edit"));
        assert_eq!(normalize_permission("QR_Search"), Some("qr:search"));
        assert_eq!(normalize_permission("no_such_permission"), None);
    }

    #[test]
    fn test_normalize_accepts_canonical_keys() {
        assert_eq!(normalize_permission("contracts:view"), Some("contracts:view"));
    }

    #[test]
    fn test_display_roundtrip() {
        for p in PermissionName::all() {
            assert_eq!(display_permission(p.as_str()), Some(p.display_name()));
            assert_eq!(normalize_permission(p.display_name()), Some(p.as_str()));
        }
    }
}
