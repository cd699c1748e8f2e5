//! Inventory asset models
//!
//! The inventory service answers `POST /tabla` with loosely typed records;
//! [`Asset::normalize`] turns them into display-ready values.

use crate::util::string_or_number;
use serde::{Deserialize, Serialize};

pub const UNNAMED_ASSET: &str = "Sin nombre";
pub const UNCODED_ASSET: &str = "Sin código";
pub const UNKNOWN_PC_TYPE: &str = "Desconocido";
pub const NO_LAST_MAINTENANCE: &str = "No registrado";
pub const NO_NEXT_MAINTENANCE: &str = "No programado";
pub const DEFAULT_ASSET_STATE: &str = "Activo";

/// Body of the inventory request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryQuery {
    /// Id of the logged-in user
    pub id: Option<i64>,
    #[serde(rename = "IdSede")]
    pub id_sede: Option<i64>,
}

/// Inventory response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryResponse {
    #[serde(default)]
    pub activo: Vec<RawAsset>,
}

/// Record as sent by the inventory service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawAsset {
    #[serde(rename = "idActivo", default, deserialize_with = "string_or_number")]
    pub id_activo: Option<String>,
    #[serde(default)]
    pub nombre_activo: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub codigo: Option<String>,
    #[serde(rename = "idTipoPc", default, deserialize_with = "string_or_number")]
    pub id_tipo_pc: Option<String>,
    #[serde(default)]
    pub procesador: Option<String>,
    #[serde(default)]
    pub fecha_ultimo_mantenimiento: Option<String>,
    #[serde(default)]
    pub proximo_mantenimiento: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub serial: Option<String>,
}

/// Normalized asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Option<String>,
    pub name: String,
    pub code: String,
    pub pc_type: String,
    pub processor: Option<String>,
    pub last_maintenance: String,
    pub next_maintenance: String,
    pub state: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub edit_url: String,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Display name of an inventory PC type id
pub fn pc_type_name(id: Option<&str>) -> &'static str {
    match id {
        Some("1") => "Portátil",
        Some("2") => "Escritorio",
        Some("3") => "All in One",
        _ => UNKNOWN_PC_TYPE,
    }
}

impl Asset {
    /// Normalize a raw record; `edit_base` is prefixed to the raw code.
    pub fn normalize(raw: RawAsset, edit_base: &str) -> Self {
        let edit_url = format!("{}{}", edit_base, raw.codigo.as_deref().unwrap_or_default());
        Self {
            id: raw.id_activo,
            name: or_default(raw.nombre_activo, UNNAMED_ASSET),
            pc_type: pc_type_name(raw.id_tipo_pc.as_deref()).to_string(),
            code: or_default(raw.codigo, UNCODED_ASSET),
            processor: raw.procesador,
            last_maintenance: or_default(raw.fecha_ultimo_mantenimiento, NO_LAST_MAINTENANCE),
            next_maintenance: or_default(raw.proximo_mantenimiento, NO_NEXT_MAINTENANCE),
            state: or_default(raw.estado, DEFAULT_ASSET_STATE),
            brand: raw.marca,
            model: raw.modelo,
            serial: raw.serial,
            edit_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_fills_defaults() {
        let raw: RawAsset = serde_json::from_value(json!({
            "idActivo": 9,
            "NombreActivo": "",
            "Codigo": null,
            "idTipoPc": 7,
            "Estado": null
        }))
        .unwrap();
        let asset = Asset::normalize(raw, "http://inv/editar/computador/");
        assert_eq!(asset.id.as_deref(), Some("9"));
        assert_eq!(asset.name, UNNAMED_ASSET);
        assert_eq!(asset.code, UNCODED_ASSET);
        assert_eq!(asset.pc_type, UNKNOWN_PC_TYPE);
        assert_eq!(asset.last_maintenance, NO_LAST_MAINTENANCE);
        assert_eq!(asset.next_maintenance, NO_NEXT_MAINTENANCE);
        assert_eq!(asset.state, DEFAULT_ASSET_STATE);
        assert_eq!(asset.edit_url, "http://inv/editar/computador/");
    }

    #[test]
    fn test_normalize_keeps_values() {
        let raw: RawAsset = serde_json::from_value(json!({
            "idActivo": "3",
            "NombreActivo": "PC Recepción",
            "Codigo": "PC-001",
            "idTipoPc": "2",
            "FechaUltimoMantenimiento": "2025-02-01",
            "ProximoMantenimiento": "2025-08-01",
            "Estado": "Inactivo",
            "Marca": "Lenovo"
        }))
        .unwrap();
        let asset = Asset::normalize(raw, "http://inv/");
        assert_eq!(asset.pc_type, "Escritorio");
        assert_eq!(asset.code, "PC-001");
        assert_eq!(asset.state, "Inactivo");
        assert_eq!(asset.brand.as_deref(), Some("Lenovo"));
        assert_eq!(asset.edit_url, "http://inv/PC-001");
    }

    #[test]
    fn test_pc_type_names() {
        assert_eq!(pc_type_name(Some("1")), "Portátil");
        assert_eq!(pc_type_name(Some("3")), "All in One");
        assert_eq!(pc_type_name(None), UNKNOWN_PC_TYPE);
    }

    #[test]
    fn test_inventory_query_shape() {
        let q = InventoryQuery {
            id: Some(5),
            id_sede: None,
        };
        assert_eq!(serde_json::to_value(&q).unwrap(), json!({"id": 5, "IdSede": null}));
    }
}
