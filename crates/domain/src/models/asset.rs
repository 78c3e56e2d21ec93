//! Asset (inventory item) domain model.
//!
//! Wire values for the enumerations are the ones stored in the database and
//! used by the existing front end (`umum`, `baik`, `aktif`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::CODE_REGEX;
use validator::Validate;

/// Asset classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// General goods (furniture, equipment).
    Umum,
    /// Land parcel.
    Tanah,
    /// Building.
    Bangunan,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Umum => "umum",
            AssetCategory::Tanah => "tanah",
            AssetCategory::Bangunan => "bangunan",
        }
    }
}

impl std::str::FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "umum" => Ok(AssetCategory::Umum),
            "tanah" => Ok(AssetCategory::Tanah),
            "bangunan" => Ok(AssetCategory::Bangunan),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Physical condition of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCondition {
    Baik,
    RusakRingan,
    RusakBerat,
}

impl AssetCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCondition::Baik => "baik",
            AssetCondition::RusakRingan => "rusak_ringan",
            AssetCondition::RusakBerat => "rusak_berat",
        }
    }

    pub fn is_damaged(&self) -> bool {
        !matches!(self, AssetCondition::Baik)
    }
}

impl std::str::FromStr for AssetCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baik" => Ok(AssetCondition::Baik),
            "rusak_ringan" => Ok(AssetCondition::RusakRingan),
            "rusak_berat" => Ok(AssetCondition::RusakBerat),
            _ => Err(format!("Unknown condition: {}", s)),
        }
    }
}

impl Default for AssetCondition {
    fn default() -> Self {
        AssetCondition::Baik
    }
}

/// Lifecycle status. Assets are deactivated, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    #[serde(rename = "aktif")]
    Aktif,
    #[serde(rename = "non-aktif")]
    NonAktif,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Aktif => "aktif",
            AssetStatus::NonAktif => "non-aktif",
        }
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aktif" => Ok(AssetStatus::Aktif),
            "non-aktif" => Ok(AssetStatus::NonAktif),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl Default for AssetStatus {
    fn default() -> Self {
        AssetStatus::Aktif
    }
}

/// A tracked physical item with its current location name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub category: AssetCategory,
    pub brand: Option<String>,
    pub specification: Option<String>,
    pub year_acquired: Option<i32>,
    pub source_fund: Option<String>,
    pub price: f64,
    pub condition: AssetCondition,
    pub status: AssetStatus,
    pub room_id: Option<i64>,
    pub room_name: Option<String>,
    pub pic_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// POST /api/inventory body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAssetRequest {
    #[validate(
        length(min = 1, max = 64, message = "Barcode must be 1-64 characters"),
        regex(path = *CODE_REGEX, message = "Barcode may only contain letters, digits and -_./")
    )]
    pub barcode: String,

    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    pub category: AssetCategory,

    #[validate(length(max = 120, message = "Brand must be at most 120 characters"))]
    pub brand: Option<String>,

    pub specification: Option<String>,

    #[validate(custom(function = "shared::validation::validate_acquisition_year"))]
    pub year_acquired: Option<i32>,

    #[validate(length(max = 120, message = "Funding source must be at most 120 characters"))]
    pub source_fund: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_non_negative_amount"))]
    pub price: f64,

    #[serde(default)]
    pub condition: AssetCondition,

    pub room_id: Option<i64>,

    #[validate(length(max = 120, message = "Responsible person must be at most 120 characters"))]
    pub pic_name: Option<String>,

    pub notes: Option<String>,
}

/// PUT /api/inventory/:id body. Full overwrite of the mutable fields.
///
/// Condition and room changes are additionally written to the ledgers by the
/// repository so current state never drifts from history.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAssetRequest {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 120, message = "Brand must be at most 120 characters"))]
    pub brand: Option<String>,

    pub specification: Option<String>,

    pub condition: AssetCondition,

    pub status: AssetStatus,

    pub room_id: Option<i64>,

    #[validate(length(max = 120, message = "Responsible person must be at most 120 characters"))]
    pub pic_name: Option<String>,

    pub notes: Option<String>,
}

/// Query parameters for GET /api/inventory. Empty values mean "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetListQuery {
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub category: Option<AssetCategory>,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub status: Option<AssetStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_string(&AssetCategory::Bangunan).unwrap(), "\"bangunan\"");
        assert_eq!(
            serde_json::to_string(&AssetCondition::RusakRingan).unwrap(),
            "\"rusak_ringan\""
        );
        assert_eq!(serde_json::to_string(&AssetStatus::NonAktif).unwrap(), "\"non-aktif\"");
    }

    #[test]
    fn test_as_str_matches_serde() {
        for c in [AssetCondition::Baik, AssetCondition::RusakRingan, AssetCondition::RusakBerat] {
            assert_eq!(serde_json::to_string(&c).unwrap(), format!("\"{}\"", c.as_str()));
        }
        for c in [AssetCategory::Umum, AssetCategory::Tanah, AssetCategory::Bangunan] {
            assert_eq!(serde_json::to_string(&c).unwrap(), format!("\"{}\"", c.as_str()));
        }
        for s in [AssetStatus::Aktif, AssetStatus::NonAktif] {
            assert_eq!(serde_json::to_string(&s).unwrap(), format!("\"{}\"", s.as_str()));
        }
    }

    #[test]
    fn test_unknown_condition_is_rejected() {
        let result: Result<AssetCondition, _> = serde_json::from_str("\"rusak\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_damaged() {
        assert!(!AssetCondition::Baik.is_damaged());
        assert!(AssetCondition::RusakRingan.is_damaged());
        assert!(AssetCondition::RusakBerat.is_damaged());
    }

    #[test]
    fn test_register_request_defaults() {
        let json = r#"{"barcode": "BRC-1", "name": "Meja Guru", "category": "umum"}"#;
        let request: RegisterAssetRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.condition, AssetCondition::Baik);
        assert_eq!(request.price, 0.0);
        assert!(request.room_id.is_none());
    }

    #[test]
    fn test_register_request_rejects_negative_price() {
        let json = r#"{"barcode": "BRC-2", "name": "Kursi", "category": "umum", "price": -5}"#;
        let request: RegisterAssetRequest = serde_json::from_str(json).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_register_request_rejects_bad_barcode() {
        let json = r#"{"barcode": "BRC 3", "name": "Lemari", "category": "umum"}"#;
        let request: RegisterAssetRequest = serde_json::from_str(json).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("barcode"));
    }

    #[test]
    fn test_register_request_rejects_unknown_category() {
        let json = r#"{"barcode": "BRC-4", "name": "Mobil", "category": "kendaraan"}"#;
        let result: Result<RegisterAssetRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_requires_status_and_condition() {
        let json = r#"{"name": "Meja"}"#;
        let result: Result<UpdateAssetRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json =
            r#"{"name": "Meja", "condition": "rusak_berat", "status": "non-aktif", "room_id": 3}"#;
        let request: UpdateAssetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.condition, AssetCondition::RusakBerat);
        assert_eq!(request.status, AssetStatus::NonAktif);
        assert_eq!(request.room_id, Some(3));
    }

    #[test]
    fn test_list_query_filters() {
        let query: AssetListQuery =
            serde_json::from_str(r#"{"category": "tanah", "status": "aktif"}"#).unwrap();
        assert_eq!(query.category, Some(AssetCategory::Tanah));
        assert_eq!(query.status, Some(AssetStatus::Aktif));

        let empty: AssetListQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.category.is_none());
        assert!(empty.status.is_none());
    }

    #[test]
    fn test_list_query_blank_values_mean_no_filter() {
        let query: AssetListQuery =
            serde_json::from_str(r#"{"category": "", "status": "aktif"}"#).unwrap();
        assert!(query.category.is_none());
        assert_eq!(query.status, Some(AssetStatus::Aktif));
    }

    #[test]
    fn test_list_query_rejects_unknown_value() {
        let result: Result<AssetListQuery, _> = serde_json::from_str(r#"{"status": "dipinjam"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_round_trips_as_str() {
        use std::str::FromStr;
        assert_eq!(AssetStatus::from_str("non-aktif").unwrap(), AssetStatus::NonAktif);
        assert_eq!(AssetCondition::from_str("rusak_berat").unwrap(), AssetCondition::RusakBerat);
        assert_eq!(AssetCategory::from_str("tanah").unwrap(), AssetCategory::Tanah);
        assert!(AssetCategory::from_str("Tanah").is_err());
    }
}
