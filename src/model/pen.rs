//! Pen aggregate: storage row, input payload, and the read-profile DTO.

use crate::error::AppError;
use crate::model::lookup::LookupRead;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw `pens` row. Foreign-key columns stay internal; clients get the
/// resolved `{id, name}` objects through [`PenRead`].
#[derive(Debug, Clone, FromRow)]
pub struct PenRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[sqlx(rename = "ref")]
    pub reference: String,
    pub type_id: Option<i64>,
    pub material_id: Option<i64>,
    pub brand_id: Option<i64>,
}

/// Read profile returned by every pen endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenRead {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "type")]
    pub pen_type: Option<LookupRead>,
    pub material: Option<LookupRead>,
    pub brand: Option<LookupRead>,
    pub colors: Vec<LookupRead>,
}

/// Create/update profile. `ref` and `id` are never accepted from the client;
/// reference fields carry the id of an existing lookup entity.
#[derive(Debug, Clone, Deserialize)]
pub struct PenPayload {
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "type", default)]
    pub pen_type: Option<i64>,
    #[serde(default)]
    pub material: Option<i64>,
    #[serde(default)]
    pub color: Option<i64>,
    #[serde(default)]
    pub brand: Option<i64>,
}

impl PenPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AppError::BadRequest("price must be a non-negative number".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> PenPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reference_fields_are_optional() {
        let p = payload(r#"{"name":"Nib","price":4.5,"description":"fine"}"#);
        assert!(p.pen_type.is_none());
        assert!(p.material.is_none());
        assert!(p.color.is_none());
        assert!(p.brand.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn type_field_uses_json_name() {
        let p = payload(r#"{"name":"Nib","price":4.5,"description":"fine","type":3,"brand":1}"#);
        assert_eq!(p.pen_type, Some(3));
        assert_eq!(p.brand, Some(1));
    }

    #[test]
    fn missing_required_scalar_fails_deserialization() {
        let r: Result<PenPayload, _> = serde_json::from_str(r#"{"name":"Nib","price":4.5}"#);
        assert!(r.is_err());
    }

    #[test]
    fn negative_price_rejected() {
        let p = payload(r#"{"name":"Nib","price":-1.0,"description":"fine"}"#);
        assert!(p.validate().is_err());
    }

    #[test]
    fn read_profile_serializes_ref_and_type_names() {
        let read = PenRead {
            id: 1,
            name: "Nib".into(),
            price: 4.5,
            description: "fine".into(),
            reference: "4006381333931".into(),
            pen_type: Some(LookupRead { id: 2, name: "fountain".into() }),
            material: None,
            brand: None,
            colors: vec![],
        };
        let v = serde_json::to_value(&read).unwrap();
        assert_eq!(v["ref"], "4006381333931");
        assert_eq!(v["type"]["name"], "fountain");
        assert!(v.get("type_id").is_none());
    }
}
