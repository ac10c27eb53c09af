//! Lookup entities referenced by pens: Material, Brand, Type, Color.
//! All four share the same `{id, name}` shape and CRUD surface, so handlers
//! resolve the concrete entity from the URL path segment.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Material,
    Brand,
    Type,
    Color,
}

impl LookupKind {
    /// Resolve from a collection path segment (`/api/materials`).
    pub fn from_collection(segment: &str) -> Option<Self> {
        match segment {
            "materials" => Some(Self::Material),
            "brands" => Some(Self::Brand),
            "types" => Some(Self::Type),
            "colors" => Some(Self::Color),
            _ => None,
        }
    }

    /// Resolve from a single-resource path segment (`/api/material/{id}`).
    pub fn from_singular(segment: &str) -> Option<Self> {
        match segment {
            "material" => Some(Self::Material),
            "brand" => Some(Self::Brand),
            "type" => Some(Self::Type),
            "color" => Some(Self::Color),
            _ => None,
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Self::Material => "materials",
            Self::Brand => "brands",
            Self::Type => "pen_types",
            Self::Color => "colors",
        }
    }

    /// Name used in client-facing messages ("the referenced type does not exist").
    pub fn label(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Brand => "brand",
            Self::Type => "type",
            Self::Color => "color",
        }
    }
}

/// Read profile: everything a client may see.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LookupRead {
    pub id: i64,
    pub name: String,
}

/// Create/update profile: name only, ids are server-assigned.
#[derive(Debug, Deserialize)]
pub struct LookupPayload {
    pub name: String,
}

impl LookupPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_segments_resolve() {
        assert_eq!(LookupKind::from_collection("materials"), Some(LookupKind::Material));
        assert_eq!(LookupKind::from_collection("types"), Some(LookupKind::Type));
        assert_eq!(LookupKind::from_collection("pens"), None);
        assert_eq!(LookupKind::from_collection("material"), None);
    }

    #[test]
    fn singular_segments_resolve() {
        assert_eq!(LookupKind::from_singular("brand"), Some(LookupKind::Brand));
        assert_eq!(LookupKind::from_singular("color"), Some(LookupKind::Color));
        assert_eq!(LookupKind::from_singular("pen"), None);
    }

    #[test]
    fn empty_name_rejected() {
        let payload = LookupPayload { name: "  ".into() };
        assert!(payload.validate().is_err());
        let payload = LookupPayload { name: "Wood".into() };
        assert!(payload.validate().is_ok());
    }
}
