//! # Column Codecs
//!
//! Single-column text encodings for the values persisted alongside their entities.
//!
//! - **Point lists**: `(lat;lng),(lat;lng)`. Only coordinates are encoded, so the format
//!   has no free text that could collide with its delimiters. Decoding is strict: every
//!   entry must be parenthesised, hold exactly one `;` and name an in-range coordinate.
//! - **Permission sets**: a JSON array of strings, so tokens may contain any character.

use crate::model::{CoordinateError, PermissionSet, SupplyChainPoint};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed point entry {entry:?}")]
    MalformedPoint { entry: String },

    #[error("invalid coordinate in {entry:?}")]
    InvalidCoordinate {
        entry: String,
        #[source]
        source: CoordinateError,
    },

    #[error("invalid permission column: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn encode_points(points: &[SupplyChainPoint]) -> String {
    points
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a point column. The empty column is the empty list.
pub fn decode_points(column: &str) -> Result<Vec<SupplyChainPoint>, CodecError> {
    let column = column.trim();
    if column.is_empty() {
        return Ok(Vec::new());
    }
    column.split(',').map(decode_point).collect()
}

fn decode_point(entry: &str) -> Result<SupplyChainPoint, CodecError> {
    let entry = entry.trim();
    let malformed = || CodecError::MalformedPoint {
        entry: entry.to_string(),
    };

    let inner = entry
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (lat, lng) = inner.split_once(';').ok_or_else(malformed)?;
    if lng.contains(';') {
        return Err(malformed());
    }
    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let lng: f64 = lng.trim().parse().map_err(|_| malformed())?;

    SupplyChainPoint::new(lat, lng).map_err(|source| CodecError::InvalidCoordinate {
        entry: entry.to_string(),
        source,
    })
}

pub fn encode_permissions(permissions: &PermissionSet) -> Result<String, CodecError> {
    Ok(serde_json::to_string(permissions)?)
}

/// Decodes a permission column. The empty column is the empty set.
pub fn decode_permissions(column: &str) -> Result<PermissionSet, CodecError> {
    let column = column.trim();
    if column.is_empty() {
        return Ok(PermissionSet::new());
    }
    Ok(serde_json::from_str(column)?)
}

/// `#[serde(with = "crate::codec::point_column")]` adapter storing a point list as one
/// string.
pub mod point_column {
    use super::{decode_points, encode_points};
    use crate::model::SupplyChainPoint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        points: &[SupplyChainPoint],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_points(points))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<SupplyChainPoint>, D::Error> {
        let column = String::deserialize(deserializer)?;
        decode_points(&column).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Permission, SupplyChain, SupplyChainId};
    use chrono::Utc;

    fn point(lat: f64, lng: f64) -> SupplyChainPoint {
        SupplyChainPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_two_points_round_trip() {
        let points = vec![point(45.1, 9.2), point(46.0, 8.5)];
        let column = encode_points(&points);
        assert_eq!(column, "(45.1;9.2),(46;8.5)");

        let decoded = decode_points(&column).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].latitude(), 45.1);
        assert_eq!(decoded[0].longitude(), 9.2);
        assert_eq!(decoded[1].latitude(), 46.0);
        assert_eq!(decoded[1].longitude(), 8.5);
    }

    #[test]
    fn test_empty_column_is_empty_list() {
        assert!(decode_points("").unwrap().is_empty());
        assert_eq!(encode_points(&[]), "");
    }

    #[test]
    fn test_malformed_entries_are_rejected() {
        for column in [
            "(45.1;9.2",
            "45.1;9.2",
            "(45.1,9.2)",
            "(45.1;9.2;1)",
            "(a;b)",
            "(45.1;9.2),",
        ] {
            assert!(
                matches!(decode_points(column), Err(CodecError::MalformedPoint { .. })),
                "accepted {column:?}"
            );
        }
    }

    #[test]
    fn test_out_of_range_coordinate_is_rejected() {
        let err = decode_points("(45.1;9.2),(95;8.5)").unwrap_err();
        assert!(matches!(err, CodecError::InvalidCoordinate { entry, .. } if entry == "(95;8.5)"));
    }

    #[test]
    fn test_permission_with_comma_round_trips() {
        let permissions = PermissionSet::of(["certifications", "approve,rights"]);
        let column = encode_permissions(&permissions).unwrap();
        let decoded = decode_permissions(&column).unwrap();
        assert_eq!(decoded, permissions);
        assert!(decoded.contains("approve,rights"));
        assert_eq!(decoded.missing(&PermissionSet::of([Permission::new("approve")])).len(), 1);
    }

    #[test]
    fn test_malformed_permission_column() {
        assert!(matches!(
            decode_permissions("certifications,products_manage"),
            Err(CodecError::Json(_))
        ));
        assert!(decode_permissions("  ").unwrap().is_empty());
    }

    #[test]
    fn test_supply_chain_serializes_points_as_one_column() {
        let chain = SupplyChain {
            id: SupplyChainId(1),
            name: "Olio del Garda".into(),
            description: String::new(),
            territorial_area: "Garda".into(),
            products: Vec::new(),
            points: vec![point(45.1, 9.2), point(46.0, 8.5)],
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(json["points"], "(45.1;9.2),(46;8.5)");

        let back: SupplyChain = serde_json::from_value(json).unwrap();
        assert_eq!(back.points, chain.points);
    }
}
