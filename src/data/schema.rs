use std::collections::BTreeMap;

use super::error::{RowError, SchemaError};
use super::model::{MetadataValue, RawRow, StarRecord};

// ---------------------------------------------------------------------------
// Field – the named columns the pipeline understands
// ---------------------------------------------------------------------------

/// A column the pipeline reads by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StarId,
    EffectiveTemperature,
    SurfaceGravityLog,
    StellarRadius,
    KeplerMagnitude,
    OrbitalPeriod,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::StarId,
        Field::EffectiveTemperature,
        Field::SurfaceGravityLog,
        Field::StellarRadius,
        Field::KeplerMagnitude,
        Field::OrbitalPeriod,
    ];

    /// Name used in exported tables and error messages.
    pub fn canonical(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted header names, canonical first, then the Kepler archive name.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::StarId => &["star_id", "kepid"],
            Field::EffectiveTemperature => &["effective_temperature", "koi_steff"],
            Field::SurfaceGravityLog => &["surface_gravity_log", "koi_slogg"],
            Field::StellarRadius => &["stellar_radius", "koi_srad"],
            Field::KeplerMagnitude => &["kepler_magnitude", "koi_kepmag"],
            Field::OrbitalPeriod => &["orbital_period", "koi_period"],
        }
    }

    pub fn required(self) -> bool {
        matches!(
            self,
            Field::StarId
                | Field::EffectiveTemperature
                | Field::SurfaceGravityLog
                | Field::StellarRadius
        )
    }
}

/// Columns the pipeline computes itself. A source carrying them (such as a
/// previous export) has them dropped on load rather than passed through.
pub const DERIVED_COLUMNS: [&str; 3] = ["estimated_mass", "estimated_lifespan", "category"];

// ---------------------------------------------------------------------------
// ColumnSchema – header names resolved to fields
// ---------------------------------------------------------------------------

/// Which source header feeds each [`Field`], plus the passthrough columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: BTreeMap<&'static str, String>,
    /// Source headers not claimed by any field nor derived, in source order.
    pub passthrough: Vec<String>,
}

impl ColumnSchema {
    /// Resolve a header row. Fails listing every required field not found.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, SchemaError> {
        let mut columns = BTreeMap::new();
        let mut missing = Vec::new();

        for field in Field::ALL {
            let found = field
                .aliases()
                .iter()
                .find(|alias| headers.iter().any(|h| h.as_ref() == **alias));
            match found {
                Some(name) => {
                    columns.insert(field.canonical(), (*name).to_string());
                }
                None if field.required() => missing.push(field.canonical().to_string()),
                None => {}
            }
        }

        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }

        let passthrough = headers
            .iter()
            .map(|h| h.as_ref())
            .filter(|h| !columns.values().any(|c| c.as_str() == *h))
            .filter(|h| !DERIVED_COLUMNS.contains(h))
            .map(str::to_string)
            .collect();

        Ok(ColumnSchema {
            columns,
            passthrough,
        })
    }

    /// Source header bound to `field`, if present.
    pub fn column(&self, field: Field) -> Option<&str> {
        self.columns.get(field.canonical()).map(String::as_str)
    }

    /// Lift one untyped row into a [`StarRecord`].
    pub fn record_from_row(&self, mut row: RawRow) -> Result<StarRecord, RowError> {
        let id_column = self.column(Field::StarId).unwrap_or(Field::StarId.canonical());
        let star_id = row
            .get(id_column)
            .and_then(identifier)
            .ok_or_else(|| RowError::MissingIdentifier {
                column: id_column.to_string(),
            })?;

        let mut record = StarRecord::new(star_id);
        record.effective_temperature = self.number(&row, Field::EffectiveTemperature)?;
        record.surface_gravity_log = self.number(&row, Field::SurfaceGravityLog)?;
        record.stellar_radius = self.number(&row, Field::StellarRadius)?;
        record.kepler_magnitude = self.number(&row, Field::KeplerMagnitude)?;
        record.orbital_period = self.number(&row, Field::OrbitalPeriod)?;

        for name in &self.passthrough {
            let value = row.remove(name).unwrap_or(MetadataValue::Null);
            record.extra.insert(name.clone(), value);
        }
        Ok(record)
    }

    fn number(&self, row: &RawRow, field: Field) -> Result<Option<f64>, RowError> {
        let Some(column) = self.column(field) else {
            return Ok(None);
        };
        match row.get(column) {
            None => Ok(None),
            Some(v) if v.is_missing() => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| RowError::InvalidNumber {
                column: column.to_string(),
                value: v.to_string(),
            }),
        }
    }
}

/// 2^63: first whole float past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn identifier(value: &MetadataValue) -> Option<String> {
    match value {
        MetadataValue::Null => None,
        MetadataValue::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        // Integer ids that went through a float column (e.g. 10797460.0).
        // Outside the i64 range the cast saturates, so keep the float text.
        MetadataValue::Float(f) if f.fract() == 0.0 && f.abs() < I64_LIMIT => {
            Some(format!("{}", *f as i64))
        }
        MetadataValue::Float(f) if f.is_nan() => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, MetadataValue)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn resolves_kepler_archive_headers() {
        let headers = ["kepid", "kepoi_name", "koi_period", "koi_steff", "koi_slogg", "koi_srad"];
        let schema = ColumnSchema::resolve(&headers).unwrap();

        assert_eq!(schema.column(Field::StarId), Some("kepid"));
        assert_eq!(schema.column(Field::OrbitalPeriod), Some("koi_period"));
        assert_eq!(schema.column(Field::KeplerMagnitude), None);
        assert_eq!(schema.passthrough, vec!["kepoi_name"]);
    }

    #[test]
    fn canonical_name_wins_over_alias() {
        let headers = ["kepid", "star_id", "effective_temperature", "surface_gravity_log", "stellar_radius"];
        let schema = ColumnSchema::resolve(&headers).unwrap();
        assert_eq!(schema.column(Field::StarId), Some("star_id"));
        assert_eq!(schema.passthrough, vec!["kepid"]);
    }

    #[test]
    fn reports_every_missing_required_column() {
        let err = ColumnSchema::resolve(&["kepid", "koi_kepmag"]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumns(vec![
                "effective_temperature".into(),
                "surface_gravity_log".into(),
                "stellar_radius".into(),
            ])
        );
        assert!(err.to_string().contains("surface_gravity_log"));
    }

    #[test]
    fn lifts_row_into_record() {
        let schema =
            ColumnSchema::resolve(&["kepid", "koi_steff", "koi_slogg", "koi_srad", "kepoi_name"]).unwrap();
        let record = schema
            .record_from_row(row(&[
                ("kepid", MetadataValue::Integer(10797460)),
                ("koi_steff", MetadataValue::Integer(5455)),
                ("koi_slogg", MetadataValue::Float(4.467)),
                ("koi_srad", MetadataValue::Null),
                ("kepoi_name", MetadataValue::String("K00752.01".into())),
            ]))
            .unwrap();

        assert_eq!(record.star_id, "10797460");
        assert_eq!(record.effective_temperature, Some(5455.0));
        assert_eq!(record.surface_gravity_log, Some(4.467));
        assert_eq!(record.stellar_radius, None);
        assert_eq!(
            record.extra.get("kepoi_name"),
            Some(&MetadataValue::String("K00752.01".into()))
        );
    }

    #[test]
    fn rejects_unparseable_number() {
        let schema = ColumnSchema::resolve(&["kepid", "koi_steff", "koi_slogg", "koi_srad"]).unwrap();
        let err = schema
            .record_from_row(row(&[
                ("kepid", MetadataValue::Integer(1)),
                ("koi_steff", MetadataValue::String("hot".into())),
            ]))
            .unwrap_err();
        assert_eq!(
            err,
            RowError::InvalidNumber {
                column: "koi_steff".into(),
                value: "hot".into()
            }
        );
    }

    #[test]
    fn rejects_missing_identifier() {
        let schema = ColumnSchema::resolve(&["kepid", "koi_steff", "koi_slogg", "koi_srad"]).unwrap();
        let err = schema
            .record_from_row(row(&[("kepid", MetadataValue::String("  ".into()))]))
            .unwrap_err();
        assert_eq!(err, RowError::MissingIdentifier { column: "kepid".into() });
    }

    #[test]
    fn whole_float_identifier_prints_as_integer() {
        assert_eq!(identifier(&MetadataValue::Float(757450.0)).as_deref(), Some("757450"));
        assert_eq!(identifier(&MetadataValue::Float(f64::NAN)), None);
    }

    #[test]
    fn huge_float_identifiers_stay_distinct() {
        let a = identifier(&MetadataValue::Float(1e19)).unwrap();
        let b = identifier(&MetadataValue::Float(2e19)).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, "10000000000000000000");
        assert_eq!(identifier(&MetadataValue::Float(-1e300)).unwrap(), (-1e300_f64).to_string());
    }

    #[test]
    fn derived_columns_are_not_passed_through() {
        let headers = [
            "star_id",
            "effective_temperature",
            "surface_gravity_log",
            "stellar_radius",
            "estimated_mass",
            "estimated_lifespan",
            "category",
            "kepoi_name",
        ];
        let schema = ColumnSchema::resolve(&headers).unwrap();
        assert_eq!(schema.passthrough, vec!["kepoi_name"]);

        let record = schema
            .record_from_row(row(&[
                ("star_id", MetadataValue::Integer(1)),
                ("estimated_mass", MetadataValue::Float(1.0)),
                ("category", MetadataValue::String("Other".into())),
            ]))
            .unwrap();
        assert_eq!(record.estimated_mass, None);
        assert_eq!(record.category, None);
        assert!(!record.extra.contains_key("category"));
    }
}
