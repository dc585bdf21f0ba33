use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// MetadataValue – a single passthrough cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
///
/// Loaders produce rows of these; the schema then lifts the named fields into
/// a typed [`StarRecord`] and keeps the rest as passthrough columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => Ok(()),
        }
    }
}

impl MetadataValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Missing cell: `Null`, or a float `NaN` (how Pandas spells missing).
    pub fn is_missing(&self) -> bool {
        match self {
            MetadataValue::Null => true,
            MetadataValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

/// One untyped source row: column name → value.
pub type RawRow = BTreeMap<String, MetadataValue>;

// ---------------------------------------------------------------------------
// Category – the five evolution buckets
// ---------------------------------------------------------------------------

/// Coarse stellar-evolution category assigned from surface gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Main Sequence")]
    MainSequence,
    #[serde(rename = "Red Giant")]
    RedGiant,
    #[serde(rename = "Super Giant")]
    SuperGiant,
    #[serde(rename = "White Dwarf")]
    WhiteDwarf,
    Other,
}

impl Category {
    /// Every category, in legend/plotting order.
    pub const ALL: [Category; 5] = [
        Category::MainSequence,
        Category::RedGiant,
        Category::SuperGiant,
        Category::WhiteDwarf,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::MainSequence => "Main Sequence",
            Category::RedGiant => "Red Giant",
            Category::SuperGiant => "Super Giant",
            Category::WhiteDwarf => "White Dwarf",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StarRecord – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog row (one Kepler object of interest and its host star).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarRecord {
    pub star_id: String,
    /// Kelvin.
    pub effective_temperature: Option<f64>,
    /// log10 of surface gravity in cm s⁻².
    pub surface_gravity_log: Option<f64>,
    /// Solar radii.
    pub stellar_radius: Option<f64>,
    pub kepler_magnitude: Option<f64>,
    /// Days.
    pub orbital_period: Option<f64>,
    /// Solar masses; filled by derivation.
    pub estimated_mass: Option<f64>,
    /// Billions of years; filled by derivation.
    pub estimated_lifespan: Option<f64>,
    /// Filled by classification.
    pub category: Option<Category>,
    /// Passthrough columns: column_name → value.
    #[serde(flatten)]
    pub extra: BTreeMap<String, MetadataValue>,
}

impl StarRecord {
    /// A record carrying only an identifier; every measurement missing.
    pub fn new(star_id: impl Into<String>) -> Self {
        StarRecord {
            star_id: star_id.into(),
            effective_temperature: None,
            surface_gravity_log: None,
            stellar_radius: None,
            kepler_magnitude: None,
            orbital_period: None,
            estimated_mass: None,
            estimated_lifespan: None,
            category: None,
            extra: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete table
// ---------------------------------------------------------------------------

/// The full table in source order, with the passthrough column index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    /// All records (rows).
    pub records: Vec<StarRecord>,
    /// Ordered passthrough column names.
    pub extra_columns: Vec<String>,
}

impl Catalog {
    /// Build the passthrough column index from the records.
    pub fn from_records(records: Vec<StarRecord>) -> Self {
        let extra_columns: Vec<String> = records
            .iter()
            .flat_map(|r| r.extra.keys().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        Catalog {
            records,
            extra_columns,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records assigned to `category`, in table order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &StarRecord> {
        self.records
            .iter()
            .filter(move |r| r.category == Some(category))
    }
}
