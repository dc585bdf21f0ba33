use std::fmt;
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::data::classify::classify_catalog;
use crate::data::derive::derive_catalog;
use crate::data::filter::filter_catalog;
use crate::data::loader::{LoadedCatalog, load_file};
use crate::data::model::{Catalog, Category};

// ---------------------------------------------------------------------------
// Census: one run of the pipeline
// ---------------------------------------------------------------------------

/// Row counts through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CensusSummary {
    /// Rows read from the source, including rejected ones.
    pub loaded: usize,
    /// Rows dropped because a value could not be parsed.
    pub rejected: usize,
    pub removed_temperature: usize,
    pub removed_duplicate: usize,
    pub kept: usize,
    /// Count per category, in legend order.
    pub per_category: Vec<(Category, usize)>,
    /// Kept rows whose lifespan is undefined.
    pub undefined_lifespan: usize,
}

impl fmt::Display for CensusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows loaded            {:>8}", self.loaded)?;
        writeln!(f, "rejected (parse)       {:>8}", self.rejected)?;
        writeln!(f, "removed (temperature)  {:>8}", self.removed_temperature)?;
        writeln!(f, "removed (duplicate id) {:>8}", self.removed_duplicate)?;
        writeln!(f, "stars kept             {:>8}", self.kept)?;
        for (category, count) in &self.per_category {
            writeln!(f, "  {:<20} {:>8}", category.label(), count)?;
        }
        write!(f, "undefined lifespan     {:>8}", self.undefined_lifespan)
    }
}

/// The finished, classified catalog and how it was reached.
#[derive(Debug, Clone)]
pub struct Census {
    pub catalog: Catalog,
    pub summary: CensusSummary,
}

impl Census {
    /// Load a catalog file and run it through the pipeline.
    pub fn run(path: &Path) -> Result<Self> {
        let loaded = load_file(path)?;
        let census = Self::from_loaded(loaded);
        info!(
            "{} stars kept of {} rows ({} undefined lifespans)",
            census.summary.kept, census.summary.loaded, census.summary.undefined_lifespan
        );
        Ok(census)
    }

    /// Filter → derive → classify an already loaded catalog.
    pub fn from_loaded(loaded: LoadedCatalog) -> Self {
        let LoadedCatalog { catalog, rejected } = loaded;
        let loaded_rows = catalog.len() + rejected.len();

        let filtered = filter_catalog(catalog);
        let catalog = classify_catalog(derive_catalog(filtered.catalog));

        let per_category = Category::ALL
            .into_iter()
            .map(|c| (c, catalog.in_category(c).count()))
            .collect();
        let undefined_lifespan = catalog
            .records
            .iter()
            .filter(|r| r.estimated_lifespan.is_none())
            .count();

        let summary = CensusSummary {
            loaded: loaded_rows,
            rejected: rejected.len(),
            removed_temperature: filtered.removed_temperature,
            removed_duplicate: filtered.removed_duplicate,
            kept: catalog.len(),
            per_category,
            undefined_lifespan,
        };
        Census { catalog, summary }
    }

    /// Number of kept stars in `category`.
    pub fn count(&self, category: Category) -> usize {
        self.summary
            .per_category
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }
}
