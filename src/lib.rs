//! Kepler catalog census: load a star/planet table, drop hot and duplicate
//! stars, estimate mass and lifespan from surface gravity and radius, sort
//! each star into one of five evolution categories, and prepare the scatter
//! views of the result for an external renderer.

pub mod census;
pub mod color;
pub mod data;
pub mod figures;

pub use census::{Census, CensusSummary};
pub use data::model::{Catalog, Category, StarRecord};
