use super::model::{Catalog, Category};

/// Surface-gravity rule list; first match wins, `Other` catches the rest.
///
/// Note the deliberate holes: `[3.5, 4.0)` and `(4.9, 5.0]` are `Other`, and
/// so is `NaN` since every comparison against it is false.
pub fn classify(surface_gravity_log: f64) -> Category {
    let g = surface_gravity_log;
    if g > 5.0 {
        Category::WhiteDwarf
    } else if g < 3.0 {
        Category::SuperGiant
    } else if g < 3.5 {
        Category::RedGiant
    } else if (4.0..=4.9).contains(&g) {
        Category::MainSequence
    } else {
        Category::Other
    }
}

/// Assign a category to every record; a missing log g classifies as `Other`.
pub fn classify_catalog(mut catalog: Catalog) -> Catalog {
    for record in &mut catalog.records {
        let g = record.surface_gravity_log.unwrap_or(f64::NAN);
        record.category = Some(classify(g));
    }
    catalog
}
