//! The four scatter views drawn from a finished catalog.
//!
//! Nothing here rasterises: each [`FigureSpec`] names its axes, scales and
//! output file, and [`scatter_series`] groups the catalog into one point
//! series per category for an external renderer.

use serde::Serialize;

use crate::color::{self, Theme};
use crate::data::model::{Catalog, Category, StarRecord};

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// A record field that can go on a figure axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    EffectiveTemperature,
    KeplerMagnitude,
    StellarRadius,
    EstimatedLifespan,
    OrbitalPeriod,
}

impl Quantity {
    pub fn value(self, record: &StarRecord) -> Option<f64> {
        match self {
            Quantity::EffectiveTemperature => record.effective_temperature,
            Quantity::KeplerMagnitude => record.kepler_magnitude,
            Quantity::StellarRadius => record.stellar_radius,
            Quantity::EstimatedLifespan => record.estimated_lifespan,
            Quantity::OrbitalPeriod => record.orbital_period,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridTicks {
    Major,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub quantity: Quantity,
    pub label: &'static str,
    pub scale: Scale,
    /// Values decrease along the axis.
    pub inverted: bool,
}

impl Axis {
    /// Plottable coordinate: present, finite, and positive on a log axis.
    fn coordinate(&self, record: &StarRecord) -> Option<f64> {
        let v = self.quantity.value(record)?;
        let plottable = v.is_finite() && (self.scale == Scale::Linear || v > 0.0);
        plottable.then_some(v)
    }
}

// ---------------------------------------------------------------------------
// Figure definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureSpec {
    pub title: &'static str,
    pub file_name: &'static str,
    pub x: Axis,
    pub y: Axis,
    pub grid: GridTicks,
    /// Inches.
    pub size: (f32, f32),
    pub dpi: u32,
}

const FIGURE_SIZE: (f32, f32) = (12.0, 8.0);
const FIGURE_DPI: u32 = 1000;

fn temperature_axis(label: &'static str) -> Axis {
    Axis {
        quantity: Quantity::EffectiveTemperature,
        label,
        scale: Scale::Linear,
        inverted: true,
    }
}

fn log_axis(quantity: Quantity, label: &'static str) -> Axis {
    Axis {
        quantity,
        label,
        scale: Scale::Log,
        inverted: false,
    }
}

/// The four standard views, hotter stars on the left in every one.
pub fn standard_figures() -> Vec<FigureSpec> {
    vec![
        FigureSpec {
            title: "Temperature vs. Kepler Magnitude from Kepler Data",
            file_name: "1_temperature_magnitude_main_sequence_diagram.jpg",
            x: temperature_axis("Effective Temperature (K)"),
            y: Axis {
                quantity: Quantity::KeplerMagnitude,
                label: "Kepler Magnitude",
                scale: Scale::Linear,
                inverted: true,
            },
            grid: GridTicks::Both,
            size: FIGURE_SIZE,
            dpi: FIGURE_DPI,
        },
        FigureSpec {
            title: "Temperature vs. Stellar Radius from Kepler Data (Log Scale)",
            file_name: "2_temperature_radius_main_sequence_diagram.jpg",
            x: temperature_axis("Effective Temperature (K)"),
            y: log_axis(Quantity::StellarRadius, "Stellar Radius (Solar Radii) [Log Scale]"),
            grid: GridTicks::Major,
            size: FIGURE_SIZE,
            dpi: FIGURE_DPI,
        },
        FigureSpec {
            title: "Effective Temperature vs. Estimated Lifespan with Stellar Classifications \
                    from Kepler Data (Log Scale)",
            file_name: "3_temperature_estimated_lifespan_main_sequence_diagram.jpg",
            x: temperature_axis("Effective Temperature (K)"),
            y: log_axis(
                Quantity::EstimatedLifespan,
                "Estimated Lifespan (Billion Years) [Log Scale]",
            ),
            grid: GridTicks::Major,
            size: FIGURE_SIZE,
            dpi: FIGURE_DPI,
        },
        FigureSpec {
            title: "Planet Orbital Time vs. Host Star Effective Temperature \
                    with Stellar Classifications",
            file_name: "4_planet_host_star_classification_main_sequence_diagram.jpg",
            x: temperature_axis("Host Star Effective Temperature (K)"),
            y: log_axis(Quantity::OrbitalPeriod, "Orbital Period (days)"),
            grid: GridTicks::Major,
            size: FIGURE_SIZE,
            dpi: FIGURE_DPI,
        },
    ]
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Points of one category in one figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub category: Category,
    pub label: &'static str,
    /// `#rrggbb`.
    pub color: String,
    pub points: Vec<[f64; 2]>,
}

/// A figure with its data, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    #[serde(flatten)]
    pub spec: FigureSpec,
    pub series: Vec<Series>,
    /// Records without a plottable coordinate on this figure.
    pub skipped: usize,
}

/// Group classified records into one series per category, in legend order.
/// Unclassified records and unplottable points are left out and counted.
pub fn scatter_series(catalog: &Catalog, spec: &FigureSpec) -> Figure {
    let mut skipped = 0;
    let series: Vec<Series> = Category::ALL
        .into_iter()
        .map(|category| {
            let mut points = Vec::new();
            for record in catalog.in_category(category) {
                match (spec.x.coordinate(record), spec.y.coordinate(record)) {
                    (Some(x), Some(y)) => points.push([x, y]),
                    _ => skipped += 1,
                }
            }
            Series {
                category,
                label: category.label(),
                color: color::hex(color::color_for(category)),
                points,
            }
        })
        .collect();
    skipped += catalog.records.iter().filter(|r| r.category.is_none()).count();

    Figure {
        spec: spec.clone(),
        series,
        skipped,
    }
}

/// Everything an external renderer needs: theme plus the four figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureBundle {
    pub theme: Theme,
    pub figures: Vec<Figure>,
}

impl FigureBundle {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        FigureBundle {
            theme: Theme::default(),
            figures: standard_figures()
                .iter()
                .map(|spec| scatter_series(catalog, spec))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(id: &str, category: Category, teff: f64, lifespan: Option<f64>) -> StarRecord {
        let mut r = StarRecord::new(id);
        r.effective_temperature = Some(teff);
        r.estimated_lifespan = lifespan;
        r.kepler_magnitude = Some(14.0);
        r.category = Some(category);
        r
    }

    #[test]
    fn four_views_with_inverted_temperature_axis() {
        let figures = standard_figures();
        assert_eq!(figures.len(), 4);
        assert!(figures.iter().all(|f| f.x.inverted));
        assert!(figures.iter().all(|f| f.x.quantity == Quantity::EffectiveTemperature));
        assert!(figures[0].y.inverted);
        assert_eq!(figures[0].y.scale, Scale::Linear);
        assert!(figures[1..].iter().all(|f| f.y.scale == Scale::Log));
        assert_eq!(figures[3].y.label, "Orbital Period (days)");
    }

    #[test]
    fn groups_points_by_category_in_legend_order() {
        let catalog = Catalog::from_records(vec![
            classified("a", Category::RedGiant, 4800.0, Some(2.0)),
            classified("b", Category::MainSequence, 5800.0, Some(10.0)),
            classified("c", Category::MainSequence, 6100.0, Some(8.0)),
        ]);
        let lifespan = &standard_figures()[2];
        let figure = scatter_series(&catalog, lifespan);

        let labels: Vec<&str> = figure.series.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Main Sequence", "Red Giant", "Super Giant", "White Dwarf", "Other"]);
        assert_eq!(figure.series[0].points, vec![[5800.0, 10.0], [6100.0, 8.0]]);
        assert_eq!(figure.series[0].color, "#ffff00");
        assert_eq!(figure.series[1].points, vec![[4800.0, 2.0]]);
        assert!(figure.series[4].points.is_empty());
        assert_eq!(figure.skipped, 0);
    }

    #[test]
    fn log_axis_skips_missing_and_non_positive_values() {
        let catalog = Catalog::from_records(vec![
            classified("a", Category::Other, 5000.0, None),
            classified("b", Category::Other, 5000.0, Some(0.0)),
            classified("c", Category::Other, 5000.0, Some(f64::INFINITY)),
            classified("d", Category::Other, 5000.0, Some(3.0)),
        ]);
        let figure = scatter_series(&catalog, &standard_figures()[2]);

        assert_eq!(figure.series[4].points, vec![[5000.0, 3.0]]);
        assert_eq!(figure.skipped, 3);
    }

    #[test]
    fn linear_axis_keeps_non_positive_values() {
        let mut r = classified("a", Category::WhiteDwarf, 9000.0, None);
        r.kepler_magnitude = Some(-0.5);
        let catalog = Catalog::from_records(vec![r, StarRecord::new("unclassified")]);
        let figure = scatter_series(&catalog, &standard_figures()[0]);

        assert_eq!(figure.series[3].points, vec![[9000.0, -0.5]]);
        assert_eq!(figure.skipped, 1);
    }

    #[test]
    fn bundle_serializes_for_renderer() {
        let catalog = Catalog::from_records(vec![classified("a", Category::RedGiant, 4800.0, Some(2.0))]);
        let bundle = FigureBundle::from_catalog(&catalog);
        let json = serde_json::to_value(&bundle).unwrap();

        assert_eq!(json["theme"]["background"], "#333333");
        assert_eq!(json["figures"].as_array().unwrap().len(), 4);
        assert_eq!(json["figures"][1]["y"]["scale"], "log");
        assert_eq!(json["figures"][0]["series"][1]["category"], "Red Giant");
    }
}
