//! Mass and lifespan estimates from surface gravity and radius.
//!
//! Mass follows from `g = G M / R²`; lifespan from the main-sequence scaling
//! `t ≈ 10 Gyr × (M / M☉)^-3.5`.
//!
//! Catalog log g is in cgs, so `10^logg` is cm s⁻² and is scaled by 1e-2
//! before use with SI `G`. Taking `10^logg` as m s⁻² directly puts the Sun
//! (log g 4.438, R = 1 R☉) near 100 M☉ instead of 1 M☉.

use log::debug;

use super::model::{Catalog, StarRecord};

/// Gravitational constant, m³ kg⁻¹ s⁻².
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;
/// Solar mass, kg.
pub const SOLAR_MASS_KG: f64 = 1.98847e30;
/// Solar radius, m.
pub const SOLAR_RADIUS_M: f64 = 6.95700e8;

/// cm s⁻² → m s⁻².
const CGS_TO_SI_ACCELERATION: f64 = 1e-2;
/// Lifespan of a one-solar-mass star, Gyr.
const SOLAR_LIFESPAN_GYR: f64 = 10.0;
const LIFESPAN_MASS_EXPONENT: f64 = -3.5;

/// Linear surface gravity in m s⁻² from log10 g in cgs.
pub fn surface_gravity(surface_gravity_log: f64) -> f64 {
    10f64.powf(surface_gravity_log) * CGS_TO_SI_ACCELERATION
}

/// Mass in solar masses, or `None` if an input is missing or the result is
/// not finite. Not clamped: a zero radius gives a zero mass.
pub fn estimate_mass(surface_gravity_log: Option<f64>, stellar_radius: Option<f64>) -> Option<f64> {
    let g = surface_gravity(surface_gravity_log?);
    let radius_m = stellar_radius? * SOLAR_RADIUS_M;
    let mass = g * radius_m.powi(2) / GRAVITATIONAL_CONSTANT / SOLAR_MASS_KG;
    mass.is_finite().then_some(mass)
}

/// Lifespan in billions of years. Undefined (`None`) unless the mass is
/// finite and strictly positive.
pub fn estimate_lifespan(estimated_mass: Option<f64>) -> Option<f64> {
    let mass = estimated_mass.filter(|m| m.is_finite() && *m > 0.0)?;
    let lifespan = SOLAR_LIFESPAN_GYR * mass.powf(LIFESPAN_MASS_EXPONENT);
    lifespan.is_finite().then_some(lifespan)
}

/// Fill `estimated_mass` and `estimated_lifespan` on one record.
pub fn derive_record(record: &mut StarRecord) {
    record.estimated_mass = estimate_mass(record.surface_gravity_log, record.stellar_radius);
    record.estimated_lifespan = estimate_lifespan(record.estimated_mass);
}

/// Fill the derived columns on every record.
pub fn derive_catalog(mut catalog: Catalog) -> Catalog {
    catalog.records.iter_mut().for_each(derive_record);
    let undefined = catalog
        .records
        .iter()
        .filter(|r| r.estimated_lifespan.is_none())
        .count();
    debug!("derived mass and lifespan for {} records ({undefined} undefined lifespans)", catalog.len());
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn sun_has_one_solar_mass() {
        let mass = estimate_mass(Some(4.438), Some(1.0)).unwrap();
        assert!(close(mass, 1.0, 1e-3), "mass = {mass}");
    }

    #[test]
    fn sun_lives_ten_billion_years() {
        let lifespan = estimate_lifespan(Some(1.0)).unwrap();
        assert!(close(lifespan, 10.0, 1e-12));
    }

    #[test]
    fn mass_scales_with_radius_squared() {
        let m1 = estimate_mass(Some(4.0), Some(1.0)).unwrap();
        let m2 = estimate_mass(Some(4.0), Some(2.0)).unwrap();
        assert!(close(m2 / m1, 4.0, 1e-9));
    }

    #[test]
    fn lifespan_decreases_with_mass() {
        let masses = [0.1, 0.5, 0.8, 1.0, 1.5, 3.0, 10.0, 40.0];
        let lifespans: Vec<f64> = masses
            .iter()
            .map(|m| estimate_lifespan(Some(*m)).unwrap())
            .collect();
        for pair in lifespans.windows(2) {
            assert!(pair[0] > pair[1], "{pair:?}");
        }
    }

    #[test]
    fn missing_inputs_give_missing_mass() {
        assert_eq!(estimate_mass(None, Some(1.0)), None);
        assert_eq!(estimate_mass(Some(4.4), None), None);
        assert_eq!(estimate_lifespan(None), None);
    }

    #[test]
    fn non_positive_mass_has_undefined_lifespan() {
        let mass = estimate_mass(Some(4.4), Some(0.0));
        assert_eq!(mass, Some(0.0));
        assert_eq!(estimate_lifespan(mass), None);
        assert_eq!(estimate_lifespan(Some(-1.0)), None);
        assert_eq!(estimate_lifespan(Some(f64::NAN)), None);
    }

    #[test]
    fn overflowing_gravity_gives_missing_mass() {
        assert_eq!(estimate_mass(Some(400.0), Some(1.0)), None);
    }

    #[test]
    fn derive_catalog_fills_every_record() {
        let mut sun = StarRecord::new("sun");
        sun.surface_gravity_log = Some(4.438);
        sun.stellar_radius = Some(1.0);
        let bare = StarRecord::new("bare");

        let catalog = derive_catalog(Catalog::from_records(vec![sun, bare]));

        let sun = &catalog.records[0];
        assert!(close(sun.estimated_mass.unwrap(), 1.0, 1e-3));
        assert!(close(sun.estimated_lifespan.unwrap(), 10.0, 0.05));
        assert_eq!(catalog.records[1].estimated_mass, None);
        assert_eq!(catalog.records[1].estimated_lifespan, None);
    }
}
