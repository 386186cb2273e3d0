//! # Planetary constants registry
//!
//! Static, read-only lookup table of gravitational and physical constants for
//! the major solar-system bodies. The registry is shared process-wide and is
//! the only piece of global state in the library; it is immutable after
//! compilation, so no locking is required anywhere.
//!
//! Lengths are in kilometers, masses in kilograms, gravitational parameters μ
//! in km³/s². Each body also carries its canonical distance/time units (DU,
//! TU) for problems worked in normalized coordinates (μ = 1).

use std::fmt;

use crate::errors::AstroError;

/// Immutable physical record for a solar-system body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetaryBody {
    /// Display name, also the registry key.
    pub name: &'static str,
    /// Mass in kg.
    pub mass: f64,
    /// Gravitational parameter μ in km³/s².
    pub mu: f64,
    /// Mean equatorial radius in km.
    pub radius: f64,
    /// Canonical distance unit in km (one DU spans the body surface radius).
    pub du: f64,
    /// Canonical time unit in seconds (period of a circular orbit at one DU,
    /// divided by 2π).
    pub tu: f64,
}

impl fmt::Display for PlanetaryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  mass   = {:e} kg", self.mass)?;
        writeln!(f, "  mu     = {} km^3/s^2", self.mu)?;
        writeln!(f, "  radius = {} km", self.radius)?;
        write!(f, "  DU = {} km, TU = {} s", self.du, self.tu)
    }
}

/// The fixed set of bodies known to the registry, in display order.
pub static BODIES: [PlanetaryBody; 11] = [
    PlanetaryBody {
        name: "Sun",
        mass: 1.989e30,
        mu: 1.32712e11,
        radius: 695_700.0,
        du: 696_340.0,
        tu: 57.13 * 86_400.0,
    },
    PlanetaryBody {
        name: "Mercury",
        mass: 0.33e24,
        mu: 22_032.0,
        radius: 2_439.5,
        du: 2_439.5,
        tu: 811.1,
    },
    PlanetaryBody {
        name: "Venus",
        mass: 4.87e24,
        mu: 324_859.0,
        radius: 6_052.0,
        du: 6_052.0,
        tu: 826.0,
    },
    PlanetaryBody {
        name: "Earth",
        mass: 5.972e24,
        mu: 398_600.0,
        radius: 6_378.0,
        du: 6_378.1,
        tu: 806.8,
    },
    PlanetaryBody {
        name: "Moon",
        mass: 0.073e24,
        mu: 4_902.8,
        radius: 1_737.5,
        du: 1_737.5,
        tu: 1_034.0,
    },
    PlanetaryBody {
        name: "Mars",
        mass: 0.642e24,
        mu: 42_828.0,
        radius: 3_396.0,
        du: 3_396.0,
        tu: 956.0,
    },
    PlanetaryBody {
        name: "Jupiter",
        mass: 1_898e24,
        mu: 1.26687e8,
        radius: 71_492.0,
        du: 71_492.0,
        tu: 1_699.0,
    },
    PlanetaryBody {
        name: "Saturn",
        mass: 568e24,
        mu: 3.79312e7,
        radius: 60_268.0,
        du: 60_268.0,
        tu: 2_400.0,
    },
    PlanetaryBody {
        name: "Uranus",
        mass: 86.8e24,
        mu: 5.79394e6,
        radius: 25_559.0,
        du: 25_559.0,
        tu: 1_697.0,
    },
    PlanetaryBody {
        name: "Neptune",
        mass: 102e24,
        mu: 6.83653e6,
        radius: 24_764.0,
        du: 24_764.0,
        tu: 1_490.0,
    },
    PlanetaryBody {
        name: "Pluto",
        mass: 0.0146e24,
        mu: 869.6,
        radius: 1_185.0,
        du: 1_185.0,
        tu: 1_383.0,
    },
];

/// Look up a body by name (case-insensitive).
///
/// Return
/// ------
/// * `&'static PlanetaryBody` on success.
/// * [`AstroError::UnknownBody`] listing the valid names otherwise.
pub fn get_planet_data(name: &str) -> Result<&'static PlanetaryBody, AstroError> {
    BODIES
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| AstroError::UnknownBody {
            name: name.to_string(),
            valid: available_bodies().join(", "),
        })
}

/// Names of all bodies in the registry, in display order.
pub fn available_bodies() -> Vec<&'static str> {
    BODIES.iter().map(|b| b.name).collect()
}

#[cfg(test)]
mod planetary_test {
    use super::*;

    #[test]
    fn test_lookup() {
        let earth = get_planet_data("Earth").unwrap();
        assert_eq!(earth.mu, 398_600.0);
        assert_eq!(earth.radius, 6_378.0);

        // case-insensitive
        assert_eq!(get_planet_data("earth").unwrap(), earth);
    }

    #[test]
    fn test_unknown_body() {
        let err = get_planet_data("Krypton").unwrap_err();
        match err {
            AstroError::UnknownBody { name, valid } => {
                assert_eq!(name, "Krypton");
                assert!(valid.contains("Earth"));
                assert!(valid.contains("Pluto"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_registry_is_complete() {
        let names = available_bodies();
        assert_eq!(
            names,
            vec![
                "Sun", "Mercury", "Venus", "Earth", "Moon", "Mars", "Jupiter", "Saturn", "Uranus",
                "Neptune", "Pluto"
            ]
        );
    }
}
