//! The unit system used throughout the crate, all masses are [uom] quantities stored as `f64`.

pub use uom::si::f64::Mass;
pub use uom::si::mass::dalton;

/// Annotate the given number as being in Da
pub fn da(value: f64) -> Mass {
    Mass::new::<dalton>(value)
}

/// The smallest of two masses, the first is returned if they compare equal (or if one is NaN)
pub(crate) fn min_mass(a: Mass, b: Mass) -> Mass {
    if b < a { b } else { a }
}

/// The mass of a single water molecule (H2O), the difference between a residue sum and a full peptide
pub(crate) fn water() -> Mass {
    da(18.010_564_683_7)
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn dalton_round_trip() {
        assert!((da(1234.5678).get::<dalton>() - 1234.5678).abs() < 1e-9);
    }

    #[test]
    fn minimum() {
        assert_eq!(min_mass(da(2.0), da(1.0)), da(1.0));
        assert_eq!(min_mass(da(-1.0), da(1.0)), da(-1.0));
    }
}
