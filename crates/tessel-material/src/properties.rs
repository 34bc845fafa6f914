//! Isotropic linear-elastic material properties.

use serde::{Deserialize, Serialize};
use tessel_types::{Scalar, TesselError, TesselResult};

/// Physical properties of an isotropic soft solid.
///
/// | Field | Symbol | Valid range |
/// |---|---|---|
/// | `young` | E | > 0 (Pa) |
/// | `poisson` | ν | (−1, 0.5) |
/// | `damping` | — | ≥ 0 (s) |
/// | `density` | ρ | > 0 (kg/m³) |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsotropicMaterial {
    /// Young's modulus E in Pascals.
    pub young: Scalar,

    /// Poisson's ratio ν. Approaching 0.5 makes the material incompressible
    /// and λ unbounded.
    pub poisson: Scalar,

    /// Rayleigh damping coefficient, multiplied by the rate of change of
    /// squared edge lengths.
    #[serde(default)]
    pub damping: Scalar,

    /// Mass density. Only used by hosts that lump vertex masses.
    #[serde(default = "default_density")]
    pub density: Scalar,
}

fn default_density() -> Scalar {
    1000.0
}

impl IsotropicMaterial {
    /// Creates an undamped material with the default density.
    pub fn new(young: Scalar, poisson: Scalar) -> Self {
        Self {
            young,
            poisson,
            damping: 0.0,
            density: default_density(),
        }
    }

    /// Returns a copy with the given damping coefficient.
    pub fn with_damping(mut self, damping: Scalar) -> Self {
        self.damping = damping;
        self
    }

    /// Returns a copy with the given density.
    pub fn with_density(mut self, density: Scalar) -> Self {
        self.density = density;
        self
    }

    /// Checks that every constant lies in its physically valid range.
    pub fn validate(&self) -> TesselResult<()> {
        if !(self.young.is_finite() && self.young > 0.0) {
            return Err(TesselError::InvalidMaterial(format!(
                "Young's modulus must be positive, got {}",
                self.young
            )));
        }
        if !(self.poisson > -1.0 && self.poisson < 0.5) {
            return Err(TesselError::InvalidMaterial(format!(
                "Poisson's ratio must lie in (-1, 0.5), got {}",
                self.poisson
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(TesselError::InvalidMaterial(format!(
                "Damping must be non-negative, got {}",
                self.damping
            )));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(TesselError::InvalidMaterial(format!(
                "Density must be positive, got {}",
                self.density
            )));
        }
        Ok(())
    }

    /// Lamé parameters per unit volume.
    pub fn lame(&self) -> LameParameters {
        let e = self.young;
        let nu = self.poisson;
        LameParameters {
            mu: e / (2.0 * (1.0 + nu)),
            lambda: e * nu / ((1.0 + nu) * (1.0 - 2.0 * nu)),
        }
    }

    /// Bulk modulus K = E / (3(1 − 2ν)).
    pub fn bulk_modulus(&self) -> Scalar {
        self.young / (3.0 * (1.0 - 2.0 * self.poisson))
    }
}

/// Isotropic linear-elasticity moduli (μ, λ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LameParameters {
    /// Shear modulus μ.
    pub mu: Scalar,
    /// First Lamé parameter λ.
    pub lambda: Scalar,
}

impl LameParameters {
    /// Both moduli multiplied by an element volume.
    #[inline]
    pub fn scaled(self, volume: Scalar) -> Self {
        Self {
            mu: self.mu * volume,
            lambda: self.lambda * volume,
        }
    }
}
