//! Material database with named soft-solid presets.
//!
//! Values are representative small-strain moduli; they are starting points
//! for tuning, not measured data.

use std::collections::HashMap;

use crate::properties::IsotropicMaterial;

/// A named collection of material presets.
///
/// Materials are looked up by name (e.g., "rubber", "gelatin").
/// Custom materials can be registered at runtime.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: HashMap<String, IsotropicMaterial>,
}

impl MaterialDatabase {
    /// Creates a new database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();

        db.register("rubber", rubber());
        db.register("silicone", silicone());
        db.register("gelatin", gelatin());
        db.register("soft_tissue", soft_tissue());
        db.register("foam", foam());

        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Registers a material. Overwrites if the name already exists.
    pub fn register(&mut self, name: impl Into<String>, material: IsotropicMaterial) {
        self.materials.insert(name.into(), material);
    }

    /// Looks up a material by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&IsotropicMaterial> {
        self.materials.get(name)
    }

    /// Returns all registered material names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Natural rubber. Nearly incompressible.
fn rubber() -> IsotropicMaterial {
    IsotropicMaterial::new(1.0e6, 0.49)
        .with_damping(0.002)
        .with_density(1100.0)
}

/// Platinum-cure silicone, as used for soft robot bodies.
fn silicone() -> IsotropicMaterial {
    IsotropicMaterial::new(5.0e5, 0.45)
        .with_damping(0.005)
        .with_density(1070.0)
}

/// Gelatin / jelly. Very soft, wobbly.
fn gelatin() -> IsotropicMaterial {
    IsotropicMaterial::new(1.0e4, 0.45)
        .with_damping(0.01)
        .with_density(1050.0)
}

/// Generic soft tissue.
fn soft_tissue() -> IsotropicMaterial {
    IsotropicMaterial::new(3.0e4, 0.4)
        .with_damping(0.02)
        .with_density(1060.0)
}

/// Open-cell foam. Highly compressible.
fn foam() -> IsotropicMaterial {
    IsotropicMaterial::new(5.0e4, 0.1)
        .with_damping(0.05)
        .with_density(50.0)
}
