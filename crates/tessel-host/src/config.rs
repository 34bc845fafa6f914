//! Plugin configuration.
//!
//! Hosts hand plugins their options as string attributes. [`PluginConfig`]
//! stores them in a sorted map; typed option structs parse and validate
//! them once at instance creation.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tessel_elasticity::SolidParams;
use tessel_material::IsotropicMaterial;
use tessel_types::{Scalar, TesselError, TesselResult};

/// String attributes of one plugin instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginConfig(BTreeMap<String, String>);

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Attribute names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Required attribute.
    pub fn require(&self, key: &str) -> TesselResult<&str> {
        self.get(key)
            .ok_or_else(|| TesselError::MissingOption(key.to_string()))
    }

    /// Parse a scalar attribute.
    pub fn parse_scalar(&self, key: &str) -> TesselResult<Option<Scalar>> {
        self.get(key).map(|raw| parse_one(key, raw)).transpose()
    }

    /// Parse a whitespace-separated list attribute.
    pub fn parse_list<T: FromStr>(&self, key: &str) -> TesselResult<Option<Vec<T>>> {
        self.get(key)
            .map(|raw| raw.split_whitespace().map(|tok| parse_one(key, tok)).collect())
            .transpose()
    }
}

fn parse_one<T: FromStr>(key: &str, raw: &str) -> TesselResult<T> {
    raw.trim().parse().map_err(|_| {
        TesselError::InvalidConfig(format!("Cannot parse '{raw}' in option '{key}'"))
    })
}

/// Options of the tetrahedral solid plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidOptions {
    /// Flattened tetrahedron vertex ids, 4 per element.
    pub face: Vec<u32>,
    /// Precomputed edge ids, 6 per element.
    pub edge: Option<Vec<u32>>,
    pub young: Scalar,
    pub poisson: Scalar,
    pub damping: Scalar,
}

impl SolidOptions {
    /// Attribute names understood by the solid plugin.
    pub const ATTRIBUTES: &'static [&'static str] = &["face", "edge", "young", "poisson", "damping"];

    /// Parse and validate the options.
    ///
    /// `face`, `young` and `poisson` are required. An empty `edge` is the
    /// same as leaving it out. `damping` defaults to zero.
    pub fn from_config(config: &PluginConfig) -> TesselResult<Self> {
        config.require("face")?;
        let face: Vec<u32> = config.parse_list("face")?.unwrap_or_default();
        if face.is_empty() || face.len() % 4 != 0 {
            return Err(TesselError::InvalidConfig(format!(
                "Option 'face' must list 4 vertices per tetrahedron, got {} ids",
                face.len()
            )));
        }

        let edge = config
            .parse_list::<u32>("edge")?
            .filter(|ids| !ids.is_empty());

        let young = config
            .parse_scalar("young")?
            .ok_or_else(|| TesselError::MissingOption("young".into()))?;
        let poisson = config
            .parse_scalar("poisson")?
            .ok_or_else(|| TesselError::MissingOption("poisson".into()))?;
        let damping = config.parse_scalar("damping")?.unwrap_or(0.0);

        let options = Self {
            face,
            edge,
            young,
            poisson,
            damping,
        };
        options.material().validate()?;
        Ok(options)
    }

    pub fn material(&self) -> IsotropicMaterial {
        IsotropicMaterial::new(self.young, self.poisson).with_damping(self.damping)
    }

    /// Construction parameters for the elastic model.
    pub fn params(&self) -> SolidParams {
        SolidParams {
            material: self.material(),
            simplex: self.face.clone(),
            edge_check: self.edge.clone(),
        }
    }

    /// Options for a mesh's connectivity with a given material.
    pub fn for_mesh(indices: &[u32], material: &IsotropicMaterial) -> Self {
        Self {
            face: indices.to_vec(),
            edge: None,
            young: material.young,
            poisson: material.poisson,
            damping: material.damping,
        }
    }

    pub fn with_edges(mut self, edges: Vec<u32>) -> Self {
        self.edge = Some(edges);
        self
    }

    /// Render back into string attributes.
    pub fn to_config(&self) -> PluginConfig {
        let join = |ids: &[u32]| {
            ids.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut config = PluginConfig::new()
            .with("face", join(&self.face))
            .with("young", self.young.to_string())
            .with("poisson", self.poisson.to_string())
            .with("damping", self.damping.to_string());
        if let Some(edge) = &self.edge {
            config.set("edge", join(edge));
        }
        config
    }
}
