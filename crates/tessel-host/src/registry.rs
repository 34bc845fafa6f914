//! Plugin registration and the per-model instance table.

use std::collections::BTreeMap;

use tessel_elasticity::StepReport;
use tessel_types::{InstanceId, TesselError, TesselResult};

use crate::config::SolidOptions;
use crate::contract::{HostData, HostModel};
use crate::plugin::{PassivePlugin, SolidPlugin, SOLID_PLUGIN_NAME};

type CreateFn = fn(&HostModel, InstanceId) -> TesselResult<Box<dyn PassivePlugin>>;

fn create<P: PassivePlugin + 'static>(
    model: &HostModel,
    instance: InstanceId,
) -> TesselResult<Box<dyn PassivePlugin>> {
    Ok(Box::new(P::init(model, instance)?))
}

/// Name, accepted attributes and constructor of a plugin type.
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub attributes: &'static [&'static str],
    create: CreateFn,
}

impl PluginDescriptor {
    pub fn of<P: PassivePlugin + 'static>(
        name: &'static str,
        attributes: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            attributes,
            create: create::<P>,
        }
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Known plugin types, by name.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<&'static str, PluginDescriptor>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in plugin.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.plugins.insert(
            SOLID_PLUGIN_NAME,
            PluginDescriptor::of::<SolidPlugin>(SOLID_PLUGIN_NAME, SolidOptions::ATTRIBUTES),
        );
        registry
    }

    /// Add a plugin type. Names must be unique.
    pub fn register(&mut self, descriptor: PluginDescriptor) -> TesselResult<()> {
        if self.plugins.contains_key(descriptor.name) {
            return Err(TesselError::InvalidConfig(format!(
                "Plugin '{}' is already registered",
                descriptor.name
            )));
        }
        self.plugins.insert(descriptor.name, descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.plugins.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.keys().copied()
    }

    /// Create every instance the model declares.
    ///
    /// Instances that fail with a recoverable error are logged, recorded as
    /// skipped and never computed. Any other error is returned and no table
    /// is built.
    pub fn instantiate(&self, model: &HostModel) -> TesselResult<InstanceTable> {
        let mut table = InstanceTable::default();

        for (i, spec) in model.instances.iter().enumerate() {
            let instance = InstanceId(i as u32);
            let result = self
                .get(&spec.plugin)
                .ok_or_else(|| {
                    TesselError::InvalidConfig(format!("Unknown plugin '{}'", spec.plugin))
                })
                .and_then(|descriptor| {
                    let unknown = spec
                        .config
                        .keys()
                        .find(|key| !descriptor.attributes.iter().any(|a| a == key));
                    if let Some(key) = unknown {
                        return Err(TesselError::InvalidConfig(format!(
                            "Plugin '{}' has no attribute '{key}'",
                            spec.plugin
                        )));
                    }
                    (descriptor.create)(model, instance)
                });

            match result {
                Ok(plugin) => {
                    table.instances.insert(instance, plugin);
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(%instance, plugin = %spec.plugin, error = %err, "skipping plugin instance");
                    table.skipped.push((instance, err.to_string()));
                }
                Err(err) => return Err(err),
            }
        }

        tracing::debug!(
            active = table.instances.len(),
            skipped = table.skipped.len(),
            "plugin instances created"
        );
        Ok(table)
    }
}

/// Live plugin instances of one host model.
#[derive(Default)]
pub struct InstanceTable {
    instances: BTreeMap<InstanceId, Box<dyn PassivePlugin>>,
    skipped: Vec<(InstanceId, String)>,
}

impl InstanceTable {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn contains(&self, instance: InstanceId) -> bool {
        self.instances.contains_key(&instance)
    }

    /// Instances that were not created, with the reason.
    pub fn skipped(&self) -> &[(InstanceId, String)] {
        &self.skipped
    }

    /// Run every instance in id order. Step-time errors are fatal.
    pub fn compute(
        &mut self,
        model: &HostModel,
        data: &mut HostData,
    ) -> TesselResult<Vec<(InstanceId, StepReport)>> {
        let mut reports = Vec::with_capacity(self.instances.len());
        for (id, plugin) in self.instances.iter_mut() {
            reports.push((*id, plugin.compute(model, data)?));
        }
        Ok(reports)
    }

    /// Destroy one instance.
    pub fn remove(&mut self, instance: InstanceId) -> bool {
        match self.instances.remove(&instance) {
            Some(mut plugin) => {
                plugin.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy every instance.
    pub fn clear(&mut self) {
        for plugin in self.instances.values_mut() {
            plugin.destroy();
        }
        self.instances.clear();
    }
}

impl Drop for InstanceTable {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for InstanceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceTable")
            .field("instances", &self.instances.keys().collect::<Vec<_>>())
            .field("skipped", &self.skipped)
            .finish()
    }
}
