//! # tessel-host
//!
//! The boundary between a host simulation and Tessel's passive-force plugins.
//!
//! ## Key Types
//!
//! - [`HostModel`] / [`HostData`] — static model and per-step buffers
//! - [`BodyRange`] / [`DofRange`] — validated windows into host arrays
//! - [`PluginConfig`] / [`SolidOptions`] — string attributes and their typed form
//! - [`PassivePlugin`] — init / compute / destroy lifecycle
//! - [`PluginRegistry`] / [`InstanceTable`] — plugin lookup and live instances

pub mod config;
pub mod contract;
pub mod handles;
pub mod plugin;
pub mod registry;
pub mod validator;

pub use config::{PluginConfig, SolidOptions};
pub use contract::{BodyInfo, FlexInfo, HostData, HostModel, PluginInstanceSpec};
pub use handles::{BodyRange, DofRange};
pub use plugin::{PassivePlugin, SolidPlugin, SOLID_PLUGIN_NAME};
pub use registry::{InstanceTable, PluginDescriptor, PluginRegistry};
