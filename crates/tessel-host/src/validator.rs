//! Host model validation.
//!
//! Validates a host model before plugins are instantiated, catching
//! data-level errors early with clear diagnostics.

use tessel_types::{TesselError, TesselResult};

use crate::contract::{HostData, HostModel};

/// Validates a complete host model.
///
/// Checks:
/// - Timestep is positive and finite
/// - Body 0 is the world body (no plugin, no dofs)
/// - Rest positions are finite
/// - Dof addresses do not overlap
/// - Flexes reference existing bodies and edge-length entries
/// - Flex rest lengths are positive
/// - Every plugin instance referenced by a body exists
pub fn validate_model(model: &HostModel) -> TesselResult<()> {
    if !(model.timestep.is_finite() && model.timestep > 0.0) {
        return Err(TesselError::InvalidConfig(format!(
            "Timestep must be positive, got {}",
            model.timestep
        )));
    }

    match model.bodies.first() {
        Some(world) if world.plugin.is_none() && world.dof_adr.is_none() => {}
        _ => {
            return Err(TesselError::InvalidConfig(
                "Body 0 must be the world body".into(),
            ));
        }
    }

    let mut dofs: Vec<(usize, usize)> = Vec::new();
    for (b, body) in model.bodies.iter().enumerate() {
        if body.rest_position.iter().any(|c| !c.is_finite()) {
            return Err(TesselError::InvalidConfig(format!(
                "Body {b} has a non-finite rest position"
            )));
        }
        if let Some(plugin) = body.plugin {
            if plugin.index() >= model.instances.len() {
                return Err(TesselError::InvalidConfig(format!(
                    "Body {b} references undeclared plugin instance {plugin}"
                )));
            }
        }
        if let Some(adr) = body.dof_adr {
            dofs.push((adr, b));
        }
    }

    dofs.sort_unstable();
    for pair in dofs.windows(2) {
        let ((a, body_a), (b, body_b)) = (pair[0], pair[1]);
        if b < a + 3 {
            return Err(TesselError::InvalidConfig(format!(
                "Dofs of bodies {body_a} and {body_b} overlap"
            )));
        }
    }

    for (f, flex) in model.flexes.iter().enumerate() {
        if flex.first_body == 0 || flex.first_body >= model.bodies.len() {
            return Err(TesselError::InvalidConfig(format!(
                "Flex {f} starts at invalid body {}",
                flex.first_body
            )));
        }
        let end = flex.edge_adr + flex.edge_count;
        if end > model.flexedge_length0.len() {
            return Err(TesselError::InvalidConfig(format!(
                "Flex {f} edges [{}, {end}) exceed the {} stored rest lengths",
                flex.edge_adr,
                model.flexedge_length0.len()
            )));
        }
        if model.flexedge_length0[flex.edge_adr..end]
            .iter()
            .any(|l| !(l.is_finite() && *l > 0.0))
        {
            return Err(TesselError::InvalidConfig(format!(
                "Flex {f} has a non-positive rest length"
            )));
        }
    }

    Ok(())
}

/// Checks that per-step buffers match the model's dimensions.
pub fn validate_data(model: &HostModel, data: &HostData) -> TesselResult<()> {
    if data.xpos.len() != 3 * model.bodies.len() {
        return Err(TesselError::InvariantViolation(format!(
            "xpos has {} scalars, model has {} bodies",
            data.xpos.len(),
            model.bodies.len()
        )));
    }
    if data.qfrc_passive.len() != model.dof_count() {
        return Err(TesselError::InvariantViolation(format!(
            "qfrc_passive has {} entries, model has {} dofs",
            data.qfrc_passive.len(),
            model.dof_count()
        )));
    }
    if data.flexedge_length.len() != model.flexedge_length0.len() {
        return Err(TesselError::InvariantViolation(format!(
            "flexedge_length has {} entries, model has {}",
            data.flexedge_length.len(),
            model.flexedge_length0.len()
        )));
    }
    Ok(())
}
