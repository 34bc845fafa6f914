//! Validated index ranges into host arrays.
//!
//! Plugins never do raw offset arithmetic on host buffers; they resolve a
//! range once at init and borrow windows through it each step.

use tessel_types::{InstanceId, Scalar, TesselError, TesselResult};

use crate::contract::HostModel;

/// Contiguous run of bodies owned by one plugin instance.
///
/// Vertex `v` of the instance is body `start + v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRange {
    start: usize,
    len: usize,
}

impl BodyRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// First non-world body owned by `instance`, the vertex base.
    pub fn base_of(model: &HostModel, instance: InstanceId) -> TesselResult<usize> {
        (1..model.bodies.len())
            .find(|&b| model.bodies[b].plugin == Some(instance))
            .ok_or_else(|| {
                TesselError::InvalidConfig(format!("Plugin instance {instance} owns no bodies"))
            })
    }

    /// Bodies owned by `instance`. Every owned body must follow the vertex
    /// base without gaps.
    pub fn owned_by(model: &HostModel, instance: InstanceId) -> TesselResult<Self> {
        let start = Self::base_of(model, instance)?;
        let owned: Vec<usize> = (start..model.bodies.len())
            .filter(|&b| model.bodies[b].plugin == Some(instance))
            .collect();

        if owned.iter().enumerate().any(|(k, &b)| b != start + k) {
            return Err(TesselError::InvalidConfig(format!(
                "Bodies of plugin instance {instance} are not contiguous"
            )));
        }

        Ok(Self::new(start, owned.len()))
    }

    /// First body, i.e. the vertex base.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of bodies.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Body index of instance vertex `v`.
    #[inline]
    pub fn body(&self, v: u32) -> usize {
        self.start + v as usize
    }

    pub fn contains(&self, body: usize) -> bool {
        (self.start..self.start + self.len).contains(&body)
    }

    /// Borrow the 3-per-body slice of a per-body array such as `xpos`.
    pub fn window<'a>(&self, per_body: &'a [Scalar]) -> TesselResult<&'a [Scalar]> {
        per_body
            .get(3 * self.start..3 * (self.start + self.len))
            .ok_or_else(|| {
                TesselError::InvariantViolation(format!(
                    "Body array has {} scalars, bodies [{}, {}) need {}",
                    per_body.len(),
                    self.start,
                    self.start + self.len,
                    3 * (self.start + self.len)
                ))
            })
    }
}

/// Contiguous run of dofs, 3 per instance vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DofRange {
    start: usize,
    len: usize,
}

impl DofRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Dofs of a body range. Each body must carry exactly 3 dofs laid out
    /// consecutively after the first body's.
    pub fn for_bodies(model: &HostModel, bodies: &BodyRange) -> TesselResult<Self> {
        let dof_of = |b: usize| {
            model.bodies[b].dof_adr.ok_or_else(|| {
                TesselError::InvalidConfig(format!("Body {b} has no degrees of freedom"))
            })
        };

        let start = dof_of(bodies.start())?;
        for k in 0..bodies.len() {
            let body = bodies.start() + k;
            if dof_of(body)? != start + 3 * k {
                return Err(TesselError::InvalidConfig(format!(
                    "Body {body} dofs are not contiguous with body {}",
                    bodies.start()
                )));
            }
        }

        Ok(Self::new(start, 3 * bodies.len()))
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mutably borrow this range of a per-dof array such as `qfrc_passive`.
    pub fn window_mut<'a>(&self, per_dof: &'a mut [Scalar]) -> TesselResult<&'a mut [Scalar]> {
        let available = per_dof.len();
        per_dof
            .get_mut(self.start..self.start + self.len)
            .ok_or_else(|| {
                TesselError::InvariantViolation(format!(
                    "Dof array has {available} entries, range needs [{}, {})",
                    self.start,
                    self.start + self.len
                ))
            })
    }
}
