//! Canonical skeleton pose snapshots.
//!
//! Snapshots capture a normalized view of bone, slot, and constraint state
//! that can be compared across two runtimes regardless of their internal
//! representations. Instances are built once by a sampling adapter and never
//! mutated afterwards; JSON (via serde) is the interchange format between
//! adapters and the comparator.

use serde::{Deserialize, Serialize};

/// Fixed sampling step, in the skeleton's time units. Animations are sampled
/// at `t = 0, STEP_SIZE, 2 * STEP_SIZE, ...` up to and including the
/// animation's duration. No other cadence is defined.
pub const STEP_SIZE: f32 = 0.1;

/// Frame count a conforming sampler produces for `duration`: closed-interval
/// sampling, so both endpoints are included.
pub fn expected_frame_count(duration: f32) -> usize {
    (duration / STEP_SIZE).floor() as usize + 1
}

/// One fully sampled skeleton, as reported by a single runtime.
///
/// Within one skeleton, bone/slot/constraint ordering is stable across every
/// frame of every animation: index `i` always refers to the same declared
/// entity. The positional alignment in the diff engine relies on this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    /// Bind pose with world transforms computed, before any animation.
    pub setup: Frame,
    pub animations: Vec<Animation>,

    /// Names of the bones the runtime resets between animation applications.
    pub reset_bones: Vec<String>,
    /// The runtime's internal update order, one tagged entry per updatable
    /// (see [`UpdateKind`]).
    pub update_order: Vec<String>,

    pub transform_constraints: Vec<TransformConstraintData>,

    /// Which transform representations the sampling adapter populated.
    pub has_local: bool,
    pub has_applied_world: bool,
    pub has_affine_world: bool,
}

impl Skeleton {
    /// Linear scan by name; animation names are unique within a skeleton.
    pub fn find_animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }
}

/// Entity kind tag prefixing entries of `Skeleton::update_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    Bone,
    IkConstraint,
    PathConstraint,
    TransformConstraint,
}

impl UpdateKind {
    pub fn tag(self) -> &'static str {
        match self {
            UpdateKind::Bone => "B:",
            UpdateKind::IkConstraint => "I:",
            UpdateKind::PathConstraint => "P:",
            UpdateKind::TransformConstraint => "T:",
        }
    }

    /// Tagged update-order entry for an entity of this kind.
    pub fn entry(self, name: &str) -> String {
        format!("{}{}", self.tag(), name)
    }
}

/// One animation sampled at the fixed step over its full duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub duration: f32,
    /// `expected_frame_count(duration)` frames, in sampling order.
    pub frames: Vec<Frame>,
}

/// Pose state at one sampled instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub time: f32,
    pub bones: Vec<Bone>,
    pub slots: Vec<Slot>,
    /// Active transform-constraint mixes at this instant.
    pub transform_constraints: Vec<TransformConstraint>,
}

/// One bone's transform state: 7 local-space components plus the 6 components
/// of the 2D affine matrix mapping the bone's local frame into world space.
/// Rotation and shear are in radians regardless of source units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,

    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,

    pub a: f32,
    pub b: f32,
    pub world_x: f32,
    pub c: f32,
    pub d: f32,
    pub world_y: f32,
}

impl Bone {
    /// The 13 numeric fields in declaration order (local first, then the
    /// affine world matrix). This is the column order of every report row.
    pub fn fields(&self) -> [f32; 13] {
        [
            self.x,
            self.y,
            self.rotation,
            self.scale_x,
            self.scale_y,
            self.shear_x,
            self.shear_y,
            self.a,
            self.b,
            self.world_x,
            self.c,
            self.d,
            self.world_y,
        ]
    }
}

/// Slot state: the active attachment (empty when none) and optional
/// per-vertex deform values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    pub attachment: String,
    pub attachment_vertices: Vec<f32>,
}

/// Per-frame transform-constraint state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConstraint {
    pub name: String,
    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,
}

/// Transform-constraint definition, as declared in the skeleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConstraintData {
    pub name: String,

    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,

    pub offset_rotation: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_scale_x: f32,
    pub offset_scale_y: f32,
    pub offset_shear_y: f32,
    pub relative: bool,
    pub local: bool,
}
