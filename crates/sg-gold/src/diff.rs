//! Snapshot tree alignment and diffing.
//!
//! Aligns two [`Skeleton`] snapshots and produces a parallel diff tree
//! bottom-up (bone -> frame -> animation -> skeleton), accumulating
//! summaries on the way up. Animations are matched by name; frames and bones
//! by declared index (or by name, when configured). A name disagreement at a
//! shared position is a fatal topology mismatch, never repaired.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metric::ScalarMetric;
use crate::snapshot::{Animation, Bone, Frame, Skeleton};
use crate::summary::{BoneDiff, DiffSummary};

/// Placeholder for a position present on only one side of a name-list diff.
pub const MISSING_NAME: &str = "???";

/// Structural disagreement between the two snapshots under comparison.
///
/// Fatal: the inputs do not describe the same topology, so the enclosing
/// comparison is aborted rather than partially repaired. A batch driver can
/// skip the pair and continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("animation name mismatch: '{left}' vs '{right}'")]
    AnimationNameMismatch { left: String, right: String },

    #[error("bone name mismatch at index {index}: '{left}' vs '{right}'")]
    BoneNameMismatch { index: usize, left: String, right: String },
}

/// How bones within a frame are matched up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Pair bones by declared index. Assumes both runtimes emit the
    /// skeleton's declared bone order; a name disagreement at a shared index
    /// fails the comparison.
    #[default]
    Positional,
    /// Pair bones by name lookup; bones without a counterpart on the other
    /// side are counted as missing instead of failing.
    ByName,
}

/// Knobs for one comparison run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiffConfig {
    pub alignment: Alignment,
    /// Metric applied to the rotation field; every other field uses plain
    /// subtraction.
    pub rotation_metric: ScalarMetric,
}

/// Diff of two skeletons. Mirrors the snapshot nesting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkeletonDiff {
    /// Positional reset-bone pairing; empty when both lists agree.
    pub reset_bones: Vec<[String; 2]>,
    /// Positional update-order pairing; empty when both lists agree.
    pub update_order: Vec<[String; 2]>,

    pub setup: FrameDiff,
    /// Aggregated over the diffed animations (missing ones excluded).
    pub summary: DiffSummary,
    pub animations: Vec<AnimationDiff>,
}

impl SkeletonDiff {
    /// Machine-readable form, for drivers that post-process results.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

/// Diff of two same-named animations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationDiff {
    pub name: String,
    /// Excess frames on either side, or the full frame count when the
    /// animation was absent on one side entirely.
    pub missing: usize,
    pub summary: DiffSummary,
    pub frames: Vec<FrameDiff>,
}

/// Diff of two frames sampled at the same instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameDiff {
    pub time: f32,
    /// Bones present on only one side.
    pub missing: usize,
    pub summary: DiffSummary,
    pub bones: Vec<BoneDiff>,
}

/// Diff two full skeleton snapshots, `a` being the gold reference.
pub fn diff_skeletons(a: &Skeleton, b: &Skeleton, config: &DiffConfig) -> Result<SkeletonDiff, DiffError> {
    let mut out = SkeletonDiff {
        reset_bones: diff_strings(&a.reset_bones, &b.reset_bones).unwrap_or_default(),
        update_order: diff_strings(&a.update_order, &b.update_order).unwrap_or_default(),
        setup: diff_frames(&a.setup, &b.setup, config)?,
        ..Default::default()
    };

    for animation in &a.animations {
        let Some(other) = b.find_animation(&animation.name) else {
            // Absent on the candidate side: record with an empty summary so
            // it never skews the aggregate averages.
            out.animations.push(AnimationDiff {
                name: animation.name.clone(),
                missing: animation.frames.len(),
                ..Default::default()
            });
            continue;
        };
        let diff = diff_animations(animation, other, config)?;
        out.summary.include(&diff.summary);
        out.animations.push(diff);
    }

    Ok(out)
}

/// Positional diff of two ordered name lists, padding the shorter side with
/// [`MISSING_NAME`]. `None` when every position matches, so callers can
/// suppress the whole table instead of printing noise.
pub fn diff_strings(a: &[String], b: &[String]) -> Option<Vec<[String; 2]>> {
    let n = a.len().max(b.len());
    let mut pairs = Vec::with_capacity(n);
    let mut differ = false;
    for i in 0..n {
        let left = a.get(i).cloned().unwrap_or_else(|| MISSING_NAME.to_string());
        let right = b.get(i).cloned().unwrap_or_else(|| MISSING_NAME.to_string());
        if left != right {
            differ = true;
        }
        pairs.push([left, right]);
    }
    differ.then_some(pairs)
}

/// Diff two same-named animations over their shared frame prefix.
pub fn diff_animations(a: &Animation, b: &Animation, config: &DiffConfig) -> Result<AnimationDiff, DiffError> {
    if a.name != b.name {
        return Err(DiffError::AnimationNameMismatch {
            left: a.name.clone(),
            right: b.name.clone(),
        });
    }

    let n = a.frames.len().min(b.frames.len());
    let mut out = AnimationDiff {
        name: a.name.clone(),
        missing: (a.frames.len() - n) + (b.frames.len() - n),
        ..Default::default()
    };
    for (fa, fb) in a.frames.iter().zip(&b.frames) {
        let diff = diff_frames(fa, fb, config)?;
        out.summary.include(&diff.summary);
        out.frames.push(diff);
    }
    Ok(out)
}

/// Diff two frames bone by bone, folding each bone diff into the frame
/// summary as a leaf observation.
pub fn diff_frames(a: &Frame, b: &Frame, config: &DiffConfig) -> Result<FrameDiff, DiffError> {
    let mut out = FrameDiff { time: a.time, ..Default::default() };

    match config.alignment {
        Alignment::Positional => {
            let n = a.bones.len().min(b.bones.len());
            out.missing = (a.bones.len() - n) + (b.bones.len() - n);
            for (i, (ba, bb)) in a.bones.iter().zip(&b.bones).enumerate() {
                let diff = diff_bones(ba, bb, i, config)?;
                out.summary.add(&diff);
                out.bones.push(diff);
            }
        }
        Alignment::ByName => {
            let mut matched = 0;
            for (i, ba) in a.bones.iter().enumerate() {
                let Some(bb) = b.bones.iter().find(|bb| bb.name == ba.name) else {
                    continue;
                };
                matched += 1;
                let diff = diff_bones(ba, bb, i, config)?;
                out.summary.add(&diff);
                out.bones.push(diff);
            }
            out.missing = (a.bones.len() - matched) + (b.bones.len() - matched);
        }
    }

    Ok(out)
}

/// Elementwise signed difference of two bones aligned at `index`.
pub fn diff_bones(a: &Bone, b: &Bone, index: usize, config: &DiffConfig) -> Result<BoneDiff, DiffError> {
    if a.name != b.name {
        return Err(DiffError::BoneNameMismatch {
            index,
            left: a.name.clone(),
            right: b.name.clone(),
        });
    }

    Ok(BoneDiff {
        name: a.name.clone(),
        x: a.x - b.x,
        y: a.y - b.y,
        rotation: config.rotation_metric.eval(a.rotation, b.rotation),
        scale_x: a.scale_x - b.scale_x,
        scale_y: a.scale_y - b.scale_y,
        shear_x: a.shear_x - b.shear_x,
        shear_y: a.shear_y - b.shear_y,
        a: a.a - b.a,
        b: a.b - b.b,
        world_x: a.world_x - b.world_x,
        c: a.c - b.c,
        d: a.d - b.d,
        world_y: a.world_y - b.world_y,
    })
}
