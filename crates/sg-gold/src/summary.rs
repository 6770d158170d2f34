//! Running min/avg/max aggregation over bone diffs.
//!
//! Two distinct folds exist on [`DiffSummary`]: [`DiffSummary::add`] folds a
//! leaf observation, [`DiffSummary::include`] folds a nested child summary
//! one level up the tree. Their semantics differ (mean of leaves vs
//! unweighted mean of per-child means) and they must stay separate.

use serde::{Deserialize, Serialize};

/// Elementwise signed discrepancy between two sampled bones.
///
/// Same 13 numeric fields as [`crate::snapshot::Bone`]; each holds
/// `a_field - b_field` for the compared pair (no absolute value, the sign
/// shows the direction of disagreement). `name` is carried over for
/// diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneDiff {
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

impl BoneDiff {
    /// Combine `other` into `self`, applying `op` independently per field.
    /// No cross-field coupling.
    pub fn apply(&mut self, other: &BoneDiff, op: impl Fn(f32, f32) -> f32) {
        self.x = op(self.x, other.x);
        self.y = op(self.y, other.y);
        self.rotation = op(self.rotation, other.rotation);
        self.scale_x = op(self.scale_x, other.scale_x);
        self.scale_y = op(self.scale_y, other.scale_y);
        self.shear_x = op(self.shear_x, other.shear_x);
        self.shear_y = op(self.shear_y, other.shear_y);
        self.a = op(self.a, other.a);
        self.b = op(self.b, other.b);
        self.world_x = op(self.world_x, other.world_x);
        self.c = op(self.c, other.c);
        self.d = op(self.d, other.d);
        self.world_y = op(self.world_y, other.world_y);
    }

    /// Apply `op` to each field in place.
    pub fn map(&mut self, op: impl Fn(f32) -> f32) {
        self.x = op(self.x);
        self.y = op(self.y);
        self.rotation = op(self.rotation);
        self.scale_x = op(self.scale_x);
        self.scale_y = op(self.scale_y);
        self.shear_x = op(self.shear_x);
        self.shear_y = op(self.shear_y);
        self.a = op(self.a);
        self.b = op(self.b);
        self.world_x = op(self.world_x);
        self.c = op(self.c);
        self.d = op(self.d);
        self.world_y = op(self.world_y);
    }

    /// The 13 numeric fields in report column order.
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

/// Running elementwise statistics over folded observations.
///
/// `avg` stays a running sum until [`DiffSummary::mean`] divides it by
/// `count`; rendering is the only place that conversion happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub min: BoneDiff,
    /// Running elementwise sum of folded values, not yet divided by `count`.
    pub avg: BoneDiff,
    pub max: BoneDiff,
    pub count: usize,
}

impl DiffSummary {
    /// Fold a single leaf observation.
    pub fn add(&mut self, d: &BoneDiff) {
        self.count += 1;
        if self.count == 1 {
            self.min = d.clone();
            self.avg = d.clone();
            self.max = d.clone();
            return;
        }
        self.min.apply(d, f32::min);
        self.avg.apply(d, |a, b| a + b);
        self.max.apply(d, f32::max);
    }

    /// Fold a child summary one level up the tree.
    ///
    /// Counts one unit per child regardless of the child's own population, so
    /// the aggregated average is an unweighted mean of per-child means: an
    /// animation with three frames weighs the same as one with a hundred.
    /// That weighting is deliberate; see DESIGN.md.
    pub fn include(&mut self, child: &DiffSummary) {
        self.count += 1;
        let mean = child.mean();
        if self.count == 1 {
            self.min = child.min.clone();
            self.avg = mean;
            self.max = child.max.clone();
            return;
        }
        self.min.apply(&child.min, f32::min);
        self.avg.apply(&mean, |a, b| a + b);
        self.max.apply(&child.max, f32::max);
    }

    /// Convert the running sum into a true elementwise mean. All zero when
    /// nothing has been folded.
    pub fn mean(&self) -> BoneDiff {
        let mut m = self.avg.clone();
        if self.count > 0 {
            let n = self.count as f32;
            m.map(|v| v / n);
        }
        m
    }
}
