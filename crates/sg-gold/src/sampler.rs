//! Contract for the runtime adapters that populate snapshots.
//!
//! The comparator never talks to an animation runtime directly; each runtime
//! sits behind a [`SkeletonSampler`] that fully validates its source and
//! produces a canonical [`Skeleton`]. The diff engine therefore never sees
//! malformed input.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::Skeleton;

/// Failure while a sampling adapter builds a snapshot.
///
/// Recoverable per skeleton: a batch driver logs the failure and moves on to
/// the next pair.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed skeleton source '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("sampling backend does not support {feature}")]
    Unsupported { feature: String },
}

/// A runtime adapter that samples one skeleton into the canonical schema.
///
/// Implementations must honor the sampling contract:
///
/// - reset to the bind pose, apply `root_scale` to the root translate,
///   recompute world transforms, and record the result as `setup`;
/// - enumerate the reset-bone names and the runtime's internal update order,
///   tagging each entry with its [`crate::snapshot::UpdateKind`];
/// - record the transform-constraint definitions;
/// - for every declared animation, reset to the bind pose, then apply the
///   animation at `t = 0, STEP_SIZE, ...` up to and including its duration,
///   recomputing world transforms after each apply and appending a frame;
/// - convert any angular inputs the runtime reports in degrees to radians,
///   and keep the flipped-Y convention consistent with the other adapter.
pub trait SkeletonSampler {
    /// Short identifier for diagnostics (e.g. "spine-c", "spine-rs").
    fn label(&self) -> &str;

    /// Build the full snapshot tree for this adapter's skeleton.
    fn sample(&mut self, root_scale: f32) -> Result<Skeleton, SampleError>;
}

/// Adapter over a snapshot a live sampler previously captured to JSON.
///
/// This is how independently built runtimes hand their trees to the
/// comparator without either runtime being linked in.
pub struct JsonSnapshotSampler {
    path: PathBuf,
    label: String,
}

impl JsonSnapshotSampler {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self { path: path.into(), label: label.into() }
    }
}

impl SkeletonSampler for JsonSnapshotSampler {
    fn label(&self) -> &str {
        &self.label
    }

    fn sample(&mut self, root_scale: f32) -> Result<Skeleton, SampleError> {
        // The capture was made at a fixed scale; it cannot be redone here.
        if root_scale != 1.0 {
            return Err(SampleError::Unsupported {
                feature: "rescaling a pre-captured snapshot".into(),
            });
        }
        let path = self.path.display().to_string();
        let text = fs::read_to_string(&self.path)
            .map_err(|source| SampleError::Io { path: path.clone(), source })?;
        serde_json::from_str(&text)
            .map_err(|e| SampleError::Malformed { path, reason: e.to_string() })
    }
}
