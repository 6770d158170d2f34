//! Tab-separated rendering of a [`SkeletonDiff`].
//!
//! Pure projection: filters and verbosity toggles select slices of an
//! already computed diff tree; nothing here re-runs the engine. Pipe the
//! output through a tab-stop-aware pager or `column -t` for aligned columns.

use std::fmt::Write;

use sg_gold::diff::{FrameDiff, SkeletonDiff};
use sg_gold::metric::near_zero;
use sg_gold::snapshot::{Bone, Frame, Skeleton};
use sg_gold::summary::{BoneDiff, DiffSummary};

/// Column header: two columns (min, max) per transform field, local fields
/// first, then the affine world matrix.
pub const HEADER: &str =
    "Animation\tTime\tTX\t\tTY\t\tRo\t\tSX\t\tSY\t\tHX\t\tHY\t\tA\t\tB\t\tX\t\tC\t\tD\t\tY\t";

/// Verbosity toggles and selection filters, set from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Emit one sub-row per frame.
    pub frames: bool,
    /// Emit one sub-row per bone within each emitted frame.
    pub bones: bool,
    /// Next to each bone row, show the raw values from both sides.
    pub both: bool,
    /// Dump the active transform-constraint mixes of emitted frames.
    pub constraints: bool,
    /// Restrict to one animation; `"setup"` selects the bind pose.
    pub animation: Option<String>,
    /// Restrict to one frame index.
    pub frame: Option<usize>,
    /// Restrict to one bone name.
    pub bone: Option<String>,
}

impl ReportOptions {
    fn selects_animation(&self, name: &str) -> bool {
        self.animation.as_deref().is_none_or(|sel| sel == name)
    }

    fn selects_bone(&self, name: &str) -> bool {
        self.bone.as_deref().is_none_or(|sel| sel == name)
    }
}

/// `"."` for values inside the near-zero tolerance, two decimals otherwise.
/// The marker keeps floating-point noise out of the table.
pub fn marker(v: f32) -> String {
    if near_zero(v) { ".".to_string() } else { format!("{v:.2}") }
}

/// Min/max column pairs for all 13 fields of a summary.
pub fn summary_row(s: &DiffSummary) -> String {
    let min = s.min.fields();
    let max = s.max.fields();
    let mut r = String::new();
    for i in 0..13 {
        if i > 0 {
            r.push('\t');
        }
        let _ = write!(r, "{}\t{}", marker(min[i]), marker(max[i]));
    }
    r
}

/// Single-value columns for one bone diff, padded to the paired layout.
pub fn diff_row(d: &BoneDiff) -> String {
    let fields = d.fields();
    let mut r = String::new();
    for (i, v) in fields.iter().enumerate() {
        let _ = write!(r, "{}\t", marker(*v));
        if i < fields.len() - 1 {
            r.push('\t');
        }
    }
    r
}

/// Raw values from both sides, field by field; both columns stay blank where
/// the two sides agree within tolerance.
pub fn compare_row(a: &Bone, b: &Bone) -> String {
    let fa = a.fields();
    let fb = b.fields();
    let mut r = String::new();
    for i in 0..13 {
        if i > 0 {
            r.push('\t');
        }
        if near_zero(fa[i] - fb[i]) {
            r.push('\t');
        } else {
            let _ = write!(r, "{:.2}\t{:.2}", fa[i], fb[i]);
        }
    }
    r
}

/// Indexed name-pair table for reset-bone / update-order divergences; empty
/// string when there is nothing to show.
pub fn name_pairs_table(title: &str, left: &str, right: &str, pairs: &[[String; 2]]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let mut r = format!("{title}:\t{left}\t{right}\n");
    for (i, pair) in pairs.iter().enumerate() {
        let _ = writeln!(r, "{i}\t{}\t{}", pair[0], pair[1]);
    }
    r
}

/// Render the full report for one skeleton pair.
///
/// `a` and `b` are the raw input snapshots; they are only consulted for the
/// side-by-side rows and the constraint dump.
pub fn render(diff: &SkeletonDiff, a: &Skeleton, b: &Skeleton, options: &ReportOptions) -> String {
    let mut out = String::new();
    out.push_str(&name_pairs_table("reset", "A", "B", &diff.reset_bones));
    out.push_str(&name_pairs_table("order", "A", "B", &diff.update_order));

    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out, "Setup\t-\t{}", summary_row(&diff.setup.summary));
    if options.frames && options.selects_animation("setup") {
        render_frame(&mut out, &diff.setup, Some((&a.setup, &b.setup)), options);
    }

    let _ = writeln!(out, "Total\t-\t{}", summary_row(&diff.summary));
    for animation in &diff.animations {
        if !options.selects_animation(&animation.name) {
            continue;
        }
        let _ = writeln!(out, "{}\t-\t{}", animation.name, summary_row(&animation.summary));
        if !options.frames {
            continue;
        }
        let raw_a = a.find_animation(&animation.name);
        let raw_b = b.find_animation(&animation.name);
        for (i, frame) in animation.frames.iter().enumerate() {
            if options.frame.is_some_and(|sel| sel != i) {
                continue;
            }
            let raw = match (raw_a, raw_b) {
                (Some(ra), Some(rb)) => ra.frames.get(i).zip(rb.frames.get(i)),
                _ => None,
            };
            render_frame(&mut out, frame, raw, options);
        }
    }
    out
}

fn render_frame(out: &mut String, frame: &FrameDiff, raw: Option<(&Frame, &Frame)>, options: &ReportOptions) {
    let _ = writeln!(out, "  |\t{:.1}\t{}", frame.time, summary_row(&frame.summary));

    if options.bones && options.constraints {
        if let Some((fa, fb)) = raw {
            let _ = writeln!(out, "{:?}", fa.transform_constraints);
            let _ = writeln!(out, "{:?}", fb.transform_constraints);
        }
    }

    if !options.bones {
        return;
    }
    for bone in &frame.bones {
        if !options.selects_bone(&bone.name) {
            continue;
        }
        let _ = writeln!(out, "\t{}\t{}", bone.name, diff_row(bone));
        if options.both {
            if let Some((fa, fb)) = raw {
                // Look the raw bones up by name so by-name alignment stays
                // consistent with the diff rows.
                let ba = fa.bones.iter().find(|x| x.name == bone.name);
                let bb = fb.bones.iter().find(|x| x.name == bone.name);
                if let (Some(ba), Some(bb)) = (ba, bb) {
                    let _ = writeln!(out, "\t\t{}", compare_row(ba, bb));
                }
            }
        }
    }
}
