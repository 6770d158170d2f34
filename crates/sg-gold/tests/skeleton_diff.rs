//! End-to-end diff engine scenarios over hand-built snapshot trees.

use sg_gold::diff::{Alignment, DiffConfig, DiffError, diff_animations, diff_frames, diff_skeletons};
use sg_gold::snapshot::{Animation, Bone, Frame, Skeleton, UpdateKind, expected_frame_count};
use sg_gold::summary::BoneDiff;

fn bone(name: &str, rotation: f32) -> Bone {
    Bone {
        name: name.into(),
        rotation,
        scale_x: 1.0,
        scale_y: 1.0,
        a: 1.0,
        d: 1.0,
        ..Default::default()
    }
}

fn frame(time: f32, bones: Vec<Bone>) -> Frame {
    Frame { time, bones, ..Default::default() }
}

/// One-bone skeleton with a "walk" animation of the given duration, the bone
/// rotated by `rotation` at every sampled frame.
fn walk_skeleton(duration: f32, rotation: f32) -> Skeleton {
    let count = expected_frame_count(duration);
    let frames = (0..count)
        .map(|i| frame(i as f32 * 0.1, vec![bone("root", rotation)]))
        .collect();
    Skeleton {
        setup: frame(0.0, vec![bone("root", 0.0)]),
        animations: vec![Animation { name: "walk".into(), duration, frames }],
        reset_bones: vec!["root".into()],
        update_order: vec![UpdateKind::Bone.entry("root")],
        has_local: true,
        has_affine_world: true,
        ..Default::default()
    }
}

#[test]
fn identical_skeletons_diff_to_zero() {
    let a = walk_skeleton(0.2, 0.5);
    let diff = diff_skeletons(&a, &a.clone(), &DiffConfig::default()).unwrap();

    assert!(diff.reset_bones.is_empty());
    assert!(diff.update_order.is_empty());
    assert_eq!(diff.setup.missing, 0);
    assert_eq!(diff.setup.bones, vec![BoneDiff { name: "root".into(), ..Default::default() }]);

    let walk = &diff.animations[0];
    assert_eq!(walk.missing, 0);
    assert_eq!(walk.frames.len(), 3);
    assert_eq!(walk.summary.count, 3);
    assert_eq!(walk.summary.max.rotation, 0.0);
}

#[test]
fn constant_rotation_offset_shows_in_every_statistic() {
    // Candidate reports rotation greater by exactly 0.01 radians at every
    // frame; subtraction order is gold - candidate, so the diff is -0.01.
    let gold = walk_skeleton(0.2, 0.5);
    let candidate = walk_skeleton(0.2, 0.51);
    let diff = diff_skeletons(&gold, &candidate, &DiffConfig::default()).unwrap();

    let walk = &diff.animations[0];
    assert_eq!(walk.frames.len(), 3);
    assert_eq!(walk.summary.count, 3);
    assert!((walk.summary.min.rotation + 0.01).abs() < 1e-6);
    assert!((walk.summary.max.rotation + 0.01).abs() < 1e-6);
    assert!((walk.summary.mean().rotation + 0.01).abs() < 1e-6);
    // Every other field agrees.
    assert_eq!(walk.summary.max.x, 0.0);
    assert_eq!(walk.summary.max.scale_x, 0.0);
    assert_eq!(walk.summary.max.a, 0.0);

    // The skeleton total is the unweighted mean over its one animation.
    assert_eq!(diff.summary.count, 1);
    assert!((diff.summary.mean().rotation + 0.01).abs() < 1e-6);
}

#[test]
fn excess_frames_are_recorded_not_diffed() {
    let long = walk_skeleton(0.4, 0.5); // 5 frames
    let short = walk_skeleton(0.2, 0.5); // 3 frames
    let diff = diff_animations(&long.animations[0], &short.animations[0], &DiffConfig::default())
        .unwrap();

    assert_eq!(diff.frames.len(), 3);
    assert_eq!(diff.missing, 2);
    assert_eq!(diff.summary.count, 3);
}

#[test]
fn absent_animation_is_recorded_with_empty_summary() {
    let mut gold = walk_skeleton(0.2, 0.5);
    gold.animations.push(Animation {
        name: "run".into(),
        duration: 0.1,
        frames: vec![
            frame(0.0, vec![bone("root", 0.0)]),
            frame(0.1, vec![bone("root", 0.0)]),
        ],
    });
    let candidate = walk_skeleton(0.2, 0.5);

    let diff = diff_skeletons(&gold, &candidate, &DiffConfig::default()).unwrap();
    assert_eq!(diff.animations.len(), 2);

    let run = &diff.animations[1];
    assert_eq!(run.name, "run");
    assert_eq!(run.missing, 2);
    assert_eq!(run.summary.count, 0);
    assert!(run.frames.is_empty());

    // Only the diffed animation contributes to the skeleton summary.
    assert_eq!(diff.summary.count, 1);
}

#[test]
fn renamed_bone_aborts_the_comparison() {
    let gold = walk_skeleton(0.2, 0.5);
    let mut candidate = walk_skeleton(0.2, 0.5);
    for f in &mut candidate.animations[0].frames {
        f.bones[0].name = "hip".into();
    }

    let err = diff_skeletons(&gold, &candidate, &DiffConfig::default()).unwrap_err();
    assert_eq!(
        err,
        DiffError::BoneNameMismatch { index: 0, left: "root".into(), right: "hip".into() }
    );
}

#[test]
fn excess_bones_are_recorded_per_frame() {
    let a = frame(0.0, vec![bone("root", 0.0), bone("hip", 0.0), bone("leg", 0.0)]);
    let b = frame(0.0, vec![bone("root", 0.0), bone("hip", 0.0)]);
    let diff = diff_frames(&a, &b, &DiffConfig::default()).unwrap();
    assert_eq!(diff.bones.len(), 2);
    assert_eq!(diff.missing, 1);
}

#[test]
fn by_name_alignment_tolerates_reordered_bones() {
    let a = frame(0.0, vec![bone("root", 0.3), bone("hip", 0.7)]);
    let b = frame(0.0, vec![bone("hip", 0.7), bone("root", 0.1)]);
    let config = DiffConfig { alignment: Alignment::ByName, ..Default::default() };

    let diff = diff_frames(&a, &b, &config).unwrap();
    assert_eq!(diff.missing, 0);
    assert_eq!(diff.bones.len(), 2);
    let root = diff.bones.iter().find(|d| d.name == "root").unwrap();
    assert!((root.rotation - 0.2).abs() < 1e-6);
}

#[test]
fn by_name_alignment_counts_unmatched_bones_as_missing() {
    let a = frame(0.0, vec![bone("root", 0.0), bone("hip", 0.0), bone("leg", 0.0)]);
    let b = frame(0.0, vec![bone("root", 0.0), bone("leg", 0.0)]);
    let config = DiffConfig { alignment: Alignment::ByName, ..Default::default() };

    let diff = diff_frames(&a, &b, &config).unwrap();
    assert_eq!(diff.bones.len(), 2);
    assert_eq!(diff.missing, 1);
}

#[test]
fn diverging_update_order_is_reported_in_full() {
    let gold = walk_skeleton(0.2, 0.5);
    let mut candidate = walk_skeleton(0.2, 0.5);
    candidate.update_order = vec![
        UpdateKind::Bone.entry("root"),
        UpdateKind::TransformConstraint.entry("grip"),
    ];

    let diff = diff_skeletons(&gold, &candidate, &DiffConfig::default()).unwrap();
    assert!(diff.reset_bones.is_empty());
    assert_eq!(diff.update_order.len(), 2);
    assert_eq!(diff.update_order[0], ["B:root".to_string(), "B:root".to_string()]);
    assert_eq!(diff.update_order[1], ["???".to_string(), "T:grip".to_string()]);
}
