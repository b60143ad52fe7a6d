#![forbid(unsafe_code)]

//! Property tests for Radial Spread through an editor session.
//!
//! Validates:
//! - Every placed copy sits exactly `radial_distance` from the center.
//! - Undo removes exactly the copies a spread placed.
//! - The object count always equals the copies of spreads still applied.

use proptest::prelude::*;

use rewind_core::{Command, RecorderConfig};
use rewind_demo::scene::lock;
use rewind_demo::{EditorSession, RadialSpread, Scene, Vec3};

fn shared_scene() -> rewind_demo::SharedScene {
    let mut scene = Scene::new();
    scene.add_prefab("Cube");
    scene.shared()
}

// ============================================================================
// Invariant 1: Copies lie on the circle
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn copies_lie_on_circle(
        copies in 1i32..64,
        distance in 0.0f32..100.0,
        cx in -50.0f32..50.0,
        cz in -50.0f32..50.0,
    ) {
        let scene = shared_scene();
        let center = Vec3::new(cx, 0.5, cz);
        let mut cmd = RadialSpread::new(scene.clone())
            .with_prefab("Cube")
            .with_copies(copies)
            .with_radial_distance(distance)
            .with_center(center);
        cmd.apply().unwrap();

        let scene = lock(&scene);
        prop_assert_eq!(scene.len(), copies as usize);
        let tolerance = 1e-3 * (1.0 + distance + cx.abs() + cz.abs());
        for obj in scene.instances() {
            prop_assert!((obj.position.distance(center) - distance).abs() < tolerance);
        }
    }
}

// ============================================================================
// Invariant 2: Undo removes exactly what the spread placed
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn revert_removes_only_own_copies(
        first in 1i32..20,
        second in 1i32..20,
    ) {
        let scene = shared_scene();
        let mut a = RadialSpread::new(scene.clone()).with_prefab("Cube").with_copies(first);
        let mut b = RadialSpread::new(scene.clone()).with_prefab("Cube").with_copies(second);
        a.apply().unwrap();
        b.apply().unwrap();

        a.revert().unwrap();
        let scene = lock(&scene);
        prop_assert_eq!(scene.len(), second as usize);
        for id in b.placed() {
            prop_assert!(scene.get(*id).is_some());
        }
    }
}

// ============================================================================
// Invariant 3: Object count tracks applied spreads
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Spread(i32),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1i32..6).prop_map(Op::Spread),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn object_count_tracks_applied_spreads(
        capacity in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut session =
            EditorSession::with_config(shared_scene(), RecorderConfig::new(capacity)).unwrap();
        session.select_prefab("Cube");

        // Copies per spread, split into applied (incl. evicted) and undone.
        let mut applied: Vec<usize> = Vec::new();
        let mut undone: Vec<usize> = Vec::new();

        for op in &ops {
            match op {
                Op::Spread(n) => {
                    session.form_mut().copies = *n;
                    prop_assert!(session.spread().is_success());
                    applied.push(*n as usize);
                    undone.clear();
                }
                Op::Undo => {
                    if session.undo().is_success() {
                        let n = applied.pop().unwrap();
                        undone.push(n);
                    }
                }
                Op::Redo => {
                    if session.redo().is_success() {
                        let n = undone.pop().unwrap();
                        applied.push(n);
                    }
                }
            }
            prop_assert_eq!(session.object_count(), applied.iter().sum::<usize>());
        }
    }
}
