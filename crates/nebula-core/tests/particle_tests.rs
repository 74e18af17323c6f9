use nebula_core::{EffectBudget, ParticleField, ParticleInstance, ParticleParams, PerfClass};

fn field(class: PerfClass) -> ParticleField {
    ParticleField::new(
        ParticleParams::default(),
        EffectBudget::for_class(class),
        42,
    )
}

#[test]
fn count_is_clamped_by_tier_at_mount() {
    assert_eq!(field(PerfClass::Low).len(), 150);
    assert_eq!(field(PerfClass::Medium).len(), 250);
    assert_eq!(field(PerfClass::High).len(), 500);
}

#[test]
fn all_particles_start_inside_the_volume() {
    let field = field(PerfClass::High);
    let half = field.params().spread / 2.0;
    for pos in field.positions() {
        assert!(pos.x.abs() <= half && pos.y.abs() <= half && pos.z.abs() <= half);
    }
}

#[test]
fn wrap_invariant_holds_over_many_frames() {
    for class in [PerfClass::Low, PerfClass::Medium, PerfClass::High] {
        let mut field = field(class);
        let half = field.params().spread / 2.0;
        // Simulate ~30s at 60fps; sway phases and drift cross every face.
        for frame in 0..1800 {
            let time = frame as f32 / 60.0;
            field.step(time);
            for pos in field.positions() {
                assert!(
                    pos.x >= -half && pos.x <= half,
                    "x out of bounds at frame {frame}: {}",
                    pos.x
                );
                assert!(pos.y >= -half && pos.y <= half);
                assert!(pos.z >= -half && pos.z <= half);
            }
        }
    }
}

#[test]
fn particles_actually_move() {
    let mut field = field(PerfClass::High);
    let before = field.positions().to_vec();
    for frame in 1..=120 {
        field.step(frame as f32 / 60.0);
    }
    let moved = field
        .positions()
        .iter()
        .zip(before.iter())
        .filter(|(a, b)| (**a - **b).length() > 1e-5)
        .count();
    assert!(moved > field.len() / 2, "only {moved} particles moved");
}

#[test]
fn group_rotation_tracks_elapsed_time() {
    let mut field = field(PerfClass::Medium);
    field.step(10.0);
    let (yaw, pitch) = field.rotation();
    assert!((yaw - 0.2).abs() < 1e-6);
    assert!(pitch.abs() <= 0.1);
}

#[test]
fn instances_pack_position_and_opacity() {
    let mut field = field(PerfClass::Low);
    field.step(1.0);
    let mut out: Vec<ParticleInstance> = Vec::new();
    field.write_instances(&mut out);
    assert_eq!(out.len(), field.len());
    for (instance, pos) in out.iter().zip(field.positions()) {
        assert_eq!(instance.pos, pos.to_array());
        assert!(instance.opacity >= 0.2 && instance.opacity <= 0.7);
    }
}
