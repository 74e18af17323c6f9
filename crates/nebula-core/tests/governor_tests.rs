use nebula_core::SectionGate;

#[test]
fn fresh_gate_uses_the_idle_margin() {
    let gate = SectionGate::new();
    assert_eq!(gate.margin_px(), 200);
    assert!(!gate.is_mounted());
    assert_eq!(gate.approach_margin_px(), 600);
}

#[test]
fn retune_reports_only_bucket_changes() {
    let mut gate = SectionGate::new();
    assert_eq!(gate.retune(100.0), None, "same bucket as idle default");
    assert_eq!(gate.retune(800.0), Some(400));
    assert_eq!(gate.retune(900.0), None, "still the medium bucket");
    assert_eq!(gate.retune(2000.0), Some(800));
    assert_eq!(gate.retune(50.0), Some(200));
}

#[test]
fn mount_latch_fires_once_and_sticks() {
    let mut gate = SectionGate::new();
    assert!(!gate.on_intersection(false));
    assert!(gate.on_intersection(true), "first hit mounts");
    assert!(gate.is_mounted());
    assert!(!gate.on_intersection(true), "already mounted");
    // Scrolling back out does not unmount.
    assert!(!gate.on_intersection(false));
    assert!(gate.is_mounted());
}

#[test]
fn below_fold_section_stays_unmounted_until_intersection() {
    // End-to-end shape of the idle case: velocity 0, section far below the
    // fold, repeated non-intersecting reports.
    let mut gate = SectionGate::new();
    for _ in 0..100 {
        gate.retune(0.0);
        assert!(!gate.on_intersection(false));
        assert!(!gate.is_mounted());
    }
    assert!(gate.on_intersection(true));
    assert!(gate.is_mounted());
}

#[test]
fn mounted_gate_stops_retuning() {
    let mut gate = SectionGate::new();
    gate.on_intersection(true);
    assert_eq!(gate.retune(2000.0), None, "observer is gone after mount");
}

#[test]
fn approach_latch_fires_at_most_once() {
    let mut gate = SectionGate::new();
    assert!(!gate.on_approach(false));
    assert!(!gate.prefetch_fired());
    assert!(gate.on_approach(true));
    assert!(gate.prefetch_fired());
    assert!(!gate.on_approach(true));
    assert!(!gate.on_approach(false));
}
