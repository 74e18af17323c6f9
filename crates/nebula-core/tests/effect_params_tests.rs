use nebula_core::{generate_flares, generate_ribbons, EffectBudget, PerfClass, DEFAULT_FLARE_LIGHTS};

#[test]
fn ribbon_counts_follow_the_tier_budget() {
    for (class, count) in [
        (PerfClass::Low, 2),
        (PerfClass::Medium, 3),
        (PerfClass::High, 5),
    ] {
        let ribbons = generate_ribbons(EffectBudget::for_class(class), 9);
        assert_eq!(ribbons.len(), count);
    }
}

#[test]
fn ribbons_stack_upward_and_fade_with_depth() {
    let ribbons = generate_ribbons(EffectBudget::for_class(PerfClass::High), 9);
    for pair in ribbons.windows(2) {
        assert!(pair[1].height > pair[0].height);
        assert!(pair[1].opacity < pair[0].opacity);
    }
    for (i, ribbon) in ribbons.iter().enumerate() {
        assert!(ribbon.opacity > 0.0);
        assert!(ribbon.speed >= 0.3 && ribbon.speed <= 0.5);
        assert!(ribbon.amplitude >= 1.5 && ribbon.amplitude <= 2.0);
        // Alternating color pairs.
        if i % 2 == 0 {
            assert_eq!(ribbon.color_a, nebula_core::COLOR_CYAN);
        } else {
            assert_eq!(ribbon.color_a, nebula_core::COLOR_VIOLET);
        }
    }
}

#[test]
fn flare_elements_scale_with_tier_and_light_count() {
    let lights = DEFAULT_FLARE_LIGHTS.len();
    for (class, per_light) in [
        (PerfClass::Low, 3),
        (PerfClass::Medium, 4),
        (PerfClass::High, 6),
    ] {
        let flares = generate_flares(EffectBudget::for_class(class), lights, 4);
        assert_eq!(flares.len(), lights * per_light);
        for flare in &flares {
            assert!(flare.light_index < lights);
            assert!(flare.axis_offset >= 0.2 && flare.axis_offset <= 1.0);
            assert!(flare.scale >= 0.1 && flare.scale <= 0.4);
            assert!(flare.opacity >= 0.0 && flare.opacity <= 0.15);
        }
    }
}
