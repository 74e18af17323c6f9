use nebula_core::{FrameScheduler, FrameTick};
use std::cell::RefCell;
use std::rc::Rc;

const TICK: FrameTick = FrameTick {
    time: 1.0,
    dt: 1.0 / 60.0,
};

#[test]
fn registered_callbacks_run_in_registration_order() {
    let mut scheduler = FrameScheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for tag in ["particles", "stars", "aurora"] {
        let order = order.clone();
        scheduler.register(move |_| order.borrow_mut().push(tag));
    }
    scheduler.run_frame(&TICK);
    assert_eq!(*order.borrow(), vec!["particles", "stars", "aurora"]);
}

#[test]
fn deregistered_callback_is_never_invoked_again() {
    let mut scheduler = FrameScheduler::new();
    let calls = Rc::new(RefCell::new(0u32));

    let calls_cb = calls.clone();
    let id = scheduler.register(move |_| *calls_cb.borrow_mut() += 1);
    scheduler.run_frame(&TICK);
    assert_eq!(*calls.borrow(), 1);

    assert!(scheduler.deregister(id));
    for _ in 0..10 {
        scheduler.run_frame(&TICK);
    }
    assert_eq!(*calls.borrow(), 1);
    assert!(scheduler.is_empty());
}

#[test]
fn deregister_is_idempotent() {
    let mut scheduler = FrameScheduler::new();
    let id = scheduler.register(|_| {});
    assert!(scheduler.deregister(id));
    assert!(!scheduler.deregister(id));
}

#[test]
fn deregistering_one_effect_leaves_the_others() {
    let mut scheduler = FrameScheduler::new();
    let counts = Rc::new(RefCell::new([0u32; 3]));

    let ids: Vec<_> = (0..3)
        .map(|i| {
            let counts = counts.clone();
            scheduler.register(move |_| counts.borrow_mut()[i] += 1)
        })
        .collect();

    scheduler.run_frame(&TICK);
    scheduler.deregister(ids[1]);
    scheduler.run_frame(&TICK);

    assert_eq!(*counts.borrow(), [2, 1, 2]);
    assert_eq!(scheduler.len(), 2);
}

#[test]
fn callbacks_see_the_tick_they_are_given() {
    let mut scheduler = FrameScheduler::new();
    let seen = Rc::new(RefCell::new((0.0f32, 0.0f32)));
    let seen_cb = seen.clone();
    scheduler.register(move |tick| *seen_cb.borrow_mut() = (tick.time, tick.dt));

    scheduler.run_frame(&FrameTick {
        time: 2.5,
        dt: 0.016,
    });
    assert_eq!(*seen.borrow(), (2.5, 0.016));
}

#[test]
fn clear_drops_everything() {
    let mut scheduler = FrameScheduler::new();
    for _ in 0..4 {
        scheduler.register(|_| {});
    }
    assert_eq!(scheduler.len(), 4);
    scheduler.clear();
    assert!(scheduler.is_empty());
    scheduler.run_frame(&TICK);
}
