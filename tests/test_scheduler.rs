use pollo_loco::scheduler::Scheduler;

fn drain(s: &mut Scheduler<&'static str>, now: u64) -> Vec<(u64, &'static str)> {
    let mut fired = Vec::new();
    while let Some((_, due, task)) = s.pop_due(now) {
        fired.push((due, task));
    }
    fired
}

#[test]
fn repeating_tasks_fire_in_due_order() {
    let mut s = Scheduler::new();
    s.every(0, 40, "gravity");
    s.every(0, 100, "interaction");
    s.every(0, 16, "movement");

    let fired = drain(&mut s, 100);

    assert_eq!(
        fired,
        vec![
            (16, "movement"),
            (32, "movement"),
            (40, "gravity"),
            (48, "movement"),
            (64, "movement"),
            (80, "gravity"),
            (80, "movement"),
            (96, "movement"),
            (100, "interaction"),
        ]
    );
}

#[test]
fn ties_go_to_the_earlier_registration() {
    let mut s = Scheduler::new();
    s.every(0, 50, "first");
    s.every(0, 50, "second");

    assert_eq!(drain(&mut s, 50), vec![(50, "first"), (50, "second")]);
}

#[test]
fn nothing_fires_before_it_is_due() {
    let mut s = Scheduler::new();
    s.every(1000, 100, "late");

    assert!(s.pop_due(1099).is_none());
    assert_eq!(drain(&mut s, 1100), vec![(1100, "late")]);
}

#[test]
fn cancelled_tasks_never_fire_again() {
    let mut s = Scheduler::new();
    let keep = s.every(0, 10, "keep");
    let stop = s.every(0, 10, "stop");

    drain(&mut s, 10);
    assert!(s.cancel(stop));
    assert!(!s.cancel(stop));
    assert!(!s.is_active(stop));
    assert!(s.is_active(keep));

    assert_eq!(drain(&mut s, 30), vec![(20, "keep"), (30, "keep")]);
}

#[test]
fn cancel_all_reports_how_many_were_live() {
    let mut s = Scheduler::new();
    let handles: Vec<_> = (0..4).map(|i| s.every(0, 10 + i, "t")).collect();
    s.cancel(handles[1]);

    assert_eq!(s.cancel_all(handles), 3);
    assert!(s.is_empty());
}

#[test]
fn one_shots_fire_once() {
    let mut s = Scheduler::new();
    s.after(0, 1000, "later");

    assert_eq!(s.len(), 1);
    assert_eq!(drain(&mut s, 5000), vec![(1000, "later")]);
    assert!(s.is_empty());
}

#[test]
fn zero_interval_is_bumped_to_one() {
    let mut s = Scheduler::new();
    s.every(0, 0, "busy");

    assert_eq!(drain(&mut s, 3).len(), 3);
}
