use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    curtain::{hooks::FnHooks, stagger::StaggerPolicy},
    surface::svg::SvgSurface,
};

const DT: f64 = 1.0 / 60.0;

fn scenario_config() -> CurtainConfig {
    CurtainConfig {
        points: 5,
        per_path_delay: 0.08,
        stagger: StaggerPolicy::Table {
            delays: vec![0.0, 0.12, 0.05, 0.18, 0.02],
        },
        ..CurtainConfig::overlay()
    }
}

fn surface() -> SvgSurface {
    SvgSurface::new(CurtainConfig::overlay().fills)
}

type Log = Rc<RefCell<Vec<&'static str>>>;

fn logging_hooks(log: &Log) -> FnHooks {
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    FnHooks::new()
        .on_revealed(move || a.borrow_mut().push("revealed"))
        .on_unmount(move || b.borrow_mut().push("unmount"))
        .on_closed(move || c.borrow_mut().push("closed"))
        .on_finished(move || d.borrow_mut().push("finished"))
}

fn all_points(c: &Curtain) -> Vec<f64> {
    c.state()
        .layers()
        .iter()
        .flat_map(|l| l.points().iter().copied())
        .collect()
}

/// Tick at 60 fps until the timeline ends, checking bounds on every frame.
fn run_to_rest(c: &mut Curtain, s: &mut SvgSurface) -> usize {
    let mut frames = 0;
    while c.is_animating() {
        c.tick(DT, s);
        frames += 1;
        assert!(
            all_points(c).iter().all(|p| (0.0..=100.0).contains(p)),
            "point left [0, 100] on frame {frames}"
        );
        assert!(frames < 10_000, "timeline never completed");
    }
    frames
}

fn find(c: &Curtain, layer: usize, point: usize) -> &Tween<PointKey> {
    c.scheduled()
        .iter()
        .find(|t| t.key == PointKey { layer, point })
        .expect("tween scheduled")
}

#[test]
fn construction_fails_for_single_point() {
    let cfg = CurtainConfig {
        points: 1,
        ..CurtainConfig::overlay()
    };
    assert!(Curtain::new(cfg).is_err());
}

#[test]
fn new_curtain_is_idle_and_revealed() {
    let c = Curtain::new(CurtainConfig::overlay()).unwrap();
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.is_open());
    assert!(!c.is_animating());
    assert!(c.scheduled().is_empty());
    assert!(all_points(&c).iter().all(|p| *p == 100.0));
}

#[test]
fn open_schedules_staggered_cover() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    assert!(c.open());
    assert_eq!(c.phase(), Phase::Covering);
    assert_eq!(c.scheduled().len(), 10);

    let first = find(&c, 0, 0);
    assert_eq!(first.at, 0.0);
    assert_eq!(first.target, 0.0);

    let lagging = find(&c, 1, 3);
    assert!((lagging.at - 0.26).abs() < 1e-12);
    assert_eq!(lagging.target, 0.0);
    assert_eq!(lagging.props.duration, 0.8);
}

#[test]
fn open_reaches_covered_and_notifies_once() {
    let log = Log::default();
    let mut c = Curtain::new(scenario_config())
        .unwrap()
        .with_hooks(logging_hooks(&log));
    let mut s = surface();

    c.open();
    run_to_rest(&mut c, &mut s);

    assert_eq!(c.phase(), Phase::Covered);
    assert!(c.is_open());
    assert!(all_points(&c).iter().all(|p| *p == 0.0));
    assert_eq!(*log.borrow(), vec!["revealed"]);
    assert!(s.path(1).unwrap().starts_with("M 0 0 C"));
}

#[test]
fn repeated_open_keeps_a_single_timeline() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    assert!(c.open());
    let before = c.scheduled().to_vec();
    assert!(!c.open());
    assert!(!c.open());
    assert_eq!(c.phase(), Phase::Covering);
    assert_eq!(c.scheduled(), before.as_slice());
}

#[test]
fn open_is_ignored_until_idle_again() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    let mut s = surface();
    c.open();
    run_to_rest(&mut c, &mut s);
    assert!(!c.open());
    assert_eq!(c.phase(), Phase::Covered);

    c.close();
    assert!(!c.open());
    run_to_rest(&mut c, &mut s);
    assert!(c.open());
}

#[test]
fn close_only_from_covered() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    assert!(!c.close());
    c.open();
    assert!(!c.close(), "close while covering is ignored");
    assert_eq!(c.phase(), Phase::Covering);
}

#[test]
fn close_unmounts_first_and_closes_once_after_slowest_tween() {
    let log = Log::default();
    let mut c = Curtain::new(scenario_config())
        .unwrap()
        .with_hooks(logging_hooks(&log));
    let mut s = surface();
    c.open();
    run_to_rest(&mut c, &mut s);
    log.borrow_mut().clear();

    assert!(c.close());
    assert_eq!(*log.borrow(), vec!["unmount"]);
    assert_eq!(c.phase(), Phase::Revealing);

    // Slowest reveal tween: delay 0.18 + layer lag 0.08 + 0.8s.
    let slowest = c
        .scheduled()
        .iter()
        .map(Tween::end)
        .fold(0.0, f64::max);
    assert!((slowest - 1.06).abs() < 1e-9);

    c.tick(slowest - 0.01, &mut s);
    assert_eq!(c.phase(), Phase::Revealing);
    assert_eq!(*log.borrow(), vec!["unmount"]);

    c.tick(0.02, &mut s);
    assert_eq!(c.phase(), Phase::Idle);
    c.tick(DT, &mut s);
    assert_eq!(*log.borrow(), vec!["unmount", "closed"]);
}

#[test]
fn close_reverses_layer_lag() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    let mut s = surface();
    c.open();
    run_to_rest(&mut c, &mut s);
    c.close();

    assert!((find(&c, 0, 3).at - 0.26).abs() < 1e-12);
    assert!((find(&c, 1, 3).at - 0.18).abs() < 1e-12);
    assert!(c.scheduled().iter().all(|t| t.target == 100.0));
}

#[test]
fn forward_reveal_order_keeps_layer_lag() {
    let cfg = CurtainConfig {
        reveal_order: LayerOrder::Forward,
        ..scenario_config()
    };
    let mut c = Curtain::new(cfg).unwrap();
    let mut s = surface();
    c.open();
    run_to_rest(&mut c, &mut s);
    c.close();
    assert!((find(&c, 1, 3).at - 0.26).abs() < 1e-12);
}

#[test]
fn open_close_round_trip_restores_revealed_state() {
    let mut c = Curtain::new(CurtainConfig::overlay()).unwrap();
    let mut s = surface();
    let before = c.state().clone();

    c.open();
    run_to_rest(&mut c, &mut s);
    c.close();
    run_to_rest(&mut c, &mut s);

    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(c.state(), &before);
}

#[test]
fn pulse_runs_cover_then_reveal_without_resting() {
    let log = Log::default();
    let mut c = Curtain::new(CurtainConfig::hero(21))
        .unwrap()
        .with_hooks(logging_hooks(&log));
    let mut s = surface();

    assert!(c.pulse());
    assert_eq!(c.scheduled().len(), 40);
    assert_eq!(c.phase(), Phase::Covering);

    let mut phases = vec![c.phase()];
    while c.is_animating() {
        let p = c.tick(DT, &mut s);
        if phases.last() != Some(&p) {
            phases.push(p);
        }
    }
    assert_eq!(phases, vec![Phase::Covering, Phase::Revealing, Phase::Idle]);
    assert_eq!(*log.borrow(), vec!["finished"]);
    assert!(all_points(&c).iter().all(|p| *p == 100.0));
}

#[test]
fn pulse_reveal_half_is_offset() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    c.pulse();
    let reveal_starts: Vec<f64> = c
        .scheduled()
        .iter()
        .filter(|t| t.target == 100.0)
        .map(|t| t.at)
        .collect();
    assert_eq!(reveal_starts.len(), 10);
    let earliest = reveal_starts.iter().copied().fold(f64::INFINITY, f64::min);
    assert!((earliest - 0.9).abs() < 1e-12);
}

#[test]
fn pulse_mid_point_is_fully_covered() {
    let cfg = CurtainConfig {
        per_path_delay: 0.0,
        stagger: StaggerPolicy::Table {
            delays: vec![0.0; 10],
        },
        ..CurtainConfig::overlay()
    };
    let mut c = Curtain::new(cfg).unwrap();
    let mut s = surface();
    c.pulse();
    // Cover ends at 0.8, reveal starts at 0.9.
    c.tick(0.85, &mut s);
    assert!(all_points(&c).iter().all(|p| *p == 0.0));
    assert_eq!(c.phase(), Phase::Covering);
}

#[test]
fn jitter_delays_are_redrawn_each_cycle() {
    let mut c = Curtain::new(CurtainConfig::hero(5)).unwrap();
    let mut s = surface();
    c.pulse();
    let first = c.delays().to_vec();
    run_to_rest(&mut c, &mut s);
    c.pulse();
    assert_ne!(c.delays(), first.as_slice());
    assert!(c.delays().iter().all(|d| (0.0..0.3).contains(d)));
}

#[test]
fn enter_starts_covered_and_waits_for_delay() {
    let log = Log::default();
    let mut c = Curtain::new(CurtainConfig::entrance())
        .unwrap()
        .with_hooks(logging_hooks(&log));
    let mut s = surface();

    assert!(c.enter());
    assert_eq!(c.phase(), Phase::Revealing);
    assert!(all_points(&c).iter().all(|p| *p == 0.0));

    c.tick(0.05, &mut s);
    assert!(all_points(&c).iter().all(|p| *p == 0.0));

    run_to_rest(&mut c, &mut s);
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(*log.borrow(), vec!["finished"]);
    assert!(all_points(&c).iter().all(|p| *p == 100.0));
}

#[test]
fn detached_layers_are_skipped_until_attached() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    let mut s = SvgSurface::detached(CurtainConfig::overlay().fills);
    c.open();
    c.tick(0.1, &mut s);
    assert_eq!(s.path(0), None);
    assert_eq!(s.path(1), None);

    s.attach(0);
    c.tick(0.1, &mut s);
    assert!(s.path(0).is_some());
    assert_eq!(s.path(1), None);
}

#[test]
fn idle_tick_is_a_no_op() {
    let mut c = Curtain::new(scenario_config()).unwrap();
    let mut s = surface();
    assert_eq!(c.tick(1.0, &mut s), Phase::Idle);
    assert_eq!(s.path(0), None);
}

#[test]
fn scroll_lock_spans_open_to_closed() {
    let lock = ScrollLock::new();
    let mut c = Curtain::new(scenario_config())
        .unwrap()
        .with_scroll_lock(lock.clone());
    let mut s = surface();

    c.open();
    assert!(lock.is_locked());
    run_to_rest(&mut c, &mut s);
    assert!(lock.is_locked());
    c.close();
    assert!(lock.is_locked());
    run_to_rest(&mut c, &mut s);
    assert!(!lock.is_locked());
}

#[test]
fn pulse_does_not_lock_scrolling() {
    let lock = ScrollLock::new();
    let mut c = Curtain::new(scenario_config())
        .unwrap()
        .with_scroll_lock(lock.clone());
    c.pulse();
    assert!(!lock.is_locked());
}

#[test]
fn dropping_an_open_curtain_releases_scroll() {
    let lock = ScrollLock::new();
    let mut c = Curtain::new(scenario_config())
        .unwrap()
        .with_scroll_lock(lock.clone());
    c.open();
    drop(c);
    assert!(!lock.is_locked());
}

#[test]
fn kill_returns_to_idle_silently() {
    let log = Log::default();
    let lock = ScrollLock::new();
    let mut c = Curtain::new(scenario_config())
        .unwrap()
        .with_hooks(logging_hooks(&log))
        .with_scroll_lock(lock.clone());
    let mut s = surface();
    c.open();
    c.tick(0.3, &mut s);
    c.kill();

    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.is_animating());
    assert!(!lock.is_locked());
    assert!(all_points(&c).iter().all(|p| *p == 100.0));
    assert!(log.borrow().is_empty());
    assert!(c.open());
}

#[test]
fn falling_polarity_mirrors_targets() {
    let cfg = CurtainConfig {
        polarity: crate::foundation::core::Polarity::Falling,
        ..scenario_config()
    };
    let mut c = Curtain::new(cfg).unwrap();
    let mut s = surface();
    assert!(all_points(&c).iter().all(|p| *p == 0.0));
    c.open();
    assert!(c.scheduled().iter().all(|t| t.target == 100.0));
    run_to_rest(&mut c, &mut s);
    assert!(s.path(0).unwrap().ends_with("V 0 H 0"));
}

#[test]
fn pulse_with_early_offset_still_ends_revealed() {
    let cfg = CurtainConfig {
        pulse_offset: 0.0,
        ..CurtainConfig::overlay()
    };
    cfg.validate().unwrap();
    let mut c = Curtain::new(cfg).unwrap();
    let mut s = surface();
    assert!(c.pulse());

    for layer in 0..2 {
        for point in 0..10 {
            let key = PointKey { layer, point };
            let mut tweens = c.scheduled().iter().filter(|t| t.key == key);
            let cover = tweens.next().unwrap();
            let reveal = tweens.next().unwrap();
            assert_eq!(cover.target, 0.0);
            assert_eq!(reveal.target, 100.0);
            assert!(reveal.at + 1e-9 >= cover.end(), "{key:?} reveals before covering");
        }
    }

    run_to_rest(&mut c, &mut s);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(all_points(&c).iter().all(|p| *p == 100.0));
}

#[test]
fn pulse_offset_is_kept_when_it_clears_the_cover() {
    let mut c = Curtain::new(CurtainConfig::hero(3)).unwrap();
    c.pulse();
    let (cover_start, reveal_start) = c
        .scheduled()
        .iter()
        .filter(|t| t.key == PointKey { layer: 1, point: 0 })
        .fold((f64::NAN, f64::NAN), |(c0, r0), t| {
            if t.target == 0.0 { (t.at, r0) } else { (c0, t.at) }
        });
    // Reversed reveal: layer 1 loses its 0.25s lag, so the gap is exactly the pulse offset
    // minus that lag.
    assert!((reveal_start - cover_start - (0.9 - 0.25)).abs() < 1e-12);
}
