use super::*;

#[test]
fn guard_releases_on_drop() {
    let lock = ScrollLock::new();
    let guard = lock.acquire();
    assert!(guard.is_owner());
    assert!(lock.is_locked());
    drop(guard);
    assert!(!lock.is_locked());
}

#[test]
fn nested_acquire_does_not_release_outer_hold() {
    let lock = ScrollLock::new();
    let outer = lock.acquire();
    let inner = lock.acquire();
    assert!(!inner.is_owner());
    drop(inner);
    assert!(lock.is_locked());
    drop(outer);
    assert!(!lock.is_locked());
}

#[test]
fn released_during_unwind() {
    let lock = ScrollLock::new();
    let probe = lock.clone();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _guard = lock.acquire();
        panic!("hook failed");
    }));
    assert!(result.is_err());
    assert!(!probe.is_locked());
}
