use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[test]
fn zero_threads_rejected() {
    let err = WorkerPool::new(Some(0)).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn explicit_thread_count() {
    let pool = WorkerPool::new(Some(3)).unwrap();
    assert_eq!(pool.threads(), 3);
}

#[test]
fn scatter_join_keeps_input_order() {
    let pool = WorkerPool::new(Some(4)).unwrap();
    let items: Vec<u32> = (0..64).collect();
    let out = pool.scatter_join(&items, |v| Ok(v * 2)).unwrap();
    assert_eq!(out, items.iter().map(|v| v * 2).collect::<Vec<_>>());
}

#[test]
fn scatter_join_waits_for_all_then_fails() {
    let pool = WorkerPool::new(Some(2)).unwrap();
    let ran = AtomicUsize::new(0);
    let items: Vec<u32> = (0..10).collect();
    let err = pool
        .scatter_join(&items, |v| {
            ran.fetch_add(1, Ordering::SeqCst);
            if *v == 3 {
                Err(PetpetError::resize("task 3 failed"))
            } else {
                Ok(*v)
            }
        })
        .unwrap_err();
    assert!(matches!(err, PetpetError::Resize(_)));
    assert_eq!(ran.load(Ordering::SeqCst), 10);
}

#[test]
fn shared_pool_is_reused() {
    let a = WorkerPool::shared().unwrap();
    let b = WorkerPool::shared().unwrap();
    assert!(std::ptr::eq(a, b));
    assert!(a.threads() >= 1);
}
