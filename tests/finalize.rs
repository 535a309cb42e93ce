//! Tests for finalize stages.

use anyhow::Result;
use datastream::*;
use std::cell::Cell;

#[test]
fn finalizer_runs_once_on_completion() -> Result<()> {
    let calls = Cell::new(0);
    let mut s = Stream::from_values(vec![1, 2, 3]).finalize(|| calls.set(calls.get() + 1));

    assert_eq!(s.to_values()?, vec![1, 2, 3]);
    assert_eq!(calls.get(), 1);
    drop(s);
    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn finalizer_runs_before_error_is_reported() -> Result<()> {
    let calls = Cell::new(0);
    let mut it = Stream::from_results(vec![Ok((0, 1)), Err(StreamError::logic("broken")), Ok((2, 3))])
        .finalize(|| calls.set(calls.get() + 1))
        .into_iter();

    assert_eq!(it.next().transpose()?, Some((0, 1)));
    assert_eq!(calls.get(), 0);
    assert!(it.next().is_some_and(|entry| entry.is_err()));
    assert_eq!(calls.get(), 1);
    assert!(it.next().is_none());
    drop(it);
    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn finalizer_runs_on_early_abandonment() -> Result<()> {
    let calls = Cell::new(0);
    let mut s = Stream::from_values(0..100)
        .finalize(|| calls.set(calls.get() + 1))
        .take(2);

    assert_eq!(s.to_values()?, vec![0, 1]);
    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn finalizer_runs_when_iterator_is_dropped() -> Result<()> {
    let calls = Cell::new(0);
    let mut s = Stream::from_values(vec!['a', 'b']).finalize(|| calls.set(calls.get() + 1));

    let mut it = s.iter()?;
    it.next().transpose()?;
    assert_eq!(calls.get(), 0);
    drop(it);
    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn finalizer_never_runs_without_a_pull() -> Result<()> {
    let calls = Cell::new(0);

    let unused = Stream::from_values(vec![1]).finalize(|| calls.set(calls.get() + 1));
    drop(unused);

    let mut opened = Stream::from_values(vec![1]).finalize(|| calls.set(calls.get() + 1));
    drop(opened.iter()?);

    assert_eq!(calls.get(), 0);
    Ok(())
}

#[test]
fn finalizer_runs_on_downstream_error() -> Result<()> {
    let calls = Cell::new(0);
    let mut s = Stream::from_values(vec![1, 2, 3])
        .finalize(|| calls.set(calls.get() + 1))
        .overflow(1);

    let err = s.to_vec().unwrap_err();
    assert!(matches!(err, StreamError::Overflow { capacity: 1 }));
    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn nested_finalizers_run_innermost_first_on_exhaustion() -> Result<()> {
    let order = std::cell::RefCell::new(Vec::new());
    let mut s = Stream::from_values(vec![1])
        .finalize(|| order.borrow_mut().push("inner"))
        .map(|v, _k| v + 1)
        .finalize(|| order.borrow_mut().push("outer"));

    s.flush()?;
    assert_eq!(*order.borrow(), vec!["inner", "outer"]);
    Ok(())
}
