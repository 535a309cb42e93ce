// tests/stream.rs
use anyhow::Result;
use datastream::source::{Entries, Values};
use datastream::*;
use std::collections::BTreeMap;

#[test]
fn iterating_twice_is_a_logic_error() -> Result<()> {
    let mut s = Stream::from_values(vec![1, 2, 3]);
    assert_eq!(s.to_values()?, vec![1, 2, 3]);

    let err = s.iter().err().expect("second iteration must fail");
    assert!(err.is_logic());
    assert_eq!(err.to_string(), "Stream is already iterated.");
    Ok(())
}

#[test]
fn into_iter_of_closed_stream_yields_single_error() -> Result<()> {
    let mut s = Stream::from_values(vec![1]);
    s.flush()?;

    let mut items = s.into_iter();
    assert!(matches!(items.next(), Some(Err(StreamError::Logic(_)))));
    assert!(items.next().is_none());
    Ok(())
}

#[test]
fn closed_is_set_on_iteration_not_construction() -> Result<()> {
    let mut s = Stream::from_values(vec![1, 2]).filter(|v, _k| *v > 0);
    assert!(!s.is_closed());
    assert!(!s.upstreams()[0].is_closed());

    let mut it = s.iter()?;
    assert!(s.is_closed());
    assert!(s.upstreams()[0].is_closed());
    assert!(!s.is_exhausted());

    it.next();
    it.next();
    assert!(!s.is_exhausted());
    assert!(it.next().is_none());
    assert!(s.is_exhausted());
    assert!(s.upstreams()[0].is_exhausted());
    Ok(())
}

#[test]
fn nothing_is_pulled_before_iteration() -> Result<()> {
    let counter = testing::PullCounter::new();
    let s = counter
        .wrap(Stream::from_values(vec![1, 2, 3]))
        .map(|v, _k| v * 10)
        .filter(|v, _k| *v > 10);

    assert_eq!(counter.pulls(), 0);
    drop(s);
    assert_eq!(counter.pulls(), 0);
    Ok(())
}

#[test]
fn upstream_metadata_describes_the_chain() -> Result<()> {
    let s = Stream::from_values(vec![1, 2])
        .map(|v, _k| v + 1)
        .merge(vec![(9, 9)]);

    assert_eq!(s.name(), "merge");
    let names: Vec<_> = s.upstreams().iter().map(Upstream::name).collect();
    assert_eq!(names, vec!["map", "source"]);
    assert_eq!(s.upstreams()[0].upstreams()[0].name(), "source");
    assert!(Stream::from_values(vec![1]).upstreams().is_empty());
    Ok(())
}

#[test]
fn sources_from_collections() -> Result<()> {
    let map: BTreeMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
    assert_eq!(Stream::new(map).to_vec()?, vec![("a", 1), ("b", 2)]);

    assert_eq!(Stream::new([("x", 1)]).to_vec()?, vec![("x", 1)]);

    let pairs = vec![("k", 'v')];
    assert_eq!(Stream::new(pairs.as_slice()).to_vec()?, vec![("k", 'v')]);

    assert_eq!(Stream::new(Values("ab".chars())).to_vec()?, vec![(0, 'a'), (1, 'b')]);
    assert_eq!(
        Stream::new(Entries((1..=2).map(|i| (i, i * i)))).to_vec()?,
        vec![(1, 1), (2, 4)]
    );
    Ok(())
}

#[test]
fn stream_passed_as_source_keeps_its_stages() -> Result<()> {
    let inner = Stream::from_values(vec![1, 2]).map(|v, _k| v * 3);
    let mut outer = Stream::new(inner);
    assert_eq!(outer.name(), "map");
    assert_eq!(outer.to_values()?, vec![3, 6]);
    Ok(())
}

#[test]
fn source_errors_surface_on_the_pull_that_produced_them() -> Result<()> {
    let mut s = Stream::from_results(vec![
        Ok((0, 1)),
        Err(StreamError::logic("boom")),
        Ok((2, 3)),
    ])
    .map(|v, _k| v + 1);

    let mut it = s.iter()?;
    assert_eq!(it.next().transpose()?, Some((0, 2)));
    assert!(it.next().is_some_and(|entry| entry.is_err()));
    assert!(it.next().is_none());
    Ok(())
}

#[test]
fn custom_operator_runs_lazily() -> Result<()> {
    let mut s = Stream::from_values(vec![1, 2, 3, 4]).operator("pairs", |upstream| {
        let mut upstream = upstream;
        std::iter::from_fn(move || {
            let (k1, a) = match upstream.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err)),
            };
            let b = match upstream.next() {
                Some(Ok((_, b))) => b,
                Some(Err(err)) => return Some(Err(err)),
                None => 0,
            };
            Some(Ok((k1, a + b)))
        })
    });

    assert_eq!(s.name(), "pairs");
    assert_eq!(s.to_vec()?, vec![(0, 3), (2, 7)]);
    Ok(())
}

#[test]
fn empty_stream() -> Result<()> {
    let mut s = Stream::<u8, u8>::empty();
    assert!(s.to_vec()?.is_empty());
    assert!(s.is_exhausted());
    Ok(())
}
