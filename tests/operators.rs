// tests/operators.rs
use anyhow::{Result, anyhow};
use datastream::testing::*;
use datastream::*;

fn letters() -> Vec<(&'static str, i32)> {
    vec![("a", 2), ("b", 10), ("c", 5), ("d", 1), ("e", 7)]
}

#[test]
fn filter_keeps_order() -> Result<()> {
    let out = Stream::from_entries(letters()).filter(|v, _k| *v > 2).to_vec()?;
    assert_entries_equal(&out, &[("b", 10), ("c", 5), ("e", 7)]);
    Ok(())
}

#[test]
fn filter_sees_keys() -> Result<()> {
    let out = Stream::from_entries(letters()).filter(|_v, k| *k != "c").to_vec()?;
    assert_keys_equal(&out, &["a", "b", "d", "e"]);
    Ok(())
}

#[test]
fn map_values_and_keys() -> Result<()> {
    let out = Stream::from_entries(letters())
        .map(|v, _k| v * 2)
        .map_keys(|k, _v| format!("processed_{k}"))
        .to_vec()?;
    assert_eq!(out[0], ("processed_a".to_string(), 4));
    assert_eq!(out.len(), 5);

    let both = Stream::from_entries(vec![("x", 1)])
        .map_both(|v, k| format!("{k}{v}"), |k, v| (*k, *v))
        .to_vec()?;
    assert_eq!(both, vec![(("x", 1), "x1".to_string())]);
    Ok(())
}

#[test]
fn map_optional_defaults_to_identity() -> Result<()> {
    let values_only = Stream::from_entries(vec![("a", 1)])
        .map_optional(Some(|v: &i32, _k: &&str| v + 1), None::<fn(&&'static str, &i32) -> &'static str>)
        .to_vec()?;
    assert_eq!(values_only, vec![("a", 2)]);

    let keys_only = Stream::from_entries(vec![("a", 1)])
        .map_optional(None::<fn(&i32, &&'static str) -> i32>, Some(|_k: &&str, _v: &i32| "z"))
        .to_vec()?;
    assert_eq!(keys_only, vec![("z", 1)]);
    Ok(())
}

#[test]
fn map_without_transform_is_a_logic_error() -> Result<()> {
    let err = Stream::from_entries(vec![("a", 1)])
        .map_optional(None::<fn(&i32, &&'static str) -> i32>, None::<fn(&&'static str, &i32) -> &'static str>)
        .to_vec()
        .unwrap_err();
    assert!(err.is_logic());
    Ok(())
}

#[test]
fn try_map_propagates_callback_errors() -> Result<()> {
    let mut s = Stream::from_values(vec!["1", "2", "x", "4"]).try_map(|v, _k| Ok(v.parse::<i32>()?));
    let mut it = s.iter()?;
    assert_eq!(it.next().transpose()?, Some((0, 1)));
    assert_eq!(it.next().transpose()?, Some((1, 2)));
    let err = it.next().and_then(|entry| entry.err()).expect("parse error");
    assert!(matches!(err, StreamError::Callback(_)));
    assert!(err.to_string().contains("invalid digit"));
    assert!(it.next().is_none());
    Ok(())
}

#[test]
fn try_filter_error_ends_stream() -> Result<()> {
    let out = Stream::from_values(vec![1, 2, 3])
        .try_filter(|v, _k| if *v == 2 { Err(anyhow!("no twos")) } else { Ok(true) })
        .to_vec();
    let err = out.unwrap_err();
    assert_eq!(err.to_string(), "no twos");
    Ok(())
}

#[test]
fn take_and_skip() -> Result<()> {
    let taken = Stream::from_entries(letters()).take(2).to_vec()?;
    assert_keys_equal(&taken, &["a", "b"]);

    let skipped = Stream::from_entries(letters()).skip(3).to_vec()?;
    assert_keys_equal(&skipped, &["d", "e"]);

    assert!(Stream::from_entries(letters()).skip(10).to_vec()?.is_empty());
    assert_eq!(Stream::from_entries(letters()).take(10).to_vec()?.len(), 5);
    Ok(())
}

#[test]
fn take_never_over_pulls() -> Result<()> {
    let counter = PullCounter::new();
    let out = counter.wrap(Stream::from_values(0..)).take(4).to_values()?;
    assert_eq!(out, vec![0, 1, 2, 3]);
    assert_eq!(counter.pulls(), 4);

    let counter = PullCounter::new();
    assert!(counter.wrap(Stream::from_values(0..)).take(0).to_vec()?.is_empty());
    assert_eq!(counter.pulls(), 0);
    Ok(())
}

#[test]
fn take_until_excludes_trigger_and_stops() -> Result<()> {
    let counter = PullCounter::new();
    let out = counter
        .wrap(Stream::from_entries(letters()))
        .take_until(|v, _k| *v == 5)
        .to_vec()?;
    assert_keys_equal(&out, &["a", "b"]);
    assert_eq!(counter.pulls(), 3);
    Ok(())
}

#[test]
fn tap_runs_before_yield() -> Result<()> {
    let mut seen = Vec::new();
    {
        let mut s = Stream::from_entries(letters()).tap(|v, k| seen.push((*k, *v)));
        let mut it = s.iter()?;
        it.next();
    }
    assert_eq!(seen, vec![("a", 2)]);
    Ok(())
}

#[test]
fn distinct_by_value() -> Result<()> {
    let out = Stream::from_entries(vec![("a", 2), ("b", 10), ("c", 2), ("d", 10)])
        .distinct()
        .to_vec()?;
    assert_entries_equal(&out, &[("a", 2), ("b", 10)]);
    Ok(())
}

#[test]
fn distinct_with_identity() -> Result<()> {
    let out = Stream::from_entries(vec![
        ("a", vec![2]),
        ("b", vec![10]),
        ("c", vec![2]),
        ("d", vec![10]),
    ])
    .distinct_by(|v, _k| v[0].to_string())
    .to_vec()?;
    assert_eq!(out, vec![("a", vec![2]), ("b", vec![10])]);
    Ok(())
}

#[test]
fn flatten_reindexes_or_keeps_keys() -> Result<()> {
    let nested = || {
        vec![
            ("g1", vec![("x", 1), ("y", 2)]),
            ("g2", vec![]),
            ("g3", vec![("x", 3)]),
        ]
    };

    let flat = Stream::from_entries(nested()).flatten().to_vec()?;
    assert_eq!(flat, vec![(0, 1), (1, 2), (2, 3)]);

    let keyed = Stream::from_entries(nested()).flatten_keyed().to_vec()?;
    assert_eq!(keyed, vec![("x", 1), ("y", 2), ("x", 3)]);
    Ok(())
}

#[test]
fn flatten_nested_streams() -> Result<()> {
    let out = Stream::from_values(vec![1, 2])
        .map(|v, _k| Stream::from_values(vec![v; v as usize]))
        .flatten()
        .to_values()?;
    assert_eq!(out, vec![1, 2, 2]);
    Ok(())
}

#[test]
fn reverse_and_sort() -> Result<()> {
    let reversed = Stream::from_entries(letters()).reverse().to_vec()?;
    assert_keys_equal(&reversed, &["e", "d", "c", "b", "a"]);

    let sorted = Stream::from_entries(letters()).sort().to_vec()?;
    assert_values_equal(&sorted, &[1, 2, 5, 7, 10]);

    let by_key_desc = Stream::from_entries(letters()).sort_keys_by(|a, b| b.cmp(a)).to_vec()?;
    assert_keys_equal(&by_key_desc, &["e", "d", "c", "b", "a"]);

    let by_key = Stream::from_entries(vec![("b", 1), ("a", 2)]).sort_keys().to_vec()?;
    assert_keys_equal(&by_key, &["a", "b"]);
    Ok(())
}

#[test]
fn sort_is_stable() -> Result<()> {
    let out = Stream::from_entries(vec![("a", 1), ("b", 0), ("c", 1), ("d", 0)])
        .sort_by(|x, y| x.cmp(y))
        .to_vec()?;
    assert_keys_equal(&out, &["b", "d", "a", "c"]);
    Ok(())
}

#[test]
fn materializing_stages_wait_for_first_pull() -> Result<()> {
    let counter = PullCounter::new();
    let mut s = counter.wrap(Stream::from_values(vec![3, 1, 2])).sort();
    let mut it = s.iter()?;
    assert_eq!(counter.pulls(), 0);
    assert_eq!(it.next().transpose()?, Some((1, 1)));
    assert_eq!(counter.pulls(), 3);
    Ok(())
}

#[test]
fn merge_concatenates_without_dedup() -> Result<()> {
    let out = Stream::from_entries(vec![("a", 1), ("b", 2)])
        .merge(Stream::from_entries(vec![("a", 3)]))
        .to_vec()?;
    assert_entries_equal(&out, &[("a", 1), ("b", 2), ("a", 3)]);
    Ok(())
}

#[test]
fn if_empty_without_fallback_fails() -> Result<()> {
    let err = Stream::from_entries(Vec::<(u8, u8)>::new())
        .if_empty()
        .to_vec()
        .unwrap_err();
    assert!(matches!(err, StreamError::Empty { .. }));
    assert_eq!(err.to_string(), "Stream is empty.");
    Ok(())
}

#[test]
fn if_empty_with_fallback_yields_fallback() -> Result<()> {
    let out = Stream::from_entries(Vec::<(&str, i32)>::new())
        .if_empty_then(vec![("x", 1), ("y", 2)])
        .to_vec()?;
    assert_entries_equal(&out, &[("x", 1), ("y", 2)]);
    Ok(())
}

#[test]
fn if_empty_never_triggers_on_non_empty_input() -> Result<()> {
    let out = Stream::from_entries(vec![("a", 0)])
        .if_empty_then(vec![("x", 1)])
        .to_vec()?;
    assert_entries_equal(&out, &[("a", 0)]);

    let out = Stream::from_entries(vec![("a", 0)]).if_empty().to_vec()?;
    assert_entries_equal(&out, &[("a", 0)]);
    Ok(())
}

#[test]
fn if_empty_with_builds_fallback_only_when_needed() -> Result<()> {
    let built = std::cell::Cell::new(0);
    let fallback = || {
        built.set(built.get() + 1);
        vec![("x", 1)]
    };

    let out = Stream::from_entries(vec![("a", 0)])
        .if_empty_with(fallback)
        .to_vec()?;
    assert_entries_equal(&out, &[("a", 0)]);
    assert_eq!(built.get(), 0);

    let mut s = Stream::from_entries(Vec::<(&str, i32)>::new()).if_empty_with(fallback);
    assert_eq!(built.get(), 0);
    assert_entries_equal(&s.to_vec()?, &[("x", 1)]);
    assert_eq!(built.get(), 1);
    Ok(())
}

#[test]
fn if_empty_custom_error() -> Result<()> {
    let err = Stream::<u8, u8>::empty()
        .if_empty_error(StreamError::logic("nothing to do"))
        .to_vec()
        .unwrap_err();
    assert_eq!(err.to_string(), "nothing to do");
    Ok(())
}

#[test]
fn overflow_fails_on_the_pull_past_capacity() -> Result<()> {
    let mut s = Stream::from_values(vec!["a", "b", "c"]).overflow(2);
    let mut it = s.iter()?;
    assert!(it.next().is_some_and(|e| e.is_ok()));
    assert!(it.next().is_some_and(|e| e.is_ok()));
    let err = it.next().and_then(|entry| entry.err()).expect("overflow");
    assert!(matches!(err, StreamError::Overflow { capacity: 2 }));
    assert_eq!(err.to_string(), "Defined capacity of 2 items exceeded.");
    assert!(it.next().is_none());
    Ok(())
}

#[test]
fn overflow_within_capacity_and_custom_error() -> Result<()> {
    assert_eq!(Stream::from_values(vec![1, 2]).overflow(2).to_values()?, vec![1, 2]);

    let err = Stream::from_values(vec![1, 2])
        .overflow_error(1, |cap| StreamError::logic(format!("max {cap}")))
        .to_vec()
        .unwrap_err();
    assert_eq!(err.to_string(), "max 1");
    Ok(())
}
