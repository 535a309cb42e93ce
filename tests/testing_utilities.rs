//! Integration tests demonstrating the testing utilities.

use anyhow::Result;
use datastream::testing::*;
use datastream::*;
use std::io;
use std::sync::{Arc, Mutex};

#[test]
fn test_entries_builder_and_assertions() -> Result<()> {
    let entries = EntriesBuilder::new()
        .add("a", 1)
        .add_entries(vec![("b", 2), ("c", 3)])
        .add_values_for("d", vec![4, 5])
        .build();

    let mut s = Stream::from_entries(entries).filter(|v, _k| v % 2 == 1);
    let out = s.to_vec()?;

    assert_entries_equal(&out, &[("a", 1), ("c", 3), ("d", 5)]);
    assert_values_equal(&out, &[1, 3, 5]);
    assert_keys_equal(&out, &["a", "c", "d"]);
    assert_all(&out, |v, _k| v % 2 == 1);
    Ok(())
}

#[test]
fn test_indexed_builder() -> Result<()> {
    let entries = EntriesBuilder::new()
        .add_indexed(vec!["x", "y"])
        .add_indexed(vec!["z"])
        .build();
    assert_eq!(entries, vec![(0, "x"), (1, "y"), (2, "z")]);

    let mut s = Stream::new(entries).sort_keys_by(|a, b| b.cmp(a));
    assert_values_equal(&s.to_vec()?, &["z", "y", "x"]);
    Ok(())
}

#[test]
fn test_sequential_entries() -> Result<()> {
    let entries = sequential_entries("row", 3, 6);
    assert_keys_equal(&entries, &["row_3".to_string(), "row_4".to_string(), "row_5".to_string()]);
    assert_eq!(Stream::from_entries(entries).sum()?, 12);
    Ok(())
}

#[test]
#[should_panic(expected = "Entry mismatch at position 1")]
fn test_assert_entries_equal_reports_position() {
    assert_entries_equal(&[("a", 1), ("b", 2)], &[("a", 1), ("b", 3)]);
}

#[test]
#[should_panic(expected = "does not satisfy predicate")]
fn test_assert_all_reports_failure() {
    assert_all(&[("a", 1), ("b", -1)], |v, _k| *v > 0);
}

#[test]
fn test_pull_counter_shared_between_clones() -> Result<()> {
    let counter = PullCounter::new();
    let observer = counter.clone();

    let mut s = counter.wrap(Stream::from_values(0..10)).skip(2).take(3);
    assert_eq!(s.to_values()?, vec![2, 3, 4]);
    assert_eq!(observer.pulls(), 5);
    Ok(())
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_debug_stages_log_through_tracing() -> Result<()> {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || -> Result<()> {
        let mut s = Stream::from_values(vec![1, 2])
            .debug_inspect("source")
            .map(|v, _k| v * 10)
            .debug_count("mapped");
        assert_eq!(s.to_values()?, vec![10, 20]);
        Ok(())
    })?;

    let logs = capture.contents();
    assert!(logs.contains("label=\"source\""), "{logs}");
    assert!(logs.contains("position=1"), "{logs}");
    assert!(logs.contains("count=2"), "{logs}");
    Ok(())
}
