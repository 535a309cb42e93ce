// tests/buffers.rs
use anyhow::Result;
use datastream::reducers::Count;
use datastream::*;

fn dataset() -> Vec<(&'static str, i32)> {
    vec![("a", 2), ("b", 10), ("c", 5), ("d", 1), ("e", 7)]
}

#[test]
fn buffer_count_batches_and_remainder() -> Result<()> {
    let buffers = Stream::from_entries(dataset()).buffer_count(2).to_vec()?;

    assert_eq!(buffers.len(), 3);
    assert_eq!(buffers.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(buffers[0].1.len(), 2);
    assert_eq!(buffers[2].1.len(), 1);

    let rejoined: Vec<_> = buffers.into_iter().flat_map(|(_, b)| b.into_vec()).collect();
    assert_eq!(rejoined, dataset());
    Ok(())
}

#[test]
fn buffer_count_count_matches_ceil() -> Result<()> {
    for len in 0..7usize {
        for size in 1..4usize {
            let n = Stream::from_values(0..len).buffer_count(size).count()?;
            assert_eq!(n, len.div_ceil(size), "len={len} size={size}");
        }
    }
    Ok(())
}

#[test]
fn buffer_count_default_size() -> Result<()> {
    let buffers = Stream::from_values(0..2500).buffer_count_default().to_values()?;
    let sizes: Vec<_> = buffers.iter().map(Buffer::len).collect();
    assert_eq!(sizes, vec![DEFAULT_BUFFER_SIZE, DEFAULT_BUFFER_SIZE, 500]);
    Ok(())
}

#[test]
#[should_panic(expected = "buffer size must be positive")]
fn buffer_count_zero_panics() {
    let _ = Stream::from_values(vec![1]).buffer_count(0);
}

#[test]
fn buffer_count_pipeline_with_aggregator() -> Result<()> {
    let mut stream = Stream::from_entries(dataset())
        .buffer_count(2)
        .map(|buffer, _i| {
            buffer
                .stream()
                .map_both(|v, _k| v * 2, |k, _v| format!("processed_{k}"))
        })
        .aggregate("count", Count::new())
        .flatten_keyed();

    let out = stream.to_vec()?;
    assert_eq!(
        out,
        vec![
            ("processed_a".to_string(), 4),
            ("processed_b".to_string(), 20),
            ("processed_c".to_string(), 10),
            ("processed_d".to_string(), 2),
            ("processed_e".to_string(), 14),
        ]
    );
    assert_eq!(stream.aggregated()?.value::<usize>("count")?, 3);
    Ok(())
}

#[test]
fn buffer_while_groups_runs() -> Result<()> {
    let buffers = Stream::from_entries(vec![("a", 2), ("b", 2), ("c", 2), ("d", 3), ("e", 3)])
        .buffer_while(|buffer, value, _key| {
            buffer.last().is_some_and(|last| last.value() == &value)
        })
        .to_values()?;

    assert_eq!(buffers.len(), 2);
    assert_eq!(buffers[0].keys().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(buffers[1].keys().copied().collect::<Vec<_>>(), vec!["d", "e"]);
    Ok(())
}

#[test]
fn buffer_while_pipeline_with_aggregator() -> Result<()> {
    let mut stream = Stream::from_entries(vec![("a", 2), ("b", 2), ("c", 2), ("d", 3), ("e", 3)])
        .buffer_while(|buffer, value, _key| {
            buffer.last().is_some_and(|last| last.value() == &value)
        })
        .aggregate("count", Count::new())
        .map(|buffer, _i| {
            buffer
                .stream()
                .map_both(|v, _k| v * 2, |k, _v| format!("processed_{k}"))
        })
        .flatten_keyed();

    let values: Vec<i32> = stream.to_values()?;
    assert_eq!(values, vec![4, 4, 4, 6, 6]);
    assert_eq!(stream.final_aggregated()?.value::<usize>("count")?, 2);
    Ok(())
}

#[test]
fn buffer_while_single_and_empty() -> Result<()> {
    let single = Stream::from_values(vec![1])
        .buffer_while(|_b, _v, _k| true)
        .to_values()?;
    assert_eq!(single.len(), 1);

    let none = Stream::from_values(Vec::<i32>::new())
        .buffer_while(|_b, _v, _k| true)
        .to_values()?;
    assert!(none.is_empty());
    Ok(())
}

#[test]
fn buffer_accessors() -> Result<()> {
    let buffer = Stream::from_entries(dataset())
        .buffer_count(5)
        .to_values()?
        .remove(0);

    assert_eq!(buffer.len(), 5);
    assert!(!buffer.is_empty());
    let first = buffer.first().expect("non-empty");
    assert_eq!((**first.key(), **first.value()), ("a", 2));
    assert_eq!(buffer.last().map(|item| item.cloned().into_pair()), Some(("e", 7)));
    assert_eq!(buffer.values().sum::<i32>(), 25);
    assert!(matches!(first.get(0)?, Field::Key(key) if **key == "a"));
    assert!(first.get(2).unwrap_err().is_out_of_bounds());

    let json = serde_json::to_value(&buffer)?;
    assert_eq!(json["items"][0], serde_json::json!(["a", 2]));

    let restreamed = buffer.clone().stream().filter(|v, _k| *v > 5).to_vec()?;
    assert_eq!(restreamed, vec![("b", 10), ("e", 7)]);
    assert_eq!(Stream::new(buffer).count()?, 5);
    Ok(())
}
