use super::*;

fn rect(n: u32) -> CropRect {
    CropRect {
        x1: 0,
        y1: 0,
        x2: n,
        y2: n,
    }
}

#[test]
fn sequential_sets_are_contiguous() {
    let mut tl = EventTimeline::new();
    for i in 0..=450usize {
        tl.set(i, rect(i as u32), i as i64 * 100, i as i64 * 100 + 42)
            .unwrap();
    }
    assert_eq!(tl.len(), 451);

    let events = tl.finalize();
    assert_eq!(events.len(), 451);
    for (i, ev) in events.iter().enumerate() {
        assert_eq!(ev.index, i);
        assert_eq!(ev.start_ms, i as i64 * 100);
    }
}

#[test]
fn set_on_existing_index_updates_in_place() {
    let mut tl = EventTimeline::new();
    tl.set(0, rect(1), 0, 42).unwrap();
    tl.set(1, rect(2), 100, 142).unwrap();
    tl.set(0, rect(3), 10, 84).unwrap();

    assert_eq!(tl.len(), 2);
    let ev = tl.get(0).unwrap();
    assert_eq!((ev.crop, ev.start_ms, ev.end_ms), (rect(3), 10, 84));
}

#[test]
fn extend_keeps_crop_and_start() {
    let mut tl = EventTimeline::new();
    tl.set(0, rect(5), 1000, 1042).unwrap();
    tl.extend(0, 2008).unwrap();
    assert_eq!(
        tl.get(0).unwrap(),
        SubtitleEvent {
            index: 0,
            crop: rect(5),
            start_ms: 1000,
            end_ms: 2008
        }
    );
    assert!(tl.extend(1, 5).is_err());
}

#[test]
fn gaps_are_rejected() {
    let mut tl = EventTimeline::new();
    assert!(tl.set(1, rect(1), 0, 1).is_err());
    assert!(tl.is_empty());
}

#[test]
fn capacity_grows_in_chunks() {
    let mut tl = EventTimeline::new();
    assert_eq!(tl.capacity(), 0);
    tl.set(0, rect(1), 0, 1).unwrap();
    assert!(tl.capacity() >= TIMELINE_CHUNK);

    let first = tl.capacity();
    for i in 1..first {
        tl.set(i, rect(1), 0, 1).unwrap();
    }
    assert_eq!(tl.capacity(), first);
    tl.set(first, rect(1), 0, 1).unwrap();
    assert!(tl.capacity() >= first + TIMELINE_CHUNK);
}
