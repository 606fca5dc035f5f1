use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::encode::sink::InMemoryImageSink;
use crate::foundation::error::BdnError;
use crate::raster::{Layer, Sample};

struct DropCounting {
    dropped: Rc<Cell<u32>>,
    fail_at: Option<i64>,
    layers: Vec<Layer>,
}

impl Rasterizer for DropCounting {
    fn sample(&mut self, time_ms: i64) -> BdnResult<Sample<'_>> {
        if self.fail_at == Some(time_ms) {
            return Err(BdnError::init("engine lost"));
        }
        Ok(Sample {
            layers: &self.layers,
            changed: false,
        })
    }

    fn next_change_offset(&self, time_ms: i64) -> i64 {
        if time_ms < 500 { 500 - time_ms } else { 0 }
    }
}

impl Drop for DropCounting {
    fn drop(&mut self) {
        self.dropped.set(self.dropped.get() + 1);
    }
}

fn counted(fail_at: Option<i64>) -> (DropCounting, Rc<Cell<u32>>) {
    let dropped = Rc::new(Cell::new(0));
    (
        DropCounting {
            dropped: dropped.clone(),
            fail_at,
            layers: Vec::new(),
        },
        dropped,
    )
}

#[test]
fn default_opts() {
    let opts = RenderSessionOpts::default();
    assert_eq!(opts.video_format, VideoFormat::P1080);
    assert_eq!(opts.frame_rate, FrameRate::Fps23_976);
    assert!(!opts.disc_mode);
}

#[test]
fn run_drops_rasterizer_once() {
    let (rast, dropped) = counted(None);
    let session = RenderSession::new(rast, RenderSessionOpts::default());
    assert_eq!(
        session.canvas(),
        Canvas {
            width: 1920,
            height: 1080
        }
    );

    let mut sink = InMemoryImageSink::new();
    let out = session.run(&mut sink).unwrap();

    assert_eq!(dropped.get(), 1);
    assert!(out.events.is_empty());
    // t=0 seeks to 500, t=500 reports no further change.
    assert_eq!(out.stats.samples, 2);
    assert_eq!(out.stats.seeks, 2);
}

#[test]
fn failed_run_still_drops_rasterizer() {
    let (rast, dropped) = counted(Some(500));
    let session = RenderSession::new(rast, RenderSessionOpts::default());

    let mut sink = InMemoryImageSink::new();
    let err = session.run(&mut sink).unwrap_err();

    assert!(matches!(err, BdnError::Init(_)));
    assert_eq!(dropped.get(), 1);
}

#[test]
fn dropping_unused_session_releases_rasterizer() {
    let (rast, dropped) = counted(None);
    let session = RenderSession::new(rast, RenderSessionOpts::default());
    drop(session);
    assert_eq!(dropped.get(), 1);
}
