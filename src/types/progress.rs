use bytes::Bytes;
use futures::{Stream, stream};
use std::sync::Arc;

/// Bytes sent over bytes total, always within `[0.0, 1.0]`.
pub type ProgressFraction = f32;

/// Receives upload progress as the request body is written.
pub trait ProgressSink: Send + Sync {
    fn report(&self, fraction: ProgressFraction);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressFraction) + Send + Sync,
{
    fn report(&self, fraction: ProgressFraction) {
        self(fraction)
    }
}

pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _fraction: ProgressFraction) {}
}

/// Turns byte counts into fractions that never go backwards.
pub struct ProgressTracker {
    total: u64,
    sent: u64,
    last: ProgressFraction,
    sink: Arc<dyn ProgressSink>,
}

impl ProgressTracker {
    pub fn new(total: u64, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            total,
            sent: 0,
            last: 0.0,
            sink,
        }
    }

    pub fn advance(&mut self, bytes: u64) -> ProgressFraction {
        self.sent = self.sent.saturating_add(bytes).min(self.total);
        let fraction = if self.total == 0 {
            1.0
        } else {
            (self.sent as f64 / self.total as f64) as ProgressFraction
        };
        let fraction = fraction.clamp(0.0, 1.0).max(self.last);
        self.last = fraction;
        self.sink.report(fraction);
        fraction
    }
}

/// Splits `body` into chunks and reports progress each time the transport
/// pulls the next one.
pub fn progress_stream(
    body: Bytes,
    chunk_size: usize,
    sink: Arc<dyn ProgressSink>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static {
    let chunk_size = chunk_size.max(1);
    let mut tracker = ProgressTracker::new(body.len() as u64, sink);
    let chunks: Vec<Bytes> = (0..body.len())
        .step_by(chunk_size)
        .map(|start| body.slice(start..(start + chunk_size).min(body.len())))
        .collect();
    stream::iter(chunks.into_iter().map(move |chunk| {
        tracker.advance(chunk.len() as u64);
        Ok(chunk)
    }))
}
