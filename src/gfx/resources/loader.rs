//! Background texture loading.
//!
//! Each request spawns a short-lived worker thread that decodes the image
//! and reports back over a channel. Requests carry monotonically increasing
//! sequence numbers; when results arrive out of order, only the newest one
//! is surfaced and older results are dropped, so the last click always wins.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::error::VitrineError;
use crate::gfx::resources::texture::ImagePixels;

/// Result of one background load.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Sequence number of the originating request.
    pub seq: u64,
    /// Index of the drawable the texture is destined for.
    pub target: usize,
    /// Path the image was loaded from.
    pub source: String,
    pub result: Result<ImagePixels, VitrineError>,
}

/// Spawns decode workers and arbitrates their results.
pub struct TextureLoader {
    next_seq: u64,
    // Highest sequence number ever surfaced; anything at or below is stale.
    high_water: u64,
    sender: Sender<LoadOutcome>,
    receiver: Receiver<LoadOutcome>,
}

impl TextureLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        TextureLoader {
            next_seq: 0,
            high_water: 0,
            sender,
            receiver,
        }
    }

    /// Start a background load of `source` for the drawable at `target`.
    ///
    /// Returns the request's sequence number.
    pub fn request(&mut self, source: &str, target: usize) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        let sender = self.sender.clone();
        let source = source.to_string();
        log::debug!("texture load {} started for {}", seq, source);

        thread::spawn(move || {
            let result = ImagePixels::decode_path(&source);
            // The receiver may be gone if the stage shut down mid-load
            let _ = sender.send(LoadOutcome {
                seq,
                target,
                source,
                result,
            });
        });

        seq
    }

    /// Drain finished loads and return the newest one, if any.
    ///
    /// Never blocks. Results older than one already surfaced are logged at
    /// debug level and discarded, which keeps out-of-order completions from
    /// reverting a newer texture.
    pub fn poll_latest(&mut self) -> Option<LoadOutcome> {
        let mut newest: Option<LoadOutcome> = None;
        loop {
            match self.receiver.try_recv() {
                Ok(outcome) => {
                    if outcome.seq <= self.high_water {
                        log::debug!(
                            "texture load {} for {} arrived stale, dropping",
                            outcome.seq,
                            outcome.source
                        );
                        continue;
                    }
                    match &newest {
                        Some(best) if best.seq >= outcome.seq => {
                            log::debug!(
                                "texture load {} for {} superseded by {}",
                                outcome.seq,
                                outcome.source,
                                best.seq
                            );
                        }
                        _ => newest = Some(outcome),
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if let Some(outcome) = &newest {
            self.high_water = outcome.seq;
        }
        newest
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn outcome(seq: u64, source: &str) -> LoadOutcome {
        LoadOutcome {
            seq,
            target: 0,
            source: source.to_string(),
            result: Ok(ImagePixels::solid(1, 1, [0, 0, 0, 255])),
        }
    }

    #[test]
    fn test_poll_empty() {
        let mut loader = TextureLoader::new();
        assert!(loader.poll_latest().is_none());
    }

    #[test]
    fn test_newest_wins_within_batch() {
        let mut loader = TextureLoader::new();
        // Completions arrive out of order in one frame
        loader.sender.send(outcome(2, "b.png")).unwrap();
        loader.sender.send(outcome(1, "a.png")).unwrap();
        loader.sender.send(outcome(3, "c.png")).unwrap();

        let latest = loader.poll_latest().unwrap();
        assert_eq!(latest.seq, 3);
        assert_eq!(latest.source, "c.png");
        assert!(loader.poll_latest().is_none());
    }

    #[test]
    fn test_stale_result_dropped_across_polls() {
        let mut loader = TextureLoader::new();
        loader.sender.send(outcome(2, "b.png")).unwrap();
        assert_eq!(loader.poll_latest().unwrap().seq, 2);

        // An older request finishing later must not win
        loader.sender.send(outcome(1, "a.png")).unwrap();
        assert!(loader.poll_latest().is_none());

        loader.sender.send(outcome(3, "c.png")).unwrap();
        assert_eq!(loader.poll_latest().unwrap().seq, 3);
    }

    #[test]
    fn test_request_reports_missing_file() {
        let mut loader = TextureLoader::new();
        let seq = loader.request("definitely/not/a/real/image.png", 0);
        assert_eq!(seq, 1);

        // The worker should report back shortly
        let mut waited = Duration::ZERO;
        loop {
            if let Some(outcome) = loader.poll_latest() {
                assert_eq!(outcome.seq, seq);
                assert!(outcome.result.is_err());
                break;
            }
            assert!(waited < Duration::from_secs(5), "worker never reported");
            thread::sleep(Duration::from_millis(10));
            waited += Duration::from_millis(10);
        }
    }
}
