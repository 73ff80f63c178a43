use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

use crate::player::buffer::SampleProducer;
use crate::player::SampleSource;

/// Free space wanted before another block is pulled from the source. Queues
/// smaller than twice this wait for half their capacity instead.
pub const LOW_WATER: usize = 1024;

fn low_water(capacity: usize) -> usize {
    LOW_WATER.min(capacity / 2).max(1)
}

/// Background thread moving samples from a source into the queue.
pub struct Feeder {
    running: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Feeder {
    pub fn spawn(mut source: Box<dyn SampleSource>, mut producer: SampleProducer) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let finished = Arc::new(AtomicBool::new(false));
        let running_in_thread = running.clone();
        let finished_in_thread = finished.clone();
        let threshold = low_water(producer.capacity());

        let handle = thread::spawn(move || {
            while running_in_thread.load(Ordering::Relaxed) {
                if producer.vacant_len() < threshold {
                    thread::sleep(Duration::from_millis(10));
                    continue;
                }

                let Some(block) = source.next_block() else {
                    debug!("source exhausted");
                    break;
                };

                let mut pushed = 0;
                while pushed < block.len() && running_in_thread.load(Ordering::Relaxed) {
                    pushed += producer.push_slice(&block[pushed..]);
                    if pushed < block.len() {
                        thread::sleep(Duration::from_millis(5));
                    }
                }
            }
            finished_in_thread.store(true, Ordering::SeqCst);
        });

        Self {
            running,
            finished,
            handle: Some(handle),
        }
    }

    /// True once the source ran dry or the feeder was stopped.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Feeder {
    fn drop(&mut self) {
        self.stop();
    }
}
