use ringbuf::{
    traits::{Consumer, Observer, Producer, Split},
    CachingCons, CachingProd, HeapRb,
};
use std::sync::Arc;

/// Feeder-side handle of the sample queue.
pub struct SampleProducer {
    inner: CachingProd<Arc<HeapRb<f32>>>,
}

/// Sink-side handle of the sample queue. Lives on the audio thread.
pub struct SampleConsumer {
    inner: CachingCons<Arc<HeapRb<f32>>>,
}

impl SampleProducer {
    /// Returns the number of samples actually queued.
    pub fn push_slice(&mut self, samples: &[f32]) -> usize {
        self.inner.push_slice(samples)
    }

    pub fn vacant_len(&self) -> usize {
        self.inner.vacant_len()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity().get()
    }
}

impl SampleConsumer {
    /// Returns the number of samples written into `samples`.
    pub fn pop_slice(&mut self, samples: &mut [f32]) -> usize {
        self.inner.pop_slice(samples)
    }
}

/// Lock-free single-producer single-consumer queue of interleaved samples.
/// Holds at least one sample.
pub fn create_sample_queue(capacity: usize) -> (SampleProducer, SampleConsumer) {
    let rb = HeapRb::<f32>::new(capacity.max(1));
    let (prod, cons) = rb.split();
    (SampleProducer { inner: prod }, SampleConsumer { inner: cons })
}
