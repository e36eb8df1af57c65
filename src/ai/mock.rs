use super::{ChunkStream, ImageStreamService, ResponseChunk};
use crate::{Error, Result};
use async_trait::async_trait;
use futures::stream;
use std::sync::{Arc, Mutex};

/// Replays preconfigured chunks as a stream, for tests and harnesses.
pub struct MockImageStreamClient {
    chunks: Arc<Mutex<Vec<ResponseChunk>>>,
    trailing_error: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageStreamClient {
    pub fn new() -> Self {
        Self {
            chunks: Arc::new(Mutex::new(Vec::new())),
            trailing_error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_chunk(self, chunk: ResponseChunk) -> Self {
        self.chunks.lock().unwrap().push(chunk);
        self
    }

    /// Makes the stream end with an error item after the configured chunks.
    pub fn with_trailing_error(self, message: impl Into<String>) -> Self {
        *self.trailing_error.lock().unwrap() = Some(message.into());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageStreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStreamService for MockImageStreamClient {
    async fn stream_generate(&self, _prompt: &str) -> Result<ChunkStream> {
        *self.call_count.lock().unwrap() += 1;

        let mut items: Vec<Result<ResponseChunk>> = self
            .chunks
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(Ok)
            .collect();
        if let Some(message) = self.trailing_error.lock().unwrap().clone() {
            items.push(Err(Error::AiProvider(message)));
        }

        Ok(Box::pin(stream::iter(items)))
    }
}
