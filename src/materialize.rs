//! Image response materializer.
//!
//! Consumes a chunk stream to completion, printing text parts and writing
//! inline image payloads to disk. One linear pass; chunks without usable
//! content are skipped without comment.

use crate::ai::{mime, ChunkStream, ResponsePart};
use crate::Result;
use futures::StreamExt;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct ResponseMaterializer {
    output_spec: String,
    file_index: usize,
    saved: Vec<PathBuf>,
}

impl ResponseMaterializer {
    /// `output_spec` is either a full filename (`pic.png`) or a prefix
    /// (`pic`) from which sequential names are derived.
    pub fn new(output_spec: impl Into<String>) -> Self {
        Self {
            output_spec: output_spec.into(),
            file_index: 0,
            saved: Vec::new(),
        }
    }

    /// Drives the stream to completion and returns the paths written, in
    /// order. A stream-level error aborts the pass; files already written
    /// remain on disk.
    pub async fn consume(mut self, mut chunks: ChunkStream) -> Result<Vec<PathBuf>> {
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;

            let Some(content) = chunk.candidates.first().and_then(|c| c.content.as_ref()) else {
                continue;
            };

            for part in &content.parts {
                self.handle_part(part);
            }
        }

        if self.saved.is_empty() {
            info!("No images were generated");
        }

        Ok(self.saved)
    }

    fn handle_part(&mut self, part: &ResponsePart) {
        match part {
            ResponsePart::Image { mime_type, data } if !data.is_empty() => {
                let extension = mime::extension_for(mime_type);
                let path = self.output_path(extension);
                // A failed write is reported and skipped; later parts in the
                // stream still get a chance to land.
                match fs::write(&path, data) {
                    Ok(()) => {
                        info!("File saved to: {}", path.display());
                        self.file_index += 1;
                        self.saved.push(path);
                    }
                    Err(e) => warn!("Error saving {}: {}", path.display(), e),
                }
            }
            ResponsePart::Text(text) if !text.is_empty() => {
                info!("Model: {}", text);
            }
            _ => {}
        }
    }

    /// A spec already ending in the guessed extension is used verbatim;
    /// otherwise names are `<prefix>_<index><extension>` starting at 0.
    fn output_path(&self, extension: &str) -> PathBuf {
        if self.output_spec.ends_with(extension) {
            PathBuf::from(&self.output_spec)
        } else {
            PathBuf::from(format!(
                "{}_{}{}",
                self.output_spec, self.file_index, extension
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Candidate, CandidateContent, ResponseChunk};
    use futures::stream;
    use pretty_assertions::assert_eq;

    fn chunk_with_parts(parts: Vec<ResponsePart>) -> ResponseChunk {
        ResponseChunk {
            candidates: vec![Candidate {
                content: Some(CandidateContent { parts }),
            }],
        }
    }

    fn image_part(mime_type: &str, data: &[u8]) -> ResponsePart {
        ResponsePart::Image {
            mime_type: mime_type.to_string(),
            data: data.to_vec(),
        }
    }

    fn stream_of(chunks: Vec<ResponseChunk>) -> ChunkStream {
        Box::pin(stream::iter(chunks.into_iter().map(Ok)))
    }

    #[tokio::test]
    async fn test_chunk_without_candidates_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();

        let chunks = stream_of(vec![ResponseChunk { candidates: vec![] }]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert!(saved.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_candidate_without_content_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();

        let chunks = stream_of(vec![ResponseChunk {
            candidates: vec![Candidate { content: None }],
        }]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert!(saved.is_empty());
    }

    #[tokio::test]
    async fn test_text_only_chunk_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();

        let chunks = stream_of(vec![chunk_with_parts(vec![ResponsePart::Text(
            "rendering a banana".to_string(),
        )])]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert!(saved.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_png_payload_written_with_indexed_name() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();
        let payload = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];

        let chunks = stream_of(vec![chunk_with_parts(vec![image_part(
            "image/png", &payload,
        )])]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert_eq!(saved, vec![dir.path().join("pic_0.png")]);
        assert_eq!(fs::read(&saved[0]).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_full_filename_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic.png").to_string_lossy().to_string();

        let chunks = stream_of(vec![chunk_with_parts(vec![image_part(
            "image/png",
            &[1, 2, 3],
        )])]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert_eq!(saved, vec![dir.path().join("pic.png")]);
    }

    #[tokio::test]
    async fn test_two_images_get_sequential_indices() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();

        let chunks = stream_of(vec![
            chunk_with_parts(vec![image_part("image/jpeg", &[1])]),
            chunk_with_parts(vec![image_part("image/jpeg", &[2])]),
        ]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert_eq!(
            saved,
            vec![dir.path().join("pic_0.jpg"), dir.path().join("pic_1.jpg")]
        );
        assert_eq!(fs::read(&saved[0]).unwrap(), vec![1]);
        assert_eq!(fs::read(&saved[1]).unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_empty_payload_and_empty_text_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();

        let chunks = stream_of(vec![chunk_with_parts(vec![
            image_part("image/png", &[]),
            ResponsePart::Text(String::new()),
        ])]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert!(saved.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_only_first_candidate_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();

        let chunks = stream_of(vec![ResponseChunk {
            candidates: vec![
                Candidate {
                    content: Some(CandidateContent {
                        parts: vec![image_part("image/png", &[1])],
                    }),
                },
                Candidate {
                    content: Some(CandidateContent {
                        parts: vec![image_part("image/png", &[2])],
                    }),
                },
            ],
        }]);
        let saved = ResponseMaterializer::new(&spec).consume(chunks).await.unwrap();

        assert_eq!(saved.len(), 1);
        assert_eq!(fs::read(&saved[0]).unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_failed_write_skips_part_but_continues() {
        let dir = tempfile::tempdir().unwrap();
        // First write targets a directory path that does not exist.
        let bad_spec = dir.path().join("missing/pic").to_string_lossy().to_string();

        let chunks = stream_of(vec![chunk_with_parts(vec![
            image_part("image/png", &[1]),
            ResponsePart::Text("still here".to_string()),
        ])]);
        let saved = ResponseMaterializer::new(&bad_spec)
            .consume(chunks)
            .await
            .unwrap();

        assert!(saved.is_empty());
    }

    #[tokio::test]
    async fn test_stream_error_aborts_but_keeps_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("pic").to_string_lossy().to_string();

        let items: Vec<crate::Result<ResponseChunk>> = vec![
            Ok(chunk_with_parts(vec![image_part("image/png", &[9])])),
            Err(crate::Error::AiProvider("connection reset".to_string())),
        ];
        let chunks: ChunkStream = Box::pin(stream::iter(items));

        let err = ResponseMaterializer::new(&spec)
            .consume(chunks)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::AiProvider(_)));
        assert_eq!(
            fs::read(dir.path().join("pic_0.png")).unwrap(),
            vec![9]
        );
    }
}
