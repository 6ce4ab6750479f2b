use async_trait::async_trait;
use log::debug;
use pod_core::{AttachmentKind, AttachmentMetadata, AttachmentUpload, Dimensions, MetadataProbe, ServiceError};

use crate::latency::Latency;

/// Probe simulado: la duración del audio se estima por bitrate y las
/// imágenes reportan unas dimensiones fijas.
#[derive(Debug, Clone)]
pub struct SimulatedProbe {
    latency: Latency,
    bitrate_bps: u64,
    image: Dimensions,
}

impl SimulatedProbe {
    pub fn new(latency: Latency) -> Self {
        Self { latency,
               bitrate_bps: 128_000,
               image: Dimensions { width: 3000,
                                   height: 3000 } }
    }

    pub fn with_bitrate(mut self, bitrate_bps: u64) -> Self {
        self.bitrate_bps = bitrate_bps;
        self
    }

    pub fn with_image_dimensions(mut self, width: u32, height: u32) -> Self {
        self.image = Dimensions { width, height };
        self
    }

    fn duration_ms(&self, size_bytes: u64) -> Result<u64, ServiceError> {
        if self.bitrate_bps == 0 {
            return Err(ServiceError::Rejected("cannot decode audio with zero bitrate".into()));
        }
        Ok(size_bytes.saturating_mul(8_000) / self.bitrate_bps)
    }
}

/// Miniatura derivada del blob original.
fn preview_handle(upload: &AttachmentUpload) -> String {
    format!("{}#preview", upload.source_handle)
}

#[async_trait]
impl MetadataProbe for SimulatedProbe {
    async fn probe(&self, upload: &AttachmentUpload, kind: AttachmentKind) -> Result<AttachmentMetadata, ServiceError> {
        self.latency.wait().await;
        let meta = match kind {
            AttachmentKind::Audio => AttachmentMetadata { duration_ms: Some(self.duration_ms(upload.size_bytes)?),
                                                          ..AttachmentMetadata::default() },
            AttachmentKind::Image => AttachmentMetadata { duration_ms: None,
                                                          dimensions: Some(self.image),
                                                          preview_handle: Some(preview_handle(upload)) },
            AttachmentKind::Transcript => AttachmentMetadata::default(),
        };
        debug!("probed {} ({kind}): {meta:?}", upload.file_name);
        Ok(meta)
    }
}
