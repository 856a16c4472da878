//! External background-removal collaborator seam
//!
//! The pipeline treats background removal as an opaque `bytes -> bytes`
//! function behind the [`BackgroundRemover`] trait. The production
//! implementation delegates to the `imgly-bgremove` crate; tests substitute
//! mock removers.

use crate::error::{RemovalError, Result};
use async_trait::async_trait;
use imgly_bgremove::{
    BackendFactory, BackendType, BackgroundRemovalProcessor, BgRemovalError, ExecutionProvider,
    InferenceBackend, ModelCache, ModelDownloader, ModelManager, ModelSource, ModelSpec,
    OutputFormat, ProcessorConfigBuilder, TractBackend,
};
use tracing::{debug, info};

/// Backend factory that injects the pure Rust Tract backend
///
/// The collaborator's default factory creates no backends; frontends inject
/// their own. This tool only ever runs Tract on CPU.
#[derive(Debug)]
struct TractBackendFactory;

impl BackendFactory for TractBackendFactory {
    fn create_backend(
        &self,
        backend_type: BackendType,
        model_manager: ModelManager,
    ) -> imgly_bgremove::Result<Box<dyn InferenceBackend>> {
        match backend_type {
            BackendType::Tract => Ok(Box::new(TractBackend::with_model_manager(model_manager))),
            BackendType::Onnx => Err(BgRemovalError::invalid_config(
                "ONNX backend not available; only the Tract backend is wired in",
            )),
        }
    }

    fn available_backends(&self) -> Vec<BackendType> {
        vec![BackendType::Tract]
    }
}

/// Trait for the opaque external background-removal transform
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Run the external transform on raw image bytes
    ///
    /// # Errors
    /// - Collaborator-defined failures (undecodable image, model load or
    ///   inference errors), surfaced as `RemovalError::Transform`
    async fn remove(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Production remover backed by the `imgly-bgremove` crate
///
/// Runs the pure Rust Tract backend on CPU and encodes the result as PNG,
/// the collaborator's default output format. The model is resolved from the
/// collaborator's cache, auto-downloading the default model on first use.
pub struct ImglyRemover {
    model_spec: ModelSpec,
}

impl ImglyRemover {
    #[must_use]
    pub fn new() -> Self {
        Self {
            model_spec: ModelSpec {
                source: ModelSource::Downloaded(ModelCache::get_default_model_id()),
                variant: None,
            },
        }
    }

    /// Ensure the model is available in the collaborator cache
    async fn ensure_model_available(&self) -> Result<()> {
        let ModelSource::Downloaded(model_id) = &self.model_spec.source else {
            return Ok(());
        };

        let cache = ModelCache::new()
            .map_err(|e| RemovalError::transform(format!("failed to open model cache: {e}")))?;

        if cache.is_model_cached(model_id) {
            return Ok(());
        }

        if *model_id != ModelCache::get_default_model_id() {
            return Err(RemovalError::transform(format!(
                "model '{model_id}' not found in cache"
            )));
        }

        info!("Default model not cached, downloading");
        let downloader = ModelDownloader::new()
            .map_err(|e| RemovalError::transform(format!("failed to create downloader: {e}")))?;
        downloader
            .download_model(ModelCache::get_default_model_url(), false)
            .await
            .map_err(|e| {
                RemovalError::transform(format!("failed to download default model: {e}"))
            })?;

        Ok(())
    }

    /// Build the collaborator processor with the Tract backend injected
    fn build_processor(&self) -> Result<BackgroundRemovalProcessor> {
        let config = ProcessorConfigBuilder::new()
            .model_spec(self.model_spec.clone())
            .backend_type(BackendType::Tract)
            .execution_provider(ExecutionProvider::Cpu)
            .output_format(OutputFormat::Png)
            .build()
            .map_err(|e| RemovalError::transform(format!("invalid processor config: {e}")))?;

        BackgroundRemovalProcessor::with_factory(config, Box::new(TractBackendFactory))
            .map_err(|e| RemovalError::transform(format!("failed to create processor: {e}")))
    }
}

impl Default for ImglyRemover {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackgroundRemover for ImglyRemover {
    async fn remove(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.ensure_model_available().await?;

        let image = image::load_from_memory(input)
            .map_err(|e| RemovalError::transform(format!("failed to decode image: {e}")))?;
        debug!(input_bytes = input.len(), "decoded input image");

        let mut processor = self.build_processor()?;

        let result = processor
            .process_image(&image)
            .map_err(|e| RemovalError::transform(format!("background removal failed: {e}")))?;

        result
            .to_bytes(OutputFormat::Png, 100)
            .map_err(|e| RemovalError::transform(format!("failed to encode result: {e}")))
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    //! Mock removers for exercising the pipeline without a model

    use crate::error::{RemovalError, Result};
    use async_trait::async_trait;

    use super::BackgroundRemover;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Remover that returns fixed bytes and counts invocations
    pub(crate) struct MockRemover {
        output: Vec<u8>,
        calls: AtomicUsize,
    }

    impl MockRemover {
        pub(crate) fn new(output: Vec<u8>) -> Self {
            Self {
                output,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BackgroundRemover for MockRemover {
        async fn remove(&self, _input: &[u8]) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
    }

    /// Remover that always fails, standing in for collaborator errors
    pub(crate) struct FailingRemover;

    #[async_trait]
    impl BackgroundRemover for FailingRemover {
        async fn remove(&self, _input: &[u8]) -> Result<Vec<u8>> {
            Err(RemovalError::transform("mock inference failure"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::{FailingRemover, MockRemover};
    use super::*;

    #[tokio::test]
    async fn test_mock_remover_returns_configured_bytes() {
        let remover = MockRemover::new(b"transformed".to_vec());
        let out = remover.remove(b"original").await.unwrap();
        assert_eq!(out, b"transformed");
        assert_eq!(remover.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_remover_surfaces_transform_error() {
        let err = FailingRemover.remove(b"original").await.unwrap_err();
        assert!(matches!(err, RemovalError::Transform(_)));
    }

    #[test]
    fn test_factory_offers_tract_backend_only() {
        let backends = TractBackendFactory.available_backends();
        assert_eq!(backends, vec![BackendType::Tract]);
    }

    #[test]
    fn test_processor_wiring_injects_tract_backend() {
        // The collaborator's default factory would refuse to build Tract;
        // the processor must carry the injecting factory instead.
        let processor = ImglyRemover::new().build_processor().unwrap();
        let backends = processor.available_backends();
        assert!(backends.contains(&BackendType::Tract));
        assert!(!backends.contains(&BackendType::Onnx));
    }

    #[test]
    fn test_default_remover_targets_default_model() {
        let remover = ImglyRemover::new();
        match &remover.model_spec.source {
            ModelSource::Downloaded(id) => {
                assert_eq!(*id, ModelCache::get_default_model_id());
            },
            other => panic!("unexpected model source: {other:?}"),
        }
    }
}
