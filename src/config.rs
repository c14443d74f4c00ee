//! Configuration types for a counting run.
//!
//! All run behaviour is controlled through [`CountConfig`], built via its
//! [`CountConfigBuilder`]. The PDF engine is part of the configuration so
//! that callers (and tests) can inject their own instead of PDFium.

use crate::engine::{PdfEngine, PdfiumEngine};
use crate::error::TokenCountError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default soft limit on input size: 50 MB.
pub const DEFAULT_SOFT_SIZE_LIMIT: u64 = 50 * 1024 * 1024;

/// Configuration for a counting run.
///
/// # Example
/// ```rust
/// use pdf_token_counter::CountConfig;
///
/// let config = CountConfig::builder()
///     .password("hunter2")
///     .soft_size_limit_bytes(10 * 1024 * 1024)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct CountConfig {
    /// Pre-constructed engine. Takes precedence over `pdfium_library_path`.
    pub engine: Option<Arc<dyn PdfEngine>>,

    /// PDFium library file or directory. If None, uses the default search.
    pub pdfium_library_path: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Inputs larger than this are processed anyway but logged with a
    /// warning. Default: 50 MB.
    pub soft_size_limit_bytes: u64,

    /// Receives per-page events. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            engine: None,
            pdfium_library_path: None,
            password: None,
            soft_size_limit_bytes: DEFAULT_SOFT_SIZE_LIMIT,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for CountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountConfig")
            .field("engine", &self.engine.as_ref().map(|e| e.name().to_string()))
            .field("pdfium_library_path", &self.pdfium_library_path)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("soft_size_limit_bytes", &self.soft_size_limit_bytes)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn CountProgressCallback>"),
            )
            .finish()
    }
}

impl CountConfig {
    /// Create a new builder for `CountConfig`.
    pub fn builder() -> CountConfigBuilder {
        CountConfigBuilder {
            config: Self::default(),
        }
    }

    /// The engine a run will use: the injected one, else PDFium.
    pub fn resolve_engine(&self) -> Arc<dyn PdfEngine> {
        if let Some(ref engine) = self.engine {
            return Arc::clone(engine);
        }
        match self.pdfium_library_path {
            Some(ref path) => Arc::new(PdfiumEngine::with_library_path(path.clone())),
            None => Arc::new(PdfiumEngine::new()),
        }
    }
}

/// Builder for [`CountConfig`].
#[derive(Debug)]
pub struct CountConfigBuilder {
    config: CountConfig,
}

impl CountConfigBuilder {
    pub fn engine(mut self, engine: Arc<dyn PdfEngine>) -> Self {
        self.config.engine = Some(engine);
        self
    }

    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn soft_size_limit_bytes(mut self, bytes: u64) -> Self {
        self.config.soft_size_limit_bytes = bytes;
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<CountConfig, TokenCountError> {
        if self.config.soft_size_limit_bytes == 0 {
            return Err(TokenCountError::InvalidConfig(
                "Soft size limit must be ≥ 1 byte".into(),
            ));
        }
        Ok(self.config)
    }
}
