use std::{
    env,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TRANSCRIPT_PATH: &str = "api_calls.log";

pub const BASE_URL_VAR: &str = "NHNKCP_BASE_URL";
pub const TRANSCRIPT_PATH_VAR: &str = "NHNKCP_LOG_PATH";

/// Builder used to build an ExerciserConfig instance
#[derive(Debug, Clone, Default)]
pub struct ExerciserConfigBuilder {
    base_url: Option<String>,
    transcript_path: Option<PathBuf>,
}

impl ExerciserConfigBuilder {
    /// Create a new ExerciserConfigBuilder instance.
    pub fn new() -> Self {
        Self {
            base_url: None,
            transcript_path: None,
        }
    }

    /// Use the given base URL for every call.
    ///
    /// # Arguments
    /// `base_url` - scheme, host and port of the target API, without a trailing path.
    ///
    /// # Returns
    /// This builder.
    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Write the transcript to the given file.
    ///
    /// # Arguments
    /// `path` - the transcript file. Missing parent directories are created when the run starts.
    ///
    /// # Returns
    /// This builder.
    pub fn with_transcript_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.transcript_path = Some(path.into());
        self
    }

    /// Consume the builder and create an ExerciserConfig using the configured values or their
    /// defaults.
    pub fn build(mut self) -> ExerciserConfig {
        ExerciserConfig {
            base_url: self
                .base_url
                .take()
                .unwrap_or_else(|| String::from(DEFAULT_BASE_URL)),
            transcript_path: self
                .transcript_path
                .take()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSCRIPT_PATH)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExerciserConfig {
    base_url: String,
    transcript_path: PathBuf,
}

impl ExerciserConfig {
    /// Reads `NHNKCP_BASE_URL` and `NHNKCP_LOG_PATH`. Unset or empty variables fall back to the
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut builder = ExerciserConfigBuilder::new();

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            builder = builder.with_base_url(base_url);
        }

        if let Some(path) = lookup(TRANSCRIPT_PATH_VAR).filter(|v| !v.is_empty()) {
            builder = builder.with_transcript_path(path);
        }

        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transcript_path(&self) -> &Path {
        &self.transcript_path
    }
}

impl Default for ExerciserConfig {
    fn default() -> Self {
        ExerciserConfigBuilder::new().build()
    }
}
