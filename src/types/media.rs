//! Uploaded media handed over by the web layer

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CaptionError;
use crate::utils::mime;

/// Raw upload plus its declared metadata.
///
/// The bytes are reference counted so concurrent model comparisons share one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInput {
    data: Arc<[u8]>,
    filename: String,
    content_type: Option<String>,
}

impl MediaInput {
    pub fn new(data: impl Into<Arc<[u8]>>, filename: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            filename: filename.into(),
            content_type: None,
        }
    }

    /// Attach the content type declared by the uploader
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Image content type sent to vision backends, derived from the filename
    pub fn image_mime_type(&self) -> &'static str {
        mime::image_mime_for_filename(&self.filename)
    }

    pub fn base64_data(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Required fields are present
    pub fn validate(&self) -> Result<(), CaptionError> {
        if self.data.is_empty() {
            return Err(CaptionError::Validation("Media payload is empty".into()));
        }
        if self.filename.trim().is_empty() {
            return Err(CaptionError::Validation("Media filename is required".into()));
        }
        Ok(())
    }

    /// Check that the upload is an image or a video.
    ///
    /// Uses the declared content type, or a guess from the bytes and filename
    /// when none was declared. Callers run this before handing media over.
    pub fn validate_content_type(&self) -> Result<(), CaptionError> {
        let effective = match &self.content_type {
            Some(declared) => declared.clone(),
            None => mime::guess_mime(Some(self.data()), Some(self.filename.as_str())),
        };
        if effective.starts_with("image/") || effective.starts_with("video/") {
            Ok(())
        } else {
            Err(CaptionError::Validation(format!(
                "File must be an image or video (got {effective})"
            )))
        }
    }
}
