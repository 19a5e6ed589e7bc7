//! File-picking boundary.
//!
//! The engine never touches a filesystem or a platform dialog itself. A
//! `FilePicker` implementation is handed to `FormController::pick_files` and
//! answers a `PickRequest` with either a cancellation or the picked files.
//! Cancellation is an ordinary outcome, distinct from `PickError`.

use std::future::Future;

use thiserror::Error;

use crate::field::FileAttrs;
use crate::value::FileInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickRequest {
    pub multiple: bool,
    /// Advisory MIME / extension filter.
    pub accept: Option<String>,
}

impl PickRequest {
    pub fn for_field(attrs: &FileAttrs) -> Self {
        Self {
            multiple: attrs.multiple,
            accept: attrs.accept.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Cancelled,
    Picked(Vec<FileInfo>),
}

#[derive(Debug, Error)]
pub enum PickError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}: not a regular file")]
    NotAFile(String),

    #[error("picker unavailable: {0}")]
    Unavailable(String),
}

/// External file-picking capability.
pub trait FilePicker {
    fn pick(
        &self,
        request: &PickRequest,
    ) -> impl Future<Output = Result<PickOutcome, PickError>> + Send;
}
