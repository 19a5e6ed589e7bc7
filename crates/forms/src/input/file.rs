//! File attach / detach rules.

use std::slice;

use crate::field::FileAttrs;
use crate::validate::FieldError;
use crate::value::{FieldValue, FileInfo};

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// Files held by a file field's value, whatever its shape.
pub fn files_of(value: &FieldValue) -> &[FileInfo] {
    match value {
        FieldValue::File(file) => slice::from_ref(file),
        FieldValue::Files(files) => files,
        _ => &[],
    }
}

/// Byte ceiling derived from `maxSizeMB`.
pub fn max_bytes(attrs: &FileAttrs) -> Option<f64> {
    attrs.max_size_mb.map(|mb| mb * MB)
}

/// Whole-batch size check. The first file over the limit rejects the batch;
/// files without a known size pass.
pub fn check_sizes(attrs: &FileAttrs, batch: &[FileInfo]) -> Result<(), FieldError> {
    let (Some(limit), Some(max_mb)) = (max_bytes(attrs), attrs.max_size_mb) else {
        return Ok(());
    };
    match batch
        .iter()
        .find(|f| f.size.is_some_and(|size| size as f64 > limit))
    {
        Some(file) => Err(FieldError::FileTooLarge {
            name: file.name.clone(),
            max_mb,
        }),
        None => Ok(()),
    }
}

/// New value after attaching `batch`: appended in multi mode, replacing
/// the current file in single mode. An empty batch changes nothing.
pub fn attach(attrs: &FileAttrs, current: &FieldValue, batch: Vec<FileInfo>) -> FieldValue {
    if batch.is_empty() {
        return current.clone();
    }
    if attrs.multiple {
        let mut files = files_of(current).to_vec();
        files.extend(batch);
        FieldValue::Files(files)
    } else {
        batch
            .into_iter()
            .next()
            .map_or_else(|| current.clone(), FieldValue::File)
    }
}

/// Remove the file at `index`. Multi mode splices it out, single mode clears
/// the field. `None` when there is nothing at `index`.
pub fn remove(attrs: &FileAttrs, current: &FieldValue, index: usize) -> Option<FieldValue> {
    let files = files_of(current);
    if index >= files.len() {
        return None;
    }
    if attrs.multiple {
        let mut files = files.to_vec();
        files.remove(index);
        Some(FieldValue::Files(files))
    } else {
        Some(FieldValue::Null)
    }
}

/// Human-readable size: `"512 B"`, `"1.5 KB"`, `"2.0 MB"`. Unknown or zero
/// sizes render empty.
pub fn format_size(size: Option<u64>) -> String {
    match size {
        None | Some(0) => String::new(),
        Some(bytes) if (bytes as f64) < KB => format!("{bytes} B"),
        Some(bytes) if (bytes as f64) < MB => format!("{:.1} KB", bytes as f64 / KB),
        Some(bytes) => format!("{:.1} MB", bytes as f64 / MB),
    }
}
