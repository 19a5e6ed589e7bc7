use std::path::{Path, PathBuf};

use forms::{FileInfo, FilePicker, PickError, PickOutcome, PickRequest};
use tracing::debug;

/// Terminal stand-in for a platform file dialog: resolves the paths typed
/// into the path prompt.
#[derive(Debug, Clone, Default)]
pub struct PathPicker {
    paths: Vec<PathBuf>,
}

impl PathPicker {
    pub fn new(paths: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            paths: paths
                .into_iter()
                .filter_map(|p| expand(p.as_ref().trim()))
                .collect(),
        }
    }

    /// Split prompt input on `,`. Blank entries are dropped.
    pub fn parse(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn expand(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        return None;
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return Some(dirs.home_dir().join(rest));
        }
    }
    Some(PathBuf::from(raw))
}

impl FilePicker for PathPicker {
    async fn pick(&self, request: &PickRequest) -> Result<PickOutcome, PickError> {
        if self.paths.is_empty() {
            return Ok(PickOutcome::Cancelled);
        }
        let take = if request.multiple { self.paths.len() } else { 1 };

        let mut picked = Vec::with_capacity(take);
        for path in self.paths.iter().take(take) {
            let info = describe(path).await?;
            if let Some(accept) = request.accept.as_deref() {
                if !accepts(accept, &info) {
                    debug!(file = %info.name, accept, "file outside accept filter");
                }
            }
            picked.push(info);
        }
        Ok(PickOutcome::Picked(picked))
    }
}

async fn describe(path: &Path) -> Result<FileInfo, PickError> {
    let meta = tokio::fs::metadata(path).await?;
    if !meta.is_file() {
        return Err(PickError::NotAFile(path.display().to_string()));
    }
    let absolute = tokio::fs::canonicalize(path).await?;
    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| absolute.display().to_string());

    let mut info = FileInfo::new(format!("file://{}", absolute.display()), name).with_size(meta.len());
    if let Some(mime) = mime_for(&absolute) {
        info = info.with_mime_type(mime);
    }
    Ok(info)
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "json" => "application/json",
        "zip" => "application/zip",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        _ => return None,
    };
    Some(mime)
}

/// Match an `accept` list (`image/*, .pdf, text/plain`) against a file.
pub fn accepts(accept: &str, info: &FileInfo) -> bool {
    let name = info.name.to_ascii_lowercase();
    let mime = info.mime_type.as_deref().unwrap_or_default();
    let mut tokens = accept.split(',').map(str::trim).filter(|t| !t.is_empty()).peekable();
    if tokens.peek().is_none() {
        return true;
    }
    tokens.any(|token| {
        let token = token.to_ascii_lowercase();
        if token.starts_with('.') {
            name.ends_with(&token)
        } else if let Some(prefix) = token.strip_suffix("/*") {
            mime.split('/').next() == Some(prefix)
        } else {
            mime == token
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn request(multiple: bool) -> PickRequest {
        PickRequest {
            multiple,
            accept: None,
        }
    }

    #[test]
    fn parse_splits_on_commas() {
        assert_eq!(
            PathPicker::parse(" a.pdf, ,b.png ,"),
            vec!["a.pdf".to_string(), "b.png".to_string()]
        );
        assert!(PathPicker::parse("   ").is_empty());
    }

    #[test]
    fn accept_matches_extension_and_mime() {
        let pdf = FileInfo::new("file:///a.PDF", "a.PDF").with_mime_type("application/pdf");
        let png = FileInfo::new("file:///b.png", "b.png").with_mime_type("image/png");
        assert!(accepts(".pdf", &pdf));
        assert!(accepts("image/*", &png));
        assert!(!accepts("image/*", &pdf));
        assert!(accepts("application/pdf, image/*", &png));
        assert!(accepts(" , ", &pdf));
    }

    #[tokio::test]
    async fn no_paths_is_a_cancellation() {
        let outcome = PathPicker::default().pick(&request(true)).await.unwrap();
        assert_eq!(outcome, PickOutcome::Cancelled);
    }

    #[tokio::test]
    async fn resolves_size_name_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("receipt.pdf");
        let b = dir.path().join("shelf.png");
        fs::write(&a, vec![0u8; 2048]).unwrap();
        fs::write(&b, b"png").unwrap();

        let picker = PathPicker::new([a.display().to_string(), b.display().to_string()]);
        let PickOutcome::Picked(files) = picker.pick(&request(true)).await.unwrap() else {
            panic!("expected picked files");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "receipt.pdf");
        assert_eq!(files[0].size, Some(2048));
        assert_eq!(files[0].mime_type.as_deref(), Some("application/pdf"));
        assert!(files[0].uri.starts_with("file://"));
        assert_eq!(files[1].mime_type.as_deref(), Some("image/png"));

        let PickOutcome::Picked(single) = picker.pick(&request(false)).await.unwrap() else {
            panic!("expected picked file");
        };
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].name, "receipt.pdf");
    }

    #[tokio::test]
    async fn directories_and_missing_paths_fail() {
        let dir = tempfile::tempdir().unwrap();
        let picker = PathPicker::new([dir.path().display().to_string()]);
        assert!(matches!(
            picker.pick(&request(false)).await,
            Err(PickError::NotAFile(_))
        ));

        let missing = PathPicker::new([dir.path().join("nope.txt").display().to_string()]);
        assert!(matches!(
            missing.pick(&request(false)).await,
            Err(PickError::Io(_))
        ));
    }
}
