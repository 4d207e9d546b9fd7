use std::path::PathBuf;

use forge_core::{
    application::{ApplicationError, ports::ByteSource},
    domain::RelativePath,
    error::ForgeResult,
};
use tracing::debug;

/// Byte source reading resource references relative to a root directory.
///
/// References are treated as relative paths; absolute references and any
/// reference containing `..` are refused.
#[derive(Debug, Clone)]
pub struct DirectoryByteSource {
    root: PathBuf,
}

impl DirectoryByteSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl ByteSource for DirectoryByteSource {
    fn read(&self, reference: &str) -> ForgeResult<Vec<u8>> {
        let relative = RelativePath::try_new(reference).map_err(|e| {
            ApplicationError::ResourceUnavailable {
                reference: reference.to_string(),
                reason: e.to_string(),
            }
        })?;

        let path = self.root.join(relative.to_path_buf());
        debug!(path = %path.display(), "reading binary resource");

        std::fs::read(&path).map_err(|e| {
            ApplicationError::ResourceUnavailable {
                reference: reference.to_string(),
                reason: format!("{}: {e}", path.display()),
            }
            .into()
        })
    }
}
