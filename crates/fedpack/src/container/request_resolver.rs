use std::path::PathBuf;

use fedpack_error::ShimError;
use fedpack_resolver::Resolver;

/// Maps a dependency request to the file the export analyzer reads.
pub trait RequestResolver: Send + Sync {
  fn resolve(&self, request: &str) -> Result<PathBuf, ShimError>;
}

impl RequestResolver for Resolver {
  fn resolve(&self, request: &str) -> Result<PathBuf, ShimError> {
    Resolver::resolve(self, request)
  }
}
