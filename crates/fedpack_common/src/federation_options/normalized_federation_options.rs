use std::path::PathBuf;

use crate::{InputItem, Platform};

pub const DEFAULT_CONTAINER_NAME: &str = "fedpack_remote";
pub const DEFAULT_CONTAINER_FILENAME: &str = "remoteEntry.js";

#[derive(Debug, Clone)]
pub struct NormalizedFederationOptions {
  // --- Application
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
  pub platform: Platform,

  // --- Remote container
  pub name: String,
  pub filename: String,
  pub dir: String,
}

impl NormalizedFederationOptions {
  /// Where the container artifact is written, relative to `cwd`.
  pub fn container_path(&self) -> PathBuf {
    self.cwd.join(&self.dir).join(&self.filename)
  }
}
