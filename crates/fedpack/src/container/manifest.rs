use std::path::PathBuf;

use arcstr::ArcStr;
use fedpack_common::Dependency;
use fedpack_utils::{
  concat_string, indexmap::FxIndexMap, sanitize_file_name::sanitize_file_name,
  xxhash::xxhash_base64_url,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedModule {
  pub dependency: Dependency,
  /// The file the dependency resolved to.
  pub file_path: PathBuf,
  /// Virtual module id of the shim inside the container.
  pub id: String,
  /// Chunk name the container bundler should use for this module.
  pub chunk_name: String,
  pub shim: String,
}

impl ExposedModule {
  pub const VIRTUAL_ID_PREFIX: &'static str = "\0fedpack-shim:";

  pub fn new(dependency: Dependency, file_path: PathBuf, shim: String) -> Self {
    let id = concat_string!(Self::VIRTUAL_ID_PREFIX, dependency.request());
    let chunk_name = sanitize_file_name(dependency.request());
    Self { dependency, file_path, id, chunk_name, shim }
  }

  /// The key consumers import the module by, e.g. `remote/./lodash`.
  pub fn expose_key(&self) -> String {
    concat_string!("./", self.dependency.request())
  }
}

/// Returns `name`, or `name` with the first free `_<n>` suffix when another
/// exposed module already owns that chunk name. Distinct requests can sanitize
/// to the same name, e.g. `lodash/fp` and `lodash_fp`.
pub fn unique_chunk_name(exposes: &FxIndexMap<ArcStr, ExposedModule>, name: String) -> String {
  let is_taken = |candidate: &str| exposes.values().any(|module| module.chunk_name == candidate);
  if !is_taken(&name) {
    return name;
  }
  let mut idx = 1usize;
  loop {
    let candidate = format!("{name}_{idx}");
    if !is_taken(&candidate) {
      return candidate;
    }
    idx += 1;
  }
}

/// Everything the container builder needs, in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerManifest {
  pub name: String,
  pub filename: String,
  pub exposes: FxIndexMap<ArcStr, ExposedModule>,
}

impl ContainerManifest {
  /// Hash over everything that ends up in the container. Identical manifests
  /// always hash the same, so it can version the served artifact.
  pub fn content_hash(&self) -> String {
    let mut content = String::new();
    for part in [self.name.as_str(), self.filename.as_str()] {
      content.push_str(part);
      content.push('\0');
    }
    for module in self.exposes.values() {
      content.push_str(&module.expose_key());
      content.push('\0');
      content.push_str(&module.shim);
      content.push('\0');
    }
    xxhash_base64_url(content.as_bytes())
  }
}
