use fedpack_error::BuildResult;

use super::manifest::ContainerManifest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerArtifact {
  pub filename: String,
  /// Content hash of the manifest the artifact was built from.
  pub hash: String,
}

/// Produces the remote container artifact from a manifest. The bundler that
/// actually emits the code lives behind this trait.
#[allow(async_fn_in_trait)]
pub trait ContainerBuilder: Send + Sync {
  async fn build(&self, manifest: &ContainerManifest) -> BuildResult<ContainerArtifact>;
}
