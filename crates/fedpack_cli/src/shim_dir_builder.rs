use std::path::PathBuf;

use anyhow::Context;
use fedpack::{BuildResult, ContainerArtifact, ContainerBuilder, ContainerManifest};

/// Writes every shim next to a remote entry that loads them on demand. The
/// output is meant to be fed to a bundler, not served as is.
pub struct ShimDirBuilder {
  dir: PathBuf,
}

impl ShimDirBuilder {
  pub fn new(dir: PathBuf) -> Self {
    Self { dir }
  }

  fn remote_entry(manifest: &ContainerManifest) -> String {
    let mut content = String::from("const exposes = {\n");
    for module in manifest.exposes.values() {
      content.push_str(&format!(
        "  '{}': () => import('./{}.js'),\n",
        module.expose_key(),
        module.chunk_name
      ));
    }
    content.push_str("};\n\n");
    content.push_str("export const get = (key) => exposes[key]();\n");
    content
  }
}

impl ContainerBuilder for ShimDirBuilder {
  async fn build(&self, manifest: &ContainerManifest) -> BuildResult<ContainerArtifact> {
    tokio::fs::create_dir_all(&self.dir)
      .await
      .with_context(|| format!("failed to create {}", self.dir.display()))?;

    for module in manifest.exposes.values() {
      let path = self.dir.join(format!("{}.js", module.chunk_name));
      tokio::fs::write(&path, module.shim.as_bytes())
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let path = self.dir.join(&manifest.filename);
    tokio::fs::write(&path, Self::remote_entry(manifest))
      .await
      .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(ContainerArtifact { filename: manifest.filename.clone(), hash: manifest.content_hash() })
  }
}
