pub mod builder;
pub mod manifest;
pub mod request_resolver;
pub mod state;

use std::{path::Path, sync::Arc};

use anyhow::Context;
use arcstr::ArcStr;
use dashmap::DashMap;
use fedpack_common::{Dependency, FederationOptions, ModuleType, NormalizedFederationOptions};
use fedpack_ecmascript::OxcExportAnalyzer;
use fedpack_error::{BuildError, BuildResult};
use fedpack_fs::OsFileSystem;
use fedpack_resolver::Resolver;
use fedpack_utils::indexmap::FxIndexMap;
use tokio::sync::{Mutex, OnceCell};

use self::{
  builder::{ContainerArtifact, ContainerBuilder},
  manifest::{unique_chunk_name, ContainerManifest, ExposedModule},
  state::ContainerState,
};
use crate::{
  types::{SharedAnalyzer, SharedFileSystem, SharedOptions, SharedResolver},
  utils::normalize_options::normalize_options,
  ShimSynthesizer,
};

/// The collaborators a container uses to turn a request into a shim.
pub struct ContainerContext {
  pub options: SharedOptions,
  pub fs: SharedFileSystem,
  pub resolver: SharedResolver,
  pub analyzer: SharedAnalyzer,
}

impl ContainerContext {
  /// Reads from disk and resolves like the application does.
  pub fn new(options: NormalizedFederationOptions) -> Self {
    let resolver = Resolver::new(options.platform, options.cwd.clone());
    Self {
      options: Arc::new(options),
      fs: Arc::new(OsFileSystem),
      resolver: Arc::new(resolver),
      analyzer: Arc::new(OxcExportAnalyzer),
    }
  }
}

struct BuildState {
  state: ContainerState,
  /// Number of exposed modules in the last built container.
  built_modules: usize,
  artifact: Option<ContainerArtifact>,
}

/// Collects the dependencies an application uses and rebuilds the shared
/// remote container when new ones show up.
pub struct RemoteContainer<B: ContainerBuilder> {
  ctx: ContainerContext,
  builder: B,
  /// One cell per request, so each request is resolved at most once at a time.
  in_flight: DashMap<ArcStr, Arc<OnceCell<()>>>,
  exposes: Mutex<FxIndexMap<ArcStr, ExposedModule>>,
  /// Held for the whole build, which serialises writes to the artifact.
  build_state: Mutex<BuildState>,
}

impl<B: ContainerBuilder> RemoteContainer<B> {
  pub fn new(options: FederationOptions, builder: B) -> Self {
    Self::with_context(ContainerContext::new(normalize_options(options)), builder)
  }

  pub fn with_context(ctx: ContainerContext, builder: B) -> Self {
    Self {
      ctx,
      builder,
      in_flight: DashMap::default(),
      exposes: Mutex::default(),
      build_state: Mutex::new(BuildState {
        state: ContainerState::AwaitingFirstBuild,
        built_modules: 0,
        artifact: None,
      }),
    }
  }

  pub fn options(&self) -> &NormalizedFederationOptions {
    &self.ctx.options
  }

  /// Resolves `request` and adds its shim to the container. Returns `false`
  /// when the request was already collected.
  pub async fn collect(&self, request: &str) -> BuildResult<bool> {
    let dependency = Dependency::new(request)?;
    self.collect_dependency(dependency, None).await
  }

  /// Like [`RemoteContainer::collect`], for callers that already know which
  /// file the request resolves to.
  pub async fn collect_resolved(&self, request: &str, file_path: &Path) -> BuildResult<bool> {
    let dependency = Dependency::new(request)?;
    self.collect_dependency(dependency, Some(file_path)).await
  }

  async fn collect_dependency(
    &self,
    dependency: Dependency,
    file_path: Option<&Path>,
  ) -> BuildResult<bool> {
    let cell = Arc::clone(self.in_flight.entry(dependency.request().clone()).or_default().value());

    let mut is_new = false;
    let is_new_mut = &mut is_new;
    // A failed attempt leaves the cell empty, so the request can be retried.
    cell
      .get_or_try_init(|| async move {
        let mut module = self.load(dependency, file_path)?;
        tracing::debug!(
          request = %module.dependency,
          file = %module.file_path.display(),
          "collected dependency"
        );
        let mut exposes = self.exposes.lock().await;
        module.chunk_name = unique_chunk_name(&exposes, module.chunk_name);
        exposes.insert(module.dependency.request().clone(), module);
        *is_new_mut = true;
        Ok::<(), BuildError>(())
      })
      .await?;

    Ok(is_new)
  }

  fn load(&self, dependency: Dependency, file_path: Option<&Path>) -> BuildResult<ExposedModule> {
    let file_path = match file_path {
      Some(file_path) => file_path.to_path_buf(),
      None => self.ctx.resolver.resolve(dependency.request())?,
    };

    // Only scripts are analyzed. Assets may not even be valid UTF-8.
    let content = match ModuleType::from_path(&file_path) {
      Some(module_type) if module_type.is_script() => self
        .ctx
        .fs
        .read_to_string(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?,
      _ => String::new(),
    };

    let shim =
      ShimSynthesizer::synthesize_with(&dependency, &file_path, &content, &*self.ctx.analyzer)?;
    Ok(ExposedModule::new(dependency, file_path, shim))
  }

  pub async fn manifest(&self) -> ContainerManifest {
    ContainerManifest {
      name: self.ctx.options.name.clone(),
      filename: self.ctx.options.filename.clone(),
      exposes: self.exposes.lock().await.clone(),
    }
  }

  /// Builds the container if it has never been built or if dependencies were
  /// collected since the last build. Returns `None` when the build was skipped.
  pub async fn build(&self) -> BuildResult<Option<ContainerArtifact>> {
    let mut build_state = self.build_state.lock().await;
    let manifest = self.manifest().await;

    if !build_state.state.is_awaiting_first_build()
      && manifest.exposes.len() == build_state.built_modules
    {
      tracing::debug!("no new dependencies, container is up to date");
      return Ok(None);
    }

    let artifact = self.builder.build(&manifest).await?;
    tracing::info!(
      filename = artifact.filename.as_str(),
      hash = artifact.hash.as_str(),
      modules = manifest.exposes.len(),
      first_build = build_state.state.is_awaiting_first_build(),
      "built remote container"
    );

    build_state.state = build_state.state.after_build();
    build_state.built_modules = manifest.exposes.len();
    build_state.artifact = Some(artifact.clone());
    Ok(Some(artifact))
  }

  pub async fn state(&self) -> ContainerState {
    self.build_state.lock().await.state
  }

  /// The artifact of the last successful build.
  pub async fn artifact(&self) -> Option<ContainerArtifact> {
    self.build_state.lock().await.artifact.clone()
  }
}

#[cfg(test)]
mod tests {
  use std::{
    path::{Path, PathBuf},
    sync::{
      atomic::{AtomicUsize, Ordering},
      Arc,
    },
  };

  use fedpack_common::FederationOptions;
  use fedpack_error::{BuildResult, ShimError};
  use fedpack_fs::MemoryFileSystem;
  use rustc_hash::FxHashMap;

  use super::{
    builder::{ContainerArtifact, ContainerBuilder},
    manifest::ContainerManifest,
    request_resolver::RequestResolver,
    state::ContainerState,
    ContainerContext, RemoteContainer,
  };
  use crate::{normalize_options, OxcExportAnalyzer};

  struct MapResolver {
    paths: FxHashMap<&'static str, &'static str>,
    calls: AtomicUsize,
  }

  impl RequestResolver for MapResolver {
    fn resolve(&self, request: &str) -> Result<PathBuf, ShimError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self.paths.get(request).map(PathBuf::from).ok_or_else(|| ShimError::Resolve {
        request: request.to_string(),
        message: "not found".to_string(),
      })
    }
  }

  #[derive(Default)]
  struct RecordingBuilder {
    manifests: std::sync::Mutex<Vec<ContainerManifest>>,
    fail: bool,
  }

  impl ContainerBuilder for RecordingBuilder {
    async fn build(&self, manifest: &ContainerManifest) -> BuildResult<ContainerArtifact> {
      if self.fail {
        return Err(anyhow::anyhow!("bundler crashed").into());
      }
      self.manifests.lock().unwrap().push(manifest.clone());
      Ok(ContainerArtifact { filename: manifest.filename.clone(), hash: manifest.content_hash() })
    }
  }

  fn container(builder: RecordingBuilder) -> (RemoteContainer<RecordingBuilder>, Arc<MapResolver>) {
    let fs = MemoryFileSystem::new();
    fs.add_file(Path::new("/app/node_modules/lodash/index.js"), "export default {};\nexport const map = 1;")
      .unwrap();
    fs.add_file(Path::new("/app/node_modules/react/index.js"), "module.exports = require('./cjs');")
      .unwrap();
    fs.add_file(Path::new("/app/node_modules/bad/index.js"), "export default {").unwrap();

    let resolver = Arc::new(MapResolver {
      paths: [
        ("lodash", "/app/node_modules/lodash/index.js"),
        ("react", "/app/node_modules/react/index.js"),
        ("bad", "/app/node_modules/bad/index.js"),
        ("normalize.css", "/app/node_modules/normalize.css/normalize.css"),
        ("wasm-pkg", "/app/node_modules/wasm-pkg/module.wasm"),
      ]
      .into_iter()
      .collect(),
      calls: AtomicUsize::new(0),
    });

    let ctx = ContainerContext {
      options: Arc::new(normalize_options(FederationOptions {
        cwd: Some(PathBuf::from("/app")),
        ..Default::default()
      })),
      fs: Arc::new(fs),
      resolver: Arc::clone(&resolver) as Arc<dyn RequestResolver>,
      analyzer: Arc::new(OxcExportAnalyzer),
    };

    (RemoteContainer::with_context(ctx, builder), resolver)
  }

  #[tokio::test]
  async fn collects_each_request_once() {
    let (container, resolver) = container(RecordingBuilder::default());

    assert!(container.collect("lodash").await.unwrap());
    assert!(!container.collect("lodash").await.unwrap());
    assert!(container.collect("react").await.unwrap());

    let manifest = container.manifest().await;
    let shims = manifest.exposes.values().map(|m| m.shim.as_str()).collect::<Vec<_>>();
    assert_eq!(
      shims,
      [
        "import _ from 'lodash';\nexport default _;\nexport * from 'lodash';",
        "import _ from 'react';\nexport default _;\nexport * from 'react';",
      ]
    );
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn concurrent_collection_resolves_once() {
    let (container, resolver) = container(RecordingBuilder::default());

    let (a, b) = tokio::join!(container.collect("lodash"), container.collect("lodash"));
    let mut results = [a.unwrap(), b.unwrap()];
    results.sort_unstable();

    assert_eq!(results, [false, true]);
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    assert_eq!(container.manifest().await.exposes.len(), 1);
  }

  #[tokio::test]
  async fn style_sheets_are_not_read() {
    let (container, _) = container(RecordingBuilder::default());

    assert!(container.collect("normalize.css").await.unwrap());
    let manifest = container.manifest().await;
    assert_eq!(manifest.exposes["normalize.css"].shim, "import 'normalize.css';");
  }

  #[tokio::test]
  async fn collect_resolved_skips_the_resolver() {
    let (container, resolver) = container(RecordingBuilder::default());

    assert!(container
      .collect_resolved("lodash/map", Path::new("/app/node_modules/lodash/index.js"))
      .await
      .unwrap());
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    assert_eq!(container.manifest().await.exposes["lodash/map"].expose_key(), "./lodash/map");
  }

  #[tokio::test]
  async fn colliding_chunk_names_are_suffixed() {
    let (container, _) = container(RecordingBuilder::default());
    let file = Path::new("/app/node_modules/lodash/index.js");

    assert!(container.collect_resolved("lodash/fp", file).await.unwrap());
    assert!(container.collect_resolved("lodash_fp", file).await.unwrap());

    let manifest = container.manifest().await;
    assert_eq!(manifest.exposes["lodash/fp"].chunk_name, "lodash_fp");
    assert_eq!(manifest.exposes["lodash_fp"].chunk_name, "lodash_fp_1");
  }

  #[tokio::test]
  async fn failed_collection_is_not_recorded() {
    let (container, resolver) = container(RecordingBuilder::default());

    let err = container.collect("wasm-pkg").await.unwrap_err();
    assert_eq!(
      err.shim_errors().collect::<Vec<_>>(),
      [&ShimError::UnsupportedFileType { file_name: "module.wasm".to_string() }]
    );

    let err = container.collect("bad").await.unwrap_err();
    assert!(matches!(err.shim_errors().next(), Some(ShimError::Parse { .. })));

    let err = container.collect("missing").await.unwrap_err();
    assert!(matches!(err.shim_errors().next(), Some(ShimError::Resolve { .. })));

    let err = container.collect("it's").await.unwrap_err();
    assert!(matches!(err.shim_errors().next(), Some(ShimError::InvalidDependencyRequest { .. })));

    // Failures are retried on the next attempt.
    assert!(container.collect("bad").await.is_err());
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 4);
    assert!(container.manifest().await.exposes.is_empty());
  }

  #[tokio::test]
  async fn builds_follow_the_state_machine() {
    let (container, _) = container(RecordingBuilder::default());
    assert_eq!(container.state().await, ContainerState::AwaitingFirstBuild);

    // The first build happens even without dependencies.
    let first = container.build().await.unwrap().unwrap();
    assert_eq!(first.filename, "remoteEntry.js");
    assert_eq!(container.state().await, ContainerState::SteadyState);

    assert_eq!(container.build().await.unwrap(), None);

    container.collect("lodash").await.unwrap();
    let second = container.build().await.unwrap().unwrap();
    assert_ne!(first.hash, second.hash);
    assert_eq!(container.artifact().await, Some(second));

    container.collect("lodash").await.unwrap();
    assert_eq!(container.build().await.unwrap(), None);

    let manifests = container.builder.manifests.lock().unwrap();
    assert_eq!(manifests.len(), 2);
    assert!(manifests[0].exposes.is_empty());
    assert_eq!(manifests[1].exposes.len(), 1);
  }

  #[tokio::test]
  async fn failed_build_keeps_awaiting_first_build() {
    let (container, _) = container(RecordingBuilder { fail: true, ..Default::default() });

    let err = container.build().await.unwrap_err();
    assert_eq!(err.to_string(), "bundler crashed");
    assert_eq!(container.state().await, ContainerState::AwaitingFirstBuild);
    assert_eq!(container.artifact().await, None);
  }
}
