mod container;
mod entry;
mod shim;
mod types;
mod utils;

pub use crate::{
  container::{
    builder::{ContainerArtifact, ContainerBuilder},
    manifest::{ContainerManifest, ExposedModule},
    request_resolver::RequestResolver,
    state::ContainerState,
    ContainerContext, RemoteContainer,
  },
  entry::{EntryRewriter, VirtualEntry},
  shim::ShimSynthesizer,
  utils::normalize_options::normalize_options,
};
pub use fedpack_common::*;
pub use fedpack_ecmascript::{ExportAnalyzer, OxcExportAnalyzer};
pub use fedpack_error::{BuildError, BuildResult, ShimError};
