use fedpack_utils::indexmap::FxIndexSet;

use super::{export_name::ExportName, exports_kind::ExportsKind};

/// What static analysis determined about a script module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceClassification {
  /// Top-level export names in discovery order, sentinels included.
  pub export_names: FxIndexSet<ExportName>,
  pub exports_kind: ExportsKind,
  /// The module contains `export * from '...'`, whose names can't be enumerated
  /// without resolving the re-exported module.
  pub has_star_reexport: bool,
}

impl SourceClassification {
  pub fn commonjs() -> Self {
    Self { exports_kind: ExportsKind::CommonJs, ..Self::default() }
  }

  pub fn esm<I, N>(names: I) -> Self
  where
    I: IntoIterator<Item = N>,
    N: Into<ExportName>,
  {
    Self { export_names: names.into_iter().map(Into::into).collect(), ..Self::default() }
  }

  #[must_use]
  pub fn with_star_reexport(mut self) -> Self {
    self.has_star_reexport = true;
    self
  }

  pub fn is_commonjs(&self) -> bool {
    self.exports_kind.is_commonjs()
  }

  pub fn has_default(&self) -> bool {
    self.export_names.contains(&ExportName::Default)
  }

  pub fn has_es_module_interop(&self) -> bool {
    self.export_names.contains(&ExportName::EsModuleInterop)
  }

  pub fn has_named(&self) -> bool {
    self.export_names.iter().any(ExportName::is_named)
  }

  /// Records an export, keeping the first discovery position of duplicates.
  pub fn add_export(&mut self, name: impl Into<ExportName>) {
    self.export_names.insert(name.into());
  }
}

#[test]
fn test_export_names_keep_discovery_order() {
  let mut classification = SourceClassification::esm(["map", "default"]);
  classification.add_export("filter");
  classification.add_export("map");

  let names = classification.export_names.iter().map(ExportName::as_str).collect::<Vec<_>>();
  assert_eq!(names, ["map", "default", "filter"]);
  assert!(classification.has_default());
  assert!(classification.has_named());
  assert!(!classification.has_es_module_interop());
  assert!(!classification.is_commonjs());
}
