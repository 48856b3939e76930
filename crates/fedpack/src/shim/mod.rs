use std::path::Path;

use fedpack_common::{Dependency, ModuleType, SourceClassification};
use fedpack_ecmascript::ExportAnalyzer;
use fedpack_error::{BuildResult, ShimError};
use fedpack_utils::{concat_string, path_ext::PathExt};

/// Local binding the default export is imported into.
const DEFAULT_ALIAS: &str = "_";

/// Generates the re-export module that represents a dependency inside the
/// remote container.
///
/// The shim always imports from `dependency.request()` and is valid ESM no
/// matter which module system the dependency uses. Output only depends on the
/// inputs, since it becomes virtual module content for a caching bundler.
pub struct ShimSynthesizer;

impl ShimSynthesizer {
  /// Synthesizes a shim, asking `analyzer` for a classification only when the
  /// file is a script.
  pub fn synthesize_with<A: ExportAnalyzer + ?Sized>(
    dependency: &Dependency,
    file_path: &Path,
    content: &str,
    analyzer: &A,
  ) -> BuildResult<String> {
    let module_type = Self::module_type_of(file_path)?;
    let shim = if module_type.is_script() {
      let classification = analyzer.classify(content, file_path)?;
      Self::script_shim(dependency, &classification)
    } else {
      Self::non_script_shim(dependency, module_type)
    };
    Self::trace(dependency, file_path, &shim);
    Ok(shim)
  }

  /// Synthesizes a shim from an existing classification. Style sheets and
  /// assets ignore `classification`.
  pub fn synthesize(
    dependency: &Dependency,
    file_path: &Path,
    classification: &SourceClassification,
  ) -> Result<String, ShimError> {
    let module_type = Self::module_type_of(file_path)?;
    let shim = if module_type.is_script() {
      Self::script_shim(dependency, classification)
    } else {
      Self::non_script_shim(dependency, module_type)
    };
    Self::trace(dependency, file_path, &shim);
    Ok(shim)
  }

  fn module_type_of(file_path: &Path) -> Result<ModuleType, ShimError> {
    ModuleType::from_path(file_path)
      .ok_or_else(|| ShimError::UnsupportedFileType { file_name: file_path.base_name().into_owned() })
  }

  fn non_script_shim(dependency: &Dependency, module_type: ModuleType) -> String {
    let request = dependency.request();
    match module_type {
      ModuleType::Style => side_effect_import(request),
      _ => [default_import(request), default_export()].join("\n"),
    }
  }

  fn script_shim(dependency: &Dependency, classification: &SourceClassification) -> String {
    let request = dependency.request();

    // A CommonJS module, or one normalized to ESM shape that still carries real
    // exports beside the interop flag, may be consumed as a namespace and as a
    // default at the same time.
    if classification.is_commonjs()
      || (classification.has_es_module_interop() && classification.export_names.len() > 1)
    {
      return [default_import(request), default_export(), star_export(request)].join("\n");
    }

    let mut stmts = Vec::with_capacity(3);
    if classification.has_default() {
      stmts.push(default_import(request));
      stmts.push(default_export());
    }
    if classification.has_named() || classification.has_star_reexport {
      stmts.push(star_export(request));
    }

    if stmts.is_empty() {
      // Only the interop flag, or no exports at all: nothing to re-export.
      return side_effect_import(request);
    }
    stmts.join("\n")
  }

  fn trace(dependency: &Dependency, file_path: &Path, shim: &str) {
    tracing::trace!(request = %dependency, file = %file_path.display(), shim, "synthesized shim");
  }
}

fn side_effect_import(request: &str) -> String {
  concat_string!("import '", request, "';")
}

fn default_import(request: &str) -> String {
  concat_string!("import ", DEFAULT_ALIAS, " from '", request, "';")
}

fn default_export() -> String {
  concat_string!("export default ", DEFAULT_ALIAS, ";")
}

fn star_export(request: &str) -> String {
  concat_string!("export * from '", request, "';")
}

#[cfg(test)]
mod tests {
  use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
  };

  use fedpack_common::{Dependency, ExportName, ModuleType, SourceClassification};
  use fedpack_ecmascript::{ExportAnalyzer, OxcExportAnalyzer};
  use fedpack_error::{BuildResult, ShimError};

  use super::ShimSynthesizer;

  const COMMONJS_SHIM: &str = "import _ from 'pkg';\nexport default _;\nexport * from 'pkg';";

  fn dep(request: &str) -> Dependency {
    Dependency::new(request).unwrap()
  }

  fn esm_shim(names: &[&str]) -> String {
    ShimSynthesizer::synthesize(
      &dep("pkg"),
      Path::new("pkg/index.js"),
      &SourceClassification::esm(names.iter().copied()),
    )
    .unwrap()
  }

  /// Counts calls so tests can assert when classification is skipped.
  #[derive(Default)]
  struct CountingAnalyzer {
    calls: AtomicUsize,
  }

  impl ExportAnalyzer for CountingAnalyzer {
    fn classify(&self, _content: &str, _file_path: &Path) -> BuildResult<SourceClassification> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(SourceClassification::commonjs())
    }
  }

  #[test]
  fn style_sheets_are_side_effect_imports() {
    let analyzer = CountingAnalyzer::default();
    for ext in ModuleType::STYLE_EXTENSIONS {
      let file = format!("theme/index.{ext}");
      let shim = ShimSynthesizer::synthesize_with(
        &dep("theme/index.css"),
        Path::new(&file),
        "export default 1;",
        &analyzer,
      )
      .unwrap();
      assert_eq!(shim, "import 'theme/index.css';");
    }
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn assets_are_default_exports() {
    let analyzer = CountingAnalyzer::default();
    for ext in ModuleType::ASSET_EXTENSIONS {
      let file = format!("icons/logo.{ext}");
      let shim =
        ShimSynthesizer::synthesize_with(&dep("icons/logo"), Path::new(&file), "", &analyzer)
          .unwrap();
      assert_eq!(shim, "import _ from 'icons/logo';\nexport default _;");
    }
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn asset_shim_ignores_classification() {
    let shim = ShimSynthesizer::synthesize(
      &dep("data/config.json"),
      Path::new("data/config.json"),
      &SourceClassification::commonjs(),
    )
    .unwrap();
    assert_eq!(shim, "import _ from 'data/config.json';\nexport default _;");
  }

  #[test]
  fn commonjs_scripts_get_three_statements() {
    let analyzer = CountingAnalyzer::default();
    for ext in ModuleType::SCRIPT_EXTENSIONS {
      let file = format!("pkg/index.{ext}");
      let shim = ShimSynthesizer::synthesize_with(&dep("pkg"), Path::new(&file), "", &analyzer)
        .unwrap();
      assert_eq!(shim, COMMONJS_SHIM);
    }
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), ModuleType::SCRIPT_EXTENSIONS.len());
  }

  #[test]
  fn esm_default_only() {
    assert_eq!(esm_shim(&["default"]), "import _ from 'pkg';\nexport default _;");
  }

  #[test]
  fn esm_named_only() {
    assert_eq!(esm_shim(&["foo"]), "export * from 'pkg';");
  }

  #[test]
  fn esm_star_reexport_without_names() {
    let shim = ShimSynthesizer::synthesize(
      &dep("pkg"),
      Path::new("pkg/index.mjs"),
      &SourceClassification::esm(["default"]).with_star_reexport(),
    )
    .unwrap();
    assert_eq!(shim, "import _ from 'pkg';\nexport default _;\nexport * from 'pkg';");

    let shim = ShimSynthesizer::synthesize(
      &dep("pkg"),
      Path::new("pkg/index.mjs"),
      &SourceClassification::default().with_star_reexport(),
    )
    .unwrap();
    assert_eq!(shim, "export * from 'pkg';");
  }

  #[test]
  fn esm_interop_marker_only() {
    assert_eq!(esm_shim(&["__esModule"]), "import 'pkg';");
  }

  #[test]
  fn esm_without_exports() {
    assert_eq!(esm_shim(&[]), "import 'pkg';");
  }

  #[test]
  fn esm_interop_marker_with_real_exports() {
    assert_eq!(esm_shim(&["__esModule", "foo"]), COMMONJS_SHIM);
    assert_eq!(esm_shim(&["foo", "__esModule"]), COMMONJS_SHIM);
    assert_eq!(esm_shim(&["__esModule", "default"]), COMMONJS_SHIM);
  }

  #[test]
  fn interop_marker_is_a_typed_sentinel() {
    let mut classification = SourceClassification::default();
    classification.add_export(ExportName::EsModuleInterop);
    classification.add_export(ExportName::EsModuleInterop);

    let shim =
      ShimSynthesizer::synthesize(&dep("pkg"), Path::new("pkg/index.ts"), &classification).unwrap();
    assert_eq!(shim, "import 'pkg';");
  }

  #[test]
  fn lodash_end_to_end() {
    let shim = ShimSynthesizer::synthesize(
      &dep("lodash"),
      Path::new("lodash/index.js"),
      &SourceClassification::esm(["default", "map", "filter"]),
    )
    .unwrap();
    assert_eq!(shim, "import _ from 'lodash';\nexport default _;\nexport * from 'lodash';");
  }

  #[test]
  fn analyzed_sources_end_to_end() {
    let cases = [
      ("export default 1;\nexport const map = 2;", "import _ from 'pkg';\nexport default _;\nexport * from 'pkg';"),
      ("export { map } from './map';", "export * from 'pkg';"),
      ("export * from './all';", "export * from 'pkg';"),
      ("exports.map = 1;", COMMONJS_SHIM),
      ("import './side-effect';", "import 'pkg';"),
    ];

    for (content, expected) in cases {
      let shim = ShimSynthesizer::synthesize_with(
        &dep("pkg"),
        Path::new("pkg/index.js"),
        content,
        &OxcExportAnalyzer,
      )
      .unwrap();
      assert_eq!(shim, expected, "source: {content}");
    }
  }

  #[test]
  fn synthesis_is_deterministic() {
    let classification = SourceClassification::esm(["default", "map", "filter"]);
    let first =
      ShimSynthesizer::synthesize(&dep("lodash"), Path::new("lodash/index.js"), &classification);
    let second =
      ShimSynthesizer::synthesize(&dep("lodash"), Path::new("lodash/index.js"), &classification);
    assert_eq!(first, second);
  }

  #[test]
  fn unsupported_extension_names_the_file() {
    let analyzer = CountingAnalyzer::default();
    let err = ShimSynthesizer::synthesize_with(
      &dep("wasm-pkg"),
      Path::new("node_modules/wasm-pkg/module.wasm"),
      "",
      &analyzer,
    )
    .unwrap_err();

    let shim_errors = err.shim_errors().collect::<Vec<_>>();
    assert_eq!(
      shim_errors,
      [&ShimError::UnsupportedFileType { file_name: "module.wasm".to_string() }]
    );
    assert_eq!(err.to_string(), "unsupported file type: module.wasm");
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);

    let err = ShimSynthesizer::synthesize(
      &dep("pkg"),
      Path::new("pkg/index.cjs"),
      &SourceClassification::commonjs(),
    )
    .unwrap_err();
    assert_eq!(err, ShimError::UnsupportedFileType { file_name: "index.cjs".to_string() });
  }

  #[test]
  fn analyzer_errors_propagate() {
    let err = ShimSynthesizer::synthesize_with(
      &dep("pkg"),
      Path::new("pkg/broken.js"),
      "export default {",
      &OxcExportAnalyzer,
    )
    .unwrap_err();
    assert!(matches!(
      err.shim_errors().next(),
      Some(ShimError::Parse { file_name, .. }) if file_name == "broken.js"
    ));
  }
}
