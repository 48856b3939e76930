mod commonjs_scanner;
mod module_decl_scanner;

use std::path::Path;

use arcstr::ArcStr;
use fedpack_common::{ExportsKind, SourceClassification};
use fedpack_error::BuildResult;
use oxc::ast_visit::Visit;

use crate::EcmaCompiler;

use self::{commonjs_scanner::CommonJsScanner, module_decl_scanner::ModuleDeclScanner};

/// Statically classifies a script module without executing it.
pub trait ExportAnalyzer: Send + Sync {
  fn classify(&self, content: &str, file_path: &Path) -> BuildResult<SourceClassification>;
}

/// Export analysis on top of the oxc parser.
///
/// A module with any `import`/`export` declaration or `import.meta` is ESM and
/// its export names come from its top-level module declarations. Otherwise it
/// is CommonJS when it touches `exports`, `module.exports` or `require`, and
/// its names come from assignments to those. A module with neither is an ESM
/// module without exports.
#[derive(Debug, Default, Clone, Copy)]
pub struct OxcExportAnalyzer;

impl ExportAnalyzer for OxcExportAnalyzer {
  fn classify(&self, content: &str, file_path: &Path) -> BuildResult<SourceClassification> {
    let source = ArcStr::from(content);
    let ast = match EcmaCompiler::parse(
      file_path,
      source.clone(),
      EcmaCompiler::source_type_for(file_path),
    ) {
      Ok(ast) => ast,
      // Valid CommonJS isn't always a valid module, e.g. a top-level `return`
      // or `await` as an identifier. Report the module error if both fail.
      Err(err) => match EcmaCompiler::script_source_type_for(file_path) {
        Some(source_type) => {
          let ast = EcmaCompiler::parse(file_path, source, source_type).map_err(|_| err)?;
          tracing::trace!(file = %file_path.display(), "parsed as script");
          ast
        }
        None => return Err(err),
      },
    };
    let program = ast.program();

    let mut esm = ModuleDeclScanner::default();
    esm.scan(program);

    let mut cjs = CommonJsScanner::default();
    cjs.visit_program(program);

    let classification = if esm.has_module_syntax || cjs.has_import_meta {
      SourceClassification {
        export_names: esm.export_names,
        exports_kind: ExportsKind::Esm,
        has_star_reexport: esm.has_star_reexport,
      }
    } else if cjs.uses_commonjs {
      SourceClassification {
        export_names: cjs.export_names,
        exports_kind: ExportsKind::CommonJs,
        has_star_reexport: false,
      }
    } else {
      SourceClassification::default()
    };

    tracing::trace!(
      file = %file_path.display(),
      kind = ?classification.exports_kind,
      exports = classification.export_names.len(),
      "classified module"
    );

    Ok(classification)
  }
}
