use std::path::Path;

use arcstr::ArcStr;
use fedpack_common::ModuleType;
use fedpack_error::{BuildResult, ShimError};
use fedpack_utils::path_ext::PathExt;
use oxc::{
  allocator::Allocator,
  parser::{ParseOptions, Parser},
  span::SourceType,
};

use crate::ecma_ast::{
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
  EcmaAst,
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  pub fn parse(
    file_path: &Path,
    source: impl Into<ArcStr>,
    source_type: SourceType,
  ) -> BuildResult<EcmaAst> {
    let allocator = Allocator::default();
    let owner = ProgramCellOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      // CommonJS entry files may bail out with a top-level `return`.
      let options = ParseOptions {
        allow_return_outside_function: !source_type.is_module(),
        ..ParseOptions::default()
      };
      let ret =
        Parser::new(&owner.allocator, &owner.source, source_type).with_options(options).parse();
      if ret.panicked || !ret.errors.is_empty() {
        let message = ret.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        Err(ShimError::Parse { file_name: file_path.base_name().into_owned(), message })
      } else {
        Ok(ProgramCellDependent { program: ret.program })
      }
    })?;

    Ok(EcmaAst { program, source_type })
  }

  /// Dependencies are always parsed as modules; the dialect follows the extension.
  pub fn source_type_for(file_path: &Path) -> SourceType {
    let module_type = ModuleType::from_path(file_path).unwrap_or(ModuleType::Js);
    SourceType::mjs()
      .with_typescript(module_type.is_typescript())
      .with_jsx(module_type.is_jsx() || matches!(module_type, ModuleType::Js))
  }

  /// The sloppy-mode dialect a `.js` file is retried with when it doesn't parse
  /// as a module. Other extensions have no fallback.
  pub fn script_source_type_for(file_path: &Path) -> Option<SourceType> {
    (file_path.lowercase_extension().as_deref() == Some("js"))
      .then(|| SourceType::cjs().with_jsx(true))
  }
}

#[test]
fn basic_test() {
  let path = Path::new("pkg/index.js");
  let ast = EcmaCompiler::parse(path, "export const a = 1;", EcmaCompiler::source_type_for(path))
    .unwrap();
  assert_eq!(ast.source().as_str(), "export const a = 1;");
  assert_eq!(ast.program().body.len(), 1);
}

#[test]
fn parse_error_names_the_file() {
  let path = Path::new("pkg/broken.ts");
  let error =
    EcmaCompiler::parse(path, "export const = ;", EcmaCompiler::source_type_for(path)).unwrap_err();
  let shim_errors = error.shim_errors().collect::<Vec<_>>();
  assert!(
    matches!(shim_errors.as_slice(), [ShimError::Parse { file_name, .. }] if file_name == "broken.ts")
  );
}

#[test]
fn script_fallback_only_for_js() {
  let path = Path::new("lib/index.js");
  let source_type = EcmaCompiler::script_source_type_for(path).unwrap();
  assert!(!source_type.is_module());

  let ast = EcmaCompiler::parse(path, "module.exports = 1;\nreturn;", source_type).unwrap();
  assert_eq!(ast.program().body.len(), 2);

  assert!(EcmaCompiler::script_source_type_for(Path::new("lib/index.mjs")).is_none());
  assert!(EcmaCompiler::script_source_type_for(Path::new("lib/index.ts")).is_none());
}
