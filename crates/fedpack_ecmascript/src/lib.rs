mod ecma_ast;
mod ecma_compiler;
mod export_analyzer;

pub use crate::{
  ecma_ast::EcmaAst,
  ecma_compiler::EcmaCompiler,
  export_analyzer::{ExportAnalyzer, OxcExportAnalyzer},
};
