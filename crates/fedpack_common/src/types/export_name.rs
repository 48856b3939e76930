use std::fmt::Display;

use arcstr::ArcStr;

/// A top-level export discovered by the export analyzer.
///
/// The two sentinel names are variants of their own so the shim synthesizer
/// never has to compare against magic strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExportName {
  /// `export default ...`, or `module.exports = ...` in CommonJS.
  Default,
  /// `__esModule`, the flag a CommonJS module normalized to ESM shape exposes.
  EsModuleInterop,
  Named(ArcStr),
}

impl ExportName {
  pub const DEFAULT: &'static str = "default";
  pub const ES_MODULE_INTEROP: &'static str = "__esModule";

  pub fn as_str(&self) -> &str {
    match self {
      Self::Default => Self::DEFAULT,
      Self::EsModuleInterop => Self::ES_MODULE_INTEROP,
      Self::Named(name) => name.as_str(),
    }
  }

  pub fn is_named(&self) -> bool {
    matches!(self, Self::Named(_))
  }
}

impl From<&str> for ExportName {
  fn from(value: &str) -> Self {
    match value {
      Self::DEFAULT => Self::Default,
      Self::ES_MODULE_INTEROP => Self::EsModuleInterop,
      _ => Self::Named(value.into()),
    }
  }
}

impl Display for ExportName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[test]
fn test_sentinel_names() {
  assert_eq!(ExportName::from("default"), ExportName::Default);
  assert_eq!(ExportName::from("__esModule"), ExportName::EsModuleInterop);
  assert_eq!(ExportName::from("map"), ExportName::Named("map".into()));
  assert_eq!(ExportName::EsModuleInterop.to_string(), "__esModule");
  assert!(!ExportName::Default.is_named());
}
