use std::path::Path;

use fedpack_utils::path_ext::PathExt;

/// The extension group of a dependency's file, which decides the shim shape
/// before any content analysis happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
  /// Style sheets have no JS-visible exports.
  Style,
  /// Static and text assets import as a single default-exported value.
  Asset,
  Js,
  Jsx,
  Ts,
  Tsx,
}

impl ModuleType {
  pub const STYLE_EXTENSIONS: &'static [&'static str] =
    &["css", "less", "scss", "sass", "stylus", "styl"];

  pub const ASSET_EXTENSIONS: &'static [&'static str] = &[
    "json", "svg", "png", "jpg", "jpeg", "gif", "webp", "avif", "ico", "bmp", "woff", "woff2",
    "eot", "ttf", "otf", "txt", "text", "md", "markdown",
  ];

  pub const SCRIPT_EXTENSIONS: &'static [&'static str] = &["js", "jsx", "mjs", "ts", "tsx"];

  /// Returns `None` when the extension belongs to no known group.
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.lowercase_extension()?;
    Self::from_extension(&ext)
  }

  pub fn from_extension(ext: &str) -> Option<Self> {
    let ty = match ext {
      "js" | "mjs" => Self::Js,
      "jsx" => Self::Jsx,
      "ts" => Self::Ts,
      "tsx" => Self::Tsx,
      _ if Self::STYLE_EXTENSIONS.contains(&ext) => Self::Style,
      _ if Self::ASSET_EXTENSIONS.contains(&ext) => Self::Asset,
      _ => return None,
    };
    Some(ty)
  }

  pub fn is_script(self) -> bool {
    matches!(self, Self::Js | Self::Jsx | Self::Ts | Self::Tsx)
  }

  pub fn is_typescript(self) -> bool {
    matches!(self, Self::Ts | Self::Tsx)
  }

  pub fn is_jsx(self) -> bool {
    matches!(self, Self::Jsx | Self::Tsx)
  }
}

#[test]
fn test_every_group_extension_is_classified() {
  for ext in ModuleType::STYLE_EXTENSIONS {
    assert_eq!(ModuleType::from_extension(ext), Some(ModuleType::Style));
  }
  for ext in ModuleType::ASSET_EXTENSIONS {
    assert_eq!(ModuleType::from_extension(ext), Some(ModuleType::Asset));
  }
  for ext in ModuleType::SCRIPT_EXTENSIONS {
    assert!(ModuleType::from_extension(ext).is_some_and(ModuleType::is_script));
  }
}

#[test]
fn test_from_path() {
  assert_eq!(ModuleType::from_path(Path::new("a/b.module.SCSS")), Some(ModuleType::Style));
  assert_eq!(ModuleType::from_path(Path::new("lodash/index.js")), Some(ModuleType::Js));
  assert_eq!(ModuleType::from_path(Path::new("pkg/index.tsx")), Some(ModuleType::Tsx));
  assert_eq!(ModuleType::from_path(Path::new("module.wasm")), None);
  assert_eq!(ModuleType::from_path(Path::new("Makefile")), None);
  assert_eq!(ModuleType::from_path(Path::new("lib/index.cjs")), None);
}
