use std::{borrow::Cow, ffi::OsStr};

pub trait PathExt {
  /// The last component of the path, used to point build operators at a file.
  fn base_name(&self) -> Cow<str>;

  /// Lowercased final extension, if any.
  fn lowercase_extension(&self) -> Option<String>;

  fn representative_file_name(&self) -> Cow<str>;
}

impl PathExt for std::path::Path {
  fn base_name(&self) -> Cow<str> {
    self.file_name().map_or_else(|| self.to_string_lossy(), OsStr::to_string_lossy)
  }

  fn lowercase_extension(&self) -> Option<String> {
    self.extension().map(|ext| ext.to_string_lossy().to_ascii_lowercase())
  }

  /// It doesn't ensure the file name is a valid identifier in JS.
  fn representative_file_name(&self) -> Cow<str> {
    let file_name =
      self.file_stem().map_or_else(|| self.to_string_lossy(), |stem| stem.to_string_lossy());

    let file_name = match &*file_name {
      // "index": Node.js use `index` as a special name for directory import.
      // "main": the conventional name of an application entry.
      "index" | "main" => self
        .parent()
        .and_then(Self::file_stem)
        .map(OsStr::to_string_lossy)
        .map_or(file_name, |parent_dir_name| parent_dir_name),
      _ => file_name,
    };

    file_name
  }
}

#[test]
fn test_base_name() {
  use std::path::Path;

  assert_eq!(Path::new("lodash/index.js").base_name(), "index.js");
  assert_eq!(Path::new("module.wasm").base_name(), "module.wasm");
  assert_eq!(Path::new("styles/App.SCSS").lowercase_extension().as_deref(), Some("scss"));
  assert_eq!(Path::new("LICENSE").lowercase_extension(), None);
}

#[test]
fn test_representative_file_name() {
  use std::path::Path;

  let cwd = Path::new(".").join("project");
  let path = cwd.join("src").join("admin.tsx");
  assert_eq!(path.representative_file_name(), "admin");

  let path = cwd.join("src").join("main.ts");
  assert_eq!(path.representative_file_name(), "src");

  let path = cwd.join("vue").join("index.js");
  assert_eq!(path.representative_file_name(), "vue");
}
