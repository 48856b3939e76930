use std::path::Path;

use fedpack_common::{Dependency, InputItem};
use fedpack_error::{BuildResult, ShimError};
use fedpack_utils::{concat_string, indexmap::FxIndexMap, path_ext::PathExt};

/// A generated entry module that loads the real entry asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
  pub name: String,
  /// Virtual module id the bundler sees in place of the real entry.
  pub id: String,
  /// The real entry, as written in the input options.
  pub import: String,
  pub content: String,
}

/// Rewrites application entries into asynchronous stubs.
///
/// Loading the real entry through `import()` gives the federation runtime a
/// chance to initialise the shared remote container before any application
/// module that depends on it is evaluated.
pub struct EntryRewriter;

impl EntryRewriter {
  pub const VIRTUAL_ID_PREFIX: &'static str = "\0fedpack-entry:";

  pub fn rewrite(input: &[InputItem]) -> BuildResult<Vec<VirtualEntry>> {
    let mut entries = FxIndexMap::default();

    for item in input {
      // Entry imports are interpolated like dependency requests.
      let import = Dependency::new(item.import.as_str())?;
      let name = item.name.clone().unwrap_or_else(|| {
        Path::new(import.request().as_str()).representative_file_name().into_owned()
      });

      if entries.contains_key(&name) {
        return Err(ShimError::DuplicateEntry { name }.into());
      }

      let entry = VirtualEntry {
        id: concat_string!(Self::VIRTUAL_ID_PREFIX, name),
        content: concat_string!("import('", import.request(), "');"),
        import: import.request().to_string(),
        name: name.clone(),
      };
      tracing::debug!(name = entry.name.as_str(), import = entry.import.as_str(), "rewrote entry");
      entries.insert(name, entry);
    }

    Ok(entries.into_values().collect())
  }

  /// Maps a virtual id back to the entry it was generated for.
  pub fn entry_name(id: &str) -> Option<&str> {
    id.strip_prefix(Self::VIRTUAL_ID_PREFIX)
  }
}

#[test]
fn test_rewrite_entries() {
  let input = [
    InputItem::from("./src/main.tsx"),
    InputItem { name: Some("admin".to_string()), import: "./src/admin/index.ts".to_string() },
  ];

  let entries = EntryRewriter::rewrite(&input).unwrap();

  assert_eq!(
    entries,
    [
      VirtualEntry {
        name: "src".to_string(),
        id: "\0fedpack-entry:src".to_string(),
        import: "./src/main.tsx".to_string(),
        content: "import('./src/main.tsx');".to_string(),
      },
      VirtualEntry {
        name: "admin".to_string(),
        id: "\0fedpack-entry:admin".to_string(),
        import: "./src/admin/index.ts".to_string(),
        content: "import('./src/admin/index.ts');".to_string(),
      },
    ]
  );
  assert_eq!(EntryRewriter::entry_name(&entries[1].id), Some("admin"));
  assert_eq!(EntryRewriter::entry_name("./src/main.tsx"), None);
}

#[test]
fn test_duplicate_entry_names() {
  let input = [InputItem::from("./a/index.js"), InputItem::from("./b/a.js")];

  let err = EntryRewriter::rewrite(&input).unwrap_err();
  assert_eq!(
    err.shim_errors().collect::<Vec<_>>(),
    [&ShimError::DuplicateEntry { name: "a".to_string() }]
  );
}

#[test]
fn test_invalid_entry_import() {
  let err = EntryRewriter::rewrite(&[InputItem::from("")]).unwrap_err();
  assert!(matches!(err.shim_errors().next(), Some(ShimError::InvalidDependencyRequest { .. })));
}
