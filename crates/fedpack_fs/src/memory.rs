use std::{io, io::Write, path::Path};

use vfs::{MemoryFS, VfsPath};

use crate::FileSystem;

/// An in-memory file system, used to drive the container pipeline in tests.
pub struct MemoryFileSystem {
  root: VfsPath,
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self { root: VfsPath::new(MemoryFS::new()) }
  }
}

impl MemoryFileSystem {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_file(&self, path: &Path, content: &str) -> io::Result<()> {
    let file = self.vfs_path(path)?;
    file.parent().create_dir_all().map_err(io::Error::other)?;
    let mut writer = file.create_file().map_err(io::Error::other)?;
    writer.write_all(content.as_bytes())
  }

  fn vfs_path(&self, path: &Path) -> io::Result<VfsPath> {
    let path = path.to_string_lossy().replace('\\', "/");
    self.root.join(path.trim_start_matches('/')).map_err(io::Error::other)
  }
}

impl FileSystem for MemoryFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let file = self.vfs_path(path)?;
    if !file.exists().map_err(io::Error::other)? {
      return Err(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())));
    }
    file.read_to_string().map_err(io::Error::other)
  }
}

#[test]
fn test_memory_file_system() {
  let fs = MemoryFileSystem::new();
  fs.add_file(Path::new("/node_modules/lodash/index.js"), "export default {}").unwrap();

  assert_eq!(
    fs.read_to_string(Path::new("node_modules/lodash/index.js")).unwrap(),
    "export default {}"
  );
  let error = fs.read_to_string(Path::new("/missing.js")).unwrap_err();
  assert_eq!(error.kind(), io::ErrorKind::NotFound);
}
