use std::{io, path::Path};

/// Read access to the files dependencies resolve to.
pub trait FileSystem: Send + Sync {
  fn read_to_string(&self, path: &Path) -> io::Result<String>;
}
