mod shim_error;

use std::ops::{Deref, DerefMut};

pub use crate::shim_error::ShimError;

/// A batch of errors collected while producing the remote container.
///
/// Each inner error may carry a [`ShimError`] that callers can recover with
/// [`BuildError::shim_errors`].
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  pub fn shim_errors(&self) -> impl Iterator<Item = &ShimError> {
    self.0.iter().filter_map(|error| error.downcast_ref::<ShimError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (idx, error) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{error:#}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<ShimError> for BuildError {
  fn from(error: ShimError) -> Self {
    Self(vec![error.into()])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_shim_errors_are_recoverable() {
  let error = BuildError::from(vec![
    anyhow::anyhow!("unrelated"),
    ShimError::UnsupportedFileType { file_name: "module.wasm".to_string() }.into(),
  ]);

  let shim_errors = error.shim_errors().collect::<Vec<_>>();
  assert_eq!(shim_errors.len(), 1);
  assert!(matches!(shim_errors[0], ShimError::UnsupportedFileType { file_name } if file_name == "module.wasm"));
  assert_eq!(error.to_string(), "unrelated\nunsupported file type: module.wasm");
}
