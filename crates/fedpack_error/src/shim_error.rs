use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShimError {
  /// The file matches none of the style, asset or script extension groups.
  #[error("unsupported file type: {file_name}")]
  UnsupportedFileType { file_name: String },

  /// The request can't be interpolated into an `import` statement as is.
  #[error("invalid dependency request {request:?}: {reason}")]
  InvalidDependencyRequest { request: String, reason: &'static str },

  #[error("failed to parse {file_name}: {message}")]
  Parse { file_name: String, message: String },

  #[error("failed to resolve {request:?}: {message}")]
  Resolve { request: String, message: String },

  #[error("duplicate entry name {name:?}")]
  DuplicateEntry { name: String },
}
