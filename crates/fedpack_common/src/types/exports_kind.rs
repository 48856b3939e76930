#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportsKind {
  #[default]
  Esm,
  CommonJs,
}

impl ExportsKind {
  pub fn is_commonjs(self) -> bool {
    matches!(self, Self::CommonJs)
  }
}
