pub mod input_item;
pub mod normalized_federation_options;
pub mod platform;

use std::path::PathBuf;

use crate::{InputItem, Platform};

#[derive(Default, Debug, Clone)]
pub struct FederationOptions {
  // --- Application
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,
  pub platform: Option<Platform>,

  // --- Remote container
  pub name: Option<String>,
  pub filename: Option<String>,
  pub dir: Option<String>,
}
