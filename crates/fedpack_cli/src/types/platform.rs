use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Platform {
  Node,
  Browser,
  Neutral,
}

impl From<Platform> for fedpack::Platform {
  fn from(value: Platform) -> Self {
    match value {
      Platform::Node => fedpack::Platform::Node,
      Platform::Browser => fedpack::Platform::Browser,
      Platform::Neutral => fedpack::Platform::Neutral,
    }
  }
}
