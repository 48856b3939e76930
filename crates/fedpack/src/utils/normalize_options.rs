use fedpack_common::{
  FederationOptions, NormalizedFederationOptions, DEFAULT_CONTAINER_FILENAME,
  DEFAULT_CONTAINER_NAME,
};

pub fn normalize_options(raw_options: FederationOptions) -> NormalizedFederationOptions {
  // The container name becomes a global variable in the remote entry.
  let name = raw_options
    .name
    .filter(|name| !name.is_empty())
    .map_or_else(
      || DEFAULT_CONTAINER_NAME.to_string(),
      |name| name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect(),
    );

  NormalizedFederationOptions {
    input: raw_options.input.unwrap_or_default(),
    cwd: raw_options
      .cwd
      .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current dir")),
    platform: raw_options.platform.unwrap_or_default(),
    name,
    filename: raw_options.filename.unwrap_or_else(|| DEFAULT_CONTAINER_FILENAME.to_string()),
    dir: raw_options.dir.unwrap_or_else(|| ".fedpack".to_string()),
  }
}

#[test]
fn test_defaults() {
  use std::path::PathBuf;

  use fedpack_common::Platform;

  let options =
    normalize_options(FederationOptions { cwd: Some(PathBuf::from("/app")), ..Default::default() });

  assert_eq!(options.name, "fedpack_remote");
  assert_eq!(options.filename, "remoteEntry.js");
  assert_eq!(options.platform, Platform::Browser);
  assert!(options.input.is_empty());
  assert_eq!(options.container_path(), PathBuf::from("/app/.fedpack/remoteEntry.js"));
}

#[test]
fn test_container_name_is_an_identifier() {
  let options = normalize_options(FederationOptions {
    name: Some("my-app.deps".to_string()),
    cwd: Some(std::path::PathBuf::from("/app")),
    ..Default::default()
  });
  assert_eq!(options.name, "my_app_deps");
}
