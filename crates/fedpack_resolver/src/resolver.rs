use std::path::PathBuf;

use fedpack_common::Platform;
use fedpack_error::ShimError;
use itertools::Itertools;
use sugar_path::SugarPath;

use oxc_resolver::{ResolveOptions as OxcResolverOptions, Resolver as OxcResolver};

pub struct Resolver {
  cwd: PathBuf,
  import_resolver: OxcResolver,
}

impl Resolver {
  pub fn new(platform: Platform, cwd: PathBuf) -> Self {
    let mut conditions = vec!["import".to_string(), "default".to_string()];

    match platform {
      Platform::Node => {
        conditions.push("node".to_string());
      }
      Platform::Browser => {
        conditions.push("browser".to_string());
      }
      Platform::Neutral => {}
    }

    conditions = conditions.into_iter().unique().collect();

    let main_fields = match platform {
      Platform::Node => {
        vec!["main".to_string(), "module".to_string()]
      }
      Platform::Browser => vec!["browser".to_string(), "module".to_string(), "main".to_string()],
      Platform::Neutral => vec!["module".to_string(), "main".to_string()],
    };

    let alias_fields = match platform {
      Platform::Browser => vec![vec!["browser".to_string()]],
      _ => vec![],
    };

    let import_resolver = OxcResolver::new(OxcResolverOptions {
      main_fields,
      alias_fields,
      builtin_modules: matches!(platform, Platform::Node),
      condition_names: conditions,
      extensions: [".js", ".mjs", ".jsx", ".ts", ".tsx", ".json"]
        .into_iter()
        .map(String::from)
        .collect(),
      ..Default::default()
    });

    Self { cwd, import_resolver }
  }

  /// Resolves a dependency request the way the application itself would import
  /// it from its project root.
  pub fn resolve(&self, specifier: &str) -> Result<PathBuf, ShimError> {
    let resolution = self.import_resolver.resolve(self.cwd.as_path(), specifier).or_else(|err| {
      // Handle `main` -> `<CWD>/main.{js,ts}` for path-like requests written without `./`
      let is_specifier_path_like = specifier.starts_with('.') || specifier.starts_with('/');
      if is_specifier_path_like {
        return Err(err);
      }
      let normalized_specifier = self.cwd.join(specifier).normalize();
      self
        .import_resolver
        .resolve(self.cwd.as_path(), &normalized_specifier.to_string_lossy())
        .map_err(|_| err)
    });

    match resolution {
      Ok(resolution) => {
        let path = resolution.full_path();
        tracing::debug!(specifier, path = %path.display(), "resolved dependency");
        Ok(path)
      }
      Err(err) => Err(ShimError::Resolve { request: specifier.to_string(), message: err.to_string() }),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use fedpack_common::Platform;
  use fedpack_error::ShimError;

  use super::Resolver;

  #[test]
  fn resolves_packages_and_relative_files() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().canonicalize().unwrap();
    let pkg = cwd.join("node_modules/tiny-pkg");
    fs::create_dir_all(pkg.join("lib")).unwrap();
    fs::write(pkg.join("package.json"), r#"{ "name": "tiny-pkg", "main": "lib/index.js" }"#)
      .unwrap();
    fs::write(pkg.join("lib/index.js"), "module.exports = 1;").unwrap();
    fs::create_dir_all(cwd.join("src")).unwrap();
    fs::write(cwd.join("src/theme.css"), "body {}").unwrap();

    let resolver = Resolver::new(Platform::Browser, cwd.clone());
    assert_eq!(resolver.resolve("tiny-pkg").unwrap(), pkg.join("lib/index.js"));
    assert_eq!(resolver.resolve("./src/theme.css").unwrap(), cwd.join("src/theme.css"));
    assert_eq!(resolver.resolve("src/theme.css").unwrap(), cwd.join("src/theme.css"));
  }

  #[test]
  fn missing_request_is_a_resolve_error() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = Resolver::new(Platform::Node, dir.path().canonicalize().unwrap());

    let err = resolver.resolve("does-not-exist").unwrap_err();
    assert!(matches!(err, ShimError::Resolve { request, .. } if request == "does-not-exist"));
  }
}
