use std::fmt::Display;

use arcstr::ArcStr;
use fedpack_error::ShimError;

/// A third-party module the application imports, identified by the specifier
/// other code uses to import it.
///
/// The request is interpolated verbatim into generated `import`/`export`
/// statements, so it's validated once here instead of escaped on every use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dependency {
  request: ArcStr,
}

impl Dependency {
  pub fn new(request: impl Into<ArcStr>) -> Result<Self, ShimError> {
    let request = request.into();
    if let Some(reason) = Self::invalid_reason(&request) {
      return Err(ShimError::InvalidDependencyRequest { request: request.to_string(), reason });
    }
    Ok(Self { request })
  }

  pub fn request(&self) -> &ArcStr {
    &self.request
  }

  fn invalid_reason(request: &str) -> Option<&'static str> {
    if request.trim().is_empty() {
      Some("request is empty")
    } else if request.contains(['\'', '"', '`']) {
      Some("request contains a quote")
    } else if request.contains('\\') {
      Some("request contains a backslash")
    } else if request.chars().any(char::is_control) {
      Some("request contains a control character")
    } else {
      None
    }
  }
}

impl Display for Dependency {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.request)
  }
}

#[test]
fn test_valid_requests() {
  for request in ["lodash", "@scope/pkg", "lodash/fp/map", "./local.css", "pkg/file.json?raw"] {
    assert_eq!(Dependency::new(request).unwrap().request(), request);
  }
}

#[test]
fn test_invalid_requests() {
  let cases = [
    ("", "request is empty"),
    ("   ", "request is empty"),
    ("it's", "request contains a quote"),
    ("a\\b", "request contains a backslash"),
    ("lodash\n", "request contains a control character"),
  ];

  for (request, expected) in cases {
    match Dependency::new(request) {
      Err(ShimError::InvalidDependencyRequest { request: got, reason }) => {
        assert_eq!(got, request);
        assert_eq!(reason, expected);
      }
      other => panic!("expected invalid request for {request:?}, got {other:?}"),
    }
  }
}
