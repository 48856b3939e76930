use std::sync::Arc;

use fedpack_common::NormalizedFederationOptions;
use fedpack_ecmascript::ExportAnalyzer;
use fedpack_fs::FileSystem;

use crate::RequestResolver;

pub type SharedOptions = Arc<NormalizedFederationOptions>;
pub type SharedFileSystem = Arc<dyn FileSystem>;
pub type SharedResolver = Arc<dyn RequestResolver>;
pub type SharedAnalyzer = Arc<dyn ExportAnalyzer>;
