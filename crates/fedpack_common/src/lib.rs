mod federation_options;
mod types;

pub use crate::{
  federation_options::{
    input_item::InputItem,
    normalized_federation_options::{
      NormalizedFederationOptions, DEFAULT_CONTAINER_FILENAME, DEFAULT_CONTAINER_NAME,
    },
    platform::Platform,
    FederationOptions,
  },
  types::{
    dependency::Dependency,
    export_name::ExportName,
    exports_kind::ExportsKind,
    module_type::ModuleType,
    source_classification::SourceClassification,
  },
};
