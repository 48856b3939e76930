pub mod dependency;
pub mod export_name;
pub mod exports_kind;
pub mod module_type;
pub mod source_classification;
