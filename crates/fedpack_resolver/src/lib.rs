// A wrapper around the `oxc_resolver` crate to map dependency requests to the files the export analyzer reads.

mod resolver;

pub use crate::resolver::Resolver;
