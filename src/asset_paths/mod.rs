//! Helpers for turning raw reference URLs into local files and embeddable data.
//!
//! Filtering skip-schemes, resolving relative references against the referencing file and
//! encoding binary assets as data URIs live in separate submodules so each can be tested on
//! its own.

mod data_uri;
mod filters;
mod resolve;

pub use data_uri::{encode_data_uri, media_type_for};
pub use filters::is_skip_scheme;
pub use resolve::{Resolution, absolutize, resolve_reference, url_to_file_name};
