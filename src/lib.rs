#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod error;
pub mod inline;
pub mod markup;
pub mod minify;
pub mod options;
pub mod policy;
pub mod report;
pub mod task;

pub use config::{OptionsConfig, TaskConfig};
pub use error::{InlineError, InlineResult};
pub use inline::{Inliner, inline_assets};
pub use minify::{Minifier, Passthrough, StandardMinifier};
pub use options::InlineOptions;
pub use policy::{AssetInclusion, PatternChain};
pub use report::{Action, ContentKind, LogReporter, NullReporter, ProgressEvent, Reporter};
pub use task::run_task;
