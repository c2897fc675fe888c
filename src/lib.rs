pub mod assembler;
pub mod config;
pub mod errors;
pub mod logger;
pub mod manifest;
pub mod selector;
pub mod utils;

pub use assembler::{execute, execute_in, BasicPackageAssembler, PackReport, PackageAssembler};
pub use config::{resolve, PackConfig, PackOptions, PackageJsonOverride};
pub use errors::{PackError, SkipReason};
pub use selector::{core_files, expand_globs, FileSelector};
