pub mod cleanup;
pub mod config;
pub mod http;
pub mod install;
pub mod launch;
pub mod platform;
pub mod release;
pub mod runtime;

/// Version string embedded by the build script.
pub const VERSION: &str = env!("RIP_DIST_VERSION");
