//! Platform detection and binary naming.
//!
//! This module maps the host operating system and CPU architecture to the
//! name of the prebuilt scanner binary, both as stored locally and as
//! published on the release page.

mod binary;
mod detection;

pub use binary::{BinarySpec, UnsupportedPlatform, launcher_binary_name, resolve};
pub use detection::PlatformKey;
