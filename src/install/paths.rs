use std::path::{Path, PathBuf};

const BIN_DIR_NAME: &str = "bin";

/// Directory holding the downloaded binary.
pub fn bin_dir(install_root: &Path) -> PathBuf {
    install_root.join(BIN_DIR_NAME)
}

/// Full path of the local binary; shared by the installer and the launcher.
pub fn binary_path(install_root: &Path, file_name: &str) -> PathBuf {
    bin_dir(install_root).join(file_name)
}
