use std::path::{Path, PathBuf};

/// Gets the path of a sample file in `sprig_files`
pub fn sprig_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("sprig_files")
        .join(name)
}
