mod filename_tests;
mod create_options_tests;
mod pyramids_tests;
mod form_tests;

use std::fs;
use std::path::PathBuf;

/// Fresh, empty directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rastersave_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}
