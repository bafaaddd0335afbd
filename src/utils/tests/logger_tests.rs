//! Tests for the log file logger

extern crate std;

use crate::utils::logger::Logger;

#[test]
fn test_global_log_file_name() {
    std::assert_eq!(Logger::global_log_file("rastersave.log"), "rastersave-global.log");
    std::assert_eq!(Logger::global_log_file("runs/job"), "runs/job-global");
    std::assert_eq!(Logger::global_log_file("runs/job.2024.log"), "runs/job.2024-global.log");
}

#[test]
fn test_log_section_writes_indented_lines() {
    let path = std::env::temp_dir().join(format!("rastersave_logger_{}.log", std::process::id()));
    let path = path.to_string_lossy().to_string();
    let logger = Logger::new(&path).unwrap();
    logger.log_section("Export Plan:", &["Format: GTiff".to_string()]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    std::assert_eq!(content, "Export Plan:\n  Format: GTiff\n");
    std::fs::remove_file(&path).unwrap();
}
