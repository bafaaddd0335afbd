//! Tests for creation option checking

extern crate std;

use crate::errors::ExportError;
use crate::export::{compression_code, validate_option, CreateOptions};

#[test]
fn test_validate_known_options() {
    std::assert!(validate_option("COMPRESS=LZW").is_ok());
    std::assert!(validate_option("compress = deflate").is_ok());
    std::assert!(validate_option("ZLEVEL=9").is_ok());
    std::assert!(validate_option("NUM_THREADS=ALL_CPUS").is_ok());
    std::assert!(validate_option("COMPRESS_OVERVIEW=JPEG").is_ok());
}

#[test]
fn test_validate_rejects_bad_values() {
    std::assert!(matches!(validate_option("COMPRESS=FOO"), Err(ExportError::InvalidCreateOption(_))));
    std::assert!(validate_option("ZLEVEL=13").is_err());
    std::assert!(validate_option("NUM_THREADS=0").is_err());
    std::assert!(validate_option("PREDICTOR=two").is_err());
    std::assert!(validate_option("garbage").is_err());
}

#[test]
fn test_unknown_option_passes() {
    let _ = env_logger::builder().is_test(true).try_init();
    std::assert!(validate_option("SOME_NEW_OPTION=1").is_ok());
}

#[test]
fn test_compression_code() {
    std::assert_eq!(compression_code("lzw"), Some(5));
    std::assert_eq!(compression_code("DEFLATE"), Some(8));
    std::assert_eq!(compression_code("ZSTD"), Some(50000));
    std::assert_eq!(compression_code("BOGUS"), None);
}

#[test]
fn test_disabled_group_hands_out_nothing() {
    let mut options = CreateOptions::default();
    options.set_options(vec!["COMPRESS=DEFLATE".to_string()]);
    std::assert!(!options.is_enabled());
    std::assert!(options.options().is_empty());

    options.set_enabled(true);
    std::assert_eq!(options.options(), vec!["COMPRESS=DEFLATE".to_string()]);
    std::assert_eq!(options.compression(), Some(("DEFLATE".to_string(), 8)));
    std::assert_eq!(options.value("compress"), Some("DEFLATE".to_string()));
}

#[test]
fn test_tiled_block_sizes() {
    std::assert!(CreateOptions::from_profile("TILED=YES BLOCKXSIZE=256 BLOCKYSIZE=256").validate().is_ok());
    std::assert!(CreateOptions::from_profile("TILED=YES BLOCKXSIZE=100").validate().is_err());
    std::assert!(CreateOptions::from_profile("TILED=NO BLOCKXSIZE=100").validate().is_ok());
}
