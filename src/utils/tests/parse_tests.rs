//! Tests for value parsing helpers

extern crate std;

use crate::utils::parse_utils::{parse_f64_pair, parse_levels, parse_u32_pair};

#[test]
fn test_parse_f64_pair() {
    std::assert_eq!(parse_f64_pair(" 0.5 , 2 ", "resolution").unwrap(), (0.5, 2.0));
    std::assert!(parse_f64_pair("0.5", "resolution").is_err());
    std::assert!(parse_f64_pair("a,b", "resolution").is_err());
    std::assert!(parse_f64_pair("1,2,3", "resolution").is_err());
}

#[test]
fn test_parse_u32_pair() {
    std::assert_eq!(parse_u32_pair("25,25", "size").unwrap(), (25, 25));
    std::assert!(parse_u32_pair("-1,25", "size").is_err());
    std::assert!(parse_u32_pair("2.5,25", "size").is_err());
}

#[test]
fn test_parse_levels() {
    std::assert_eq!(parse_levels("2 4, 8").unwrap(), vec![2, 4, 8]);
    std::assert_eq!(parse_levels("").unwrap(), Vec::<u32>::new());
    std::assert!(parse_levels("2 x").is_err());
}
