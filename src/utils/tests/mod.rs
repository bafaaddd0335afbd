mod parse_tests;
mod logger_tests;
