//! Tests for the `.lvl` codec and the JSON export working on files.

mod lvl_file_tests;
