//! End-to-end tests for the `sloq` binary.

mod basic_pipe;
mod fixture_file;
mod log_levels;
mod malformed_lines;
