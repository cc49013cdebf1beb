//! Integration tests for arrowboard.
//!
//! These tests drive the editor with raw pointer input and commands and
//! check complete workflows end-to-end.

mod arrow_flow_tests;
mod camera_tests;
mod tool_tests;
mod transform_flow_tests;
