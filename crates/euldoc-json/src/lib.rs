/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Reading and writing the pandoc JSON interchange format.
 */

pub mod reader;
pub mod writer;

pub use reader::{JsonReadError, read, read_str, read_value};
pub use writer::{to_value, write};
