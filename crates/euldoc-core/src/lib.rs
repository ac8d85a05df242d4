/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document passes for pandoc JSON filters.
//!
//! The crate walks a [`Pandoc`](euldoc_pandoc_types::Pandoc) tree and runs an
//! ordered set of passes over it:
//!
//! - [`traversals`] - Generic pre-order walker and identity-based parent lookup
//! - [`identifiers`] - Anchor identifiers derived from header text
//! - [`transform`] - The [`AstTransform`] trait and [`TransformPipeline`]
//! - [`transforms`] - The passes themselves
//! - [`pipeline`] - Which passes run for each output [`Mode`]
//!
//! # Example
//!
//! ```ignore
//! use euldoc_core::{NativeRuntime, PipelineOptions, process};
//!
//! let doc = euldoc_json::read(&mut std::io::stdin())?;
//! let doc = process(doc, &PipelineOptions::default(), &NativeRuntime::new())?;
//! ```

pub mod error;
pub mod identifiers;
pub mod pipeline;
pub mod runtime;
pub mod transform;
pub mod transforms;
pub mod traversals;

pub use error::{EuldocError, Result};
pub use pipeline::{Mode, PipelineOptions, build_pipeline, process};
pub use runtime::{NativeRuntime, SystemRuntime};
pub use transform::{AstTransform, TransformContext, TransformPipeline};
