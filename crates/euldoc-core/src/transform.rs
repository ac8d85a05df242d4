/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * AST transformation pipeline infrastructure.
 */

//! AST transformation pipeline infrastructure.
//!
//! - [`AstTransform`] - The trait implemented by every pass
//! - [`TransformPipeline`] - Ordered collection of passes to execute
//! - [`TransformContext`] - What a pass may use besides the document
//!
//! Passes run in a flat, ordered sequence (insertion order). Each pass owns
//! the document for the duration of its run and later passes see its
//! mutations. The first failing pass stops the pipeline.
//!
//! # Example
//!
//! ```ignore
//! use euldoc_core::transform::{AstTransform, TransformContext, TransformPipeline};
//!
//! struct MyTransform;
//!
//! impl AstTransform for MyTransform {
//!     fn name(&self) -> &str { "my-transform" }
//!
//!     fn transform(&self, ast: &mut Pandoc, ctx: &mut TransformContext) -> Result<()> {
//!         // Modify the AST...
//!         Ok(())
//!     }
//! }
//!
//! let mut pipeline = TransformPipeline::new();
//! pipeline.push(Box::new(MyTransform));
//! pipeline.execute(&mut ast, &mut TransformContext::new(&NativeRuntime))?;
//! ```

use euldoc_pandoc_types::Pandoc;

use crate::Result;
use crate::runtime::SystemRuntime;

/// Services available to a pass while it runs.
pub struct TransformContext<'a> {
    runtime: &'a dyn SystemRuntime,
}

impl<'a> TransformContext<'a> {
    pub fn new(runtime: &'a dyn SystemRuntime) -> Self {
        Self { runtime }
    }

    /// The filesystem and clock the passes may consult.
    pub fn runtime(&self) -> &dyn SystemRuntime {
        self.runtime
    }
}

/// Trait for AST transformations.
///
/// # Thread Safety
///
/// Transforms must be `Send + Sync` so a built pipeline can be shared
/// between documents.
pub trait AstTransform: Send + Sync {
    /// Human-readable name for this transform.
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &str;

    /// Apply the transformation to the AST.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not have the shape the pass
    /// relies on. The document may be partially transformed in that case.
    fn transform(&self, ast: &mut Pandoc, ctx: &mut TransformContext) -> Result<()>;
}

/// A pipeline of AST transforms to execute in order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn AstTransform>>,
}

impl TransformPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    ///
    /// Transforms run in the order they are added.
    pub fn push(&mut self, transform: Box<dyn AstTransform>) {
        self.transforms.push(transform);
    }

    /// Add multiple transforms to the pipeline.
    pub fn extend(&mut self, transforms: impl IntoIterator<Item = Box<dyn AstTransform>>) {
        self.transforms.extend(transforms);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Execution stops on error.
    pub fn execute(&self, ast: &mut Pandoc, ctx: &mut TransformContext) -> Result<()> {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Running transform");
            transform.transform(ast, ctx)?;
        }

        Ok(())
    }

    /// List the names of all transforms in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
