/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Output modes and the pass sequence for each.
 */

use euldoc_pandoc_types::Pandoc;

use crate::Result;
use crate::runtime::SystemRuntime;
use crate::transform::{TransformContext, TransformPipeline};
use crate::transforms::{
    AutoIdentifierTransform, AutolinkHeadingTransform, DEFAULT_SECTION_LEVEL, DateTransform,
    HfillTransform, LightweightSectionTransform, PreviewLinkTransform, SeparatorTransform,
    SvgImageTransform,
};

/// The output the document is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Html,
    Pdf,
}

/// Settings for [`build_pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub mode: Mode,
    /// Level of the headers made from bold lead-ins (HTML only).
    pub section_level: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Html,
            section_level: DEFAULT_SECTION_LEVEL,
        }
    }
}

/// Build the pass sequence for `options.mode`.
///
/// PDF runs: date, separators, preview-links.
///
/// HTML runs: separators, lightweight-sections, auto-identifiers,
/// autolink-headings, svg-images, hfill, date. Autolinking relies on the
/// identifiers assigned just before it.
pub fn build_pipeline(options: &PipelineOptions) -> TransformPipeline {
    let mut pipeline = TransformPipeline::new();

    match options.mode {
        Mode::Pdf => {
            pipeline.push(Box::new(DateTransform::new()));
            pipeline.push(Box::new(SeparatorTransform::new(Mode::Pdf)));
            pipeline.push(Box::new(PreviewLinkTransform::new()));
        }
        Mode::Html => {
            pipeline.push(Box::new(SeparatorTransform::new(Mode::Html)));
            pipeline.push(Box::new(LightweightSectionTransform::new(
                options.section_level,
            )));
            pipeline.push(Box::new(AutoIdentifierTransform::new()));
            pipeline.push(Box::new(AutolinkHeadingTransform::new()));
            pipeline.push(Box::new(SvgImageTransform::new()));
            pipeline.push(Box::new(HfillTransform::new()));
            pipeline.push(Box::new(DateTransform::new()));
        }
    }

    pipeline
}

/// Run every pass for `options.mode` over `doc`.
///
/// # Errors
///
/// Returns the first pass error. The partially transformed document is
/// dropped so nothing half-done can be written out.
pub fn process(
    mut doc: Pandoc,
    options: &PipelineOptions,
    runtime: &dyn SystemRuntime,
) -> Result<Pandoc> {
    let pipeline = build_pipeline(options);
    tracing::debug!(mode = ?options.mode, passes = pipeline.len(), "Processing document");
    pipeline.execute(&mut doc, &mut TransformContext::new(runtime))?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuldocError;
    use crate::runtime::FixedRuntime;
    use euldoc_pandoc_types::{Block, Inline, Meta, MetaValue, empty_attr};

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert_eq!(options.mode, Mode::Html);
        assert_eq!(options.section_level, 3);
    }

    #[test]
    fn test_html_pass_order() {
        let pipeline = build_pipeline(&PipelineOptions::default());
        assert_eq!(
            pipeline.transform_names(),
            vec![
                "separators",
                "lightweight-sections",
                "auto-identifiers",
                "autolink-headings",
                "svg-images",
                "hfill",
                "date",
            ]
        );
    }

    #[test]
    fn test_pdf_pass_order() {
        let options = PipelineOptions {
            mode: Mode::Pdf,
            ..Default::default()
        };
        assert_eq!(
            build_pipeline(&options).transform_names(),
            vec!["date", "separators", "preview-links"]
        );
    }

    #[test]
    fn test_process_html_links_derived_headers() {
        let runtime = FixedRuntime::new(2024, 6, 1);
        let doc = Pandoc::new(
            Meta::new(),
            vec![Block::header(1, empty_attr(), vec![Inline::str("Intro")])],
        );
        let out = process(doc, &PipelineOptions::default(), &runtime).unwrap();
        let Block::Header(header) = &out.blocks[0] else {
            panic!("Expected Header");
        };
        assert_eq!(header.attr.0, "intro");
        assert_eq!(
            header.content,
            vec![Inline::self_link(vec![Inline::str("Intro")], "#intro")]
        );
        assert!(matches!(out.meta["date"], MetaValue::MetaInlines(_)));
    }

    #[test]
    fn test_section_level_is_used() {
        let runtime = FixedRuntime::new(2024, 6, 1);
        let doc = Pandoc::new(
            Meta::new(),
            vec![Block::para(vec![
                Inline::strong(vec![Inline::str("Lead")]),
                Inline::space(),
                Inline::str("text"),
            ])],
        );
        let options = PipelineOptions {
            mode: Mode::Html,
            section_level: 5,
        };
        let out = process(doc, &options, &runtime).unwrap();
        let Block::Header(header) = &out.blocks[0] else {
            panic!("Expected Header");
        };
        assert_eq!(header.level, 5);
        assert_eq!(header.attr.0, "lead");
    }

    #[test]
    fn test_process_stops_on_malformed_header() {
        let runtime = FixedRuntime::new(2024, 6, 1);
        let doc = Pandoc::new(
            Meta::new(),
            vec![Block::header(
                2,
                empty_attr(),
                vec![Inline::str("a"), Inline::strong(vec![Inline::str("b")])],
            )],
        );
        let err = process(doc, &PipelineOptions::default(), &runtime).unwrap_err();
        assert!(matches!(err, EuldocError::MalformedAst { tag: "Strong" }));
    }
}
