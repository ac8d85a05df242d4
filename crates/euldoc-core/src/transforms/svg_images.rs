/*
 * svg_images.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that prefers SVG versions of local images.
 */

use std::path::Path;

use euldoc_pandoc_types::{Inline, Pandoc};

use crate::Result;
use crate::transform::{AstTransform, TransformContext};
use crate::traversals::{inline_keys, locate_inline_mut};

/// The URL of the `.svg` file next to `url`.
///
/// The extension of the last path segment is replaced; a segment without
/// one (including dot files such as `.hidden`) gets `.svg` appended.
pub fn svg_sibling(url: &str) -> String {
    let name_start = url.rfind('/').map_or(0, |slash| slash + 1);
    let name = &url[name_start..];
    let stem_len = match name.rfind('.') {
        Some(dot) if !name[..dot].trim_start_matches('.').is_empty() => dot,
        _ => name.len(),
    };
    format!("{}{}.svg", &url[..name_start], &name[..stem_len])
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Points every local image at its `.svg` sibling when that file exists.
///
/// Remote images are never probed. A sibling that cannot be opened leaves
/// the image untouched and is not an error.
pub struct SvgImageTransform;

impl SvgImageTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgImageTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTransform for SvgImageTransform {
    fn name(&self) -> &str {
        "svg-images"
    }

    fn transform(&self, ast: &mut Pandoc, ctx: &mut TransformContext) -> Result<()> {
        let images = inline_keys(ast, |inline| matches!(inline, Inline::Image(_)));

        let mut rewritten = 0;
        for key in &images {
            let (inlines, index) = locate_inline_mut(ast, *key)?;
            let Inline::Image(image) = &mut inlines[index] else {
                continue;
            };

            let sibling = svg_sibling(&image.target.0);
            if is_remote(&sibling) {
                tracing::debug!(url = %image.target.0, "Skipping remote image");
                continue;
            }
            match ctx.runtime().probe_file(Path::new(&sibling)) {
                Ok(()) => {
                    image.target.0 = sibling;
                    rewritten += 1;
                }
                Err(err) => {
                    tracing::debug!(path = %sibling, error = %err, "No SVG sibling");
                }
            }
        }

        tracing::debug!(images = images.len(), rewritten, "Rewrote images to SVG");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{FixedRuntime, NativeRuntime, SystemRuntime};
    use euldoc_pandoc_types::{Block, Meta, empty_attr};

    fn doc_with_image(url: &str) -> Pandoc {
        let image = Inline::image(
            empty_attr(),
            vec![Inline::str("figure")],
            (url.to_string(), "title".to_string()),
        );
        Pandoc::new(Meta::new(), vec![Block::para(vec![image])])
    }

    fn image_url(ast: &Pandoc) -> &str {
        let Block::Paragraph(para) = &ast.blocks[0] else {
            panic!("Expected Paragraph");
        };
        let Inline::Image(image) = &para.content[0] else {
            panic!("Expected Image");
        };
        &image.target.0
    }

    fn run(ast: &mut Pandoc, runtime: &dyn SystemRuntime) {
        SvgImageTransform::new()
            .transform(ast, &mut TransformContext::new(runtime))
            .unwrap();
    }

    #[test]
    fn test_svg_sibling() {
        assert_eq!(svg_sibling("fig.png"), "fig.svg");
        assert_eq!(svg_sibling("img/plot.v2.jpg"), "img/plot.v2.svg");
        assert_eq!(svg_sibling("img.d/plot"), "img.d/plot.svg");
        assert_eq!(svg_sibling(".hidden"), ".hidden.svg");
        assert_eq!(svg_sibling("fig.svg"), "fig.svg");
        assert_eq!(svg_sibling(""), ".svg");
    }

    #[test]
    fn test_transform_name() {
        assert_eq!(SvgImageTransform::new().name(), "svg-images");
    }

    #[test]
    fn test_existing_sibling_is_used() {
        let runtime = FixedRuntime::new(2024, 1, 1).with_file("fig.svg");
        let mut ast = doc_with_image("fig.png");
        run(&mut ast, &runtime);
        assert_eq!(image_url(&ast), "fig.svg");
    }

    #[test]
    fn test_missing_sibling_keeps_url() {
        let runtime = FixedRuntime::new(2024, 1, 1);
        let mut ast = doc_with_image("fig.png");
        run(&mut ast, &runtime);
        assert_eq!(image_url(&ast), "fig.png");
    }

    #[test]
    fn test_remote_image_is_not_probed() {
        let runtime = FixedRuntime::new(2024, 1, 1).with_file("http://example.com/fig.svg");
        let mut ast = doc_with_image("http://example.com/fig.png");
        run(&mut ast, &runtime);
        assert_eq!(image_url(&ast), "http://example.com/fig.png");
    }

    #[test]
    fn test_title_and_caption_are_kept() {
        let runtime = FixedRuntime::new(2024, 1, 1).with_file("fig.svg");
        let mut ast = doc_with_image("fig.png");
        run(&mut ast, &runtime);
        let Block::Paragraph(para) = &ast.blocks[0] else {
            panic!("Expected Paragraph");
        };
        let Inline::Image(image) = &para.content[0] else {
            panic!("Expected Image");
        };
        assert_eq!(image.target.1, "title");
        assert_eq!(image.content, vec![Inline::str("figure")]);
    }

    #[test]
    fn test_real_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plot.svg"), "<svg/>").unwrap();

        let present = dir.path().join("plot.png");
        let mut ast = doc_with_image(present.to_str().unwrap());
        run(&mut ast, &NativeRuntime::new());
        assert_eq!(
            image_url(&ast),
            dir.path().join("plot.svg").to_str().unwrap()
        );

        let absent = dir.path().join("other.png");
        let mut ast = doc_with_image(absent.to_str().unwrap());
        run(&mut ast, &NativeRuntime::new());
        assert_eq!(image_url(&ast), absent.to_str().unwrap());
    }
}
