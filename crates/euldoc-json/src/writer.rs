/*
 * writer.rs
 * Copyright (c) 2025 Posit, PBC
 */

use euldoc_pandoc_types::{
    Alignment, Attr, Block, Caption, Cell, Citation, CitationMode, ColSpec, ColWidth, Inline,
    Inlines, ListAttributes, ListNumberDelim, ListNumberStyle, MathType, Meta, MetaValue, Pandoc,
    QuoteType, Row, TableBody, TableFoot, TableHead, Target,
};
use serde_json::{Map, Value, json};

fn write_attr(attr: &Attr) -> Value {
    json!([
        attr.0, // id
        attr.1, // classes
        attr.2
            .iter()
            .map(|(k, v)| json!([k, v]))
            .collect::<Vec<_>>()  // key-value pairs
    ])
}

fn write_target(target: &Target) -> Value {
    json!([target.0, target.1])
}

fn write_citation_mode(mode: &CitationMode) -> Value {
    match mode {
        CitationMode::NormalCitation => json!({"t": "NormalCitation"}),
        CitationMode::AuthorInText => json!({"t": "AuthorInText"}),
        CitationMode::SuppressAuthor => json!({"t": "SuppressAuthor"}),
    }
}

fn write_citation(citation: &Citation) -> Value {
    json!({
        "citationId": citation.id,
        "citationPrefix": write_inlines(&citation.prefix),
        "citationSuffix": write_inlines(&citation.suffix),
        "citationMode": write_citation_mode(&citation.mode),
        "citationNoteNum": citation.note_num,
        "citationHash": citation.hash
    })
}

fn write_quote_type(quote_type: &QuoteType) -> Value {
    match quote_type {
        QuoteType::SingleQuote => json!({"t": "SingleQuote"}),
        QuoteType::DoubleQuote => json!({"t": "DoubleQuote"}),
    }
}

fn write_math_type(math_type: &MathType) -> Value {
    match math_type {
        MathType::InlineMath => json!({"t": "InlineMath"}),
        MathType::DisplayMath => json!({"t": "DisplayMath"}),
    }
}

fn write_inline(inline: &Inline) -> Value {
    match inline {
        Inline::Str(s) => json!({"t": "Str", "c": s.text}),
        Inline::Emph(e) => json!({"t": "Emph", "c": write_inlines(&e.content)}),
        Inline::Underline(u) => json!({"t": "Underline", "c": write_inlines(&u.content)}),
        Inline::Strong(s) => json!({"t": "Strong", "c": write_inlines(&s.content)}),
        Inline::Strikeout(s) => json!({"t": "Strikeout", "c": write_inlines(&s.content)}),
        Inline::Superscript(s) => json!({"t": "Superscript", "c": write_inlines(&s.content)}),
        Inline::Subscript(s) => json!({"t": "Subscript", "c": write_inlines(&s.content)}),
        Inline::SmallCaps(s) => json!({"t": "SmallCaps", "c": write_inlines(&s.content)}),
        Inline::Quoted(q) => json!({
            "t": "Quoted",
            "c": [write_quote_type(&q.quote_type), write_inlines(&q.content)]
        }),
        Inline::Cite(c) => json!({
            "t": "Cite",
            "c": [
                c.citations.iter().map(write_citation).collect::<Vec<_>>(),
                write_inlines(&c.content)
            ]
        }),
        Inline::Code(c) => json!({"t": "Code", "c": [write_attr(&c.attr), c.text]}),
        Inline::Space(_) => json!({"t": "Space"}),
        Inline::SoftBreak(_) => json!({"t": "SoftBreak"}),
        Inline::LineBreak(_) => json!({"t": "LineBreak"}),
        Inline::Math(m) => json!({"t": "Math", "c": [write_math_type(&m.math_type), m.text]}),
        Inline::RawInline(r) => json!({"t": "RawInline", "c": [r.format, r.text]}),
        Inline::Link(l) => json!({
            "t": "Link",
            "c": [write_attr(&l.attr), write_inlines(&l.content), write_target(&l.target)]
        }),
        Inline::Image(i) => json!({
            "t": "Image",
            "c": [write_attr(&i.attr), write_inlines(&i.content), write_target(&i.target)]
        }),
        Inline::Note(n) => json!({"t": "Note", "c": write_blocks(&n.content)}),
        Inline::Span(s) => json!({
            "t": "Span",
            "c": [write_attr(&s.attr), write_inlines(&s.content)]
        }),
    }
}

fn write_inlines(inlines: &Inlines) -> Value {
    json!(inlines.iter().map(write_inline).collect::<Vec<_>>())
}

fn write_list_attributes(attr: &ListAttributes) -> Value {
    let number_style = match attr.1 {
        ListNumberStyle::Default => json!({"t": "DefaultStyle"}),
        ListNumberStyle::Example => json!({"t": "Example"}),
        ListNumberStyle::Decimal => json!({"t": "Decimal"}),
        ListNumberStyle::LowerRoman => json!({"t": "LowerRoman"}),
        ListNumberStyle::UpperRoman => json!({"t": "UpperRoman"}),
        ListNumberStyle::LowerAlpha => json!({"t": "LowerAlpha"}),
        ListNumberStyle::UpperAlpha => json!({"t": "UpperAlpha"}),
    };
    let number_delimiter = match attr.2 {
        ListNumberDelim::Default => json!({"t": "DefaultDelim"}),
        ListNumberDelim::Period => json!({"t": "Period"}),
        ListNumberDelim::OneParen => json!({"t": "OneParen"}),
        ListNumberDelim::TwoParens => json!({"t": "TwoParens"}),
    };
    json!([attr.0, number_style, number_delimiter])
}

fn write_blockss(blockss: &[Vec<Block>]) -> Value {
    json!(
        blockss
            .iter()
            .map(|blocks| write_blocks(blocks))
            .collect::<Vec<_>>()
    )
}

fn write_caption(caption: &Caption) -> Value {
    json!([
        caption.short.as_ref().map(write_inlines),
        write_blocks(&caption.long)
    ])
}

fn write_alignment(alignment: &Alignment) -> Value {
    match alignment {
        Alignment::Left => json!({"t": "AlignLeft"}),
        Alignment::Center => json!({"t": "AlignCenter"}),
        Alignment::Right => json!({"t": "AlignRight"}),
        Alignment::Default => json!({"t": "AlignDefault"}),
    }
}

fn write_colwidth(colwidth: &ColWidth) -> Value {
    match colwidth {
        ColWidth::Default => json!({"t": "ColWidthDefault"}),
        ColWidth::Percentage(p) => json!({"t": "ColWidth", "c": p}),
    }
}

fn write_colspec(colspec: &ColSpec) -> Value {
    json!([write_alignment(&colspec.0), write_colwidth(&colspec.1)])
}

fn write_cell(cell: &Cell) -> Value {
    json!([
        write_attr(&cell.attr),
        write_alignment(&cell.alignment),
        cell.row_span,
        cell.col_span,
        write_blocks(&cell.content)
    ])
}

fn write_row(row: &Row) -> Value {
    json!([
        write_attr(&row.attr),
        row.cells.iter().map(write_cell).collect::<Vec<_>>()
    ])
}

fn write_rows(rows: &[Row]) -> Value {
    json!(rows.iter().map(write_row).collect::<Vec<_>>())
}

fn write_table_head(head: &TableHead) -> Value {
    json!([write_attr(&head.attr), write_rows(&head.rows)])
}

fn write_table_body(body: &TableBody) -> Value {
    json!([
        write_attr(&body.attr),
        body.rowhead_columns,
        write_rows(&body.head),
        write_rows(&body.body)
    ])
}

fn write_table_foot(foot: &TableFoot) -> Value {
    json!([write_attr(&foot.attr), write_rows(&foot.rows)])
}

fn write_block(block: &Block) -> Value {
    match block {
        Block::Plain(p) => json!({"t": "Plain", "c": write_inlines(&p.content)}),
        Block::Paragraph(p) => json!({"t": "Para", "c": write_inlines(&p.content)}),
        Block::LineBlock(l) => json!({
            "t": "LineBlock",
            "c": l.content.iter().map(write_inlines).collect::<Vec<_>>()
        }),
        Block::CodeBlock(c) => json!({"t": "CodeBlock", "c": [write_attr(&c.attr), c.text]}),
        Block::RawBlock(r) => json!({"t": "RawBlock", "c": [r.format, r.text]}),
        Block::BlockQuote(q) => json!({"t": "BlockQuote", "c": write_blocks(&q.content)}),
        Block::OrderedList(l) => json!({
            "t": "OrderedList",
            "c": [write_list_attributes(&l.attr), write_blockss(&l.content)]
        }),
        Block::BulletList(l) => json!({"t": "BulletList", "c": write_blockss(&l.content)}),
        Block::DefinitionList(d) => json!({
            "t": "DefinitionList",
            "c": d.content
                .iter()
                .map(|(term, definitions)| {
                    json!([write_inlines(term), write_blockss(definitions)])
                })
                .collect::<Vec<_>>()
        }),
        Block::Header(h) => json!({
            "t": "Header",
            "c": [h.level, write_attr(&h.attr), write_inlines(&h.content)]
        }),
        Block::HorizontalRule(_) => json!({"t": "HorizontalRule"}),
        Block::Table(t) => json!({
            "t": "Table",
            "c": [
                write_attr(&t.attr),
                write_caption(&t.caption),
                t.colspec.iter().map(write_colspec).collect::<Vec<_>>(),
                write_table_head(&t.head),
                t.bodies.iter().map(write_table_body).collect::<Vec<_>>(),
                write_table_foot(&t.foot)
            ]
        }),
        Block::Figure(f) => json!({
            "t": "Figure",
            "c": [
                write_attr(&f.attr),
                write_caption(&f.caption),
                write_blocks(&f.content)
            ]
        }),
        Block::Div(d) => json!({"t": "Div", "c": [write_attr(&d.attr), write_blocks(&d.content)]}),
    }
}

fn write_blocks(blocks: &[Block]) -> Value {
    json!(blocks.iter().map(write_block).collect::<Vec<_>>())
}

fn write_meta_value(value: &MetaValue) -> Value {
    match value {
        MetaValue::MetaString(s) => json!({"t": "MetaString", "c": s}),
        MetaValue::MetaBool(b) => json!({"t": "MetaBool", "c": b}),
        MetaValue::MetaInlines(inlines) => json!({"t": "MetaInlines", "c": write_inlines(inlines)}),
        MetaValue::MetaBlocks(blocks) => json!({"t": "MetaBlocks", "c": write_blocks(blocks)}),
        MetaValue::MetaList(items) => json!({
            "t": "MetaList",
            "c": items.iter().map(write_meta_value).collect::<Vec<_>>()
        }),
        MetaValue::MetaMap(map) => json!({"t": "MetaMap", "c": write_meta(map)}),
    }
}

fn write_meta(meta: &Meta) -> Value {
    let mut obj = Map::new();
    for (key, value) in meta {
        obj.insert(key.clone(), write_meta_value(value));
    }
    Value::Object(obj)
}

/// Convert a document to its pandoc JSON value.
pub fn to_value(pandoc: &Pandoc) -> Value {
    json!({
        "pandoc-api-version": pandoc.api_version,
        "meta": write_meta(&pandoc.meta),
        "blocks": write_blocks(&pandoc.blocks),
    })
}

pub fn write<W: std::io::Write>(pandoc: &Pandoc, writer: &mut W) -> std::io::Result<()> {
    let json = to_value(pandoc);
    serde_json::to_writer(writer, &json)?;
    Ok(())
}
