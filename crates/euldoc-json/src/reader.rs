/*
 * reader.rs
 * Copyright (c) 2025 Posit, PBC
 */

use euldoc_pandoc_types::{
    Alignment, Attr, Block, BlockQuote, BulletList, Caption, Cell, Citation, CitationMode, Cite,
    Code, CodeBlock, ColSpec, ColWidth, DEFAULT_API_VERSION, DefinitionItem, DefinitionList, Div,
    Emph, Figure, Header, HorizontalRule, Image, Inline, Inlines, LineBlock, LineBreak, Link,
    ListAttributes, ListNumberDelim, ListNumberStyle, Math, MathType, Meta, MetaValue, NodeId,
    Note, OrderedList, Pandoc, Paragraph, Plain, QuoteType, Quoted, RawBlock, RawInline, Row,
    SmallCaps, SoftBreak, Space, Span, Str, Strikeout, Strong, Subscript, Superscript, Table,
    TableBody, TableFoot, TableHead, Underline,
};
use hashlink::LinkedHashMap;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonReadError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, JsonReadError>;

fn invalid(msg: impl Into<String>) -> JsonReadError {
    JsonReadError::InvalidType(msg.into())
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| invalid(format!("Expected object for {}", what)))
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("Expected array for {}", what)))
}

/// An array that must have exactly `len` elements.
fn as_tuple<'a>(value: &'a Value, what: &str, len: usize) -> Result<&'a [Value]> {
    let arr = as_array(value, what)?;
    if arr.len() != len {
        return Err(invalid(format!("{} array must have {} elements", what, len)));
    }
    Ok(arr.as_slice())
}

fn as_string(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("{} must be string", what)))
}

fn as_usize(value: &Value, what: &str) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid(format!("{} must be a non-negative integer", what)))
}

fn tag_of<'a>(obj: &'a Map<String, Value>) -> Result<&'a str> {
    obj.get("t")
        .and_then(Value::as_str)
        .ok_or_else(|| JsonReadError::MissingField("t".to_string()))
}

fn contents<'a>(obj: &'a Map<String, Value>) -> Result<&'a Value> {
    obj.get("c")
        .ok_or_else(|| JsonReadError::MissingField("c".to_string()))
}

/// The `t` of a nullary constructor such as `{"t": "AlignLeft"}`.
fn read_enum_tag<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    tag_of(as_object(value, what)?)
}

fn read_attr(value: &Value) -> Result<Attr> {
    let arr = as_tuple(value, "Attr", 3)?;
    let id = as_string(&arr[0], "Attr id")?;
    let classes = as_array(&arr[1], "Attr classes")?
        .iter()
        .map(|v| as_string(v, "Class"))
        .collect::<Result<Vec<_>>>()?;
    let kvs = as_array(&arr[2], "Attr key-values")?
        .iter()
        .map(|v| {
            let kv = as_tuple(v, "Key-value pair", 2)?;
            Ok((as_string(&kv[0], "Key")?, as_string(&kv[1], "Value")?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((id, classes, kvs))
}

fn read_target(value: &Value) -> Result<(String, String)> {
    let arr = as_tuple(value, "Target", 2)?;
    Ok((
        as_string(&arr[0], "Target url")?,
        as_string(&arr[1], "Target title")?,
    ))
}

fn read_citation_mode(value: &Value) -> Result<CitationMode> {
    match read_enum_tag(value, "CitationMode")? {
        "NormalCitation" => Ok(CitationMode::NormalCitation),
        "AuthorInText" => Ok(CitationMode::AuthorInText),
        "SuppressAuthor" => Ok(CitationMode::SuppressAuthor),
        t => Err(JsonReadError::UnsupportedVariant(format!(
            "CitationMode: {}",
            t
        ))),
    }
}

fn read_citation(value: &Value) -> Result<Citation> {
    let obj = as_object(value, "Citation")?;
    let field = |name: &str| {
        obj.get(name)
            .ok_or_else(|| JsonReadError::MissingField(name.to_string()))
    };
    Ok(Citation {
        id: as_string(field("citationId")?, "citationId")?,
        prefix: read_inlines(field("citationPrefix")?)?,
        suffix: read_inlines(field("citationSuffix")?)?,
        mode: read_citation_mode(field("citationMode")?)?,
        note_num: as_usize(field("citationNoteNum")?, "citationNoteNum")?,
        hash: as_usize(field("citationHash")?, "citationHash")?,
    })
}

fn read_quote_type(value: &Value) -> Result<QuoteType> {
    match read_enum_tag(value, "QuoteType")? {
        "SingleQuote" => Ok(QuoteType::SingleQuote),
        "DoubleQuote" => Ok(QuoteType::DoubleQuote),
        t => Err(JsonReadError::UnsupportedVariant(format!("QuoteType: {}", t))),
    }
}

fn read_math_type(value: &Value) -> Result<MathType> {
    match read_enum_tag(value, "MathType")? {
        "InlineMath" => Ok(MathType::InlineMath),
        "DisplayMath" => Ok(MathType::DisplayMath),
        t => Err(JsonReadError::UnsupportedVariant(format!("MathType: {}", t))),
    }
}

fn read_inline(value: &Value) -> Result<Inline> {
    let obj = as_object(value, "Inline")?;
    let t = tag_of(obj)?;
    let node_id = NodeId::fresh();

    // Nullary constructors carry no "c" field.
    match t {
        "Space" => return Ok(Inline::Space(Space { node_id })),
        "SoftBreak" => return Ok(Inline::SoftBreak(SoftBreak { node_id })),
        "LineBreak" => return Ok(Inline::LineBreak(LineBreak { node_id })),
        _ => {}
    }

    let c = contents(obj)?;
    let inline = match t {
        "Str" => Inline::Str(Str {
            text: as_string(c, "Str content")?,
            node_id,
        }),
        "Emph" => Inline::Emph(Emph {
            content: read_inlines(c)?,
            node_id,
        }),
        "Underline" => Inline::Underline(Underline {
            content: read_inlines(c)?,
            node_id,
        }),
        "Strong" => Inline::Strong(Strong {
            content: read_inlines(c)?,
            node_id,
        }),
        "Strikeout" => Inline::Strikeout(Strikeout {
            content: read_inlines(c)?,
            node_id,
        }),
        "Superscript" => Inline::Superscript(Superscript {
            content: read_inlines(c)?,
            node_id,
        }),
        "Subscript" => Inline::Subscript(Subscript {
            content: read_inlines(c)?,
            node_id,
        }),
        "SmallCaps" => Inline::SmallCaps(SmallCaps {
            content: read_inlines(c)?,
            node_id,
        }),
        "Quoted" => {
            let arr = as_tuple(c, "Quoted", 2)?;
            Inline::Quoted(Quoted {
                quote_type: read_quote_type(&arr[0])?,
                content: read_inlines(&arr[1])?,
                node_id,
            })
        }
        "Cite" => {
            let arr = as_tuple(c, "Cite", 2)?;
            let citations = as_array(&arr[0], "Cite citations")?
                .iter()
                .map(read_citation)
                .collect::<Result<Vec<_>>>()?;
            Inline::Cite(Cite {
                citations,
                content: read_inlines(&arr[1])?,
                node_id,
            })
        }
        "Code" => {
            let arr = as_tuple(c, "Code", 2)?;
            Inline::Code(Code {
                attr: read_attr(&arr[0])?,
                text: as_string(&arr[1], "Code text")?,
                node_id,
            })
        }
        "Math" => {
            let arr = as_tuple(c, "Math", 2)?;
            Inline::Math(Math {
                math_type: read_math_type(&arr[0])?,
                text: as_string(&arr[1], "Math text")?,
                node_id,
            })
        }
        "RawInline" => {
            let arr = as_tuple(c, "RawInline", 2)?;
            Inline::RawInline(RawInline {
                format: as_string(&arr[0], "RawInline format")?,
                text: as_string(&arr[1], "RawInline text")?,
                node_id,
            })
        }
        "Link" => {
            let arr = as_tuple(c, "Link", 3)?;
            Inline::Link(Link {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
                target: read_target(&arr[2])?,
                node_id,
            })
        }
        "Image" => {
            let arr = as_tuple(c, "Image", 3)?;
            Inline::Image(Image {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
                target: read_target(&arr[2])?,
                node_id,
            })
        }
        "Note" => Inline::Note(Note {
            content: read_blocks(c)?,
            node_id,
        }),
        "Span" => {
            let arr = as_tuple(c, "Span", 2)?;
            Inline::Span(Span {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
                node_id,
            })
        }
        _ => return Err(JsonReadError::UnsupportedVariant(format!("Inline: {}", t))),
    };
    Ok(inline)
}

fn read_inlines(value: &Value) -> Result<Inlines> {
    as_array(value, "Inlines")?.iter().map(read_inline).collect()
}

fn read_blocks(value: &Value) -> Result<Vec<Block>> {
    as_array(value, "blocks")?.iter().map(read_block).collect()
}

fn read_blockss(value: &Value) -> Result<Vec<Vec<Block>>> {
    as_array(value, "blockss")?.iter().map(read_blocks).collect()
}

fn read_list_attributes(value: &Value) -> Result<ListAttributes> {
    let arr = as_tuple(value, "ListAttributes", 3)?;
    let start_num = arr[0]
        .as_i64()
        .ok_or_else(|| invalid("ListAttributes start number must be integer"))?;

    let number_style = match read_enum_tag(&arr[1], "ListNumberStyle")? {
        "DefaultStyle" => ListNumberStyle::Default,
        "Example" => ListNumberStyle::Example,
        "Decimal" => ListNumberStyle::Decimal,
        "LowerRoman" => ListNumberStyle::LowerRoman,
        "UpperRoman" => ListNumberStyle::UpperRoman,
        "LowerAlpha" => ListNumberStyle::LowerAlpha,
        "UpperAlpha" => ListNumberStyle::UpperAlpha,
        t => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "ListNumberStyle: {}",
                t
            )));
        }
    };

    let number_delimiter = match read_enum_tag(&arr[2], "ListNumberDelim")? {
        "DefaultDelim" => ListNumberDelim::Default,
        "Period" => ListNumberDelim::Period,
        "OneParen" => ListNumberDelim::OneParen,
        "TwoParens" => ListNumberDelim::TwoParens,
        t => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "ListNumberDelim: {}",
                t
            )));
        }
    };

    Ok((start_num, number_style, number_delimiter))
}

fn read_definition_item(value: &Value) -> Result<DefinitionItem> {
    let arr = as_tuple(value, "DefinitionList item", 2)?;
    Ok((read_inlines(&arr[0])?, read_blockss(&arr[1])?))
}

fn read_caption(value: &Value) -> Result<Caption> {
    let arr = as_tuple(value, "Caption", 2)?;
    let short = if arr[0].is_null() {
        None
    } else {
        Some(read_inlines(&arr[0])?)
    };
    Ok(Caption {
        short,
        long: read_blocks(&arr[1])?,
    })
}

fn read_alignment(value: &Value) -> Result<Alignment> {
    match read_enum_tag(value, "Alignment")? {
        "AlignLeft" => Ok(Alignment::Left),
        "AlignCenter" => Ok(Alignment::Center),
        "AlignRight" => Ok(Alignment::Right),
        "AlignDefault" => Ok(Alignment::Default),
        t => Err(JsonReadError::UnsupportedVariant(format!("Alignment: {}", t))),
    }
}

fn read_colwidth(value: &Value) -> Result<ColWidth> {
    let obj = as_object(value, "ColWidth")?;
    match tag_of(obj)? {
        "ColWidthDefault" => Ok(ColWidth::Default),
        "ColWidth" => {
            let percentage = contents(obj)?
                .as_f64()
                .ok_or_else(|| invalid("ColWidth percentage must be number"))?;
            Ok(ColWidth::Percentage(percentage))
        }
        t => Err(JsonReadError::UnsupportedVariant(format!("ColWidth: {}", t))),
    }
}

fn read_colspec(value: &Value) -> Result<ColSpec> {
    let arr = as_tuple(value, "ColSpec", 2)?;
    Ok((read_alignment(&arr[0])?, read_colwidth(&arr[1])?))
}

fn read_cell(value: &Value) -> Result<Cell> {
    let arr = as_tuple(value, "Cell", 5)?;
    Ok(Cell {
        attr: read_attr(&arr[0])?,
        alignment: read_alignment(&arr[1])?,
        row_span: as_usize(&arr[2], "Cell row_span")?,
        col_span: as_usize(&arr[3], "Cell col_span")?,
        content: read_blocks(&arr[4])?,
    })
}

fn read_row(value: &Value) -> Result<Row> {
    let arr = as_tuple(value, "Row", 2)?;
    let cells = as_array(&arr[1], "Row cells")?
        .iter()
        .map(read_cell)
        .collect::<Result<Vec<_>>>()?;
    Ok(Row {
        attr: read_attr(&arr[0])?,
        cells,
    })
}

fn read_rows(value: &Value, what: &str) -> Result<Vec<Row>> {
    as_array(value, what)?.iter().map(read_row).collect()
}

fn read_table_head(value: &Value) -> Result<TableHead> {
    let arr = as_tuple(value, "TableHead", 2)?;
    Ok(TableHead {
        attr: read_attr(&arr[0])?,
        rows: read_rows(&arr[1], "TableHead rows")?,
    })
}

fn read_table_body(value: &Value) -> Result<TableBody> {
    let arr = as_tuple(value, "TableBody", 4)?;
    Ok(TableBody {
        attr: read_attr(&arr[0])?,
        rowhead_columns: as_usize(&arr[1], "TableBody rowhead_columns")?,
        head: read_rows(&arr[2], "TableBody head")?,
        body: read_rows(&arr[3], "TableBody body")?,
    })
}

fn read_table_foot(value: &Value) -> Result<TableFoot> {
    let arr = as_tuple(value, "TableFoot", 2)?;
    Ok(TableFoot {
        attr: read_attr(&arr[0])?,
        rows: read_rows(&arr[1], "TableFoot rows")?,
    })
}

fn read_block(value: &Value) -> Result<Block> {
    let obj = as_object(value, "Block")?;
    let t = tag_of(obj)?;
    let node_id = NodeId::fresh();

    if t == "HorizontalRule" {
        return Ok(Block::HorizontalRule(HorizontalRule { node_id }));
    }

    let c = contents(obj)?;
    let block = match t {
        "Plain" => Block::Plain(Plain {
            content: read_inlines(c)?,
            node_id,
        }),
        "Para" => Block::Paragraph(Paragraph {
            content: read_inlines(c)?,
            node_id,
        }),
        "LineBlock" => Block::LineBlock(LineBlock {
            content: as_array(c, "LineBlock")?
                .iter()
                .map(read_inlines)
                .collect::<Result<Vec<_>>>()?,
            node_id,
        }),
        "CodeBlock" => {
            let arr = as_tuple(c, "CodeBlock", 2)?;
            Block::CodeBlock(CodeBlock {
                attr: read_attr(&arr[0])?,
                text: as_string(&arr[1], "CodeBlock text")?,
                node_id,
            })
        }
        "RawBlock" => {
            let arr = as_tuple(c, "RawBlock", 2)?;
            Block::RawBlock(RawBlock {
                format: as_string(&arr[0], "RawBlock format")?,
                text: as_string(&arr[1], "RawBlock text")?,
                node_id,
            })
        }
        "BlockQuote" => Block::BlockQuote(BlockQuote {
            content: read_blocks(c)?,
            node_id,
        }),
        "OrderedList" => {
            let arr = as_tuple(c, "OrderedList", 2)?;
            Block::OrderedList(OrderedList {
                attr: read_list_attributes(&arr[0])?,
                content: read_blockss(&arr[1])?,
                node_id,
            })
        }
        "BulletList" => Block::BulletList(BulletList {
            content: read_blockss(c)?,
            node_id,
        }),
        "DefinitionList" => Block::DefinitionList(DefinitionList {
            content: as_array(c, "DefinitionList")?
                .iter()
                .map(read_definition_item)
                .collect::<Result<Vec<_>>>()?,
            node_id,
        }),
        "Header" => {
            let arr = as_tuple(c, "Header", 3)?;
            Block::Header(Header {
                level: as_usize(&arr[0], "Header level")?,
                attr: read_attr(&arr[1])?,
                content: read_inlines(&arr[2])?,
                node_id,
            })
        }
        "Table" => {
            let arr = as_tuple(c, "Table", 6)?;
            let colspec = as_array(&arr[2], "Table colspec")?
                .iter()
                .map(read_colspec)
                .collect::<Result<Vec<_>>>()?;
            let bodies = as_array(&arr[4], "Table bodies")?
                .iter()
                .map(read_table_body)
                .collect::<Result<Vec<_>>>()?;
            Block::Table(Table {
                attr: read_attr(&arr[0])?,
                caption: read_caption(&arr[1])?,
                colspec,
                head: read_table_head(&arr[3])?,
                bodies,
                foot: read_table_foot(&arr[5])?,
                node_id,
            })
        }
        "Figure" => {
            let arr = as_tuple(c, "Figure", 3)?;
            Block::Figure(Figure {
                attr: read_attr(&arr[0])?,
                caption: read_caption(&arr[1])?,
                content: read_blocks(&arr[2])?,
                node_id,
            })
        }
        "Div" => {
            let arr = as_tuple(c, "Div", 2)?;
            Block::Div(Div {
                attr: read_attr(&arr[0])?,
                content: read_blocks(&arr[1])?,
                node_id,
            })
        }
        _ => return Err(JsonReadError::UnsupportedVariant(format!("Block: {}", t))),
    };
    Ok(block)
}

fn read_meta_value(value: &Value) -> Result<MetaValue> {
    let obj = as_object(value, "MetaValue")?;
    let t = tag_of(obj)?;
    let c = contents(obj)?;
    match t {
        "MetaString" => Ok(MetaValue::MetaString(as_string(c, "MetaString")?)),
        "MetaBool" => c
            .as_bool()
            .map(MetaValue::MetaBool)
            .ok_or_else(|| invalid("MetaBool must be boolean")),
        "MetaInlines" => Ok(MetaValue::MetaInlines(read_inlines(c)?)),
        "MetaBlocks" => Ok(MetaValue::MetaBlocks(read_blocks(c)?)),
        "MetaList" => Ok(MetaValue::MetaList(
            as_array(c, "MetaList")?
                .iter()
                .map(read_meta_value)
                .collect::<Result<Vec<_>>>()?,
        )),
        "MetaMap" => Ok(MetaValue::MetaMap(read_meta(c)?)),
        _ => Err(JsonReadError::UnsupportedVariant(format!("MetaValue: {}", t))),
    }
}

fn read_meta(value: &Value) -> Result<Meta> {
    let obj = as_object(value, "Meta")?;
    let mut meta = LinkedHashMap::new();
    for (key, val) in obj {
        meta.insert(key.clone(), read_meta_value(val)?);
    }
    Ok(meta)
}

fn read_api_version(value: Option<&Value>) -> Result<Vec<i64>> {
    let Some(value) = value else {
        return Ok(DEFAULT_API_VERSION.to_vec());
    };
    as_array(value, "pandoc-api-version")?
        .iter()
        .map(|v| {
            v.as_i64()
                .ok_or_else(|| invalid("pandoc-api-version entries must be integers"))
        })
        .collect()
}

/// Build a document from an already-parsed JSON value.
pub fn read_value(value: &Value) -> Result<Pandoc> {
    let obj = as_object(value, "Pandoc")?;
    let api_version = read_api_version(obj.get("pandoc-api-version"))?;
    let meta = read_meta(
        obj.get("meta")
            .ok_or_else(|| JsonReadError::MissingField("meta".to_string()))?,
    )?;
    let blocks = read_blocks(
        obj.get("blocks")
            .ok_or_else(|| JsonReadError::MissingField("blocks".to_string()))?,
    )?;
    Ok(Pandoc {
        api_version,
        meta,
        blocks,
    })
}

pub fn read_str(input: &str) -> Result<Pandoc> {
    let json: Value = serde_json::from_str(input)?;
    read_value(&json)
}

pub fn read<R: std::io::Read>(reader: &mut R) -> Result<Pandoc> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    read_str(&buffer)
}
