/*
 * today.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that fills in a missing document date.
 */

use chrono::{Datelike, NaiveDate};
use euldoc_pandoc_types::{Inline, MetaValue, Pandoc};

use crate::Result;
use crate::transform::{AstTransform, TransformContext};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `date` as `<Month> <Day>, <Year>` inlines, e.g. `March 5, 2024`.
pub fn format_date(date: NaiveDate) -> Vec<Inline> {
    vec![
        Inline::str(MONTHS[date.month0() as usize]),
        Inline::space(),
        Inline::str(format!("{},", date.day())),
        Inline::space(),
        Inline::str(date.year().to_string()),
    ]
}

/// Sets the `date` metadata field to today when the document has none.
pub struct DateTransform;

impl DateTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTransform for DateTransform {
    fn name(&self) -> &str {
        "date"
    }

    fn transform(&self, ast: &mut Pandoc, ctx: &mut TransformContext) -> Result<()> {
        if ast.meta.contains_key("date") {
            return Ok(());
        }
        let today = ctx.runtime().today();
        tracing::debug!(%today, "Adding document date");
        ast.meta
            .insert("date".to_string(), MetaValue::MetaInlines(format_date(today)));
        Ok(())
    }
}
