//! Table rendering

use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

/// Rounded table with a bold header row and right-aligned `numeric` columns.
pub(super) fn build(builder: Builder, numeric: std::ops::Range<usize>) -> Table {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    table
}
