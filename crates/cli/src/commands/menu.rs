//! Menu

use std::io::Write;

use pizzeria::{
    catalog::{Catalog, SizeLabel},
    money::format_reais,
};
use tabled::builder::Builder;

use crate::{commands::table, errors::CliError};

pub(super) fn run(catalog: &Catalog, out: &mut impl Write) -> Result<(), CliError> {
    let mut builder = Builder::default();

    let mut header = vec!["Id".to_string(), "Pizza".to_string()];
    header.extend(SizeLabel::ALL.iter().map(ToString::to_string));
    builder.push_record(header);

    for product in catalog.iter() {
        let mut row = vec![product.id.to_string(), product.name.clone()];
        row.extend(product.prices.iter().map(|(_, price)| format_reais(&price)));
        builder.push_record(row);
    }

    let numeric = 2..2 + SizeLabel::ALL.len();

    writeln!(out, "{}", table::build(builder, numeric))?;

    for product in catalog.iter() {
        writeln!(
            out,
            "{} {}: {}",
            product.id,
            product.name,
            product.ingredients.join(", ")
        )?;
    }

    Ok(())
}
