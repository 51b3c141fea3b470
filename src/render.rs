//! Table rendering shared by ledgers, receipts and stock reports.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{ledger::QuantityLedger, pricing::PricingError};

/// Errors that can occur while rendering a table.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A value shown in the table couldn't be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("IO error")]
    IO,
}

/// Writes every ledger entry as a table, followed by the ledger's total value.
///
/// # Errors
///
/// Returns a [`RenderError`] if a line value can't be calculated or the output can't be
/// written.
pub fn write_ledger_table(
    mut out: impl io::Write,
    ledger: &QuantityLedger<'_>,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Flavour", "Quantity", "Price", "Value"]);

    for entry in ledger.iter() {
        let item = entry.item();

        builder.push_record([
            item.name().to_string(),
            item.flavour().unwrap_or_default().to_string(),
            entry.quantity().to_string(),
            format!("{}", item.price()),
            format!("{}", entry.value()?),
        ]);
    }

    let table = render_table(builder, 2);

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)?;
    writeln!(out, "Total value: {}", ledger.total_value()?).map_err(|_err| RenderError::IO)
}

/// Builds the table with the shop's house style, right-aligning every column from
/// `first_numeric_column` onwards.
pub(crate) fn render_table(builder: Builder, first_numeric_column: usize) -> String {
    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Columns::new(first_numeric_column..), Alignment::right());

    table.to_string()
}
