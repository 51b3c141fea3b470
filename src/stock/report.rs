//! Stock reports

use tabled::builder::Builder;

use crate::{
    render::render_table,
    stock::{StockError, StockRecord, StockRepository},
};

/// Which items a stock report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Every tracked item
    All,
    /// Items at or below their low-stock level
    Low,
}

/// Fetches the records in scope and renders them as a table.
///
/// # Errors
///
/// Returns a [`StockError`] if the records can't be fetched.
pub async fn stock_report(
    repository: &dyn StockRepository,
    scope: ReportScope,
) -> Result<String, StockError> {
    let records = match scope {
        ReportScope::All => repository.list_all().await?,
        ReportScope::Low => repository.list_low_stock().await?,
    };

    Ok(render_stock_table(&records))
}

/// Renders stock records as a table, flagging low items.
pub fn render_stock_table(records: &[StockRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Name", "Status", "ID", "Stock", "Low Level"]);

    for record in records {
        builder.push_record([
            record.name.clone(),
            if record.is_low() { "LOW" } else { "ok" }.to_string(),
            record.item_id.to_string(),
            record.stock.to_string(),
            record.low_level.to_string(),
        ]);
    }

    render_table(builder, 2)
}
