//! Receipt

use std::io;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    order::{Order, OrderUuid, wholesale_discount},
    pricing::PricingError,
    render::RenderError,
    shipping::Carrier,
};

/// One priced line on a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Item name
    pub name: String,

    /// Item flavour, if recorded
    pub flavour: Option<String>,

    /// Units bought
    pub quantity: u32,

    /// Price of one unit
    pub unit_price: Money<'a, Currency>,

    /// `unit_price × quantity`
    pub line_total: Money<'a, Currency>,
}

/// A priced, printable summary of an order.
///
/// The receipt total is the order's [`total_value`](Order::total_value).
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    order: OrderUuid,
    placed_at: Timestamp,
    customer: String,
    lines: SmallVec<[ReceiptLine<'a>; 8]>,
    subtotal: Money<'a, Currency>,
    shipping: Option<(Carrier, Money<'a, Currency>)>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
    payment: Option<String>,
}

impl<'a> Receipt<'a> {
    /// Prices every line of an order.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any line or the total can't be calculated.
    pub fn from_order(order: &Order<'a>) -> Result<Self, PricingError> {
        let lines: SmallVec<[ReceiptLine<'a>; 8]> = order
            .lines()
            .iter()
            .map(|entry| -> Result<ReceiptLine<'a>, PricingError> {
                Ok(ReceiptLine {
                    name: entry.item().name().to_string(),
                    flavour: entry.item().flavour().map(str::to_string),
                    quantity: entry.quantity(),
                    unit_price: *entry.item().price(),
                    line_total: entry.value()?,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            order: order.uuid(),
            placed_at: order.placed_at(),
            customer: order.customer().name.clone(),
            lines,
            subtotal: order.subtotal()?,
            shipping: order
                .shipping()
                .map(|shipping| (shipping.carrier(), *shipping.fee())),
            discount: order.discount()?,
            total: order.total_value()?,
            payment: order.payment().map(ToString::to_string),
        })
    }

    /// Priced lines in item name order
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Sum of line totals
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Wholesale discount, zero for other customers
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount paid
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Writes the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::IO`] if the output can't be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), RenderError> {
        writeln!(
            out,
            "Order {}\nPlaced {} by {}",
            self.order, self.placed_at, self.customer
        )
        .map_err(|_err| RenderError::IO)?;

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Flavour", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.flavour.clone().unwrap_or_default(),
                line.quantity.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.line_total),
            ]);
        }

        write_receipt_table(&mut out, builder)?;
        write_receipt_summary(&mut out, self)
    }
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> Result<(), RenderError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| RenderError::IO)
}

fn write_receipt_summary(
    out: &mut impl io::Write,
    receipt: &Receipt<'_>,
) -> Result<(), RenderError> {
    let mut rows: SmallVec<[(String, String); 5]> = SmallVec::new();

    rows.push((" Subtotal:".to_string(), format!("{}  ", receipt.subtotal)));

    if let Some((carrier, fee)) = &receipt.shipping {
        rows.push((format!(" Shipping ({carrier}):"), format!("{fee}  ")));
    }

    if receipt.discount.to_minor_units() != 0 {
        let percent_points =
            ((wholesale_discount() * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2);

        rows.push((
            format!(" Wholesale discount ({}%):", percent_points.normalize()),
            format!("-{}  ", receipt.discount),
        ));
    }

    rows.push((
        " Total:".to_string(),
        format!("{}  ", receipt.total),
    ));

    if let Some(payment) = &receipt.payment {
        rows.push((" Payment:".to_string(), format!("{payment}  ")));
    }

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or_default();

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or_default();

    for (label, value) in &rows {
        write_summary_line(out, label, value, label_width, value_width)?;
    }

    writeln!(out).map_err(|_err| RenderError::IO)
}

/// Writes a summary line with a right-aligned label and a right-aligned value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_width: usize,
    value_width: usize,
) -> Result<(), RenderError> {
    writeln!(out, "{label:>label_width$}  {value:>value_width$}").map_err(|_err| RenderError::IO)
}
