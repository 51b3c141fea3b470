//! Cocoa checkout CLI
//!
//! Loads a fixture set, fills a customer's cart, places the order and prints the receipt.

#![expect(clippy::print_stderr, reason = "errors are reported on stderr before exiting")]

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use cocoa::{
    fixtures::Fixture,
    ledger::Ledger,
    logging::{LoggingConfig, init_subscriber},
    order::PersonalDetails,
    payment::PaymentMethod,
    shipping::Shipping,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "cocoa-checkout", about = "Place a chocolate shop order", long_about = None)]
struct Cli {
    /// Directory holding `inventory/` and `customers/` fixture sets
    #[arg(long, env = "COCOA_FIXTURES", default_value = "./fixtures")]
    fixtures: PathBuf,

    /// Fixture set name
    #[arg(long, default_value = "shop")]
    set: String,

    /// Customer key in the customers fixture
    #[arg(long)]
    customer: String,

    /// Item to add, as `NAME=QUANTITY`; repeatable
    #[arg(long = "add", value_name = "NAME=QUANTITY", value_parser = parse_line, required = true)]
    lines: Vec<(String, u32)>,

    /// Shipping carrier (UPS or DHL)
    #[arg(long)]
    shipping: Option<String>,

    /// Card number, to pay by card
    #[arg(long, requires_all = ["name_on_card", "expiry"], conflicts_with = "invoice")]
    card_number: Option<String>,

    /// Name on the card
    #[arg(long)]
    name_on_card: Option<String>,

    /// Card expiry, e.g. 12/27
    #[arg(long)]
    expiry: Option<String>,

    /// Pay by invoice to the customer's company (wholesale customers only)
    #[arg(long)]
    invoice: bool,

    /// Phone number for delivery
    #[arg(long)]
    phone: Option<String>,

    /// Print the remaining inventory after checkout
    #[arg(long)]
    show_inventory: bool,

    #[command(flatten)]
    logging: LoggingConfig,
}

fn parse_line(s: &str) -> Result<(String, u32), String> {
    let (name, quantity) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QUANTITY, got {s:?}"))?;

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid quantity in {s:?}: {error}"))?;

    Ok((name.trim().to_string(), quantity))
}

fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_subscriber(&cli.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut fixture = Fixture::with_base_path(&cli.fixtures);

    fixture
        .load_inventory(&cli.set)
        .and_then(|fixture| fixture.load_customers(&cli.set))
        .map_err(|error| format!("failed to load fixtures: {error}"))?;

    let mut inventory = fixture.inventory().map_err(|error| error.to_string())?;
    let mut customer = fixture
        .customer(&cli.customer)
        .map_err(|error| error.to_string())?;

    customer.create_cart(&inventory);

    let cart = customer
        .cart_mut()
        .ok_or_else(|| "customer has no cart".to_string())?;

    for (name, quantity) in &cli.lines {
        cart.add(&mut inventory, name, *quantity)
            .map_err(|error| format!("cannot add {quantity} × {name}: {error}"))?;
    }

    let shipping = cli
        .shipping
        .as_deref()
        .map(|provider| Shipping::from_provider(provider, inventory.currency()))
        .transpose()
        .map_err(|error| error.to_string())?;

    let payment = if cli.invoice {
        Some(
            PaymentMethod::invoice(
                customer.user_type(),
                customer.company_name().unwrap_or_default(),
                customer.address().unwrap_or_default(),
            )
            .map_err(|error| error.to_string())?,
        )
    } else if let Some(card_number) = &cli.card_number {
        Some(
            PaymentMethod::card(
                card_number.as_str(),
                cli.name_on_card.as_deref().unwrap_or_default(),
                cli.expiry.as_deref().unwrap_or_default(),
            )
            .map_err(|error| error.to_string())?,
        )
    } else {
        None
    };

    let details = PersonalDetails {
        full_name: customer.name().to_string(),
        address: customer.address().unwrap_or_default().to_string(),
        phone: cli.phone.clone(),
    };

    let order = customer
        .place_order(&inventory, shipping, payment, Some(details))
        .map_err(|error| format!("cannot place order: {error}"))?;

    info!(order = %order.uuid(), "checkout complete");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    order
        .write_receipt(&mut out)
        .map_err(|error| format!("failed to print receipt: {error}"))?;

    if cli.show_inventory {
        writeln!(out, "\nRemaining inventory").map_err(|error| error.to_string())?;

        inventory
            .write_to(&mut out)
            .map_err(|error| format!("failed to print inventory: {error}"))?;
    }

    Ok(())
}
