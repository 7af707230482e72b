use clap::{Args, Subcommand};
use jiff::Timestamp;
use rust_decimal::Decimal;
use trgc::{
    drops::{Countdown, DropRecord, DropState, StockIndicator},
    items::DropId,
    prices::format_price,
};

#[derive(Debug, Args)]
pub(crate) struct DropCommand {
    #[command(subcommand)]
    command: DropSubcommand,
}

#[derive(Debug, Subcommand)]
enum DropSubcommand {
    /// Show the state, countdown and stock of a drop
    Status(StatusArgs),
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Drop identifier
    #[arg(long, default_value = "current")]
    id: String,

    /// Display title
    #[arg(long)]
    title: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,

    /// Units released
    #[arg(long)]
    available: u32,

    /// Units sold so far
    #[arg(long, default_value_t = 0)]
    sold: u32,

    /// Opening time (RFC 3339)
    #[arg(long)]
    starts_at: Timestamp,

    /// Closing time (RFC 3339)
    #[arg(long)]
    ends_at: Timestamp,

    /// Evaluate at this time instead of now (RFC 3339)
    #[arg(long)]
    now: Option<Timestamp>,
}

pub(crate) fn run(command: DropCommand, currency: &str) -> Result<(), String> {
    let DropSubcommand::Status(args) = command.command;

    if args.ends_at <= args.starts_at {
        return Err("ends-at must be after starts-at".to_string());
    }

    let now = args.now.unwrap_or_else(Timestamp::now);
    let drop = DropRecord {
        id: DropId::new(args.id),
        title: args.title,
        price: args.price,
        quantity_available: args.available,
        quantity_sold: args.sold,
        starts_at: args.starts_at,
        ends_at: args.ends_at,
    };

    let state = DropState::select(&drop, now);
    let stock = StockIndicator::for_drop(&drop);

    println!("drop: {}", drop.title);
    println!("state: {state}");
    println!("price: {}", format_price(drop.price, currency));
    println!(
        "stock: {} left, {}% sold ({})",
        stock.remaining, stock.percent_sold, stock.level
    );

    match (state, Countdown::for_drop(&drop, now)) {
        (DropState::Upcoming, Some(countdown)) => println!("opens in: {countdown}"),
        (DropState::Live, Some(countdown)) => println!("closes in: {countdown}"),
        _ => {}
    }

    Ok(())
}
