use std::io;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use trgc::{
    items::{DropId, NewLineItem, VariantId},
    summary::CartSummary,
};
use trgc_app::context::AppContext;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a variant, merging with an existing line item
    Add(AddArgs),

    /// Set a variant's quantity; zero or less removes it
    Update(UpdateArgs),

    /// Remove a variant
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,

    /// Print the cart
    Show,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Drop the variant belongs to
    #[arg(long)]
    drop: String,

    /// Storefront variant id
    #[arg(long)]
    variant: String,

    /// Display title
    #[arg(long)]
    title: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,

    /// Image reference
    #[arg(long)]
    image: Option<String>,

    /// Quantity to add
    #[arg(long, short, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
struct UpdateArgs {
    /// Storefront variant id
    variant: String,

    /// New quantity
    quantity: i64,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Storefront variant id
    variant: String,
}

pub(crate) fn run(command: CartCommand, context: &mut AppContext) -> Result<(), String> {
    let store = &mut context.store;

    let result = match command.command {
        CartSubcommand::Add(args) => store.add_item(
            NewLineItem {
                drop_id: DropId::new(args.drop),
                variant_id: VariantId::new(args.variant),
                title: args.title,
                price: args.price,
                image: args.image,
            },
            args.quantity,
        ),
        CartSubcommand::Update(args) => {
            store.update_quantity(&VariantId::new(args.variant), args.quantity)
        }
        CartSubcommand::Remove(args) => store.remove_item(&VariantId::new(args.variant)),
        CartSubcommand::Clear => store.clear_cart(),
        CartSubcommand::Show => {
            return CartSummary::new(store.cart(), &context.currency)
                .write_to(io::stdout().lock())
                .map_err(|error| describe(&error));
        }
    };

    result.map_err(|error| describe(&error))?;

    println!("items: {}", store.total_items());

    Ok(())
}
