use clap::Args;
use trgc_app::{context::AppContext, returns::ReturnObservation};

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct NavigateArgs {
    /// Local route, e.g. `/thank-you?order=1001`
    route: String,
}

pub(crate) fn run(args: NavigateArgs, context: &mut AppContext) -> Result<(), String> {
    let observation = context
        .reconciler
        .on_route_change(&args.route, context.store.cart())
        .map_err(|error| describe(&error))?;

    if let ReturnObservation::Returned {
        route,
        pending_items,
    } = observation
    {
        println!("back from checkout on {route} with {pending_items} item(s) in the cart");
    }

    if context.confirmation.matches(&args.route) {
        context
            .confirmation
            .on_mount(&mut context.store)
            .map_err(|error| describe(&error))?;

        println!("order confirmed, cart cleared");
    }

    Ok(())
}
