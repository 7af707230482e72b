use trgc_app::{carts::CartStoreError, context::AppContext};

use super::describe;

pub(crate) async fn run(context: &mut AppContext) -> Result<(), String> {
    match context.store.create_checkout().await {
        Ok(url) => {
            println!("{url}");

            Ok(())
        }
        Err(CartStoreError::EmptyCart) => {
            Err("nothing to check out: the cart is empty".to_string())
        }
        Err(error) => Err(describe(&error)),
    }
}
