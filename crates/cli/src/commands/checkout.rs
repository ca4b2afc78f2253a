//! Checkout command.

use clap::Args;

use shopfront_storefront::error::Result;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::KeyValueStore;
use shopfront_storefront::validation::ShippingForm;

use crate::output;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name
    #[arg(long, default_value = "")]
    full_name: String,

    /// Street address
    #[arg(long, default_value = "")]
    address: String,

    #[arg(long, default_value = "")]
    city: String,

    #[arg(long, default_value = "")]
    postal_code: String,

    #[arg(long, default_value = "")]
    phone: String,

    /// Receipt email; defaults to the signed-in user's address
    #[arg(long)]
    email: Option<String>,
}

pub async fn run<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    args: CheckoutArgs,
) -> Result<()> {
    let email = args
        .email
        .or_else(|| {
            state
                .auth()
                .session()
                .map(|s| s.user.email.as_str().to_owned())
        })
        .unwrap_or_default();

    let form = ShippingForm {
        full_name: args.full_name,
        address_line: args.address,
        city: args.city,
        postal_code: args.postal_code,
        phone: args.phone,
        email,
    };

    let order = state.place_order(&form).await?;
    output::heading(format!("Order {} placed", order.id));
    for line in &order.lines {
        output::line(format!(
            "  {} × {}  {}",
            line.quantity,
            line.name,
            state.price(line.line_total()).display()
        ));
    }
    output::line(format!(
        "Total: {} for {} items",
        state.price(order.subtotal).display(),
        order.item_count
    ));
    output::line(format!(
        "Shipping to {}, {}, {} {}",
        order.shipping.full_name,
        order.shipping.address_line,
        order.shipping.city,
        order.shipping.postal_code
    ));
    if let Some(email) = &order.shipping.email {
        output::line(format!("Receipt sent to {email}"));
    }
    Ok(())
}
