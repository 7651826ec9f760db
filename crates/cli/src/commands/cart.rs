//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! rocketshoes cart show
//! rocketshoes cart add 3
//! rocketshoes cart update 3 2
//! rocketshoes cart remove 3
//! ```
//!
//! Mutating commands print the store's single notification and report
//! whether the cart changed.

use std::fmt::Write as _;
use std::sync::Arc;

use rocketshoes_core::{Cart, CurrencyCode, Price, ProductId};
use rocketshoes_storefront::notify::{Notification, NotificationKind, Notifier};
use rocketshoes_storefront::state::AppState;

use super::{CommandError, Overrides};

/// Prints notifications to the terminal.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => println!("✔ {}", notification.message),
            NotificationKind::Error => eprintln!("✘ {}", notification.message),
        }
    }
}

fn open(overrides: &Overrides) -> Result<AppState, CommandError> {
    let config = overrides.load_config()?;
    tracing::debug!(
        api = %config.api.base_url,
        storage = %config.storage.dir.display(),
        "Opening cart"
    );
    Ok(AppState::new(config, Arc::new(TerminalNotifier))?)
}

/// Print the cart.
#[allow(clippy::print_stdout)]
pub async fn show(overrides: &Overrides) -> Result<bool, CommandError> {
    let state = open(overrides)?;
    let cart = state.cart().cart().await;
    print!("{}", render(&cart, CurrencyCode::BRL));
    Ok(true)
}

/// Add one unit of `product_id`.
pub async fn add(overrides: &Overrides, product_id: ProductId) -> Result<bool, CommandError> {
    let state = open(overrides)?;
    Ok(state.cart().add_product(product_id).await.is_success())
}

/// Remove `product_id` from the cart.
pub async fn remove(overrides: &Overrides, product_id: ProductId) -> Result<bool, CommandError> {
    let state = open(overrides)?;
    Ok(state.cart().remove_product(product_id).await.is_success())
}

/// Set `product_id` to exactly `amount` units.
pub async fn update(
    overrides: &Overrides,
    product_id: ProductId,
    amount: i64,
) -> Result<bool, CommandError> {
    let state = open(overrides)?;
    Ok(state
        .cart()
        .update_product_amount(product_id, amount)
        .await
        .is_success())
}

/// Render the cart as a plain-text table.
fn render(cart: &Cart, currency: CurrencyCode) -> String {
    if cart.is_empty() {
        return "Carrinho vazio\n".to_string();
    }

    let money = |amount| Price::new(amount, currency).display();
    let mut out = String::new();

    for item in cart {
        let _ = writeln!(
            out,
            "#{:<5} {:<40} {:>14} x {:<3} = {:>14}",
            item.id,
            item.title,
            money(item.price),
            item.amount,
            money(item.subtotal()),
        );
    }

    let _ = writeln!(
        out,
        "{} produto(s), {} unidade(s). Total: {}",
        cart.len(),
        cart.total_quantity(),
        money(cart.total())
    );
    out
}
