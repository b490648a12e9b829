//! Plain-text rendering of a cart view.

use std::fmt::Write;

use storefront_cart_core::{CartView, EMPTY_CART_MESSAGE};

/// Render a cart for the terminal.
pub fn cart_text(view: &CartView) -> String {
    if view.is_empty() {
        return format!("{EMPTY_CART_MESSAGE}\n");
    }

    let mut out = String::new();
    for item in &view.items {
        let _ = writeln!(
            out,
            "{:<18} {:<32} {:>8}  {:>10}",
            item.product_id.as_str(),
            item.name,
            item.quantity_label,
            item.price
        );
        if let Some(controls) = item.controls {
            let _ = writeln!(
                out,
                "{:<18} [-] -> {}   [+] -> {}",
                "",
                controls.decrement_to,
                controls.increment_to
            );
        }
    }
    let _ = writeln!(out, "Order total: {}", view.total_display());

    if let Some(summary) = &view.summary {
        let _ = writeln!(out);
        let _ = writeln!(out, "Order Details");
        let _ = writeln!(out, "  Products          {}", summary.product_count);
        let _ = writeln!(out, "  Subtotal          {}", summary.subtotal.display());
        let _ = writeln!(out, "  Shipping Charges  {}", summary.shipping.display());
        let _ = writeln!(out, "  Total             {}", summary.total.display());
    }

    if view.can_checkout() {
        let _ = writeln!(out, "Ready to checkout.");
    }

    out
}
