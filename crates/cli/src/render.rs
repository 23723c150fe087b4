//! Terminal rendering of storefront state.
//!
//! Everything writes to a caller-supplied `Write` so output can be captured in
//! tests. Amounts are formatted here and nowhere else.

use std::io::{self, Write};

use gameverse_core::checkout::PendingOrder;
use gameverse_core::{CartManager, CurrencyCode, Item, KeyValueStore, Notice, NoticeLevel, Price};
use rust_decimal::Decimal;

/// Formats amounts in one currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct Money(pub CurrencyCode);

impl Money {
    #[must_use]
    pub fn format(self, amount: Decimal) -> String {
        Price::new(amount, self.0).display()
    }
}

pub fn notice(out: &mut impl Write, notice: &Notice) -> io::Result<()> {
    let marker = match notice.level {
        NoticeLevel::Success => "✔",
        NoticeLevel::Info => "•",
        NoticeLevel::Error => "✖",
    };
    writeln!(out, "{marker} {}", notice.message)
}

/// Grid of game cards. An empty list prints the empty-state message.
pub fn games(out: &mut impl Write, items: &[&Item], money: Money) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No games found matching your criteria.");
    }

    for item in items {
        writeln!(
            out,
            "[{:>3}] {:<32} {:<10} {:>9}",
            item.id.as_i32(),
            item.title,
            item.genre.as_str(),
            money.format(item.price)
        )?;
    }
    Ok(())
}

/// Quick view of one game.
pub fn game(out: &mut impl Write, item: &Item, money: Money) -> io::Result<()> {
    writeln!(out, "{}", item.title)?;
    writeln!(out, "{}", item.genre)?;
    writeln!(out, "⭐ {}/5", item.rating)?;
    writeln!(out, "{}", money.format(item.price))?;
    writeln!(out)?;
    writeln!(out, "{}", item.description)
}

/// Cart lines followed by subtotal, tax and total.
pub fn cart<S: KeyValueStore>(
    out: &mut impl Write,
    cart: &CartManager<S>,
    money: Money,
) -> io::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return writeln!(out, "Add some games to get started!");
    }

    writeln!(out, "Cart ({} items)", cart.total_item_count())?;
    for line in cart.lines() {
        writeln!(
            out,
            "  {:<32} x{:<3} {:>10}",
            line.title,
            line.quantity,
            money.format(line.line_total())
        )?;
    }

    let totals = cart.compute_totals();
    writeln!(out, "  {:<37} {:>10}", "Subtotal", money.format(totals.subtotal))?;
    writeln!(out, "  {:<37} {:>10}", "Tax", money.format(totals.tax))?;
    writeln!(out, "  {:<37} {:>10}", "Total", money.format(totals.total))
}

/// Order review shown once an order is placed.
pub fn order_review(out: &mut impl Write, order: &PendingOrder, money: Money) -> io::Result<()> {
    writeln!(out, "Order for {} <{}>", order.buyer.name, order.buyer.email)?;
    writeln!(
        out,
        "Ship to {}, {} {}",
        order.buyer.address, order.buyer.city, order.buyer.zip
    )?;
    writeln!(out, "Paid with card {}", order.masked_card())?;
    for line in &order.lines {
        writeln!(
            out,
            "  {} (x{}) {}",
            line.title,
            line.quantity,
            money.format(line.line_total())
        )?;
    }
    writeln!(out, "Total: {}", money.format(order.totals.total))
}
