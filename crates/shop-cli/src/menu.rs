//! # Interactive Menu
//!
//! Text front end for the store: list products, show total stock, place an
//! order, quit. Generic over its input and output so sessions can be scripted.

use crate::config::ReceiptFormat;
use rust_decimal::Decimal;
use shop_core::{OrderLine, Receipt, SharedStore, StoreError};
use std::io::{self, BufRead, Write};
use tracing::{debug, instrument};

/// Sentinel that ends order entry
const DONE: &str = "done";

/// Format an amount for display, e.g. `$2175.00`
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Menu session over a reader and a writer
pub struct Menu<R, W> {
    store: SharedStore,
    receipt_format: ReceiptFormat,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: SharedStore, receipt_format: ReceiptFormat, input: R, output: W) -> Self {
        Self {
            store,
            receipt_format,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.list_products()?,
                "2" => self.total_quantity()?,
                "3" => self.place_order()?,
                "4" => break,
                _ => writeln!(
                    self.output,
                    "Invalid choice. Please enter a number from 1 to 4."
                )?,
            }
        }

        writeln!(self.output, "Thank you for visiting!")?;
        Ok(())
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nWelcome to the Store!")?;
        writeln!(self.output, "1. List all products")?;
        writeln!(self.output, "2. Show total stock quantity")?;
        writeln!(self.output, "3. Make an order")?;
        writeln!(self.output, "4. Quit")
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn list_products(&mut self) -> anyhow::Result<()> {
        let products = self.store.active_products()?;
        writeln!(self.output, "\nAvailable products:")?;
        for (i, product) in products.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, product)?;
        }
        Ok(())
    }

    fn total_quantity(&mut self) -> anyhow::Result<()> {
        let total = self.store.total_active_quantity()?;
        writeln!(self.output, "\nTotal quantity in store: {}", total)?;
        Ok(())
    }

    /// Collect lines until `done`, then submit them as one order
    #[instrument(skip(self))]
    fn place_order(&mut self) -> anyhow::Result<()> {
        let mut lines = Vec::new();

        loop {
            let Some(name) = self.prompt("\nEnter product name (or 'done' to finish): ")? else {
                break;
            };
            if name.eq_ignore_ascii_case(DONE) {
                break;
            }

            let product = match self.store.lookup(&name) {
                Ok(product) => product,
                Err(StoreError::NotFound { .. }) => {
                    writeln!(self.output, "Product not found.")?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let Some(raw) = self.prompt(&format!("Enter quantity of '{}': ", product.name()))?
            else {
                break;
            };
            match raw.parse::<i64>() {
                Ok(qty) if qty <= 0 => writeln!(self.output, "Quantity must be positive!")?,
                Ok(qty) => match u32::try_from(qty) {
                    Ok(qty) => lines.push(OrderLine::new(product.name(), qty)),
                    Err(_) => writeln!(self.output, "Quantity is too large.")?,
                },
                Err(_) => writeln!(self.output, "Invalid quantity. Please enter a number.")?,
            }
        }

        if lines.is_empty() {
            writeln!(self.output, "No items ordered.")?;
            return Ok(());
        }

        debug!(lines = lines.len(), "Submitting order");
        match self.store.order(&lines) {
            Ok(receipt) => self.print_receipt(&receipt)?,
            Err(err) if err.is_user_error() => writeln!(self.output, "Order failed: {}", err)?,
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn print_receipt(&mut self, receipt: &Receipt) -> anyhow::Result<()> {
        match self.receipt_format {
            ReceiptFormat::Json => writeln!(self.output, "{}", receipt.to_json()?)?,
            ReceiptFormat::Text => {
                writeln!(self.output)?;
                for line in &receipt.lines {
                    write!(
                        self.output,
                        "  {} x {} @ {}",
                        line.quantity,
                        line.product,
                        format_money(line.unit_price)
                    )?;
                    if let Some(promotion) = &line.promotion {
                        write!(self.output, " ({})", promotion)?;
                    }
                    writeln!(self.output, " = {}", format_money(line.total))?;
                }
                writeln!(
                    self.output,
                    "Order processed. Total cost: {}",
                    format_money(receipt.total)
                )?;
            }
        }
        Ok(())
    }
}
