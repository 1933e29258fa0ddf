use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::{error, info, warn};

use crate::{
    catalog::{BuiltinCatalog, CatalogProvider, JsonFileCatalog},
    cli::{
        actions::{ActionOutcome, CartAction},
        args::Commands,
    },
    models::cart::QuantityChange,
    services::{CartService, CartServiceError, UnavailableCheckout},
    utils::{
        formatting::{format_cart_summary, format_cart_table, format_catalog_table, format_money},
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static BASKET: Emoji<'_, '_> = Emoji("🧺 ", "");

const SHOP_MENU: [&str; 7] = [
    "Add product",
    "Increase quantity",
    "Decrease quantity",
    "Set quantity",
    "View cart",
    "Proceed to checkout",
    "Quit",
];

pub struct CliApp {
    service: CartService,
    config: Config,
}

impl CliApp {
    /// Loads the catalog (file from config or the built-in one) and opens an
    /// empty cart.
    pub async fn new(config: Config) -> Result<Self> {
        let provider: Box<dyn CatalogProvider> = match &config.catalog_path {
            Some(path) => Box::new(JsonFileCatalog::new(path.clone())),
            None => Box::new(BuiltinCatalog::new()),
        };

        let catalog = provider
            .load()
            .await
            .with_context(|| format!("Failed to load catalog from {}", provider.name()))?;
        info!("Using {} catalog with {} products", provider.name(), catalog.len());

        Ok(Self {
            service: CartService::new(catalog),
            config,
        })
    }

    pub fn service(&self) -> &CartService {
        &self.service
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Catalog => self.handle_catalog(),
            Commands::Run { actions } => self.handle_run(&actions),
            Commands::Shop => self.handle_shop(),
        }
    }

    fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    fn handle_catalog(&self) -> Result<()> {
        let products = self.service.catalog().products();
        println!(
            "{} {}",
            BASKET,
            style(format!("{} products available for preorder", products.len())).bold()
        );
        println!("{}", format_catalog_table(products, self.currency()));
        Ok(())
    }

    fn handle_run(&mut self, actions: &[CartAction]) -> Result<()> {
        for action in actions {
            self.apply_action(action);
        }
        self.print_cart();
        Ok(())
    }

    // Unknown products are reported and skipped; the session carries on.
    fn apply_action(&mut self, action: &CartAction) {
        match action.apply(&mut self.service) {
            Ok(ActionOutcome::Added { quantity }) => {
                println!(
                    "{} {}: quantity now {}",
                    CHECKMARK,
                    style(action).cyan(),
                    quantity
                );
            }
            Ok(ActionOutcome::Changed(change)) => self.report_change(action.product_id(), change),
            Err(CartServiceError::ProductNotFound { id }) => {
                println!("{} Product {} is not in the catalog", CROSS, style(id).red());
                warn!("Skipping action {}: unknown product {}", action, id);
            }
            Err(e) => {
                println!("{} {} failed: {}", CROSS, action, style(&e).red());
                error!("Action {} failed: {}", action, e);
            }
        }
    }

    fn report_change(&self, product_id: u32, change: QuantityChange) {
        match change {
            QuantityChange::Updated { current, .. } => {
                println!("{} Product {}: quantity now {}", CHECKMARK, product_id, current);
            }
            QuantityChange::Removed { .. } => {
                println!("{} Product {} removed from cart", CHECKMARK, product_id);
            }
            QuantityChange::NotInCart => {
                println!(
                    "{} Product {} is not in the cart, nothing changed",
                    WARNING, product_id
                );
            }
        }
    }

    fn print_cart(&self) {
        let cart = self.service.cart();
        if cart.is_empty() {
            println!("{} Cart is empty", INFO);
            return;
        }

        println!("{} {}", BASKET, style("Cart").bold().cyan());
        println!("{}", format_cart_table(cart, self.currency()));
        print!("{}", format_cart_summary(&self.service.summary(), self.currency()));
    }

    fn handle_shop(&mut self) -> Result<()> {
        println!("{} {}", BASKET, style("Farm preorder").bold().cyan());
        let theme = ColorfulTheme::default();

        loop {
            let summary = self.service.summary();
            let prompt = format!(
                "Cart: {} lines, {}",
                summary.line_count,
                format_money(summary.total, self.currency())
            );

            let choice = Select::with_theme(&theme)
                .with_prompt(prompt)
                .items(&SHOP_MENU)
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    let id = self.pick_product(&theme)?;
                    self.apply_action(&CartAction::Add(id));
                }
                1 | 2 => match self.pick_cart_line(&theme)? {
                    Some(id) if choice == 1 => self.apply_action(&CartAction::Increment(id)),
                    Some(id) => self.apply_action(&CartAction::Decrement(id)),
                    None => println!("{} Cart is empty", INFO),
                },
                3 => match self.pick_cart_line(&theme)? {
                    Some(id) => {
                        let quantity: i64 = Input::with_theme(&theme)
                            .with_prompt("Quantity (0 removes the line)")
                            .interact_text()?;
                        self.apply_action(&CartAction::Set { id, quantity });
                    }
                    None => println!("{} Cart is empty", INFO),
                },
                4 => self.print_cart(),
                5 => self.handle_checkout(),
                _ => break,
            }
        }

        info!("Shopping session closed");
        Ok(())
    }

    fn handle_checkout(&self) {
        match self.service.checkout(&UnavailableCheckout) {
            Ok(receipt) => {
                println!("{} Order {} accepted", CHECKMARK, style(receipt.order_id).green());
            }
            Err(CartServiceError::EmptyCart) => {
                println!("{} Add something to the cart first", WARNING);
            }
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
            }
        }
    }

    fn pick_product(&self, theme: &ColorfulTheme) -> Result<u32> {
        let products = self.service.catalog().products();
        let items: Vec<String> = products
            .iter()
            .map(|p| {
                format!(
                    "{} ({}/{}, -{}%)",
                    p.name,
                    format_money(p.price_preorder, self.currency()),
                    p.unit,
                    p.discount
                )
            })
            .collect();

        let index = Select::with_theme(theme)
            .with_prompt("Product")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(products[index].id)
    }

    fn pick_cart_line(&self, theme: &ColorfulTheme) -> Result<Option<u32>> {
        let lines = self.service.cart().lines();
        if lines.is_empty() {
            return Ok(None);
        }

        let items: Vec<String> = lines
            .iter()
            .map(|line| format!("{} x{}", line.product.name, line.quantity))
            .collect();

        let index = Select::with_theme(theme)
            .with_prompt("Cart line")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(Some(lines[index].id()))
    }
}
