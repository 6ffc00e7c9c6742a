use anyhow::Result;
use log::{error, info};
use shared::Product;
use std::io::{BufRead, Write};

use super::prompt::{InputClosed, Prompter};
use super::table::{format_report, format_row, format_table};
use crate::backend::domain::commands::auth::{AuthenticateCommand, AuthenticateResult};
use crate::backend::domain::commands::product::{
    CreateProductCommand, DeleteProductCommand, LowStockQuery, UpdateProductCommand,
};
use crate::backend::domain::error::{inventory_error, InventoryError};
use crate::backend::domain::models::Session;
use crate::backend::Backend;

const MENU: &str = "\n--- Product Management System ---
1. Create Product
2. View All Products
3. Update Product
4. Delete Product
5. Search Product by ID
6. Sort Products
7. View Low Stock Products
8. Generate Report
9. Export Products to CSV
10. Import Products from CSV
11. Exit";

const EXIT_CHOICE: u32 = 11;

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    ViewAll,
    Update,
    Delete,
    Search,
    Sort,
    LowStock,
    Report,
    Export,
    Import,
    Exit,
}

impl MenuChoice {
    pub fn from_number(number: u32) -> Option<Self> {
        let choice = match number {
            1 => MenuChoice::Create,
            2 => MenuChoice::ViewAll,
            3 => MenuChoice::Update,
            4 => MenuChoice::Delete,
            5 => MenuChoice::Search,
            6 => MenuChoice::Sort,
            7 => MenuChoice::LowStock,
            8 => MenuChoice::Report,
            9 => MenuChoice::Export,
            10 => MenuChoice::Import,
            EXIT_CHOICE => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Ask for username and password (unless given) and authenticate
pub fn login<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    backend: &Backend,
    username: Option<String>,
    password: Option<String>,
) -> Result<AuthenticateResult> {
    let username = match username {
        Some(username) => username,
        None => prompter.prompt_text("Enter username: ")?.trim().to_string(),
    };
    let password = match password {
        Some(password) => password,
        None => prompter.prompt_text("Enter password: ")?.trim().to_string(),
    };

    backend
        .auth_service
        .authenticate(AuthenticateCommand { username, password })
}

/// The interactive menu loop for one logged-in operator
pub struct ConsoleApp<R: BufRead, W: Write> {
    backend: Backend,
    session: Session,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> ConsoleApp<R, W> {
    pub fn new(backend: Backend, session: Session, prompter: Prompter<R, W>) -> Self {
        Self {
            backend,
            session,
            prompter,
        }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Show the menu until the operator exits or the input ends.
    /// Operation failures are printed and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompter.say(MENU)?;
            let answer = match self.prompter.read_line("Enter your choice: ")? {
                Some(answer) => answer,
                None => {
                    info!("Input closed, leaving menu");
                    return Ok(());
                }
            };

            let choice = match answer.trim().parse::<u32>().ok().and_then(MenuChoice::from_number) {
                Some(choice) => choice,
                None => {
                    self.prompter.say(&format!(
                        "Invalid choice! Please enter a number between 1 and {}.",
                        EXIT_CHOICE
                    ))?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                self.prompter.say("Exiting... Thank you!")?;
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(e) if e.downcast_ref::<InputClosed>().is_some() => {
                    info!("Input closed during {:?}, leaving menu", choice);
                    return Ok(());
                }
                Err(e) => self.show_error(e)?,
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Create => self.create_product(),
            MenuChoice::ViewAll => self.view_products(),
            MenuChoice::Update => self.update_product(),
            MenuChoice::Delete => self.delete_product(),
            MenuChoice::Search => self.search_product(),
            MenuChoice::Sort => self.sort_products(),
            MenuChoice::LowStock => self.view_low_stock(),
            MenuChoice::Report => self.generate_report(),
            MenuChoice::Export => self.export_products(),
            MenuChoice::Import => self.import_products(),
            MenuChoice::Exit => Ok(()),
        }
    }

    /// Turn an operation failure into a message for the operator
    fn show_error(&mut self, err: anyhow::Error) -> Result<()> {
        error!("Operation failed: {:#}", err);
        let message = match inventory_error(&err) {
            Some(InventoryError::DuplicateId(_)) => "Error: A product with this ID already exists.".to_string(),
            Some(InventoryError::ProductNotFound(id)) => format!("Product with ID {} not found.", id),
            Some(InventoryError::UnknownSortKey(_)) => "Invalid choice!".to_string(),
            _ => format!("Error: {:#}", err),
        };
        self.prompter.say(&message)
    }

    fn create_product(&mut self) -> Result<()> {
        let id = self.prompter.prompt_integer("Enter Product ID: ")?;

        // reject a taken id before asking for the rest
        match self.backend.product_service.get_product(id) {
            Ok(_) => return Err(InventoryError::DuplicateId(id).into()),
            Err(e) if matches!(inventory_error(&e), Some(InventoryError::ProductNotFound(_))) => {}
            Err(e) => return Err(e),
        }

        let name = self.prompter.prompt_text("Enter Product Name: ")?;
        let category = self.prompter.prompt_text("Enter Product Category: ")?;
        let price = self.prompter.prompt_price("Enter Product Price: ")?;
        let quantity = self.prompter.prompt_quantity("Enter Product Quantity: ")?;

        let result = self.backend.product_service.create_product(
            &self.session,
            CreateProductCommand {
                product: Product {
                    id,
                    name,
                    category,
                    price,
                    quantity,
                },
            },
        )?;
        self.prompter.say(&result.success_message)
    }

    fn view_products(&mut self) -> Result<()> {
        let products = self.backend.product_service.list_products()?;
        if products.is_empty() {
            return self.prompter.say("No products found.");
        }
        self.prompter.say("\n--- Product List ---")?;
        self.prompter.say(&format_table(&products))
    }

    fn update_product(&mut self) -> Result<()> {
        let id = self.prompter.prompt_integer("Enter Product ID to update: ")?;
        // fails with not-found before any field is asked for
        self.backend.product_service.get_product(id)?;

        let name = self.prompter.prompt_text("Enter new Product Name: ")?;
        let category = self.prompter.prompt_text("Enter new Product Category: ")?;
        let price = self.prompter.prompt_price("Enter new Product Price: ")?;
        let quantity = self.prompter.prompt_quantity("Enter new Product Quantity: ")?;

        let result = self.backend.product_service.update_product(
            &self.session,
            UpdateProductCommand {
                id,
                name,
                category,
                price,
                quantity,
            },
        )?;
        self.prompter.say(&result.success_message)
    }

    fn delete_product(&mut self) -> Result<()> {
        let id = self.prompter.prompt_integer("Enter Product ID to delete: ")?;
        let result = self
            .backend
            .product_service
            .delete_product(&self.session, DeleteProductCommand { id })?;
        self.prompter.say(&result.success_message)
    }

    fn search_product(&mut self) -> Result<()> {
        let id = self.prompter.prompt_integer("Enter Product ID to search: ")?;
        let product = self.backend.product_service.get_product(id)?;
        self.prompter.say("\n--- Product Details ---")?;
        self.prompter.say(&format_row(&product))
    }

    fn sort_products(&mut self) -> Result<()> {
        self.prompter.say("Sort by:\n1. ID\n2. Name\n3. Price\n4. Quantity")?;
        let key = self.prompter.prompt_text("Enter your choice: ")?;
        let result = self
            .backend
            .product_service
            .sort_products_by_input(&self.session, &key)?;
        self.prompter.say(&result.success_message)
    }

    fn view_low_stock(&mut self) -> Result<()> {
        let threshold = self.prompter.prompt_integer("Enter low-stock threshold: ")?;
        let result = self.backend.product_service.low_stock(LowStockQuery { threshold })?;

        self.prompter.say("\n--- Low Stock Products ---")?;
        if result.products.is_empty() {
            return self.prompter.say("No products with low stock.");
        }
        for product in &result.products {
            self.prompter.say(&format_row(product))?;
        }
        Ok(())
    }

    fn generate_report(&mut self) -> Result<()> {
        let report = self.backend.report_service.generate_report()?;
        self.prompter.say("")?;
        self.prompter.say(&format_report(&report))
    }

    fn export_products(&mut self) -> Result<()> {
        let result = self.backend.interchange_service.export_products()?;
        self.prompter.say(&result.success_message)
    }

    fn import_products(&mut self) -> Result<()> {
        let result = self.backend.interchange_service.import_products(&self.session)?;
        self.prompter.say(&result.success_message)
    }
}
