use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use inventory_console::backend::domain::error::{inventory_error, InventoryError};
use inventory_console::io::console::{login, ConsoleApp, Prompter};
use inventory_console::{AppConfig, Backend};

/// Console inventory record manager
#[derive(Parser)]
#[command(name = "inventory", about = "Manage product records stored in a flat text file")]
struct Cli {
    /// Directory holding products.txt, products.csv and users.txt
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// YAML configuration file (default: inventory.yaml in the data directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log in as this user instead of being prompted
    #[arg(short, long)]
    username: Option<String>,

    /// Password for --username
    #[arg(short, long)]
    password: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    info!("Starting inventory manager in {:?}", cli.data_dir);

    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref(), &cli.data_dir)?;
    let backend = Backend::new(&cli.data_dir, &config)?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), BufWriter::new(io::stdout()));

    let auth = match login(&mut prompter, &backend, cli.username, cli.password) {
        Ok(auth) => auth,
        Err(e) if inventory_error(&e) == Some(&InventoryError::AuthenticationFailed) => {
            prompter.say("Invalid credentials. Exiting...")?;
            drop(prompter);
            process::exit(1);
        }
        Err(e) => return Err(e),
    };
    prompter.say(&auth.welcome_message)?;

    let mut app = ConsoleApp::new(backend, auth.session, prompter);
    app.run()
}
