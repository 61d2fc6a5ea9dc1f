mod app;
mod event;
mod theme;
mod ui;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use app::App;
use clap::{Parser, Subcommand};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::DefaultTerminal;
use shop_admin_client::{AdminApi, Credential, HttpAdminClient};
use shop_admin_core::{Dashboard, FileSessionStore, SessionStore};
use shop_admin_shared::telemetry::init_telemetry;
use shop_admin_shared::Settings;
use std::path::PathBuf;
use tracing::info;

type ConsoleDashboard = Dashboard<HttpAdminClient, FileSessionStore>;

#[derive(Parser)]
#[command(name = "shop-admin")]
#[command(about = "Terminal admin console for the shop backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to config/shop-admin.*)
    #[arg(short, long, global = true, env = "SHOP_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL, overriding configuration
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI dashboard - Default
    Dashboard,
    /// Store an admin token
    Login {
        #[arg(long, env = "SHOP_ADMIN_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    /// Print all users
    Users,
    /// Print all products
    Products,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref(), cli.base_url.clone())
        .context("Failed to load configuration")?;
    let _guard = init_telemetry(&settings.logging)?;

    let client = HttpAdminClient::new(&settings.api.base_url)?;
    let session = FileSessionStore::new(&settings.session.path);
    let mut dashboard = Dashboard::new(client, session)
        .authorize_submissions(settings.api.authorize_product_submission);

    info!(base_url = %settings.api.base_url, "Shop admin starting");

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => start_tui(dashboard).await?,
        Commands::Login { token } => {
            dashboard.sign_in(&token)?;
            println!(
                "Token stored at {}",
                dashboard.session().path().display()
            );
        }
        Commands::Logout => {
            dashboard.logout()?;
            println!("Signed out.");
        }
        Commands::Users => print_users(&dashboard).await?,
        Commands::Products => print_products(&dashboard).await?,
    }

    Ok(())
}

fn stored_credential(dashboard: &ConsoleDashboard) -> anyhow::Result<Credential> {
    dashboard.session().get()?.ok_or_else(|| {
        anyhow::anyhow!("Not signed in. Run `shop-admin login --token <TOKEN>` first.")
    })
}

async fn print_users(dashboard: &ConsoleDashboard) -> anyhow::Result<()> {
    let credential = stored_credential(dashboard)?;
    let users = dashboard.api().list_users(&credential).await?;
    for user in &users {
        println!("{}\t{}\t{}", user.id, user.email, user.status_label());
    }
    println!("{} users", users.len());
    Ok(())
}

async fn print_products(dashboard: &ConsoleDashboard) -> anyhow::Result<()> {
    let credential = stored_credential(dashboard)?;
    let products = dashboard.api().list_products(&credential).await?;
    for product in &products {
        println!(
            "{}\t{}\t${}\t{}",
            product.id,
            product.name,
            product.price,
            product.available_label()
        );
    }
    println!("{} products", products.len());
    Ok(())
}

async fn start_tui(dashboard: ConsoleDashboard) -> anyhow::Result<()> {
    // Initialize terminal (ratatui::init handles raw mode + alternate screen)
    let terminal = ratatui::init();
    // Best effort
    crossterm::execute!(std::io::stdout(), EnableBracketedPaste).ok();

    let result = run_app(terminal, dashboard).await;

    // Restore terminal (always, even on error)
    crossterm::execute!(std::io::stdout(), DisableBracketedPaste).ok();
    ratatui::restore();

    result
}

async fn run_app(mut terminal: DefaultTerminal, dashboard: ConsoleDashboard) -> anyhow::Result<()> {
    let mut app = App::new(dashboard);

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.should_quit {
            break;
        }

        // Fetch after drawing so the empty tables show while waiting
        if app.needs_load {
            app.load().await;
            continue;
        }

        // Poll events (non-blocking with 100ms timeout)
        if let Some(evt) = event::poll_event(100)? {
            event::handle_event(&mut app, evt).await;
        }
    }

    info!("Shop admin exiting");
    Ok(())
}
