use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use leadgen_core::user::RecordId;
use std::path::PathBuf;
use std::process::ExitCode;

mod bootstrap;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "leadgen")]
#[command(about = "Lead Generation client - seller sniping, brand research and QA analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// API base URL (overrides LEADGEN_API_URL and config.toml)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved session
    #[arg(long, global = true)]
    pub credentials_dir: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(flatten)]
    Session(SessionCommands),
}

/// Commands that talk to the API.
#[derive(Subcommand)]
enum SessionCommands {
    /// Sign in and save the session
    Login {
        #[arg(short, long)]
        username: String,
        /// Prompted for (hidden) when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and erase the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Show headline counts
    Dashboard,
    /// Seller sniping
    Sellers {
        #[command(subcommand)]
        action: SellersAction,
    },
    /// Brand research
    Brands {
        #[command(subcommand)]
        action: BrandsAction,
    },
    /// QA analysis
    Qa {
        #[command(subcommand)]
        action: QaAction,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
}

/// Seller fields that `sellers update` can change.
#[derive(Args, Debug, Clone, Default)]
pub struct SellerChangeArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Pipeline status, e.g. new, contacted, qualified
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
enum SellersAction {
    /// List scraped sellers
    List(ListArgs),
    /// Show one seller
    Show { id: RecordId },
    /// Scrape a seller storefront URL
    Scrape { url: String },
    /// Edit a seller's details
    Update {
        id: RecordId,
        #[command(flatten)]
        changes: SellerChangeArgs,
    },
    /// Delete a seller
    Delete { id: RecordId },
}

#[derive(Subcommand)]
enum BrandsAction {
    /// List researched brands
    List(ListArgs),
    /// Show one brand
    Show { id: RecordId },
    /// Research a brand by name
    Research { name: String },
}

#[derive(Subcommand)]
enum QaAction {
    /// Run profitability analysis for a brand
    Analyze { brand_id: RecordId },
    /// Show stored QA metrics for a brand
    Metrics { brand_id: RecordId },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a commented config.toml if none exists
    Init,
    /// Change values in config.toml
    Set {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        environment: Option<String>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        verify_failure: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(&cli.global);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let global = cli.global;

    match cli.command {
        Commands::Config { action } => config_command(&global, action),
        Commands::Session(command) => {
            let mut ctx = bootstrap::bootstrap(&global)?;
            let code = session_command(&mut ctx, command).await?;
            ctx.finish();
            Ok(code)
        }
    }
}

fn config_command(global: &GlobalArgs, action: ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Show => commands::config::show(global),
        ConfigAction::Init => commands::config::init(global),
        ConfigAction::Set {
            api_url,
            environment,
            timeout_secs,
            verify_failure,
        } => commands::config::set(
            global,
            commands::config::ConfigChanges {
                api_url,
                environment,
                timeout_secs,
                verify_failure,
            },
        ),
    }
}

async fn session_command(
    ctx: &mut bootstrap::AppContext,
    command: SessionCommands,
) -> Result<ExitCode> {
    match command {
        SessionCommands::Login { username, password } => {
            commands::auth::login(ctx, &username, password).await
        }
        SessionCommands::Logout => commands::auth::logout(ctx).await,
        SessionCommands::Whoami => commands::auth::whoami(ctx).await,
        SessionCommands::Register {
            username,
            email,
            password,
            full_name,
        } => commands::auth::register(ctx, username, email, password, full_name).await,
        SessionCommands::Dashboard => commands::dashboard::show(ctx).await,
        SessionCommands::Sellers { action } => match action {
            SellersAction::List(args) => commands::sellers::list(ctx, args).await,
            SellersAction::Show { id } => commands::sellers::show(ctx, &id).await,
            SellersAction::Scrape { url } => commands::sellers::scrape(ctx, &url).await,
            SellersAction::Update { id, changes } => {
                commands::sellers::update(ctx, &id, changes.into()).await
            }
            SellersAction::Delete { id } => commands::sellers::delete(ctx, &id).await,
        },
        SessionCommands::Brands { action } => match action {
            BrandsAction::List(args) => commands::brands::list(ctx, args).await,
            BrandsAction::Show { id } => commands::brands::show(ctx, &id).await,
            BrandsAction::Research { name } => commands::brands::research(ctx, &name).await,
        },
        SessionCommands::Qa { action } => match action {
            QaAction::Analyze { brand_id } => commands::qa::analyze(ctx, &brand_id).await,
            QaAction::Metrics { brand_id } => commands::qa::metrics(ctx, &brand_id).await,
        },
    }
}
