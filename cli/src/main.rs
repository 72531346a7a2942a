mod render;
mod shell;

use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use stockroom::config::{self, ConfigError};
use stockroom::entity::category::Category;
use stockroom::entity::customer::Customer;
use stockroom::entity::product::Product;
use stockroom::entity::purchase::Purchase;
use stockroom::entity::sale::Sale;
use stockroom::entity::user::User;
use stockroom::entity::vendor::Vendor;
use stockroom::entity::{Entity, EntityId};
use stockroom::navigation::Page;
use stockroom::{ApiClient, ApiConfig, ApiError, ListManager, WorkflowError, auth, dashboard};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("invalid assignment `{0}`; expected field=value")]
    InvalidAssignment(String),
    #[error("{plural} cannot be sorted by `{column}`")]
    UnsupportedSort { plural: &'static str, column: String },
    #[error("unknown page `{0}`; run `stockroom pages` for the list")]
    UnknownPage(String),
    #[error("{0} has no records to manage")]
    NotAListPage(&'static str),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "stockroom", about = "Inventory admin console")]
struct Cli {
    #[arg(long, env = "STOCKROOM_API_BASE_URL")]
    base_url: Option<String>,

    /// Backend path convention: `rest` or `action`.
    #[arg(long)]
    route_style: Option<String>,

    #[arg(long)]
    page_size: Option<usize>,

    /// Whole-request timeout in seconds; unset waits indefinitely.
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the admin pages and their routes.
    Pages,
    /// Summary cards computed from the live collections.
    Dashboard,
    Categories(EntityCommand),
    Products(EntityCommand),
    Vendors(EntityCommand),
    Customers(EntityCommand),
    Purchases(EntityCommand),
    Sales(EntityCommand),
    Users(EntityCommand),
    /// Send a password reset link.
    ResetPassword { email: String },
    /// Interactive session on one page, e.g. `stockroom shell vendors`.
    Shell { page: String },
}

#[derive(Args, Debug)]
struct EntityCommand {
    #[command(subcommand)]
    action: EntityAction,
}

#[derive(Subcommand, Debug)]
enum EntityAction {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Column to sort by; repeat the same column to sort descending.
        #[arg(long)]
        sort: Vec<String>,
    },
    Create(MutationArgs),
    Update {
        id: EntityId,
        #[command(flatten)]
        mutation: MutationArgs,
    },
    Delete {
        id: EntityId,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct MutationArgs {
    /// Form field assignment, `field=value`; repeatable.
    #[arg(long = "set")]
    fields: Vec<String>,

    /// Sale line item, `product_id=1,quantity=2,unit=Pieces,rate=10`;
    /// repeatable. Replaces the existing items when given.
    #[arg(long = "item")]
    items: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, route_style = ?config.route_style, "cli: config resolved");

    match cli.command {
        Command::Pages => {
            print!("{}", render::pages());
            Ok(())
        }
        Command::Dashboard => run_dashboard(config).await,
        Command::Categories(cmd) => run_entity::<Category>(config, cmd.action).await,
        Command::Products(cmd) => run_entity::<Product>(config, cmd.action).await,
        Command::Vendors(cmd) => run_entity::<Vendor>(config, cmd.action).await,
        Command::Customers(cmd) => run_entity::<Customer>(config, cmd.action).await,
        Command::Purchases(cmd) => run_entity::<Purchase>(config, cmd.action).await,
        Command::Sales(cmd) => run_entity::<Sale>(config, cmd.action).await,
        Command::Users(cmd) => run_entity::<User>(config, cmd.action).await,
        Command::ResetPassword { email } => run_reset_password(config, &email).await,
        Command::Shell { page } => run_shell(config, &page).await,
    }
}

/// Environment first, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ApiConfig, CliError> {
    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(style) = &cli.route_style {
        config.route_style = config::parse_route_style(Some(style))?;
    }
    if let Some(page_size) = cli.page_size {
        if page_size == 0 {
            return Err(ConfigError::Parse("--page-size must be at least 1".into()).into());
        }
        config.page_size = page_size;
    }
    if cli.timeout.is_some() {
        config.request_timeout_secs = cli.timeout;
    }
    Ok(config)
}

fn manager<E: Entity>(config: ApiConfig) -> Result<ListManager<E, ApiClient>, CliError> {
    let page_size = config.page_size;
    Ok(ListManager::new(ApiClient::new(config)?, page_size))
}

// =============================================================================
// ONE-SHOT COMMANDS
// =============================================================================

async fn run_dashboard(config: ApiConfig) -> Result<(), CliError> {
    let client = ApiClient::new(config)?;
    let summary = dashboard::fetch(&client).await?;
    print!("{}", render::cards(&summary.cards()));
    Ok(())
}

async fn run_reset_password(config: ApiConfig, email: &str) -> Result<(), CliError> {
    let client = ApiClient::new(config)?;
    match auth::request_password_reset(&client, email).await {
        Ok(notice) => {
            println!("{}", render::notice(&notice));
            Ok(())
        }
        Err(WorkflowError::Validation(errors)) => {
            let notice = stockroom::Notice::validation(&errors);
            eprintln!("{}", render::notice(&notice));
            Err(WorkflowError::Validation(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_entity<E: Entity>(config: ApiConfig, action: EntityAction) -> Result<(), CliError> {
    let mut manager = manager::<E>(config)?;
    let result = match action {
        EntityAction::List { search, page, sort } => list(&mut manager, &search, page, &sort).await,
        EntityAction::Create(mutation) => create(&mut manager, &mutation).await,
        EntityAction::Update { id, mutation } => update(&mut manager, id, &mutation).await,
        EntityAction::Delete { id, yes } => delete(&mut manager, id, yes).await,
    };
    flush_notices(&mut manager);
    result
}

async fn list<E: Entity>(
    manager: &mut ListManager<E, ApiClient>,
    search: &str,
    page: usize,
    sort: &[String],
) -> Result<(), CliError> {
    for column in sort {
        let key = E::parse_sort_key(column)
            .ok_or_else(|| CliError::UnsupportedSort { plural: E::PLURAL, column: column.clone() })?;
        manager.sort_by(key);
    }
    let loaded = manager.load().await;
    manager.set_search(search);
    manager.go_to_page(page);
    print!("{}", render::page(&manager.visible(), manager.lookups()));
    Ok(loaded?)
}

async fn create<E: Entity>(manager: &mut ListManager<E, ApiClient>, mutation: &MutationArgs) -> Result<(), CliError> {
    manager.open_create()?;
    apply_mutation(manager, mutation)?;
    manager.submit().await?;
    Ok(())
}

async fn update<E: Entity>(
    manager: &mut ListManager<E, ApiClient>,
    id: EntityId,
    mutation: &MutationArgs,
) -> Result<(), CliError> {
    manager.refresh().await?;
    manager.open_edit(id)?;
    apply_mutation(manager, mutation)?;
    manager.submit().await?;
    Ok(())
}

async fn delete<E: Entity>(manager: &mut ListManager<E, ApiClient>, id: EntityId, yes: bool) -> Result<(), CliError> {
    manager.refresh().await?;
    manager.request_delete(id)?;
    if !yes && !confirm(&format!("Delete {} {id}? [y/N] ", E::NOUN))? {
        manager.cancel_delete()?;
        println!("Cancelled.");
        return Ok(());
    }
    manager.confirm_delete().await?;
    Ok(())
}

fn apply_mutation<E: Entity>(manager: &mut ListManager<E, ApiClient>, mutation: &MutationArgs) -> Result<(), CliError> {
    for assignment in &mutation.fields {
        let (field, value) = parse_assignment(assignment)?;
        manager.set_field(field, value)?;
    }
    if mutation.items.is_empty() {
        return Ok(());
    }
    let items = manager.line_items_mut()?;
    *items = stockroom::entity::sale::LineItems::default();
    for (index, spec) in mutation.items.iter().enumerate() {
        if index > 0 {
            items.add();
        }
        for pair in spec.split(',') {
            let (field, value) = parse_assignment(pair)?;
            items.set(index, field, value).map_err(WorkflowError::from)?;
        }
    }
    Ok(())
}

/// `field=value` with surrounding whitespace trimmed from the field.
fn parse_assignment(raw: &str) -> Result<(&str, &str), CliError> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => Err(CliError::InvalidAssignment(raw.to_owned())),
    }
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn flush_notices<E: Entity>(manager: &mut ListManager<E, ApiClient>) {
    for notice in manager.drain_notices() {
        eprintln!("{}", render::notice(&notice));
    }
}

// =============================================================================
// SHELL
// =============================================================================

async fn run_shell(config: ApiConfig, slug: &str) -> Result<(), CliError> {
    let page = Page::from_slug(slug)
        .or_else(|| Page::from_path(slug))
        .ok_or_else(|| CliError::UnknownPage(slug.to_owned()))?;
    match page {
        Page::Dashboard => Err(CliError::NotAListPage(page.title())),
        Page::ProductCategories => shell::run(manager::<Category>(config)?, page).await,
        Page::ProductManagement => shell::run(manager::<Product>(config)?, page).await,
        Page::VendorManagement => shell::run(manager::<Vendor>(config)?, page).await,
        Page::CustomerManagement => shell::run(manager::<Customer>(config)?, page).await,
        Page::PurchaseManagement => shell::run(manager::<Purchase>(config)?, page).await,
        Page::SalesManagement => shell::run(manager::<Sale>(config)?, page).await,
        Page::LoginReset => shell::run(manager::<User>(config)?, page).await,
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
