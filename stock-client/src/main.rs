//! stock-console - terminal front end for the inventory service

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use shared::types::{DateRange, TypeFilter};
use stock_client::views::ReportsView;
use stock_client::{ClientConfig, StockClient, View, logging};

#[derive(Debug, Parser)]
#[command(name = "stock-console", version, about = "Inventory reports and stock alerts")]
struct Cli {
    /// Inventory API root
    #[arg(long, env = "STOCK_API_URL")]
    api_url: Option<String>,

    /// Directory for the session file and logs
    #[arg(long, env = "STOCK_DATA_DIR")]
    data_dir: Option<String>,

    #[arg(long, env = "STOCK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "STOCK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Summary counters and previews
    Dashboard,
    /// Stock valuation and transaction summary
    Report {
        /// First day (YYYY-MM-DD), default 30 days ago
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD), default today
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Active products, optionally filtered
    Products {
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only products at or below their minimum stock
        #[arg(long)]
        low_stock: bool,
    },
    /// Transactions in a date range
    Transactions {
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        /// ALL, IN or OUT
        #[arg(long = "type", default_value = "ALL")]
        kind: TypeFilter,
    },
    /// User accounts (admin only)
    Users {
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    let log_dir = config.data_dir.join("logs");
    match std::fs::create_dir_all(&log_dir) {
        Ok(()) => logging::init_logger_with_file(&config.log_level, Some(&log_dir)),
        Err(e) => {
            logging::init_logger(&config.log_level);
            tracing::warn!(dir = %log_dir.display(), error = %e, "Log directory unavailable, logging to stderr");
        }
    }

    let client = config.build_client().context("failed to create client")?;

    match cli.command {
        Command::Login { username, password } => {
            let identity = client.login(&username, &password).await?;
            println!("Signed in as {} ({})", identity.label(), identity.role);
        }
        Command::Logout => {
            client.logout();
            println!("Signed out");
        }
        Command::Whoami => {
            resume(&client).await?;
            whoami(&client);
        }
        Command::Dashboard => {
            resume(&client).await?;
            dashboard(&client).await?;
        }
        Command::Report { start, end } => {
            let range = date_range(start, end, 30)?;
            resume(&client).await?;
            report(&client, range).await?;
        }
        Command::Products { query, low_stock } => {
            resume(&client).await?;
            products(&client, &query, low_stock).await?;
        }
        Command::Transactions { start, end, kind } => {
            let range = date_range(start, end, 7)?;
            resume(&client).await?;
            transactions(&client, range, kind).await?;
        }
        Command::Users { query } => {
            resume(&client).await?;
            users(&client, &query).await?;
        }
    }
    Ok(())
}

/// Re-validate the stored token
async fn resume(client: &StockClient) -> Result<()> {
    if client.restore().await.is_none() {
        bail!("not signed in; run `stock-console login` first");
    }
    Ok(())
}

fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>, days: i64) -> Result<DateRange> {
    let end = end.unwrap_or_else(|| Local::now().date_naive());
    let range = match start {
        Some(start) => DateRange::new(start, end),
        None => DateRange::trailing_days(end, days),
    };
    if range.start > range.end {
        bail!("start date {} is after end date {}", range.start, range.end);
    }
    Ok(range)
}

fn whoami(client: &StockClient) {
    let session = client.session();
    if let Some(identity) = session.identity() {
        println!("{} <{}>", identity.label(), identity.username);
        println!("role: {}", identity.role);
        println!(
            "users view: {}",
            if session.can_view(View::Users) { "yes" } else { "no" }
        );
    }
}

async fn dashboard(client: &StockClient) -> Result<()> {
    let view = client.dashboard();
    view.refresh().await?;
    let Some(snapshot) = view.snapshot() else {
        return Ok(());
    };

    let stats = snapshot.stats;
    println!("Products:            {}", stats.total_products);
    println!("Suppliers:           {}", stats.total_suppliers);
    println!("Low stock:           {}", stats.low_stock_count);
    println!(
        "Transactions ({} .. {}): {}",
        snapshot.window.start, snapshot.window.end, stats.recent_transaction_count
    );

    if !snapshot.low_stock_products.is_empty() {
        println!("\nLow stock:");
        for p in &snapshot.low_stock_products {
            println!("  {:<30} {:>6} / min {}", p.name, p.stock, p.minimum_stock);
        }
    }
    if !snapshot.recent_transactions.is_empty() {
        println!("\nRecent transactions:");
        for tx in &snapshot.recent_transactions {
            println!(
                "  {} {:<3} {:<30} x{:<5} {}",
                tx.transaction_date.format("%Y-%m-%d %H:%M"),
                tx.kind,
                tx.product_name.as_deref().unwrap_or("-"),
                tx.quantity,
                tx.total_price
            );
        }
    }
    Ok(())
}

async fn report(client: &StockClient, range: DateRange) -> Result<()> {
    let view: ReportsView = client.reports();
    view.refresh_with(range).await?;

    if let Some(stock) = view.stock() {
        println!("Total stock value: {}", stock.totals.total_stock_value);
        println!("Products:          {}", stock.totals.total_products);
        println!("Low stock:         {}", stock.totals.low_stock_count);

        println!("\nTop products by value:");
        for row in &stock.top_products {
            println!("  {:<30} {:>12}", row.product_name, row.stock_value);
        }
        println!("\nBy category:");
        for group in &stock.categories {
            println!(
                "  {:<20} {:>12} ({} products)",
                group.category, group.total_value, group.product_count
            );
        }
        for anomaly in &stock.anomalies {
            println!("  ! {}", anomaly);
        }
    }

    if let Some(summary) = view.summary() {
        println!("\nTransactions {} .. {}:", summary.range.start, summary.range.end);
        for point in &summary.trend {
            println!(
                "  {}  in {:>10}  out {:>10}  net {:>10}",
                point.date, point.in_value, point.out_value, point.net_value
            );
        }
        println!(
            "  total {} transactions, value {}, net {}",
            summary.totals.total_transactions, summary.totals.total_value, summary.totals.net_value
        );
        for anomaly in &summary.anomalies {
            println!("  ! {}", anomaly);
        }
    }
    Ok(())
}

async fn products(client: &StockClient, query: &str, low_stock_only: bool) -> Result<()> {
    let view = client.products();
    view.refresh().await?;
    let Some(snapshot) = view.snapshot() else {
        return Ok(());
    };

    for p in snapshot.search(query) {
        if low_stock_only && !p.is_low_stock() {
            continue;
        }
        let flag = if p.is_low_stock() { "LOW" } else { "" };
        println!(
            "{:>5} {:<30} {:<15} {:>6} {:>10} {}",
            p.id,
            p.name,
            p.category.as_deref().unwrap_or("-"),
            p.stock,
            p.price_out,
            flag
        );
    }
    Ok(())
}

async fn transactions(client: &StockClient, range: DateRange, kind: TypeFilter) -> Result<()> {
    let view = client.transactions();
    view.refresh(Some(range)).await?;
    let Some(snapshot) = view.snapshot() else {
        return Ok(());
    };

    for tx in snapshot.filtered(kind) {
        println!(
            "{} {:<3} {:<30} x{:<5} {:>10} {}",
            tx.transaction_date.format("%Y-%m-%d %H:%M"),
            tx.kind,
            tx.product_name.as_deref().unwrap_or("-"),
            tx.quantity,
            tx.total_price,
            tx.username.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn users(client: &StockClient, query: &str) -> Result<()> {
    let view = client.users();
    view.refresh().await?;

    for user in view.search(query) {
        println!(
            "{:>5} {:<20} {:<6} {:<30} {}",
            user.id,
            user.username,
            user.role,
            user.email.as_deref().unwrap_or("-"),
            if user.active { "active" } else { "inactive" }
        );
    }
    Ok(())
}
