use std::io;
use std::io::Write;

use affiliate_panel::models::{ListQuery, PageRequest, SortOrder, DEFAULT_PER_PAGE};
use affiliate_panel::pages::pagination::showing_summary;
use affiliate_panel::pages::{DashboardPage, TableRow};
use affiliate_panel::realtime::{ConnectionEvent, RealtimeEvent};
use affiliate_panel::services::ListSource;
use affiliate_panel::utils::{otpauth_secret, render_terminal_qr};
use affiliate_panel::{Config, PanelState, ServiceError};
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::{info, warn};

/// 联盟后台命令行客户端
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login { username: String, password: String },
    /// Complete a pending two-factor challenge
    #[command(name = "verify-2fa")]
    Verify2fa { code: String },
    /// Clear the stored session
    Logout,
    /// Show totals and stream live counters until Ctrl-C
    Dashboard,
    /// List affiliate links
    Links { page: Option<u32> },
    /// List tracked clicks
    Clicks { page: Option<u32> },
    /// List leads
    Leads { page: Option<u32> },
    /// List customers
    Customers { page: Option<u32> },
    /// List commissions
    Commissions { page: Option<u32> },
    /// List affiliate payouts
    Payouts { page: Option<u32> },
    /// List configured postbacks
    Postbacks,
    /// Render a provisioning URI as a terminal QR code
    TwoFactorQr { uri: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e)) // 转换为 io::Result
        })
        .init();

    let cli = Cli::parse();

    // 二维码渲染不需要后端
    if let Command::TwoFactorQr { uri } = &cli.command {
        println!("{}", render_terminal_qr(uri)?);
        if let Some(secret) = otpauth_secret(uri) {
            println!("Secret: {}", secret);
        }
        return Ok(());
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    let state = PanelState::new(config).context("Failed to create API client")?;
    info!("Using backend {}", state.client.base_url());

    match cli.command {
        Command::Login { username, password } => {
            let user = state.auth().login(&username, &password).await.map_err(user_error)?;
            println!("Signed in as {} ({})", user.name, user.username);
        }
        Command::Verify2fa { code } => {
            state.auth().verify_two_factor(&code).await.map_err(user_error)?;
            println!("Two-factor verification complete");
        }
        Command::Logout => {
            state.auth().logout().map_err(user_error)?;
            println!("Signed out");
        }
        Command::Dashboard => run_dashboard(&state).await?,
        Command::Links { page } => print_list(state.links(), page).await?,
        Command::Clicks { page } => print_list(state.clicks(), page).await?,
        Command::Leads { page } => print_list(state.leads(), page).await?,
        Command::Customers { page } => print_list(state.customers(), page).await?,
        Command::Commissions { page } => print_list(state.commissions(), page).await?,
        Command::Payouts { page } => print_list(state.affiliate_payouts(), page).await?,
        Command::Postbacks => {
            let postbacks = state.postbacks().list().await.map_err(user_error)?;
            if postbacks.is_empty() {
                println!("No postbacks configured");
            }
            for postback in postbacks {
                let events: Vec<&str> = postback.events.iter().map(|e| e.as_str()).collect();
                println!(
                    "{}  {:<4} {}  [{}]  {}  secret {}",
                    postback.id,
                    postback.method.as_str(),
                    postback.url,
                    events.join(", "),
                    if postback.is_active { "active" } else { "inactive" },
                    postback.secret_preview()
                );
            }
        }
        // 已在加载配置前处理
        Command::TwoFactorQr { .. } => {}
    }

    Ok(())
}

/// 服务错误转为 anyhow，需要重新登录时附带提示
fn user_error(err: ServiceError) -> anyhow::Error {
    match err.redirect() {
        Some(route) => anyhow!("{} (continue at {})", err.message(), route.path()),
        None => anyhow!("{}", err.message()),
    }
}

async fn print_list<S>(source: S, page: Option<u32>) -> Result<()>
where
    S: ListSource,
    S::Item: TableRow,
{
    let query = ListQuery::new(
        Default::default(),
        SortOrder::Desc,
        PageRequest::new(page.unwrap_or(1), DEFAULT_PER_PAGE),
    );
    let result = source.fetch(&query).await.map_err(user_error)?;

    if result.data.is_empty() {
        println!("No records found");
        return Ok(());
    }

    println!("{}", <S::Item as TableRow>::HEADERS.join(" | "));
    for item in &result.data {
        println!("{}", item.cells().join(" | "));
    }
    println!(
        "{} (page {} of {})",
        showing_summary(&result.meta),
        result.meta.current_page,
        result.meta.last_page
    );
    Ok(())
}

async fn run_dashboard(state: &PanelState) -> Result<()> {
    let mut dashboard = DashboardPage::new(state.dashboard(), state.leads(), state.profile());
    dashboard.load_stats().await;
    if let Some(err) = dashboard.error() {
        return Err(user_error(err.clone()));
    }
    dashboard.load_recent_leads().await;
    dashboard.load_affiliate().await;
    print_cards(&dashboard);

    let (handle, mut events) = match state.connect_realtime().await {
        Ok(connection) => connection,
        Err(err) => {
            // 实时服务不可用时保留快照
            warn!("Realtime unavailable: {}", err);
            return Ok(());
        }
    };
    dashboard.bind(&handle);
    println!("{}", dashboard.counters().phase().label());

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                let phase = dashboard.counters().phase();
                if dashboard.handle(&event).await.is_some() {
                    print_cards(&dashboard);
                }
                let next = dashboard.counters().phase();
                if next != phase {
                    let (title, _) = next.tooltip();
                    println!("{} - {}", next.label(), title);
                }
                if let RealtimeEvent::Connection { channel: None, event } = &event {
                    if matches!(event, ConnectionEvent::Closed | ConnectionEvent::Failed(_)) {
                        warn!("Realtime connection ended, showing last snapshot");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, leaving dashboard channel");
                break;
            }
        }
    }

    dashboard.unbind(&handle);
    handle.disconnect().await;
    Ok(())
}

fn print_cards(dashboard: &DashboardPage) {
    let now = std::time::Instant::now();
    let cards = dashboard.counters().cards(now);
    let line: Vec<String> = cards
        .iter()
        .map(|card| format!("{}: {}", card.title, card.value))
        .collect();
    println!("{}", line.join("  "));
    if let Some(lead) = dashboard.recent_leads().first() {
        println!("Latest lead: {} ({})", lead.email, lead.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommand_arguments() {
        let cli = Cli::try_parse_from(["affiliate-panel", "verify-2fa", "123456"]).unwrap();
        assert!(matches!(cli.command, Command::Verify2fa { code } if code == "123456"));

        let cli = Cli::try_parse_from(["affiliate-panel", "links", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Links { page: Some(3) }));

        let cli = Cli::try_parse_from(["affiliate-panel", "leads"]).unwrap();
        assert!(matches!(cli.command, Command::Leads { page: None }));

        assert!(Cli::try_parse_from(["affiliate-panel", "payouts", "two"]).is_err());
        assert!(Cli::try_parse_from(["affiliate-panel", "login", "jane"]).is_err());
    }
}
