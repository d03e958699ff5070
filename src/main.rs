// region:    --- Imports
use clap::{Parser, Subcommand, ValueEnum};
use plate_auction::auction::model::{Credentials, Registration};
use plate_auction::authority::{HttpAuthority, Ordering, PlateQuery};
use plate_auction::config::{ClientConfig, SESSION_ENV, URL_ENV};
use plate_auction::handlers::{self, Context, PlateForm, Reply};
use plate_auction::session::SessionStore;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Cli

/// 번호판 경매 클라이언트
#[derive(Parser, Debug)]
#[command(name = "plate-auction", version, about = "License-plate auction client")]
struct Cli {
    /// Auction authority base URL
    #[arg(long, env = URL_ENV)]
    url: Option<String>,

    /// Where the login session is stored
    #[arg(long, env = SESSION_ENV)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortOrder {
    /// Soonest deadline first
    Deadline,
    /// Latest deadline first
    DeadlineDesc,
}

impl From<SortOrder> for Ordering {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Deadline => Ordering::DeadlineAsc,
            SortOrder::DeadlineDesc => Ordering::DeadlineDesc,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Register as administrator
        #[arg(long)]
        admin: bool,
    },
    /// Log in and store the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// List plates
    Plates {
        /// Only plates whose number contains this text
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        order: Option<SortOrder>,
    },
    /// Show a plate with its bid history
    Show { plate_id: i64 },
    /// Place a bid on a plate
    Bid {
        plate_id: i64,
        /// Amount, e.g. 150.00
        amount: String,
    },
    /// List your own bids
    MyBids,
    /// Change the amount of one of your bids
    Raise { bid_id: i64, amount: String },
    /// Withdraw one of your bids before the deadline
    Withdraw { bid_id: i64 },
    /// Create a plate (admin)
    CreatePlate {
        #[arg(long)]
        number: String,
        #[arg(long, default_value = "")]
        description: String,
        /// e.g. 2026-12-31T18:00:00 (UTC)
        #[arg(long)]
        deadline: String,
    },
    /// Update a plate (admin)
    UpdatePlate {
        plate_id: i64,
        #[arg(long)]
        number: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        deadline: String,
    },
    /// Delete a plate and its bids (admin)
    DeletePlate { plate_id: i64 },
}

// endregion: --- Cli

// region:    --- Dispatch

async fn dispatch(ctx: &Context<'_>, command: Command) -> Reply {
    match command {
        Command::Register {
            username,
            email,
            password,
            admin,
        } => {
            let registration = Registration {
                username,
                email,
                password,
                is_admin: admin,
            };
            handlers::handle_register(ctx, registration).await
        }
        Command::Login { username, password } => {
            handlers::handle_login(ctx, Credentials { username, password }).await
        }
        Command::Logout => handlers::handle_logout(ctx).await,
        Command::Plates { search, order } => {
            let query = PlateQuery {
                ordering: order.map(Ordering::from),
                plate_number_contains: search,
            };
            handlers::handle_list_plates(ctx, query).await
        }
        Command::Show { plate_id } => handlers::handle_show_plate(ctx, plate_id).await,
        Command::Bid { plate_id, amount } => handlers::handle_bid(ctx, plate_id, &amount).await,
        Command::MyBids => handlers::handle_my_bids(ctx).await,
        Command::Raise { bid_id, amount } => {
            handlers::handle_raise_bid(ctx, bid_id, &amount).await
        }
        Command::Withdraw { bid_id } => handlers::handle_withdraw_bid(ctx, bid_id).await,
        Command::CreatePlate {
            number,
            description,
            deadline,
        } => {
            let form = PlateForm {
                plate_number: number,
                description,
                deadline,
            };
            handlers::handle_create_plate(ctx, form).await
        }
        Command::UpdatePlate {
            plate_id,
            number,
            description,
            deadline,
        } => {
            let form = PlateForm {
                plate_number: number,
                description,
                deadline,
            };
            handlers::handle_update_plate(ctx, plate_id, form).await
        }
        Command::DeletePlate { plate_id } => handlers::handle_delete_plate(ctx, plate_id).await,
    }
}

// endregion: --- Dispatch

// region:    --- Main
#[tokio::main]
async fn main() -> ExitCode {
    // logging 초기화 (출력과 섞이지 않도록 stderr 사용)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.url, cli.session);
    info!(
        "{:<12} --> 권한 서버: {}, 세션: {}",
        "Main",
        config.base_url,
        config.session_path.display()
    );

    let authority = HttpAuthority::new(config.base_url.clone());
    let store = SessionStore::new(config.session_path.clone());
    let ctx = Context::new(&authority, &store);

    match dispatch(&ctx, cli.command).await {
        Ok(reply) => {
            println!("{}", reply.trim_end());
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("{:<12} --> 명령 실패: {}", "Main", message);
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
// endregion: --- Main
