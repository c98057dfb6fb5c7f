use clap::{Parser, Subcommand};
use lab_portal::{
    AppState, build_app, config::Config, db, init_tracing, middleware::auth::TokenService,
    services::AuthService,
};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "lab_portal")]
#[command(author, version, about = "Research lab portal API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create an admin account, or promote an existing one
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging());

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::CreateAdmin {
            email,
            name,
            password,
        } => create_admin(config, &email, &name, &password),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> Result<(), String> {
    let pool = db::create_pool(&config.database()).map_err(|e| e.to_string())?;
    let redis = redis::Client::open(config.redis_url.as_str())
        .map_err(|e| format!("Failed to create Redis client: {}", e))?;

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| format!("Invalid server address {}: {}", config.server_address(), e))?;

    let state = Arc::new(AppState::new(pool, redis, config));
    let app = build_app(state);

    tracing::info!("Server running at http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))
}

fn create_admin(config: Config, email: &str, name: &str, password: &str) -> Result<(), String> {
    let pool = db::create_pool(&config.database()).map_err(|e| e.to_string())?;
    let mut conn = pool
        .get()
        .map_err(|e| format!("Failed to get DB connection: {}", e))?;
    let tokens = TokenService::new(config.auth());

    let user = AuthService::create_admin(&mut conn, &tokens, email, name, password)
        .map_err(|e| e.to_string())?;
    tracing::info!(user_id = %user.id, email = %user.email, "Admin account ready");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
