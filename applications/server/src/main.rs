/// Roster Server - user management HTTP service
use clap::{Parser, Subcommand};
use roster_core::validation;
use roster_server::{api, config::ServerConfig, services::PasswordService, state::AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Roster user management server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address (unique)
        #[arg(long)]
        email: String,
        /// Plaintext password, hashed before storage
        #[arg(long)]
        password: String,
    },
    /// List all users
    ListUsers,
    /// Insert the sample data set, skipping emails that already exist
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::AddUser {
            name,
            email,
            password,
        } => add_user(&name, &email, &password).await?,
        Commands::ListUsers => list_users().await?,
        Commands::Seed => seed().await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Roster server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Build application state and router
    let passwords = Arc::new(PasswordService::new(config.auth.cost));
    let state = AppState::new(pool, passwords);
    let app = api::router(state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(name: &str, email: &str, password: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        anyhow::bail!("name must not be empty");
    }
    if !validation::is_valid_email(email) {
        anyhow::bail!("invalid email address: {email}");
    }
    if !validation::is_strong_password(password) {
        anyhow::bail!(
            "password must be at least {} characters",
            validation::MIN_PASSWORD_LEN
        );
    }

    let config = ServerConfig::load()?;
    config.validate()?;
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;

    let passwords = PasswordService::new(config.auth.cost);
    let password_hash = passwords.hash(password)?;
    let id = roster_storage::users::create(&pool, name, email, &password_hash).await?;

    println!("Created user {id} ({email})");
    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;

    let users = roster_storage::users::list_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

async fn seed() -> anyhow::Result<()> {
    const SAMPLE_USERS: &[(&str, &str, &str)] = &[
        ("John Doe", "john@example.com", "password123"),
        ("Jane Smith", "jane@example.com", "secret456"),
        ("Bob Johnson", "bob@example.com", "qwerty789"),
        ("Diana Prince", "diana@example.com", "securepass"),
        ("Eve Adams", "eve@example.com", "evepassword"),
    ];

    let config = ServerConfig::load()?;
    config.validate()?;
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;

    let passwords = PasswordService::new(config.auth.cost);
    let mut created = 0;

    for (name, email, password) in SAMPLE_USERS {
        if roster_storage::users::find_credentials_by_email(&pool, email)
            .await?
            .is_some()
        {
            continue;
        }

        let password_hash = passwords.hash(password)?;
        roster_storage::users::create(&pool, name, email, &password_hash).await?;
        created += 1;
    }

    println!("Seeded {created} users");
    Ok(())
}
