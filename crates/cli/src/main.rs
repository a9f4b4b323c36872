//! Portal CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! portal-cli migrate
//!
//! # Create a user (prompts nothing; password is an argument)
//! portal-cli user create -e pessoa@example.com -p "senha-segura" -r funcionario
//!
//! # Promote a user to administrator
//! portal-cli user promote -e pessoa@example.com
//!
//! # Mark a user's email as confirmed
//! portal-cli user confirm -e pessoa@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create users
//! - `user promote` - Grant the administrator role
//! - `user confirm` - Confirm a user's email address

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "portal-cli")]
#[command(author, version, about = "Employee portal CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage portal users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user with a profile
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// Role (`funcionario`, `admin`)
        #[arg(short, long, default_value = "funcionario")]
        role: String,
    },
    /// Promote an existing user to administrator
    Promote {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Mark a user's email as confirmed
    Confirm {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                role,
            } => {
                commands::user::create(&email, &password, &role).await?;
            }
            UserAction::Promote { email } => {
                commands::user::promote(&email).await?;
            }
            UserAction::Confirm { email } => {
                commands::user::confirm(&email).await?;
            }
        },
    }
    Ok(())
}
