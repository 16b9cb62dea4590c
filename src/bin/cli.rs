use clap::{Parser, Subcommand};
use dialoguer::Password;
use dotenvy::dotenv;
use warden::cli::{hash_password, issue_token, parse_claim, verify_token};
use warden_auth::{ClaimValue, TokenCore};
use warden_config::JwtConfig;
use warden_core::BcryptHasher;

#[derive(Parser)]
#[command(name = "warden-cli")]
#[command(about = "Warden CLI - Administrative tools for issuing and checking credentials", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a signed credential
    IssueToken {
        /// Subject claim, usually the user's email
        #[arg(short = 's', long)]
        sub: String,

        /// Lifetime in minutes (defaults to JWT_ACCESS_EXPIRY)
        #[arg(short = 't', long)]
        ttl_minutes: Option<i64>,

        /// Extra claim as key=value; may be repeated
        #[arg(short = 'c', long = "claim", value_parser = parse_claim)]
        claims: Vec<(String, ClaimValue)>,
    },
    /// Verify a credential and print its claims
    VerifyToken {
        credential: String,
    },
    /// Hash a password with bcrypt
    HashPassword {
        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::IssueToken {
            sub,
            ttl_minutes,
            claims,
        } => {
            let core = load_core();
            match issue_token(&core, &sub, ttl_minutes, claims) {
                Ok(token) => println!("{}", token),
                Err(e) => fail(format!("Error issuing credential: {:#}", e)),
            }
        }
        Commands::VerifyToken { credential } => {
            let core = load_core();
            match verify_token(&core, &credential) {
                Ok(claims) => println!("{}", claims),
                Err(e) => fail(format!("Error: {}", e)),
            }
        }
        Commands::HashPassword { password } => {
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()
                    .unwrap_or_else(|e| fail(format!("Failed to read password: {}", e))),
            };

            match hash_password(&BcryptHasher::default(), &password) {
                Ok(hash) => println!("{}", hash),
                Err(e) => fail(format!("Error hashing password: {}", e)),
            }
        }
    }
}

fn load_core() -> TokenCore {
    let config = JwtConfig::from_env()
        .unwrap_or_else(|e| fail(format!("Invalid JWT configuration: {}", e)));
    if config.uses_default_secret() {
        eprintln!("Warning: JWT_SECRET is not set; using the development placeholder secret");
    }
    TokenCore::from_config(&config)
        .unwrap_or_else(|e| fail(format!("Invalid JWT configuration: {}", e)))
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
