//! WWCP command-line tool
//!
//! ```sh
//! # Validate the configuration (~/.config/wwcp/config.toml)
//! wwcp check
//!
//! # Ask the local authorizator to start a session
//! wwcp authorize-start --token AABBCCDD --evse DE*GEF*E1
//!
//! # Push a roaming network loaded from JSON to the navigation provider
//! wwcp push --locations network.json --action fullload --operator DE*GEF
//!
//! # List every authorization outcome
//! wwcp outcomes
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use wwcp::application::{LocalAuthorizator, NavigationProvider};
use wwcp::config::AppConfig;
use wwcp::domain::{
    AuthStartOutcome, AuthStartRequest, AuthStopOutcome, AuthorizeStartStop, LocationScope,
    OperatorId, Outcome, PushAction, PushOptions, RoamingNetwork,
};
use wwcp::infrastructure::LoggingPushTarget;
use wwcp::init_tracing;

/// WWCP authorization results and navigation-provider push.
#[derive(Parser, Debug)]
#[command(
    name = "wwcp",
    version,
    about = "Authorize charging sessions and push charging locations",
    long_about = "Local WWCP authorizator and navigation-provider push tool.\n\n\
                  Default config: ~/.config/wwcp/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "WWCP_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file and exit.
    Check,

    /// Authorize the start of a charging session against the configured tokens.
    AuthorizeStart {
        #[arg(long)]
        token: String,

        /// EVSE the session should start at.
        #[arg(long)]
        evse: Option<String>,
    },

    /// Push charging locations through the navigation provider.
    Push {
        /// JSON file holding a roaming network.
        #[arg(long)]
        locations: PathBuf,

        /// FullLoad, Update, Insert or Delete.
        #[arg(long, default_value = "fullload")]
        action: PushAction,

        /// Only push EVSEs of this operator.
        #[arg(long)]
        operator: Option<String>,
    },

    /// Print every authorization outcome with its default description.
    Outcomes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(wwcp::default_config_path);
    let mut config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            if matches!(cli.command, Command::Check) {
                std::process::exit(1);
            }
            AppConfig::default()
        }
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match cli.command {
        Command::Check => {
            println!("Configuration OK");
            println!("   Config file        : {}", config_path.display());
            println!("   Authorizator       : {}", config.authorization.authorizator_id);
            println!("   Known tokens       : {}", config.authorization.tokens.len());
            println!("   Cache TTL          : {}s", config.authorization.cache_ttl_secs);
            println!("   Navigation provider: {}", config.navigation_provider.id);
            println!("   Log level          : {}", config.logging.level);
        }

        Command::AuthorizeStart { token, evse } => {
            let authorizator = LocalAuthorizator::from_config(&config.authorization)?;
            let mut request = AuthStartRequest::new(token);
            if let Some(evse) = evse {
                request = request.at(LocationScope::Evse(evse.into()));
            }
            let result = authorizator.authorize_start(request).await?;
            info!(outcome = result.outcome().as_str(), "Authorize start finished");
            println!("{}", serde_json::to_string_pretty(&result.to_json(false, None))?);
        }

        Command::Push {
            locations,
            action,
            operator,
        } => {
            let content = std::fs::read_to_string(&locations)?;
            let network: RoamingNetwork = serde_json::from_str(&content)?;

            let remote = Arc::new(LoggingPushTarget::new(format!(
                "{}-remote",
                config.navigation_provider.id
            )));
            let provider = NavigationProvider::from_config(&config.navigation_provider)
                .with_remote(remote);

            let ack = match operator.map(OperatorId::from) {
                Some(id) => {
                    let Some(operator) = network.get_operator(&id) else {
                        error!(operator = id.as_str(), "Operator not found");
                        return Err(format!("operator {} not in {:?}", id, locations).into());
                    };
                    provider
                        .push_operator(operator, action, None, PushOptions::default())
                        .await
                }
                None => {
                    provider
                        .push_roaming_network(&network, action, None, PushOptions::default())
                        .await
                }
            };
            if !ack.outcome.is_success() {
                error!(outcome = ack.outcome.as_str(), "Push failed");
            }
            println!("{}", serde_json::to_string_pretty(&ack)?);
        }

        Command::Outcomes => {
            println!("{}", AuthStartOutcome::KIND);
            for outcome in AuthStartOutcome::ALL {
                println!("   {:<24} {}", outcome.as_str(), outcome.default_description());
            }
            println!("{}", AuthStopOutcome::KIND);
            for outcome in AuthStopOutcome::ALL {
                println!("   {:<24} {}", outcome.as_str(), outcome.default_description());
            }
        }
    }

    Ok(())
}
