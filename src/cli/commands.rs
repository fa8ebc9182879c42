use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{init_config, Config},
    models::{HttpQaService, QaService},
    session::UserIdentity,
};

use super::Commands;

/// Handle CLI subcommands. Returns true when the command ends the run.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing Prajna configuration...");
            let path = init_config()?;
            println!("Configuration ready at: {}", path.display());
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Chat => Ok(false),
    }
}

/// Show version information
pub fn show_version() {
    println!("Prajna v{}", env!("CARGO_PKG_VERSION"));
    println!("   Ask questions about your PDF documents");
}

/// Show configuration, identity and service reachability
async fn show_status(config: &Config) -> Result<()> {
    println!("Prajna Status:");
    println!();

    let user_file = config.identity.user_file_path()?;
    match UserIdentity::load(&user_file) {
        Ok(Some(identity)) => {
            println!("  [OK] User record: {} ({})", identity.uid.green(), user_file.display());
            if let Some(email) = identity.email {
                println!("      • email: {}", email);
            }
        }
        Ok(None) => println!(
            "  [WARNING] User record: not found at {} (empty session id will be sent)",
            user_file.display()
        ),
        Err(e) => println!("  [ERROR] User record: {}", e.to_string().red()),
    }

    let service = HttpQaService::new(&config.service)?;
    if service.health_check().await? {
        println!("  [OK] Service: reachable at {}", service.base_url().green());
    } else {
        println!("  [ERROR] Service: not reachable at {}", service.base_url().red());
    }

    println!(
        "  Endpoints: upload {} | query {}",
        config.service.upload_path, config.service.query_path
    );
    println!();
    Ok(())
}
