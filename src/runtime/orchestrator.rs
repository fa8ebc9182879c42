use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    app::{get_config_dir, load_config, load_config_file, Config},
    cli::{handle_command, Cli},
    constants::LOG_FILE_NAME,
    models::{HttpQaService, PdfDocument},
    session::{SessionController, UserIdentity},
    tui::{run_ui, App},
    utils::init_file_logger,
};

/// Load configuration and apply command-line overrides
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config_file(config_path)?
    } else {
        match load_config() {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("⚠️  Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    };

    if let Some(url) = &cli.service_url {
        config.service.base_url = url.clone();
    }
    if let Some(user_file) = &cli.user_file {
        config.identity.user_file = Some(user_file.clone());
    }

    Ok(config)
}

/// Read the user record once. `--session-id` takes precedence over the file.
pub fn resolve_identity(cli: &Cli, config: &Config) -> Result<Option<UserIdentity>> {
    if let Some(session_id) = &cli.session_id {
        return Ok(Some(UserIdentity::new(session_id.clone(), cli.email.clone())));
    }
    let path = config.identity.user_file_path()?;
    UserIdentity::load(&path).with_context(|| format!("Failed to read user record {}", path.display()))
}

/// Read every path as a PDF document
pub async fn load_documents(paths: &[PathBuf]) -> Result<Vec<PdfDocument>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let doc = PdfDocument::from_path(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?;
        documents.push(doc);
    }
    Ok(documents)
}

/// Build a session controller talking to the configured service
pub fn build_controller(config: &Config, identity: Option<UserIdentity>) -> Result<Arc<SessionController>> {
    let service = HttpQaService::new(&config.service)?;
    Ok(Arc::new(SessionController::new(Arc::new(service), identity)))
}

/// Main runtime orchestrator for interactive mode
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let config = resolve_config(&cli)?;
        Ok(Self { cli, config })
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config).await? {
                return Ok(());
            }
        }

        let log_path = get_config_dir()?.join(LOG_FILE_NAME);
        init_file_logger(&log_path, self.cli.verbose)?;

        let identity = resolve_identity(&self.cli, &self.config)?;
        match &identity {
            Some(identity) => println!("👤 Session: {}", identity.uid.green()),
            None => println!("⚠️  No user record found; continuing without a session id"),
        }

        let controller = build_controller(&self.config, identity)?;
        println!("🔗 Service: {}", self.config.service.base_url.green());

        if !self.cli.upload.is_empty() {
            let documents = load_documents(&self.cli.upload).await?;
            println!("📄 Uploading {} document(s)...", documents.len());
            match controller.ingest_documents(&documents).await {
                Ok(questions) => println!("✅ Uploaded, {} recommended question(s)", questions.len()),
                Err(e) => eprintln!("❌ Upload failed: {}", e),
            }
        }

        let app = App::new(controller, self.config.ui.clone());
        run_ui(app).await
    }
}
