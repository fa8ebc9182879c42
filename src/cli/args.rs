use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prajna")]
#[command(version)]
#[command(about = "Ask questions about your PDF documents", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Service base URL (overrides configuration)
    #[arg(long, env = "PRAJNA_URL")]
    pub service_url: Option<String>,

    /// User record file (JSON with `uid` and optional `email`)
    #[arg(long)]
    pub user_file: Option<PathBuf>,

    /// Session identity, bypassing the user record file
    #[arg(long)]
    pub session_id: Option<String>,

    /// Email sent with queries (requires --session-id)
    #[arg(long, requires = "session_id")]
    pub email: Option<String>,

    /// PDF files to upload at start-up
    #[arg(short, long, num_args = 1..)]
    pub upload: Vec<PathBuf>,

    /// Non-interactive question to ask
    #[arg(short, long, conflicts_with = "pick")]
    pub ask: Option<String>,

    /// Non-interactive: send the recommended question with this id
    #[arg(long, requires = "upload")]
    pub pick: Option<usize>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether this run answers once and exits
    pub fn is_non_interactive(&self) -> bool {
        self.ask.is_some() || self.pick.is_some()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default configuration file
    Init,
    /// Start a chat session (default)
    Chat,
    /// Show version information
    Version,
    /// Check configuration, identity and service reachability
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_detection() {
        let cli = Cli::parse_from(["prajna", "--upload", "a.pdf", "b.pdf", "--ask", "Why?"]);
        assert!(cli.is_non_interactive());
        assert_eq!(cli.upload.len(), 2);

        let cli = Cli::parse_from(["prajna", "--upload", "a.pdf", "--pick", "1"]);
        assert_eq!(cli.pick, Some(1));

        let cli = Cli::parse_from(["prajna"]);
        assert!(!cli.is_non_interactive());
        assert_eq!(cli.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from(["prajna", "--ask", "x", "--pick", "0", "--upload", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from(["prajna", "--pick", "0"]).is_err());
        assert!(Cli::try_parse_from(["prajna", "--email", "a@b.c"]).is_err());
    }
}
