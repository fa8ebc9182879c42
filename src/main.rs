use anyhow::Result;
use clap::Parser;

use prajna::{
    cli::Cli,
    runtime::{build_controller, load_documents, resolve_config, resolve_identity, NonInteractiveRunner, Orchestrator, Prompt},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.is_non_interactive() {
        init_logger(cli.verbose);
        run_non_interactive(cli).await
    } else {
        // Interactive mode logs to a file once the UI is about to start
        let orchestrator = Orchestrator::new(cli)?;
        orchestrator.run().await
    }
}

/// Upload, ask once, print the result
async fn run_non_interactive(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let identity = resolve_identity(&cli, &config)?;
    let controller = build_controller(&config, identity)?;

    let documents = load_documents(&cli.upload).await?;
    let prompt = match (&cli.ask, cli.pick) {
        (Some(question), _) => Prompt::Ask(question.clone()),
        (None, Some(id)) => Prompt::Pick(id),
        (None, None) => anyhow::bail!("Nothing to ask: pass --ask or --pick"),
    };

    let runner = NonInteractiveRunner::new(controller);
    let result = runner.execute(documents, prompt).await;

    println!("{}", runner.format_result(&result, cli.output_format));

    // Exit with appropriate code
    if !result.errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
