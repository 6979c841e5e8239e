use clap::Parser;
use exemplar::cli::commands::{Cli, Commands};
use exemplar::domain::entities::example::ExampleRecord;
use exemplar::Exemplar;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("EXEMPLAR_DB").unwrap_or_else(|_| "./exemplar.db".into());

    let store = match Exemplar::new(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error initializing exemplar: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(store, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(store: Exemplar, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Ingest { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let examples: Vec<ExampleRecord> = serde_json::from_str(&raw)?;
            let count = store.ingest(&examples).await?;
            println!("Ingested {count} examples");
        }
        Commands::Retrieve { query, k } => {
            let examples = store.retrieve(&query, k).await?;
            println!("{}", serde_json::to_string_pretty(&examples)?);
        }
        Commands::Stats => {
            let stats = store.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
