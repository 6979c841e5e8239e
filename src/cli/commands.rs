use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "exemplar", about = "Few-shot example store with semantic retrieval")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest example pairs from a JSON file (array of {input, query})
    Ingest {
        /// Path to the JSON file of example records
        file: String,
    },
    /// Retrieve the nearest stored examples for a query
    Retrieve {
        query: String,
        /// Number of examples to return
        #[arg(long, default_value = "2")]
        k: usize,
    },
    /// Show index statistics
    Stats,
}
