use clap::{Parser, Subcommand};

mod route;
mod suggest;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve two addresses and print the driving route between them
    Route {
        #[command(flatten)]
        args: route::RouteArgs,
    },
    /// Print address completions for a partial query
    #[command(visible_alias = "s")]
    Suggest {
        #[command(flatten)]
        args: suggest::SuggestArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Route { args } => route::run(args).await?,
        Commands::Suggest { args } => suggest::run(args).await?,
    }

    Ok(())
}
