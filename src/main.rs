mod categorizer;
mod cli;
mod error;
mod fmt;
mod importer;
mod models;
mod reports;
mod reviewer;
mod settings;
mod store;
#[cfg(feature = "tui")]
mod tui;

use clap::Parser;

use cli::{CategoriesCommands, Cli, Commands, Context, KeywordsCommands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = Context::new(cli.store.as_deref());

    let result = match cli.command {
        Commands::Init { data_dir, currency } => {
            cli::init::run(data_dir, currency, cli.store.as_deref())
        }
        Commands::Show { file } => cli::dashboard::run(&ctx, &file),
        #[cfg(feature = "tui")]
        Commands::Review { file } => cli::review::run(&ctx, &file),
        Commands::Edit { file, set } => cli::edit::run(&ctx, &file, &set),
        Commands::Categories { command } => match command {
            CategoriesCommands::List => cli::categories::list(&ctx),
            CategoriesCommands::Add { name } => cli::categories::add(&ctx, &name),
            CategoriesCommands::Remove { name } => cli::categories::remove(&ctx, &name),
        },
        Commands::Keywords { command } => match command {
            KeywordsCommands::List { category } => cli::keywords::list(&ctx, category.as_deref()),
            KeywordsCommands::Add { category, keyword } => {
                cli::keywords::add(&ctx, &category, &keyword)
            }
            KeywordsCommands::Remove { category, keyword } => {
                cli::keywords::remove(&ctx, &category, &keyword)
            }
        },
        Commands::Status => cli::status::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
