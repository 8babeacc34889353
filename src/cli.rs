use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tasting::catalogs::SourceKind;

/// Search meals, cocktails and packaged foods from one place
#[derive(Parser)]
#[command(name = "tasting")]
#[command(version, about = "Search TheMealDB, TheCocktailDB and Open Food Facts at once", long_about = None)]
pub struct Cli {
    /// Config file (defaults to tasting.toml in the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print items and details as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search all three catalogs
    Search {
        /// Query to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List meals in a category
    Category {
        /// Category name, e.g. Dessert
        name: Option<String>,
    },
    /// Show the full record for one item
    Details {
        /// mealdb, cocktaildb or openfoodfacts
        source: SourceKind,
        /// Catalog id (meal id, drink id or barcode)
        id: String,
    },
    /// List the catalogs and where they are fetched from
    Sources,
    /// Interactive session
    Shell,
}
