//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use larder_core::FormInput;

#[derive(Parser, Debug)]
#[command(name = "larder")]
#[command(about = "Browse and manage the food catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to client.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List food items
    #[command(alias = "ls")]
    List {
        /// Only items whose name matches
        #[arg(short, long, default_value = "")]
        search: String,

        /// Show this many pages
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Add a food item
    #[command(alias = "new")]
    Add {
        #[command(flatten)]
        fields: FormArgs,
    },

    /// Edit a food item; omitted fields keep their current value
    Edit {
        id: String,

        #[command(flatten)]
        fields: FormArgs,
    },

    /// Delete a food item
    #[command(alias = "rm")]
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive search: each line typed is a new search term
    Search,

    /// Show or create the client config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// The seven form fields, each optional on the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct FormArgs {
    /// Food name
    #[arg(long)]
    pub name: Option<String>,

    /// Food image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Rating from 1 to 5
    #[arg(long)]
    pub rating: Option<String>,

    /// Price
    #[arg(long)]
    pub price: Option<String>,

    /// Restaurant name
    #[arg(long)]
    pub restaurant: Option<String>,

    /// Restaurant logo URL
    #[arg(long)]
    pub logo: Option<String>,

    /// "Open Now" or "Closed"
    #[arg(long)]
    pub status: Option<String>,
}

impl FormArgs {
    /// Overlays the given fields onto `form`.
    pub fn apply(self, mut form: FormInput) -> FormInput {
        let slots = [
            (self.name, &mut form.food_name),
            (self.image, &mut form.food_image),
            (self.rating, &mut form.food_rating),
            (self.price, &mut form.price),
            (self.restaurant, &mut form.restaurant_name),
            (self.logo, &mut form.restaurant_logo),
            (self.status, &mut form.restaurant_status),
        ];
        for (value, slot) in slots {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}
