use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "menuboard")]
#[command(about = "Menu board display and admin tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server base URL for the display, overrides the client config
    #[arg(short, long, env = "MENUBOARD_REMOTE_URL")]
    pub remote: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full-screen board for a TV or kiosk terminal - Default
    Display,
    /// Log in as admin and store the session
    Login {
        /// Read from stdin when omitted
        #[arg(long, env = "MENUBOARD_ADMIN_PASSWORD")]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Set the server URL and pull its menu
    Endpoint { url: String },
    /// Fetch the published menu into the draft
    Pull,
    /// Show endpoint, session and draft state
    Status,
    /// Publish the draft
    Publish,
    /// Edit dishes in the draft
    Dish {
        #[command(subcommand)]
        action: DishCommand,
    },
    /// Edit categories in the draft
    Category {
        #[command(subcommand)]
        action: CategoryCommand,
    },
    /// Edit promotions in the draft
    Promo {
        #[command(subcommand)]
        action: PromoCommand,
    },
    /// Set the display theme: default, new-year, spring, autumn
    Theme { name: String },
    /// Set the footer text
    Footer { message: String },
    /// Upload an image and optionally attach it to a dish
    Upload {
        file: PathBuf,
        #[arg(long)]
        dish: Option<String>,
    },
    /// AI-assisted dish content
    Ai {
        #[command(subcommand)]
        action: AiCommand,
    },
    /// Print an argon2 hash for the server's admin password setting
    HashPassword { password: String },
}

#[derive(Subcommand)]
pub enum DishCommand {
    /// List dishes by category
    List,
    /// Add a dish, or replace it when --id names an existing one
    Add {
        name: String,
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        price: u32,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        discount: Option<u32>,
        #[arg(short, long, default_value = "")]
        description: String,
        /// none, new, hit, spicy, vegan
        #[arg(long, default_value = "none")]
        badge: String,
        /// available, sold-out, hidden
        #[arg(long, default_value = "available")]
        status: String,
        #[arg(long)]
        order: Option<i32>,
        #[arg(long)]
        image: Option<String>,
    },
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    Add { name: String },
    Remove { id: String },
    /// Show or hide a category on the board
    Toggle { id: String },
}

#[derive(Subcommand)]
pub enum PromoCommand {
    /// Add a promotion, active by default
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// fade, slide-up, bounce
        #[arg(long, default_value = "fade")]
        style: String,
        /// Seconds on screen
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        image: Option<String>,
    },
    Remove { id: String },
    /// Activate or deactivate a promotion
    Toggle { id: String },
}

#[derive(Subcommand)]
pub enum AiCommand {
    /// Rewrite the description of a dish
    Describe { dish: String },
    /// Generate a photo for a dish
    Image { dish: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_display() {
        let cli = Cli::try_parse_from(["menuboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parses_dish_add() {
        let cli = Cli::try_parse_from([
            "menuboard", "dish", "add", "Борщ", "--category", "cat1", "--price", "180", "--badge", "hit",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Dish { action: DishCommand::Add { name, price, badge, .. } }) => {
                assert_eq!(name, "Борщ");
                assert_eq!(price, 180);
                assert_eq!(badge, "hit");
            }
            _ => panic!("expected dish add"),
        }
    }
}
