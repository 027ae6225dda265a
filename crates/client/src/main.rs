//! `propfinder` command-line front end.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use propfinder_client::{App, ClientConfig};
use propfinder_core::{
    Credentials, ListingType, PropertyId, PropertyRecord, PropertyType, Registration, SearchFilters,
};
use propfinder_favorites::{FavoriteStatus, PropertyApi};

#[derive(Debug, Parser)]
#[command(name = "propfinder", about = "Browse listings and manage favorites", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Forget the persisted session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List bookmarked properties.
    Favorites {
        /// Fail if any bookmark cannot be loaded.
        #[arg(long)]
        strict: bool,
    },
    /// Bookmark a property, or remove the bookmark if present.
    Toggle { property_id: PropertyId },
    /// Tell whether a property is bookmarked.
    Check { property_id: PropertyId },
    /// Search the catalogue.
    Search {
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "type", value_enum)]
        property_type: Option<TypeArg>,
        #[arg(long = "listing", value_enum)]
        listing_type: Option<ListingArg>,
        #[arg(long)]
        bedrooms: Option<u32>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Show one property.
    Show { property_id: PropertyId },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    Apartment,
    House,
    Villa,
    Townhouse,
    Studio,
    Penthouse,
    Commercial,
}

impl From<TypeArg> for PropertyType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Apartment => PropertyType::Apartment,
            TypeArg::House => PropertyType::House,
            TypeArg::Villa => PropertyType::Villa,
            TypeArg::Townhouse => PropertyType::Townhouse,
            TypeArg::Studio => PropertyType::Studio,
            TypeArg::Penthouse => PropertyType::Penthouse,
            TypeArg::Commercial => PropertyType::Commercial,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListingArg {
    Sale,
    Rent,
}

impl From<ListingArg> for ListingType {
    fn from(arg: ListingArg) -> Self {
        match arg {
            ListingArg::Sale => ListingType::ForSale,
            ListingArg::Rent => ListingType::ForRent,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    propfinder_observability::init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("invalid configuration")?;
    let app = App::new(config).context("failed to start client")?;

    run(&app, cli.command).await
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let identity = app
                .session()
                .login(&Credentials::new(email, password))
                .await
                .context("login failed")?;
            println!("Signed in as {} (#{})", identity.display_name(), identity.id());
        }
        Command::Register {
            email,
            password,
            first_name,
            last_name,
            phone,
        } => {
            let registration = Registration {
                email,
                password,
                first_name,
                last_name,
                phone_number: phone,
            };
            let identity = app
                .session()
                .register(&registration)
                .await
                .context("registration failed")?;
            println!("Welcome, {} (#{})", identity.display_name(), identity.id());
        }
        Command::Logout => {
            app.session().logout().context("session could not be removed")?;
            println!("Signed out");
        }
        Command::Whoami => match app.session().current_identity() {
            Some(identity) => println!("{} <{}> (#{})", identity.display_name(), identity.email(), identity.id()),
            None => println!("Not signed in"),
        },
        Command::Favorites { strict } => {
            let identity = app.require_identity()?;
            let page = app.favorites().load_favorites(&identity).await?;
            if !page.is_complete() {
                eprintln!("warning: {} favorite(s) could not be loaded", page.failed.len());
            }
            let properties = if strict { page.into_strict()? } else { page.properties };
            if properties.is_empty() {
                println!("No favorites yet");
            }
            for property in &properties {
                print_row(property);
            }
        }
        Command::Toggle { property_id } => {
            let identity = app.require_identity()?;
            let favorites = app.favorites();
            let current = match favorites.favorite_status(&identity, property_id).await {
                FavoriteStatus::Favorited => true,
                FavoriteStatus::NotFavorited => false,
                FavoriteStatus::Unknown => bail!("could not determine bookmark state of {property_id}"),
            };
            let now = favorites.toggle_favorite(&identity, property_id, current).await?;
            if now {
                println!("Added {property_id} to favorites");
            } else {
                println!("Removed {property_id} from favorites");
            }
        }
        Command::Check { property_id } => {
            let identity = app.require_identity()?;
            let status = app.favorites().favorite_status(&identity, property_id).await;
            let label = match status {
                FavoriteStatus::Favorited => "favorited",
                FavoriteStatus::NotFavorited => "not favorited",
                FavoriteStatus::Unknown => "unknown",
            };
            println!("{property_id}: {label}");
        }
        Command::Search {
            location,
            property_type,
            listing_type,
            bedrooms,
            min_price,
            max_price,
        } => {
            let filters = SearchFilters {
                location,
                property_type: property_type.map(Into::into),
                listing_type: listing_type.map(Into::into),
                bedrooms,
                min_price,
                max_price,
            };
            let results = app.api().search_properties(&filters).await?;
            println!("{} result(s)", results.len());
            for property in &results {
                print_row(property);
            }
        }
        Command::Show { property_id } => {
            let property = app.api().get_property(property_id).await?;
            print_detail(&property);
        }
    }
    Ok(())
}

fn print_row(property: &PropertyRecord) {
    println!(
        "#{:<6} {:<40} {:>16}  {}",
        property.id,
        property.title,
        property.price_label(),
        property.location
    );
}

fn print_detail(property: &PropertyRecord) {
    println!("{} (#{})", property.title, property.id);
    println!("  {}", property.price_label());
    println!("  {}", property.location);
    if let Some(kind) = property.property_type {
        println!("  {}", kind.as_str());
    }
    if let (Some(beds), Some(baths)) = (property.bedrooms, property.bathrooms) {
        println!("  {beds} bed / {baths} bath");
    }
    if let Some(image) = property.cover_image() {
        println!("  {image}");
    }
    println!();
    println!("{}", property.summary(400));
    if let Some(owner) = &property.owner {
        println!();
        println!("Contact: {}", owner.name.as_deref().unwrap_or("owner"));
        if let Some(email) = &owner.email {
            println!("  {email}");
        }
        if let Some(phone) = &owner.phone {
            println!("  {phone}");
        }
    }
}
