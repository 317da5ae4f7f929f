//! Venuebook CLI
//!
//! Command-line front end for the venue book:
//! - List venues sorted by name, drive time or Saturday price
//! - Show one venue
//! - Add and edit venues, including image and brochure uploads
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use venuebook::config::{generate_default_config, Config, LoggingConfig};
use venuebook::controller::{
    FieldEdit, FormError, Services, VenueBook, VenueForm, VisibilityFilter,
};
use venuebook::maps::GoogleMapsClient;
use venuebook::store::{SupabaseClient, UploadFile};
use venuebook::venue::{SortKey, StatusSwatch, VenueCard, VenueId};

#[derive(Parser)]
#[command(name = "venuebook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keep track of wedding venues")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/venuebook/config.toml or ./venuebook.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all venues
    List {
        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortKey::Alphabetic)]
        sort: SortKey,
        /// Hide venues marked inactive
        #[arg(long)]
        active_only: bool,
    },

    /// Show one venue
    Show {
        /// Venue id
        id: VenueId,
    },

    /// Add a venue
    Add {
        #[command(flatten)]
        fields: FieldArgs,
        /// Hide the venue from active-only listings
        #[arg(long)]
        inactive: bool,
    },

    /// Edit a venue
    Edit {
        /// Venue id
        id: VenueId,
        #[command(flatten)]
        fields: FieldArgs,
        /// Flip the venue's visibility
        #[arg(long)]
        toggle_active: bool,
        /// Remove the image at this position (0 = hero); repeatable
        #[arg(long)]
        remove_image: Vec<usize>,
        /// Move the image at this position one place left; repeatable
        #[arg(long)]
        move_left: Vec<usize>,
        /// Move the image at this position one place right; repeatable
        #[arg(long)]
        move_right: Vec<usize>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    price_saturday: Option<String>,
    #[arg(long)]
    price_sunday: Option<String>,
    #[arg(long)]
    price_midweek: Option<String>,
    #[arg(long)]
    status: Option<String>,
    /// Predefined status color
    #[arg(long, value_enum, conflicts_with = "status_color")]
    color: Option<StatusSwatch>,
    /// Any status color as hex
    #[arg(long)]
    status_color: Option<String>,
    /// Notes; use \n for line breaks
    #[arg(long)]
    notes: Option<String>,
    /// Image file to upload; repeatable, appended in order
    #[arg(long)]
    image: Vec<PathBuf>,
    /// Brochure file to upload
    #[arg(long)]
    brochure: Option<PathBuf>,
    /// Look the location up from the venue name
    #[arg(long)]
    autofill_location: bool,
}

impl FieldArgs {
    fn edits(&self) -> Vec<FieldEdit> {
        let mut edits = Vec::new();
        let mut push = |value: &Option<String>, edit: fn(String) -> FieldEdit| {
            if let Some(v) = value {
                edits.push(edit(v.clone()));
            }
        };
        push(&self.name, FieldEdit::Name);
        push(&self.location, FieldEdit::Location);
        push(&self.website, FieldEdit::WebsiteUrl);
        push(&self.price_saturday, FieldEdit::PriceSaturday);
        push(&self.price_sunday, FieldEdit::PriceSunday);
        push(&self.price_midweek, FieldEdit::PriceMidweek);
        push(&self.status, FieldEdit::Status);
        push(&self.status_color, FieldEdit::StatusColor);
        push(
            &self.notes.as_ref().map(|n| n.replace("\\n", "\n")),
            FieldEdit::Notes,
        );
        edits
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }

        Commands::List { sort, active_only } => {
            let mut book = open_book(&config)?;
            if let Err(e) = book.load().await {
                eprintln!("Could not load venues: {}", e);
            }

            let filter = if active_only {
                VisibilityFilter::ActiveOnly
            } else {
                VisibilityFilter::All
            };
            let cards = book.list().cards(sort, filter);

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else if cards.is_empty() {
                println!("No venues yet. Add one with `venuebook add --name ...`");
            } else {
                print_table(&cards);
            }
        }

        Commands::Show { id } => {
            let mut book = open_book(&config)?;
            book.load().await.context("Could not load venues")?;
            let venue = book
                .list()
                .find(id)
                .with_context(|| format!("No venue with id {}", id))?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(venue)?);
            } else {
                print_card(&VenueCard::from(venue));
            }
        }

        Commands::Add { fields, inactive } => {
            let mut book = open_book(&config)?;
            let form = book.open_new();
            if inactive {
                form.toggle_active().await?;
            }
            fill_form(&form, &fields).await?;

            let stored = save(&mut book, &form).await?;
            println!("Added {}", stored);
        }

        Commands::Edit {
            id,
            fields,
            toggle_active,
            remove_image,
            move_left,
            move_right,
        } => {
            let mut book = open_book(&config)?;
            book.load().await.context("Could not load venues")?;
            let form = book
                .open_edit(id)
                .with_context(|| format!("No venue with id {}", id))?;

            if toggle_active {
                let active = form.toggle_active().await?;
                println!("Venue is now {}", if active { "active" } else { "hidden" });
            }

            // Highest index first so earlier removals don't shift later ones
            let mut remove_image = remove_image;
            remove_image.sort_unstable_by(|a, b| b.cmp(a));
            remove_image.dedup();
            for index in remove_image {
                if form.remove_image(index).await?.is_none() {
                    eprintln!("No image at position {}", index);
                }
            }
            for index in move_left {
                form.move_image_left(index).await?;
            }
            for index in move_right {
                form.move_image_right(index).await?;
            }

            fill_form(&form, &fields).await?;

            let stored = save(&mut book, &form).await?;
            println!("Saved {}", stored);
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("venuebook={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open_book(config: &Config) -> anyhow::Result<VenueBook> {
    let supabase = Arc::new(SupabaseClient::new(config.store.client_config())?);
    let maps = Arc::new(GoogleMapsClient::new(config.maps.client_config())?);

    if !maps.is_enabled() {
        tracing::info!("No maps API key configured; location search and drive times are off");
    }

    Ok(VenueBook::new(Services {
        store: supabase.clone(),
        storage: supabase,
        places: maps.clone(),
        directions: maps,
    }))
}

/// Apply field flags, location search and uploads to an open form
async fn fill_form(form: &VenueForm, fields: &FieldArgs) -> anyhow::Result<()> {
    for edit in fields.edits() {
        form.set_field(edit).await?;
    }
    if let Some(swatch) = fields.color {
        form.pick_color(swatch).await?;
    }

    if fields.autofill_location {
        match form.autofill_location().await {
            Ok(address) => println!("Location set to {}", address),
            // The rest of the edit still goes ahead without a location
            Err(e) => eprintln!("{}", e),
        }
    }

    if !fields.image.is_empty() {
        let files = read_files(&fields.image).await?;
        let requested = files.len();
        let added = form.upload_images(files).await?;
        if added < requested {
            eprintln!(
                "Only {} of {} images were added (limit reached)",
                added, requested
            );
        }
    }

    if let Some(path) = &fields.brochure {
        let file = read_file(path).await?;
        form.upload_brochure(file).await?;
    }

    Ok(())
}

async fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_file(path).await?);
    }
    Ok(files)
}

async fn read_file(path: &Path) -> anyhow::Result<UploadFile> {
    UploadFile::from_path(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))
}

async fn save(book: &mut VenueBook, form: &VenueForm) -> anyhow::Result<venuebook::Venue> {
    match book.save(form).await {
        Ok(stored) => Ok(stored),
        Err(FormError::MissingName) => bail!("A venue needs a name (--name)"),
        Err(e) => Err(e.into()),
    }
}

fn print_table(cards: &[VenueCard]) {
    println!(
        "{:<6} {:<28} {:<16} {:>10} {:>10} {:>10} {:<24} {:>6}",
        "ID", "NAME", "STATUS", "SAT", "SUN", "MIDWEEK", "DISTANCE", "IMAGES"
    );
    for card in cards {
        let id = card.id.map(|id| id.to_string()).unwrap_or_default();
        let name = if card.active {
            card.name.clone()
        } else {
            format!("{} (hidden)", card.name)
        };
        println!(
            "{:<6} {:<28} {:<16} {:>10} {:>10} {:>10} {:<24} {:>6}",
            id,
            truncate(&name, 28),
            truncate(card.status.as_deref().unwrap_or("-"), 16),
            truncate(&card.price_saturday, 10),
            truncate(&card.price_sunday, 10),
            truncate(&card.price_midweek, 10),
            truncate(card.distance_label.as_deref().unwrap_or("-"), 24),
            card.image_count
        );
    }
}

fn print_card(card: &VenueCard) {
    println!("{}", card.name);
    if let Some(status) = &card.status {
        println!("  Status:   {} ({})", status, card.status_color);
    }
    if let Some(distance) = &card.distance_label {
        println!("  Distance: {}", distance);
    }
    println!("  Saturday: {}", card.price_saturday);
    println!("  Sunday:   {}", card.price_sunday);
    println!("  Midweek:  {}", card.price_midweek);
    if let Some(url) = &card.website_url {
        println!("  Website:  {}", url);
    }
    if let Some(url) = &card.brochure_url {
        println!("  Brochure: {}", url);
    }
    if let Some(hero) = &card.hero_image {
        println!("  Images:   {} (hero: {})", card.image_count, hero);
    }
    if !card.active {
        println!("  Hidden");
    }
    if !card.note_lines.is_empty() {
        println!();
        for line in &card.note_lines {
            println!("  {}", line);
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
