//! TechBirds CLI: command-line client for the admin media library.
//!
//! Set TECHBIRDS_API_URL (or API_URL) and TECHBIRDS_API_TOKEN (or API_TOKEN).
//! Uses Bearer auth.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use techbirds_api_client::{ApiClient, FileUpload};
use techbirds_cli::{confirm_prompt, init_tracing, print_json, truncate_string};
use techbirds_core::{MediaId, MediaItem, MediaMetadataUpdate, Pagination, SortBy, SortOrder};
use techbirds_media::{
    DestructiveAction, DetailPanel, FilterState, ListingController, MediaLibrary, Preview,
    UploadOutcome,
};

#[derive(Parser)]
#[command(name = "techbirds", about = "TechBirds media library CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct MetadataArgs {
    /// Title shown in the library
    #[arg(long)]
    title: Option<String>,
    /// Alternative text for images
    #[arg(long)]
    alt: Option<String>,
    #[arg(long)]
    caption: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl MetadataArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.alt.is_none()
            && self.caption.is_none()
            && self.description.is_none()
    }

    /// Overwrite only the fields given on the command line.
    fn apply(self, form: &mut MediaMetadataUpdate) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(alt) = self.alt {
            form.alt_text = alt;
        }
        if let Some(caption) = self.caption {
            form.caption = caption;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List media with search, MIME filter, ordering and pagination
    List {
        #[arg(long, default_value = "1")]
        page: i64,
        /// Page size (defaults to TECHBIRDS_PAGE_SIZE)
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        /// MIME prefix, e.g. image/ or application/pdf
        #[arg(long)]
        mime: Option<String>,
        /// created or title
        #[arg(long)]
        sort_by: Option<SortBy>,
        /// asc or desc
        #[arg(long)]
        sort_order: Option<SortOrder>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show a single media item
    Show {
        id: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Upload one file
    Upload {
        /// Path to the file to upload
        path: PathBuf,
        #[command(flatten)]
        metadata: MetadataArgs,
    },
    /// Edit title, alt text, caption or description
    Edit {
        id: String,
        #[command(flatten)]
        metadata: MetadataArgs,
    },
    /// Move a media item to the trash
    Trash {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Permanently delete a media item and its file
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let client = ApiClient::from_env().context(
        "Failed to create API client. Set TECHBIRDS_API_URL and TECHBIRDS_API_TOKEN (or API_URL and API_TOKEN)",
    )?;
    let page_size = client.config().page_size;

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            page,
            limit,
            search,
            mime,
            sort_by,
            sort_order,
            format,
        } => {
            let mut filter = FilterState::new(limit.unwrap_or(page_size));
            if let Some(search) = search {
                filter.set_search(search);
            }
            if let Some(mime) = mime {
                filter.set_mime_type(mime);
            }
            if let Some(sort_by) = sort_by {
                filter.set_sort_by(sort_by);
            }
            if let Some(sort_order) = sort_order {
                filter.set_sort_order(sort_order);
            }
            filter.set_page(page);

            let mut listing = ListingController::new();
            listing.fetch(&client, filter.filter()).await;
            if let Some(error) = listing.error() {
                bail!("{}", error);
            }

            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "items": listing.items(),
                    "pagination": listing.pagination(),
                }))?,
                OutputFormat::Table => print_media_table(listing.items(), listing.pagination()),
            }
        }
        Commands::Show { id, format } => {
            let id = MediaId::from(id);
            let item = client
                .get_media(&id)
                .await
                .with_context(|| format!("Failed to load media {}", id))?;
            match format {
                OutputFormat::Json => print_json(&item)?,
                OutputFormat::Table => {
                    let preview = Preview::for_item(&item, client.urls());
                    print_media_details(&item, &preview);
                }
            }
        }
        Commands::Upload { path, metadata } => {
            let file = FileUpload::from_path(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let mut library = MediaLibrary::new(client, page_size);
            library.select_file(file);
            metadata.apply(library.upload_form_mut());

            match library.submit_upload().await? {
                UploadOutcome::Uploaded(item) => {
                    tracing::debug!(listed = library.listing().contains(&item.id), "Listing refreshed");
                    print_json(&item)?;
                }
                UploadOutcome::Failed(kind) => {
                    let message = library
                        .upload()
                        .error()
                        .map(str::to_string)
                        .unwrap_or_else(|| kind.to_string());
                    bail!("{}", message);
                }
            }
        }
        Commands::Edit { id, metadata } => {
            if metadata.is_empty() {
                bail!("Nothing to change. Pass --title, --alt, --caption or --description");
            }
            let id = MediaId::from(id);
            let item = client
                .get_media(&id)
                .await
                .with_context(|| format!("Failed to load media {}", id))?;

            let mut panel = DetailPanel::new();
            panel.select(&item)?;
            if let Some(form) = panel.form_mut() {
                metadata.apply(form);
            }
            let (id, update) = panel.begin_submit()?;
            let result = client.update_media_metadata(&id, &update).await;

            match panel.finish_submit(result) {
                Some(saved) => print_json(&saved)?,
                None => bail!("{}", panel.error().unwrap_or("Update failed")),
            }
        }
        Commands::Trash { id, yes } => {
            let action = DestructiveAction::Trash(MediaId::from(id));
            run_destructive(client, page_size, action, yes).await?;
        }
        Commands::Delete { id, yes } => {
            let action = DestructiveAction::HardDelete(MediaId::from(id));
            run_destructive(client, page_size, action, yes).await?;
        }
    }

    Ok(())
}

/// Route a destructive command through the confirmation modal.
async fn run_destructive(
    client: ApiClient,
    page_size: u32,
    action: DestructiveAction,
    yes: bool,
) -> anyhow::Result<()> {
    let mut library = MediaLibrary::new(client, page_size);
    let prompt = library.request(action).prompt();

    let confirmed = yes || confirm_prompt(&mut io::stdin().lock(), &mut io::stdout(), &prompt)?;
    if !confirmed {
        library.cancel_confirmation();
        println!("Cancelled");
        return Ok(());
    }

    let Some(report) = library.execute_confirmed().await else {
        return Ok(());
    };
    if !report.is_success() {
        bail!("{}", report.summary());
    }
    println!("{}", report.summary());
    Ok(())
}

fn print_media_table(items: &[MediaItem], pagination: &Pagination) {
    println!("\n=== Media Library ===\n");
    println!(
        "Page {} of {} ({} items total, {} per page)",
        pagination.page,
        pagination.total_pages.max(1),
        pagination.total,
        pagination.limit
    );

    if items.is_empty() {
        println!("\nNo media found.");
        return;
    }

    println!(
        "\n{:<10} {:<30} {:<24} {:>10} {:>11} {:>20}",
        "ID", "Title", "Content Type", "Size", "Dimensions", "Created At"
    );
    println!("{}", "-".repeat(110));

    for item in items {
        println!(
            "{:<10} {:<30} {:<24} {:>10} {:>11} {:>20}",
            truncate_string(item.id.as_str(), 10),
            truncate_string(item.display_name(), 30),
            truncate_string(&item.mime_type, 24),
            item.size_label(),
            item.dimensions_label().unwrap_or_default(),
            item.created_label()
        );
    }

    if pagination.has_next() {
        println!("\nMore results available. Use --page {}", pagination.page + 1);
    }
}

fn print_media_details(item: &MediaItem, preview: &Preview) {
    println!("\n=== {} ===\n", item.display_name());
    println!("ID:           {}", item.id);
    println!("File:         {}", item.original_name);
    println!("Content type: {}", item.mime_type);
    println!("Size:         {}", item.size_label());
    if let Some(dimensions) = item.dimensions_label() {
        println!("Dimensions:   {}", dimensions);
    }
    println!("Alt text:     {}", item.alt_text.as_deref().unwrap_or("-"));
    println!("Caption:      {}", item.caption.as_deref().unwrap_or("-"));
    println!("Description:  {}", item.description.as_deref().unwrap_or("-"));
    println!("Created at:   {}", item.created_label());
    if let Some(updated_at) = item.updated_at {
        println!("Updated at:   {}", updated_at.format("%Y-%m-%d %H:%M:%S"));
    }

    match preview {
        Preview::Image { src, .. } => println!("Preview:      image {}", src),
        Preview::Video { src, poster } => println!("Preview:      video {} (poster {})", src, poster),
        Preview::Audio { src } => println!("Preview:      audio {}", src),
        Preview::Pdf { src } => println!("Preview:      pdf {}", src),
        Preview::Generic { thumbnail, .. } => println!("Preview:      file {}", thumbnail),
    }
}
