//! Command-line front end for the gallery API.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use image_gallery::client::{
    GalleryEvent, GalleryPhase, GalleryState, ImageApi, SelectedFile, UploadPhase, UploadWidget,
};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(author, version, about = "Upload, list and manage images on a gallery server")]
struct Cli {
    /// API root, e.g. http://localhost:5000/api
    #[arg(long, env = "GALLERY_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Health,

    /// List stored images
    List,

    /// Upload JPEG/PNG files
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Download an image
    Get {
        /// Image id
        id: String,

        /// File to write the image to
        output: PathBuf,
    },

    /// Delete an image
    Delete {
        /// Image id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let api = match ImageApi::new(cli.api_url.unwrap_or_default()) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("error: {e} (use --api-url or GALLERY_API_URL)");
            std::process::exit(2);
        }
    };

    if let Err(message) = run(&api, cli.command).await {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run(api: &ImageApi, command: Commands) -> Result<(), String> {
    match command {
        Commands::Health => {
            let report = api.health_check().await.map_err(|e| e.to_string())?;
            println!("{}: {}", report.status, report.message);
        }
        Commands::List => {
            let mut gallery = GalleryState::new();
            gallery.fetch(api).await;
            print_gallery(api, &gallery)?;
        }
        Commands::Upload { files } => {
            let mut gallery = GalleryState::new();
            gallery.fetch(api).await;

            let mut widget = UploadWidget::default();
            let mut failures = 0;
            for path in &files {
                let shown = path.display();
                widget.select(Some(read_file(path)?));
                if let Some(error) = widget.error() {
                    eprintln!("{shown}: {error}");
                    failures += 1;
                    continue;
                }

                let uploaded = widget
                    .upload_observed(api, |w| {
                        if let UploadPhase::Uploading { progress } = w.phase() {
                            eprint!("\r{shown}: {progress:>3}%");
                            let _ = std::io::stderr().flush();
                        }
                    })
                    .await;
                eprintln!();

                match uploaded {
                    Some(image) => {
                        println!(
                            "Image \"{}\" uploaded successfully! ({})",
                            image.filename, image.id
                        );
                        gallery.apply(GalleryEvent::ItemAdded(image));
                    }
                    None => {
                        eprintln!("{shown}: {}", widget.error().unwrap_or("upload failed"));
                        widget.clear();
                        failures += 1;
                    }
                }
            }

            print_gallery(api, &gallery)?;
            if failures > 0 {
                return Err(format!("{failures} of {} uploads failed", files.len()));
            }
        }
        Commands::Get { id, output } => {
            let id = parse_id(&id)?;
            let bytes = api.get_image(&id).await.map_err(|e| e.to_string())?;
            std::fs::write(&output, &bytes).map_err(|e| format!("{}: {e}", output.display()))?;
            println!("Saved {} bytes to {}", bytes.len(), output.display());
        }
        Commands::Delete { id } => {
            let id = parse_id(&id)?;
            let message = api.delete_image(&id).await.map_err(|e| e.to_string())?;
            println!("{message}");
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<SelectedFile, String> {
    let content = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path).first_or_octet_stream().essence_str().to_string();

    Ok(SelectedFile { name, mime_type, content })
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    // The server treats malformed ids as unknown ones
    Uuid::parse_str(raw).map_err(|_| "Image not found".to_string())
}

fn print_gallery(api: &ImageApi, gallery: &GalleryState) -> Result<(), String> {
    if let GalleryPhase::LoadError(error) = gallery.phase() {
        return Err(error.clone());
    }

    if gallery.images().is_empty() {
        println!("No images uploaded yet.");
        return Ok(());
    }

    println!("{}", gallery.summary());
    for image in gallery.images() {
        println!(
            "{}  {:<10}  {}  {}  {}",
            image.id,
            image.mime_type,
            image.uploaded_at.format("%Y-%m-%d %H:%M:%S"),
            image.filename,
            api.image_url(&image.id)
        );
    }
    Ok(())
}
