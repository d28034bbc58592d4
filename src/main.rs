//! # Halftone CLI
//!
//! Command-line host for the halftone engine.
//!
//! ## Usage
//!
//! ```bash
//! # Show the parameter schema
//! halftone params
//!
//! # Halftone into the default store directory (./halftone-out)
//! halftone apply photo.jpg
//!
//! # Custom screen, written straight to a file
//! halftone apply --spacing 12 --angle 15 --output out.png photo.jpg
//!
//! # Keep the source alpha channel and print the mask as text
//! halftone apply --preserve-alpha --preview logo.png
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use halftone::{
    AlphaPolicy, HalftoneEngine, HalftoneError, HalftoneParams,
    params::PARAM_SPECS,
    render::threshold::mask_to_text,
    screen::ScreenAxes,
    store::{FileSource, FsImageStore, ImageHandle, ImageMetadata, ImageSource, ImageStore},
};

/// Halftone - rotated dot-screen halftoning
#[derive(Parser, Debug)]
#[command(name = "halftone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Halftone an image file
    Apply {
        /// Source image
        input: PathBuf,

        /// Dot spacing in pixels (0 < spacing <= 800)
        #[arg(long, default_value_t = 8.0)]
        spacing: f64,

        /// Screen angle in degrees (0 <= angle < 360)
        #[arg(long, default_value_t = 45.0)]
        angle: f64,

        /// Write the result to this file instead of the store
        #[arg(long, short, value_name = "FILE", conflicts_with = "store")]
        output: Option<PathBuf>,

        /// Store directory for results
        #[arg(long, value_name = "DIR", default_value = "halftone-out")]
        store: PathBuf,

        /// Copy the source alpha channel into RGBA output
        #[arg(long)]
        preserve_alpha: bool,

        /// Print the halftone mask as text
        #[arg(long)]
        preview: bool,

        /// Feed the column index to the screen first (mirrors the dot grid
        /// at angles other than 0 and 45)
        #[arg(long)]
        column_first: bool,
    },

    /// List the halftone parameters
    Params,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), HalftoneError> {
    match command {
        Commands::Params => {
            println!("Parameters:");
            for spec in PARAM_SPECS {
                println!("  {}", spec);
            }
        }
        Commands::Apply {
            input,
            spacing,
            angle,
            output,
            store,
            preserve_alpha,
            preview,
            column_first,
        } => {
            let params = HalftoneParams::new(spacing, angle)?;
            let alpha = if preserve_alpha {
                AlphaPolicy::Preserve
            } else {
                AlphaPolicy::Opaque
            };
            let axes = if column_first {
                ScreenAxes::ColumnFirst
            } else {
                ScreenAxes::RowFirst
            };
            let engine = HalftoneEngine::new(params).alpha(alpha).axes(axes);

            let image = FileSource.decode(&ImageHandle::new(input.to_string_lossy()))?;
            let (mask, source_mode) = engine.mask(&image)?;
            if preview {
                print!("{}", mask_to_text(&mask));
            }
            let result = engine.render(&image, &mask, source_mode)?;

            match output {
                Some(path) => {
                    result.image.save(&path)?;
                    println!(
                        "Saved {}x{} halftone to {}",
                        result.width,
                        result.height,
                        path.display()
                    );
                }
                None => {
                    let mut store = FsImageStore::open(&store)?;
                    let metadata = ImageMetadata {
                        node_id: Some("halftone".to_string()),
                        ..Default::default()
                    };
                    let stored = store.store(&result.image, &metadata)?;
                    println!("{} {} {}", stored.handle, stored.width, stored.height);
                }
            }
        }
    }

    Ok(())
}
