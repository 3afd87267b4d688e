use clap::Parser;
use glyph_widths::{AdvanceMode, DEFAULT_FONT, DEFAULT_SIZE, WidthExtractor};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glyph-widths")]
#[command(
    about = "Print the advance width of each printable ASCII character as JSON",
    long_about = None
)]
struct Args {
    /// Font file, or a file name to look up in the system font directories
    #[arg(value_name = "FONT", default_value = DEFAULT_FONT)]
    font: PathBuf,

    /// Point size in pixels per em
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: f32,

    /// Face index inside a font collection
    #[arg(short, long, default_value_t = 0)]
    index: u32,

    /// Round each width to whole pixels
    #[arg(long)]
    round: bool,

    /// Log font loading details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let advance_mode = if args.round {
        AdvanceMode::Rounded
    } else {
        AdvanceMode::Precise
    };

    let extractor = WidthExtractor::builder()
        .size(args.size)
        .face_index(args.index)
        .advance_mode(advance_mode)
        .build();

    // Measure everything before printing so a failure leaves stdout empty
    let widths = match extractor.from_path(&args.font) {
        Ok(widths) => widths,
        Err(e) => {
            eprintln!("Error measuring {:?}: {}", args.font, e);
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    if let Err(e) = widths.write_json(stdout.lock()) {
        eprintln!("Error writing widths: {}", e);
        std::process::exit(1);
    }
}
