use clap::{Parser, Subcommand};
use qr_corners::decode::{RenderOptions, SymbolDecoder, ZxingClient, ZxingConfig};
use qr_corners::detector::transform::sample_modules;
use qr_corners::tools::{
    binary_stats, format_grid, is_image_path, load_module_image, load_pixels, parse_grid,
};
use qr_corners::utils::binarization::binarize;
use qr_corners::{BitMatrix, CornerLocator, CornerPoints, LocatorConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR finder corner tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate finder corners and the alignment point in a rectified image
    Locate {
        #[arg(long)]
        image: PathBuf,
    },
    /// Locate corners, then sample the module grid and print it as text
    Sample {
        #[arg(long)]
        image: PathBuf,
        /// Symbol side in modules (21 for version 1)
        #[arg(long, default_value_t = 21)]
        modules: usize,
    },
    /// Submit a module grid to the online decoder
    Decode {
        /// Rectified image to locate and sample first
        #[arg(long, conflicts_with = "grid", required_unless_present = "grid")]
        image: Option<PathBuf>,
        /// Module grid to submit as is: a text grid (`#` dark, `.` light) or a
        /// black-and-white image with one pixel per module
        #[arg(long)]
        grid: Option<PathBuf>,
        #[arg(long, default_value_t = 21)]
        modules: usize,
        #[arg(long, default_value = qr_corners::decode::zxing::DEFAULT_ENDPOINT)]
        endpoint: String,
        /// Request timeout; waits indefinitely when omitted
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long, default_value_t = 1)]
        module_px: u32,
        #[arg(long, default_value_t = 0)]
        quiet_zone: u32,
    },
}

fn init_logging() {
    // QR_DEBUG turns on debug output unless RUST_LOG says otherwise
    let default = if std::env::var("QR_DEBUG").is_ok() {
        "debug"
    } else {
        "info"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .try_init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Locate { image } => locate_cmd(&image),
        Command::Sample { image, modules } => sample_cmd(&image, modules),
        Command::Decode {
            image,
            grid,
            modules,
            endpoint,
            timeout_secs,
            module_px,
            quiet_zone,
        } => {
            let config = ZxingConfig {
                endpoint,
                timeout: timeout_secs.map(Duration::from_secs),
                render: RenderOptions {
                    module_px,
                    quiet_zone,
                },
            };
            decode_cmd(image.as_deref(), grid.as_deref(), modules, config)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{}", msg);
            ExitCode::FAILURE
        }
    }
}

fn locate_in(image: &Path) -> Result<(BitMatrix, CornerPoints), String> {
    let pixels = load_pixels(image)
        .map_err(|err| format!("Failed to load image {}: {}", image.display(), err))?;
    let binary = binarize(&pixels);

    let locator = CornerLocator::new(LocatorConfig::from_env());
    let start = Instant::now();
    let (result, tel) = locator.locate_with_telemetry(&binary);
    let elapsed = start.elapsed();

    let stats = binary_stats(&binary);
    println!(
        "Image: {} ({}x{}, {} channel(s))",
        image.display(),
        pixels.width(),
        pixels.height(),
        pixels.channels()
    );
    println!(
        "Binary: black_pixels={} total={} black_ratio={:.2}%",
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );
    println!(
        "Stages: candidates={} verified={} centers={} ({:.2} ms)",
        tel.candidates,
        tel.verified,
        tel.deduplicated,
        elapsed.as_secs_f64() * 1000.0
    );

    let corners = result.map_err(|err| format!("Location failed: {}", err))?;
    Ok((binary, corners))
}

fn print_corners(corners: &CornerPoints) {
    let labels = ["top_left", "top_right", "bottom_left", "alignment"];
    for (label, p) in labels.iter().zip(corners.to_array()) {
        println!("  {:<12} ({}, {})", label, p.x, p.y);
    }
}

fn locate_cmd(image: &Path) -> Result<(), String> {
    let (_, corners) = locate_in(image)?;
    print_corners(&corners);
    Ok(())
}

fn sample_cmd(image: &Path, modules: usize) -> Result<(), String> {
    let (binary, corners) = locate_in(image)?;
    print_corners(&corners);
    let grid = sample_modules(&binary, &corners, modules).map_err(|err| err.to_string())?;
    print!("{}", format_grid(&grid));
    Ok(())
}

fn decode_cmd(
    image: Option<&Path>,
    grid: Option<&Path>,
    modules: usize,
    config: ZxingConfig,
) -> Result<(), String> {
    let grid = match (image, grid) {
        (_, Some(path)) if is_image_path(path) => load_module_image(path)
            .map_err(|err| format!("Invalid grid image {}: {}", path.display(), err))?,
        (_, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .map_err(|err| format!("Failed to read grid {}: {}", path.display(), err))?;
            parse_grid(&text).ok_or_else(|| format!("Malformed grid file {}", path.display()))?
        }
        (Some(image), None) => {
            let (binary, corners) = locate_in(image)?;
            print_corners(&corners);
            sample_modules(&binary, &corners, modules).map_err(|err| err.to_string())?
        }
        (None, None) => return Err("either --image or --grid is required".to_string()),
    };

    let client = ZxingClient::new(config).map_err(|err| err.to_string())?;
    let text = client.decode(&grid).map_err(|err| format!("Decode failed: {}", err))?;
    println!("Parsed Result: {}", text);
    Ok(())
}
