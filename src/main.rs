use clap::{Parser, Subcommand};
use fitsbridge::bindings::NativeCore;
use fitsbridge::{PixelFormat, Preview};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Explicit path to the native core library. Defaults to the
    /// pointer-width-matching build name on the platform search path.
    #[arg(long, global = true)]
    core_lib: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display dimensions and header metadata of a FITS file
    Info {
        /// Input FITS file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Render a FITS file's display raster to a PNG
    Render {
        /// Input FITS file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut preview = match &cli.core_lib {
        Some(path) => Preview::new(Arc::new(NativeCore::load_from(path)?)),
        None => Preview::load_native(None)?,
    };

    match cli.command {
        Commands::Info { input } => info_command(&mut preview, input)?,
        Commands::Render { input, output } => render_command(&mut preview, input, output)?,
    }

    preview.close();
    Ok(())
}

fn info_command(preview: &mut Preview, input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    preview.open(&input)?;

    let native = preview.native_dimension()?;
    let output = preview.output_dimension()?;

    println!("File: {}", preview.title()?);
    println!(
        "Decoded: {}x{}, {} channel(s), {}-bit",
        native.width, native.height, native.channels, native.bit_depth
    );
    println!(
        "Display: {}x{}, {} channel(s)",
        output.width, output.height, output.channels
    );

    match preview.header() {
        Ok(header) if header.is_empty() => println!("No header metadata"),
        Ok(header) => {
            println!("Header ({} entries):", header.len());
            for (key, value) in header.iter() {
                println!("  {key} = {value}");
            }
        }
        Err(err) => println!("Warning: header unreadable: {err}"),
    }

    Ok(())
}

fn render_command(
    preview: &mut Preview,
    input: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    preview.open(&input)?;

    let view = preview.view_model()?;
    let desc = view.raster.descriptor;
    let width = desc.width.max(0) as u32;
    let height = desc.height.max(0) as u32;

    let img = match desc.format {
        PixelFormat::Gray8 => image::GrayImage::from_raw(width, height, view.raster.pixels)
            .map(image::DynamicImage::ImageLuma8),
        PixelFormat::Rgb24 => image::RgbImage::from_raw(width, height, view.raster.pixels)
            .map(image::DynamicImage::ImageRgb8),
    }
    .ok_or("raster buffer did not match its descriptor")?;

    img.save_with_format(&output, image::ImageFormat::Png)?;

    println!(
        "Rendered {}x{} {:?} to {}",
        width,
        height,
        desc.format,
        output.display()
    );
    if !view.header.is_empty() {
        println!("{} header entries", view.header.len());
    }

    Ok(())
}
