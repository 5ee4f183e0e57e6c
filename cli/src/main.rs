//! rtlpdf CLI - translate PDFs into right-to-left PDFs

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use rtlpdf::detect::has_pdf_extension;
use rtlpdf::font::{DEFAULT_FONT_FILE, DEFAULT_FONT_NAME};
use rtlpdf::translate::DEFAULT_CHUNK_SIZE;
use rtlpdf::{
    output_file_name, ArabicDocumentRenderer, FontRegistry, FontSource, GoogleTranslator,
    LayoutOptions, Metadata, PageSelection, ParseOptions, PdfTextExtractor, TranslateOptions,
    TranslationPipeline,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "rtlpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Translate PDF documents into right-to-left PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Font and layout flags shared by commands that produce a PDF.
#[derive(clap::Args)]
struct FontArgs {
    /// TrueType font to embed (falls back to Helvetica if missing)
    #[arg(long, value_name = "PATH", env = "RTLPDF_FONT", default_value = DEFAULT_FONT_FILE)]
    font: PathBuf,

    /// Font size in points
    #[arg(long, default_value = "12")]
    font_size: f32,

    /// Wrap lines wider than the page
    #[arg(long)]
    wrap: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a PDF and render the result right-to-left
    Translate {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file (defaults to <name>_<target>.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        font: FontArgs,

        /// Source language code
        #[arg(long, default_value = "en")]
        source: String,

        /// Target language code
        #[arg(long, default_value = "ar")]
        target: String,

        /// Maximum characters per translation request
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Translate each page separately
        #[arg(long)]
        per_page: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Translation request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Render already translated text into a PDF
    Render {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "TEXT_FILE")]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        #[command(flatten)]
        font: FontArgs,

        /// Also write the computed line placements as JSON
        #[arg(long, value_name = "FILE")]
        layout_json: Option<PathBuf>,
    },

    /// Extract the text of a PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Translate {
            input,
            output,
            font,
            source,
            target,
            chunk_size,
            per_page,
            pages,
            timeout,
        } => {
            let options = TranslateOptions::new()
                .with_source(source)
                .with_target(target)
                .with_chunk_size(chunk_size);
            let options = if per_page { options.per_page() } else { options };
            cmd_translate(
                &input,
                output.as_deref(),
                &font,
                options,
                pages.as_deref(),
                Duration::from_secs(timeout),
            )
        }
        Commands::Render {
            input,
            output,
            font,
            layout_json,
        } => cmd_render(&input, &output, &font, layout_json.as_deref()),
        Commands::Extract {
            input,
            output,
            pages,
        } => cmd_extract(&input, output.as_deref(), pages.as_deref()),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Register the configured font and build layout options that use it.
fn load_fonts(args: &FontArgs) -> (Arc<FontRegistry>, LayoutOptions) {
    let (fonts, font_name) = FontSource::new(&args.font, DEFAULT_FONT_NAME).resolve();
    if font_name != DEFAULT_FONT_NAME {
        eprintln!(
            "{} font {} unavailable, using {}",
            "Warning:".yellow(),
            args.font.display(),
            font_name
        );
    }
    let layout = LayoutOptions::new()
        .with_font(font_name)
        .with_font_size(args.font_size)
        .with_wrap(args.wrap);
    (Arc::new(fonts), layout)
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, rtlpdf::Error> {
    pages.map_or(Ok(PageSelection::All), PageSelection::parse)
}

fn cmd_translate(
    input: &Path,
    output: Option<&Path>,
    font: &FontArgs,
    options: TranslateOptions,
    pages: Option<&str>,
    timeout: Duration,
) -> CliResult {
    let name = input.to_string_lossy();
    if !has_pdf_extension(&name) {
        return Err(format!("{} is not a .pdf file", input.display()).into());
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let file_name = output_file_name(&name, &options.target_lang);
            input.with_file_name(file_name)
        }
    };

    let (fonts, layout) = load_fonts(font);
    let translator = GoogleTranslator::with_config(GoogleTranslator::DEFAULT_URL, timeout)?;
    let pipeline = TranslationPipeline::new(Arc::new(translator), fonts)
        .with_parse_options(ParseOptions::new().lenient().with_pages(parse_pages(pages)?))
        .with_translate_options(options)
        .with_layout(layout)
        .with_metadata(Metadata::titled(output.to_string_lossy().into_owned()).created_now());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Translating...");

    let data = fs::read(input)?;
    log::debug!("Read {} bytes from {}", data.len(), input.display());
    let pdf = pipeline.translate_pdf_bytes_with_progress(&data, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("Done!");

    fs::write(&output, &pdf)?;
    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn cmd_render(
    input: &Path,
    output: &Path,
    font: &FontArgs,
    layout_json: Option<&Path>,
) -> CliResult {
    let text = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(input)?
    };

    let (fonts, layout) = load_fonts(font);
    let renderer = ArabicDocumentRenderer::new(fonts).with_options(layout);

    let document = renderer.layout(&text)?;
    if let Some(path) = layout_json {
        fs::write(path, serde_json::to_string_pretty(&document)?)?;
        println!("{} {}", "Layout saved to".green(), path.display());
    }

    let pdf = renderer.write(&document)?;
    fs::write(output, &pdf)?;
    println!(
        "{} {} ({} lines, {} pages)",
        "Saved to".green(),
        output.display(),
        document.line_count(),
        document.page_count()
    );
    Ok(())
}

fn cmd_extract(input: &Path, output: Option<&Path>, pages: Option<&str>) -> CliResult {
    let options = ParseOptions::new().lenient().with_pages(parse_pages(pages)?);
    let text = PdfTextExtractor::open_with_options(input, options)?.extract_text()?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    let format = rtlpdf::detect_format_from_path(input)?;
    let extractor = PdfTextExtractor::open(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Pages".bold(), extractor.page_count());

    match extractor.extract_text() {
        Ok(text) => println!("{}: {}", "Characters".bold(), text.chars().count()),
        Err(e) => println!("{}: {}", "Text".bold(), e.to_string().yellow()),
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "rtlpdf".cyan().bold(), rtlpdf::version());
    println!("Translate PDF documents into right-to-left PDFs");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/rtlpdf".dimmed());
}
