mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use codex_impose::{
    BookletOptions, ImpositionOptions, ImpositionStatistics, NUpOptions, OverlayOptions,
    VirtualDocument,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codex", about = "Book imposition planner", version)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Saddle-stitched booklet: sheets folded once through the spine
    Booklet {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Booklet page size (a sheet holds two pages)
        #[arg(long, default_value = "a5", value_enum)]
        paper: PaperArg,

        /// Spine position
        #[arg(long, default_value = "vertical", value_enum)]
        binding: BindingArg,

        /// Print versos head-to-head (turned 180°)
        #[arg(long)]
        verso_opposite: bool,

        /// Content pages to use (default: all source pages)
        #[arg(long)]
        page_count: Option<usize>,

        /// Number of blank leaves at front
        #[arg(long, default_value = "0")]
        front_flyleaves: usize,

        /// Number of blank leaves at back
        #[arg(long, default_value = "0")]
        back_flyleaves: usize,

        /// Add a fold mark along the spine
        #[arg(long)]
        fold_marks: bool,

        /// Scaling mode
        #[arg(long, default_value = "fit", value_enum)]
        scaling: ScalingArg,
    },

    /// Several pages per side on a grid
    Nup {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Output sheet size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Output orientation
        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,

        /// Rows per side
        #[arg(long, default_value = "2")]
        rows: usize,

        /// Columns per side
        #[arg(long, default_value = "2")]
        columns: usize,

        /// Output sides (default: as many as the sources need)
        #[arg(long)]
        page_count: Option<usize>,

        /// Fill columns before rows
        #[arg(long)]
        column_major: bool,

        /// Fill cells right to left
        #[arg(long)]
        right_to_left: bool,

        /// Turn every page a quarter turn in its cell
        #[arg(long)]
        rotated: bool,

        /// Add cut marks between cells
        #[arg(long)]
        cut_marks: bool,

        /// Scaling mode
        #[arg(long, default_value = "fit", value_enum)]
        scaling: ScalingArg,
    },

    /// Merge documents page by page, one layer per document
    Overlay {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Output page size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Output orientation
        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,

        /// Layers per page (default: one per source)
        #[arg(long)]
        layers: Option<usize>,

        /// Output pages (default: length of the longest source)
        #[arg(long)]
        page_count: Option<usize>,

        /// Scaling mode
        #[arg(long, default_value = "fit", value_enum)]
        scaling: ScalingArg,
    },

    /// Impose with options read from a JSON file
    Run {
        /// Options file written by --save-options
        options: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Input PDF file(s) - can specify multiple
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Use a synthetic source of this many pages instead of PDFs (repeatable)
    #[arg(long, conflicts_with = "input")]
    pages: Vec<usize>,

    /// Page size of synthetic sources
    #[arg(long, default_value = "a5", value_enum)]
    source_paper: PaperArg,
}

#[derive(Args)]
struct OutputArgs {
    /// Write the imposition plan (JSON) here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show statistics only, don't impose
    #[arg(long)]
    stats_only: bool,

    /// Write the effective options (JSON) here
    #[arg(long)]
    save_options: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BindingArg {
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalingArg {
    Fit,
    Fill,
    None,
    Stretch,
}

impl From<BindingArg> for codex_impose::Binding {
    fn from(arg: BindingArg) -> Self {
        match arg {
            BindingArg::Vertical => Self::Vertical,
            BindingArg::Horizontal => Self::Horizontal,
        }
    }
}

impl From<PaperArg> for codex_impose::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<ScalingArg> for codex_impose::ScalingMode {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Fit => Self::Fit,
            ScalingArg::Fill => Self::Fill,
            ScalingArg::None => Self::None,
            ScalingArg::Stretch => Self::Stretch,
        }
    }
}

fn paper_dimensions(
    paper: PaperArg,
    orientation: OrientationArg,
) -> Result<codex_impose::geometry::Dimensions> {
    let paper = codex_impose::PaperSize::from(paper);
    let dimensions = match orientation {
        OrientationArg::Portrait => paper.dimensions()?,
        OrientationArg::Landscape => paper.landscape()?,
    };
    Ok(dimensions)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose).init()?;

    let (options, source, output) = match cli.command {
        Commands::Booklet {
            source,
            output,
            paper,
            binding,
            verso_opposite,
            page_count,
            front_flyleaves,
            back_flyleaves,
            fold_marks,
            scaling,
        } => {
            let page = paper_dimensions(paper, OrientationArg::Portrait)?;
            let options = BookletOptions {
                page_width: page.width(),
                page_height: page.height(),
                page_count: page_count.unwrap_or(0),
                binding: binding.into(),
                verso_opposite,
                front_flyleaves,
                back_flyleaves,
                fold_marks,
                scaling: scaling.into(),
            };
            (ImpositionOptions::Booklet(options), source, output)
        }

        Commands::Nup {
            source,
            output,
            paper,
            orientation,
            rows,
            columns,
            page_count,
            column_major,
            right_to_left,
            rotated,
            cut_marks,
            scaling,
        } => {
            let sheet = paper_dimensions(paper, orientation)?;
            let options = NUpOptions {
                sheet_width: sheet.width(),
                sheet_height: sheet.height(),
                rows,
                columns,
                page_count,
                order: if column_major {
                    codex_impose::model::GridOrder::ColumnMajor
                } else {
                    codex_impose::model::GridOrder::RowMajor
                },
                direction: if right_to_left {
                    codex_impose::model::ReadingDirection::RightToLeft
                } else {
                    codex_impose::model::ReadingDirection::LeftToRight
                },
                rotated,
                scaling: scaling.into(),
                cut_marks,
            };
            (ImpositionOptions::NUp(options), source, output)
        }

        Commands::Overlay {
            source,
            output,
            paper,
            orientation,
            layers,
            page_count,
            scaling,
        } => {
            let page = paper_dimensions(paper, orientation)?;
            let options = OverlayOptions {
                width: page.width(),
                height: page.height(),
                layers: layers.unwrap_or(0),
                page_count,
                scaling: scaling.into(),
            };
            (ImpositionOptions::Overlay(options), source, output)
        }

        Commands::Run {
            options,
            source,
            output,
        } => {
            let loaded = ImpositionOptions::load(&options)
                .await
                .with_context(|| format!("Failed to load options from {}", options.display()))?;
            (loaded, source, output)
        }
    };

    run(options, source, output).await
}

async fn run(options: ImpositionOptions, source: SourceArgs, output: OutputArgs) -> Result<()> {
    options.validate()?;

    if let Some(path) = &output.save_options {
        options.save(path).await?;
        println!("Options → {}", path.display());
    }

    let sources = load_sources(&source).await?;
    let page_counts: Vec<usize> = sources.iter().map(VirtualDocument::len).collect();

    // Calculate and show statistics
    let stats = codex_impose::calculate_statistics(&options, &page_counts)?;
    print_statistics(&stats);

    if output.stats_only {
        return Ok(());
    }

    // Perform imposition
    let (imposition, diagnostics) = codex_impose::impose_task(options, sources).await?;
    if diagnostics.has_warnings() {
        println!("  Warnings: {}", diagnostics.warnings().len());
    }

    match &output.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&imposition)?;
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Imposed → {}", path.display());
        }
        None => println!(
            "Imposed {} output pages (use --output to write the plan)",
            imposition.document.len()
        ),
    }

    Ok(())
}

async fn load_sources(args: &SourceArgs) -> Result<Vec<VirtualDocument>> {
    if !args.input.is_empty() {
        // Load all input PDFs
        let documents = codex_impose::load_multiple_pdfs(&args.input).await?;
        return Ok(codex_impose::import_pdfs(&documents)?);
    }

    if args.pages.is_empty() {
        bail!("No source given: pass --input <PDF>... or --pages <N>");
    }

    let dimensions = paper_dimensions(args.source_paper, OrientationArg::Portrait)?;
    Ok(args
        .pages
        .iter()
        .enumerate()
        .map(|(index, &count)| VirtualDocument::from_source(index, count, dimensions))
        .collect())
}

fn print_statistics(stats: &ImpositionStatistics) {
    println!("Imposition Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Blank pages added: {}", stats.blank_pages_added);
    if let Some(sigs) = stats.signatures {
        println!("  Signatures: {}", sigs);
    }
}
