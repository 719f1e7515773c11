use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use image::imageops::FilterType;

use emoji_background_removal::{
    default_output_path, BackgroundRemover, ProcessOptions, ProcessResult, DEFAULT_THRESHOLD,
};

#[derive(Parser)]
#[command(
    name = "emoji-bg",
    about = "Clear the outer white background of emoji images and resize them",
    version,
    after_help = "Simple usage: emoji-bg <image>  (writes <name>_transparent.png)\n\
                  Batch usage:  emoji-bg <dir> -o <out_dir>  (writes <name>.png per image)\n\n\
                  Only white reachable from the image corners is removed; white enclosed\n\
                  by the drawing (eyes, teeth, highlights) stays opaque."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input image file or directory
    input: String,

    /// Output file or directory (default: {name}_transparent.png)
    #[arg(short, long)]
    output: Option<String>,

    /// Channel threshold: R, G and B must all exceed this to count as background
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Output size, either N (square) or WxH
    #[arg(short, long, value_parser = size_from, default_value = "100")]
    size: (u32, u32),

    /// Keep the source dimensions instead of resizing
    #[arg(long, conflicts_with = "size")]
    no_resize: bool,

    /// Resampling filter used when resizing
    #[arg(long, value_enum, default_value_t = Filter::Lanczos3)]
    filter: Filter,

    /// Only convert and resize; leave the background untouched
    #[arg(long)]
    keep_background: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parse `N` or `WxH`; both sides must be non-zero.
fn size_from(s: &str) -> Result<(u32, u32), String> {
    let parse = |v: &str| -> Result<u32, String> {
        match v.trim().parse::<u32>() {
            Ok(0) => Err("size must be greater than zero".to_string()),
            Ok(n) => Ok(n),
            Err(e) => Err(format!("invalid size {v:?}: {e}")),
        }
    };
    match s.split_once(['x', 'X']) {
        Some((w, h)) => Ok((parse(w)?, parse(h)?)),
        None => {
            let n = parse(s)?;
            Ok((n, n))
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let target_size = (!cli.no_resize).then_some(cli.size);

    let opts = ProcessOptions {
        threshold: cli.threshold,
        target_size,
        filter: cli.filter.into(),
        remove_background: !cli.keep_background,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", cli.input);
        process::exit(1);
    }

    if !opts.quiet {
        if opts.remove_background {
            eprintln!("Clearing outer background (threshold: {})", opts.threshold);
        } else {
            eprintln!("Keeping background, resize only");
        }
        match opts.target_size {
            Some((w, h)) => eprintln!("Output size: {w}x{h}"),
            None => eprintln!("Output size: unchanged"),
        }
        eprintln!();
    }

    let remover = BackgroundRemover::new(opts);

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &cli.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: emoji-bg <input_dir> -o <output_dir>");
            process::exit(1);
        };
        remover.process_directory(input_path, &output_dir)
    } else {
        let output_path = match &cli.output {
            Some(o) => PathBuf::from(o),
            None => default_output_path(input_path),
        };
        vec![remover.process_file(input_path, &output_path)]
    };

    let opts = remover.options();
    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, opts);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, opts: &ProcessOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = display_name(&result.path);

    if result.success {
        eprintln!(
            "[OK] {filename} -> {} ({})",
            display_name(&result.output),
            result.message
        );
        if opts.verbose {
            let (w, h) = result.dimensions;
            eprintln!("  -> source {w}x{h}, {} px cleared", result.removed);
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
