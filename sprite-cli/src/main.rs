use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use rayon::prelude::*;
use serde::Serialize;
use sprite_analyzer::debug::{draw_polygon, DEFAULT_OVERLAY_COLOR};
use sprite_analyzer::threading::ThreadPool;
use sprite_analyzer::{analyze_image, AnalyzeOptions, ImageAnalysis, ImageData, MAX_QUALITY};
use sprite_imageio::{read_image, write_image, RgbaImage};

mod report;

use report::{BatchReport, FileReport, ImageReport};

struct Args {
    /// Image to analyze.
    input: Option<String>,

    /// Glob pattern matching images to analyze.
    files: Option<String>,

    /// Number of threads used to analyze images.
    threads: usize,

    /// Effort spent searching for enclosing polygons.
    quality: u32,

    /// Include polygon areas and per-image bounds in the output.
    analyze: bool,

    /// Debug image path in single-file mode, or suffix appended to each
    /// input path in batch mode.
    debug: Option<String>,

    /// Shapes beyond this count are merged.
    max_shapes: u8,

    /// Pretty-print the JSON output.
    pretty: bool,

    /// Enable debug logging.
    verbose: bool,
}

fn parse_args() -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;

    let mut input = None;
    let mut files = None;
    let mut threads = num_cpus::get();
    let mut quality = 0;
    let mut analyze = false;
    let mut debug = None;
    let mut max_shapes = u8::MAX;
    let mut pretty = false;
    let mut verbose = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('i') | Long("input") => input = Some(parser.value()?.string()?),
            Short('f') | Long("files") => files = Some(parser.value()?.string()?),
            Short('t') | Long("threads") => threads = parser.value()?.parse()?,
            Short('o') | Long("optimize") => quality = parser.value()?.parse()?,
            Short('a') | Long("analyze") => analyze = true,
            Short('d') | Long("debug") => debug = Some(parser.value()?.string()?),
            Short('m') | Long("max-shapes") => max_shapes = parser.value()?.parse()?,
            Short('p') | Long("pretty") => pretty = true,
            Short('v') | Long("verbose") => verbose = true,
            Short('h') | Long("help") => {
                println!(
                    "Find shapes in sprites and compute enclosing polygons.

Usage: {bin_name} [OPTIONS] (-i <image> | -f <pattern>)

Options:
  -i, --input <path>       Analyze a single image
  -f, --files <pattern>    Analyze all images matching a glob pattern
  -t, --threads <n>        Number of threads to use [default: {threads}]
  -o, --optimize <level>   Polygon search effort, 0-{max_quality} [default: 0]
  -a, --analyze            Include polygon areas and overall bounds
  -d, --debug <path>       Write a debug image. In batch mode this is a suffix
                           appended to each input path.
  -m, --max-shapes <n>     Merge shapes beyond this count, 1-255 [default: 255]
  -p, --pretty             Pretty-print JSON output
  -v, --verbose            Enable verbose logging
  -h, --help               Print help

Set RUST_LOG to control log output. Set SPRITE_TIMING=1 to log timings.
",
                    bin_name = parser.bin_name().unwrap_or("sprite-analyzer"),
                    threads = threads,
                    max_quality = MAX_QUALITY,
                );
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    if threads == 0 {
        return Err("thread count must be at least 1".into());
    }

    Ok(Args {
        input,
        files,
        threads,
        quality,
        analyze,
        debug,
        max_shapes,
        pretty,
        verbose,
    })
}

/// Log to stderr, so that stdout only contains the JSON report.
fn setup_logging(verbose: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = if verbose {
        Logger::try_with_str("debug")?
    } else {
        Logger::try_with_env_or_str("warn")?
    };
    logger.log_to_stderr().start()
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Draw the enclosing polygons of `analysis` over `image` and save it.
fn write_debug_image(
    path: &Path,
    mut image: ImageData,
    analysis: &ImageAnalysis,
) -> Result<(), Box<dyn Error>> {
    for vertices in analysis.polygons() {
        draw_polygon(&mut image, vertices, DEFAULT_OVERLAY_COLOR);
    }
    let image = RgbaImage {
        width: image.width(),
        height: image.height(),
        data: image.into_data(),
    };
    write_image(path, &image)?;
    log::debug!("wrote debug image {}", path.display());
    Ok(())
}

fn load_image(path: &Path) -> Result<ImageData, Box<dyn Error>> {
    let rgba = read_image(path)?;
    let image = ImageData::from_rgba(rgba.width, rgba.height, rgba.data)?;
    Ok(image)
}

/// Analyze a single image and return its report.
fn analyze_single(
    input: &str,
    args: &Args,
    options: &AnalyzeOptions,
) -> Result<ImageReport, Box<dyn Error>> {
    let path = Path::new(input);
    let image = load_image(path)?;
    let analysis = analyze_image(&image, options)?;
    log::debug!("found {} shapes in {}", analysis.shapes.len(), input);

    let report = ImageReport::new(&analysis, options.extended);

    if let Some(debug_path) = &args.debug {
        write_debug_image(Path::new(debug_path), image, &analysis)?;
    }

    Ok(report)
}

/// Analyze one file of a batch. Errors are recorded in the report.
fn analyze_file(path: &Path, args: &Args, options: &AnalyzeOptions) -> FileReport {
    let path_str = path.display().to_string();

    let image = match load_image(path) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("skipping {}: {}", path_str, err);
            return FileReport::from_error(path_str, err.to_string());
        }
    };

    let analysis = match analyze_image(&image, options) {
        Ok(analysis) => analysis,
        Err(err) => return FileReport::from_error(path_str, err.to_string()),
    };
    log::debug!("found {} shapes in {}", analysis.shapes.len(), path_str);

    let report = FileReport::from_analysis(path_str, &analysis, options.extended);

    if let Some(suffix) = &args.debug {
        let mut debug_path = path.as_os_str().to_owned();
        debug_path.push(suffix);
        let debug_path = PathBuf::from(debug_path);
        if let Err(err) = write_debug_image(&debug_path, image, &analysis) {
            log::warn!(
                "failed to write debug image {}: {}",
                debug_path.display(),
                err
            );
        }
    }

    report
}

/// Analyze all files matching `pattern`, in parallel.
fn analyze_batch(
    pattern: &str,
    args: &Args,
    options: &AnalyzeOptions,
    pool: &ThreadPool,
) -> Result<BatchReport, Box<dyn Error>> {
    let paths: Vec<PathBuf> = glob::glob(pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("skipping unreadable path: {}", err);
                None
            }
        })
        .collect();
    log::debug!("matched {} files with {}", paths.len(), pattern);

    let files: Vec<FileReport> = pool.run(|| {
        paths
            .par_iter()
            .map(|path| analyze_file(path, args, options))
            .collect()
    });

    Ok(BatchReport { files })
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let _logger = setup_logging(args.verbose)?;

    let pool = Arc::new(ThreadPool::with_num_threads(args.threads));
    let options = AnalyzeOptions {
        quality: args.quality,
        max_shapes: args.max_shapes,
        extended: args.analyze,
        thread_pool: Some(pool.clone()),
    };
    options.validate()?;

    let json = if let Some(pattern) = &args.files {
        let report = analyze_batch(pattern, &args, &options, &pool)?;
        to_json(&report, args.pretty)?
    } else if let Some(input) = &args.input {
        let report = analyze_single(input, &args, &options)?;
        to_json(&report, args.pretty)?
    } else {
        return Err("no input specified. Use `-i <image>` or `-f <pattern>`".into());
    };

    println!("{}", json);

    Ok(())
}
