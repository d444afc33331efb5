//! Command-line interface for glyphlab.
//!
//! This module handles CLI argument parsing and the subcommands that run
//! against an [`AppContext`].

use crate::app::AppContext;
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use glyphlab_config::{Color, LogLevel};
use glyphlab_fonts::{LANGUAGES, LanguageChoice, SCRIPTS, ScriptChoice, TextDirection, VariationAxis};
use glyphlab_render::{RenderMode, RenderStats, Shaping};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// glyphlab - font rendering and text layout test bench
#[derive(Parser, Debug)]
#[command(name = "glyphlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Font directory to scan (remembered for later runs)
    #[arg(long, global = true, value_name = "DIR")]
    pub font_dir: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render text to a PNG image
    Render(RenderArgs),

    /// List the fonts in the font directory
    List,

    /// Show names, metrics and variation axes of a font
    Info {
        /// Font file name or stem in the font directory, or a path
        font: String,

        /// Pixel size used for the reported metrics
        #[arg(short, long, default_value_t = 64)]
        size: u32,
    },

    /// List the script and language presets accepted by `render`
    Scripts,
}

/// Image written by `render` when no `--output` is given.
pub const DEFAULT_OUTPUT: &str = "glyphlab.png";

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Font file name, stem or index (see `glyphlab list`) in the font
    /// directory, or a path (default: first font in the directory)
    #[arg(short, long)]
    pub font: Option<String>,

    /// Text to render (default: sample text)
    #[arg(short, long, conflicts_with = "text_file")]
    pub text: Option<String>,

    /// Read the text to render from a UTF-8 file
    #[arg(long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// Pixel size (1-128)
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Writing direction for shaped text
    #[arg(short, long, value_enum, default_value_t = DirectionArg::Ltr)]
    pub direction: DirectionArg,

    /// Map characters to glyphs without shaping
    #[arg(long)]
    pub no_shape: bool,

    /// Script name or ISO 15924 tag (see `glyphlab scripts`)
    #[arg(long)]
    pub script: Option<String>,

    /// Language name or BCP 47 code (see `glyphlab scripts`)
    #[arg(long)]
    pub language: Option<String>,

    /// Variation axis value such as `wght=700` (repeatable)
    #[arg(long = "axis", value_name = "AXIS=VALUE", value_parser = parse_axis)]
    pub axes: Vec<(VariationAxis, f32)>,

    /// Draw the debug overlay
    #[arg(long)]
    pub debug: bool,

    /// Hide glyph bounding boxes in the overlay
    #[arg(long)]
    pub no_glyph_bound: bool,

    /// Hide baselines in the overlay
    #[arg(long)]
    pub no_baseline: bool,

    /// Hide caret marks in the overlay
    #[arg(long)]
    pub no_caret: bool,

    /// Hide ascent bands in the overlay
    #[arg(long)]
    pub no_ascend_band: bool,

    /// Hide descent bands in the overlay
    #[arg(long)]
    pub no_descend_band: bool,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Text color as #RRGGBB or #RRGGBBAA
    #[arg(long)]
    pub foreground: Option<Color>,

    /// Background color as #RRGGBB or #RRGGBBAA
    #[arg(long)]
    pub background: Option<Color>,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Lay out without writing an image and print draw statistics
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            font: None,
            text: None,
            text_file: None,
            size: None,
            direction: DirectionArg::Ltr,
            no_shape: false,
            script: None,
            language: None,
            axes: Vec::new(),
            debug: false,
            no_glyph_bound: false,
            no_baseline: false,
            no_caret: false,
            no_ascend_band: false,
            no_descend_band: false,
            width: None,
            height: None,
            foreground: None,
            background: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            dry_run: false,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectionArg {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left
    Rtl,
    /// Top to bottom
    Ttb,
}

impl From<DirectionArg> for TextDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Ltr => TextDirection::LeftToRight,
            DirectionArg::Rtl => TextDirection::RightToLeft,
            DirectionArg::Ttb => TextDirection::TopToBottom,
        }
    }
}

/// Parse `tag=value`, e.g. `wght=700` or `weight=700`.
pub fn parse_axis(s: &str) -> Result<(VariationAxis, f32), String> {
    let (axis, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected AXIS=VALUE, got '{s}'"))?;
    let axis: VariationAxis = axis.trim().parse()?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value for {axis}: '{}'", value.trim()))?;
    Ok((axis, value))
}

/// Runtime options passed from CLI to the application
#[derive(Debug, Default)]
pub struct RuntimeOptions {
    pub command: Option<Commands>,
    pub font_dir: Option<PathBuf>,
    /// Takes precedence over the environment and the settings file
    pub log_level: Option<LogLevel>,
    pub config: Option<PathBuf>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments. Subcommands that need no settings or fonts run
/// here and exit.
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Scripts) => {
            print_presets();
            CliResult::Exit(0)
        }
        command => CliResult::Continue(RuntimeOptions {
            command,
            font_dir: cli.font_dir,
            log_level: cli.log_level,
            config: cli.config,
        }),
    }
}

fn print_presets() {
    println!("Scripts:");
    for script in SCRIPTS {
        println!("  {:<10} {}", script.tag, script.name);
    }
    println!();
    println!("Languages:");
    for language in LANGUAGES.iter().filter(|l| !l.code.is_empty()) {
        println!("  {:<10} {}", language.code, language.name);
    }
}

/// Run a subcommand; `None` renders with defaults.
pub fn run_command(app: &mut AppContext, command: Option<Commands>) -> anyhow::Result<()> {
    match command {
        None => render(app, RenderArgs::default()),
        Some(Commands::Render(args)) => render(app, args),
        Some(Commands::List) => {
            list_fonts(app);
            Ok(())
        }
        Some(Commands::Info { font, size }) => info(app, &font, size),
        Some(Commands::Scripts) => {
            print_presets();
            Ok(())
        }
    }
}

fn list_fonts(app: &AppContext) {
    let catalog = app.catalog();
    println!("{} ({} fonts)", catalog.dir().display(), catalog.len());
    for (index, entry) in catalog.entries().iter().enumerate() {
        let family = entry.family.as_deref().unwrap_or("(unreadable)");
        println!("  {:>3}  {:<40} {}", index, entry.file_name(), family);
    }
}

fn info(app: &mut AppContext, font: &str, size: u32) -> anyhow::Result<()> {
    app.set_font_size(size);
    app.open_font(font)?;

    let instance = app.font();
    let metrics = instance.metrics();
    if let Some(path) = app.font_path() {
        println!("File:       {}", path.display());
    }
    println!("Family:     {}", instance.family_name());
    println!("Style:      {}", instance.sub_family_name());
    println!("Size:       {}px", app.options.font_size);
    println!("Ascent:     {:.1}", metrics.ascent);
    println!("Descent:    {:.1}", metrics.descent);
    println!("Line gap:   {:.1}", metrics.line_gap);
    println!("Line height:{:>5.1}", metrics.line_height);

    if instance.is_variable() {
        println!("Axes:");
        for descriptor in instance.axes() {
            let name = descriptor
                .axis()
                .map(|a| a.label().to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {} {:<12} {} .. {} (default {})",
                descriptor.tag_str(),
                name,
                descriptor.info.min,
                descriptor.info.max,
                descriptor.info.default_value
            );
        }
    } else {
        println!("Axes:       none");
    }
    Ok(())
}

fn render(app: &mut AppContext, args: RenderArgs) -> anyhow::Result<()> {
    apply_render_args(app, &args);

    match &args.font {
        Some(font) => app.open_font(font)?,
        None => app.open_first_font()?,
    }
    if !args.axes.is_empty() && !app.font().is_variable() {
        log::warn!("--axis ignored: {} is not a variable font", app.font().family_name());
    }

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| {
            crate::error::AppError::TextFile {
                path: path.clone(),
                source,
            }
        })?,
        (None, None) => glyphlab_config::defaults::sample_text(),
    };

    if args.dry_run {
        let (backend, stats) = app.render_recorded(&text);
        print_stats(app, &stats);
        println!("Draw calls: {}", backend.commands().len());
        return Ok(());
    }

    let stats = app
        .render_to_png(&text, &args.output)
        .with_context(|| format!("failed to render {}", args.output.display()))?;
    print_stats(app, &stats);
    println!("Wrote {}", args.output.display());
    Ok(())
}

/// Copy render flags into the app's options.
pub fn apply_render_args(app: &mut AppContext, args: &RenderArgs) {
    if let Some(size) = args.size {
        app.set_font_size(size);
    }
    if args.width.is_some() || args.height.is_some() {
        let current = app.options.surface;
        app.set_surface_size(
            args.width.unwrap_or(current.width),
            args.height.unwrap_or(current.height),
        );
    }

    let options = &mut app.options;
    options.mode = RenderMode {
        shaping: if args.no_shape {
            Shaping::NoShape
        } else {
            Shaping::Shaped
        },
        direction: args.direction.into(),
    };
    options.script = match &args.script {
        Some(s) => Some(
            ScriptChoice::find(s)
                .map(|c| c.tag.to_string())
                .unwrap_or_else(|| s.clone()),
        ),
        None => None,
    };
    options.language = match &args.language {
        Some(l) => Some(
            LanguageChoice::find(l)
                .map(|c| c.code.to_string())
                .unwrap_or_else(|| l.clone()),
        ),
        None => None,
    };
    if args.debug {
        options.overlay.enabled = true;
    }
    options.overlay.show_glyph_bound &= !args.no_glyph_bound;
    options.overlay.show_baseline &= !args.no_baseline;
    options.overlay.show_caret &= !args.no_caret;
    options.overlay.show_ascend_band &= !args.no_ascend_band;
    options.overlay.show_descend_band &= !args.no_descend_band;
    if let Some(color) = args.foreground {
        options.foreground = color;
    }
    if let Some(color) = args.background {
        options.background = color;
    }

    let values: BTreeMap<VariationAxis, f32> = args.axes.iter().copied().collect();
    app.set_axis_values(values);
}

fn print_stats(app: &AppContext, stats: &RenderStats) {
    println!(
        "{} {} at {}px, {}: {} lines, {} glyphs, {} drawn, {} rasterized",
        app.font().family_name(),
        app.font().sub_family_name(),
        app.options.font_size,
        app.options.mode.label(),
        stats.lines,
        stats.glyphs,
        stats.draws,
        stats.rasterized
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axis() {
        assert_eq!(parse_axis("wght=700"), Ok((VariationAxis::Weight, 700.0)));
        assert_eq!(parse_axis("Width = 75.5"), Ok((VariationAxis::Width, 75.5)));
        assert!(parse_axis("wght").is_err());
        assert!(parse_axis("wght=heavy").is_err());
        assert!(parse_axis("GRAD=1").is_err());
    }

    #[test]
    fn test_render_args_parse() {
        let cli = Cli::try_parse_from([
            "glyphlab",
            "render",
            "--text",
            "hi",
            "--direction",
            "rtl",
            "--axis",
            "wght=300",
            "--axis",
            "wdth=80",
            "--foreground",
            "#FF0000",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        let Some(Commands::Render(args)) = cli.command else {
            panic!("expected render subcommand");
        };
        assert_eq!(args.text.as_deref(), Some("hi"));
        assert_eq!(args.direction, DirectionArg::Rtl);
        assert_eq!(args.axes.len(), 2);
        assert_eq!(args.foreground, Some(Color::new(0xFF, 0, 0, 0xFF)));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(RenderArgs::default().output, args.output);
    }

    #[test]
    fn test_text_and_text_file_conflict() {
        let result = Cli::try_parse_from([
            "glyphlab",
            "render",
            "--text",
            "a",
            "--text-file",
            "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_direction_conversion() {
        assert_eq!(TextDirection::from(DirectionArg::Ttb), TextDirection::TopToBottom);
    }
}
