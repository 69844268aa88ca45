//! Family Tree CLI
//!
//! Usage:
//!   family-tree [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   -d, --debug              Log computed node positions
//!       --width <PX>         Screen width
//!       --height <PX>        Screen height
//!       --zoom <FACTOR>      Zoom about the screen centre before drawing
//!       --tap <X,Y>          Print the node hit by a tap instead of SVG
//!       --long-press <X,Y>   Print the node hit by a long-press instead of SVG
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use family_tree::layout::Point;
use family_tree::view::{InputOutcome, PointerEvent, PointerId};
use family_tree::{RenderConfig, Stylesheet, SvgConfig, TreeDocument};

#[derive(Parser)]
#[command(name = "family-tree")]
#[command(about = "Lay out and render a family tree document as SVG")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Debug mode: log computed node positions
    #[arg(short, long)]
    debug: bool,

    /// Screen width in pixels
    #[arg(long, default_value_t = 1080.0)]
    width: f64,

    /// Screen height in pixels
    #[arg(long, default_value_t = 1920.0)]
    height: f64,

    /// Zoom factor applied about the screen centre (clamped)
    #[arg(long)]
    zoom: Option<f64>,

    /// Simulate a tap at a screen point and print the hit node id
    #[arg(long, value_name = "X,Y", value_parser = parse_point, conflicts_with = "long_press")]
    tap: Option<Point>,

    /// Simulate a long-press at a screen point and print the hit node id
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    long_press: Option<Point>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Point::new(x, y))
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let doc = match TreeDocument::from_json(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    let config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_svg(SvgConfig::default().with_size(cli.width, cli.height))
        .with_debug(cli.debug);

    let mut view = config.build_view();
    view.load(&doc);
    if cli.debug {
        view.layout().log_positions();
    }
    if let Some(factor) = cli.zoom {
        view.zoom_by(factor);
    }

    let long_press_ms = view.input_config().long_press_ms;
    let gesture = cli
        .tap
        .map(|p| (p, 0))
        .or_else(|| cli.long_press.map(|p| (p, long_press_ms)));
    if let Some((position, held_ms)) = gesture {
        let pointer = PointerId(0);
        view.handle_pointer(PointerEvent::Down {
            pointer,
            position,
            time_ms: 0,
        });
        match view.handle_pointer(PointerEvent::Up {
            pointer,
            position,
            time_ms: held_ms,
        }) {
            InputOutcome::Tap(id) | InputOutcome::LongPress(id) => println!("{}", id),
            _ => {}
        }
        return;
    }

    println!("{}", view.render_svg(&config.svg));
}

fn print_intro() {
    println!(
        r#"Family Tree - generation-banded family tree renderer

USAGE:
    family-tree [OPTIONS] [FILE]
    cat tree.json | family-tree

OPTIONS:
    -s, --stylesheet   Custom color palette (TOML file)
    -d, --debug        Log computed node positions
    --width, --height  Screen size in pixels (default 1080 x 1920)
    --zoom             Zoom about the screen centre
    --tap X,Y          Print the id of the node under a tap
    --long-press X,Y   Print the id of the node under a long-press
    -h, --help         Print help

QUICK START:
    echo '{{"root": {{"id": "1", "name": "Ada"}}}}' | family-tree > tree.svg"#
    );
}
