use std::fs;
use std::path::PathBuf;

use candle_chart::api::{CandleChart, LayoutConfig};
use candle_chart::core::Viewport;
use candle_chart::render::{Palette, SvgRenderer};
use candle_chart::source::JsonFileSource;
use candle_chart::telemetry;

const USAGE: &str = "\
Usage: render_chart --input <data.json> [options]

Options:
  --output <path>          output file (default: chart.svg)
  --width <px>             container width (default: 800)
  --height <px>            container height (default: 400)
  --min-spacing <px>       minimum gap between axis ticks
  --width-scale <ratio>    candle body width as a fraction of its column
  --config <layout.json>   load layout settings from JSON
  --labels                 reserve axis gutters and draw tick labels
  --no-tooltips            skip tooltip layout
  --format svg|png         output format (png needs `cairo-backend`)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
}

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    viewport: Viewport,
    config: LayoutConfig,
    format: OutputFormat,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let mut source = JsonFileSource::new(&args.input);

    match args.format {
        OutputFormat::Svg => {
            let renderer = SvgRenderer::new(Palette::default()).map_err(|err| err.to_string())?;
            let mut chart = CandleChart::new(renderer, args.config).map_err(|err| err.to_string())?;
            chart.load_from(&mut source).map_err(|err| err.to_string())?;
            chart.draw(args.viewport).map_err(|err| err.to_string())?;
            fs::write(&args.output, chart.renderer().document()).map_err(|err| {
                format!("failed to write `{}`: {err}", args.output.display())
            })?;
        }
        OutputFormat::Png => render_png(&args, &mut source)?,
    }

    println!("wrote {}", args.output.display());
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn render_png(args: &CliArgs, source: &mut JsonFileSource) -> Result<(), String> {
    use candle_chart::render::CairoRenderer;

    let width = i32::try_from(args.viewport.width).map_err(|err| err.to_string())?;
    let height = i32::try_from(args.viewport.height).map_err(|err| err.to_string())?;
    let renderer = CairoRenderer::new(width.max(1), height.max(1), Palette::default())
        .map_err(|err| err.to_string())?;
    let mut chart = CandleChart::new(renderer, args.config).map_err(|err| err.to_string())?;
    chart.load_from(source).map_err(|err| err.to_string())?;
    chart.draw(args.viewport).map_err(|err| err.to_string())?;
    chart
        .renderer()
        .write_png(&args.output)
        .map_err(|err| err.to_string())
}

#[cfg(not(feature = "cairo-backend"))]
fn render_png(_args: &CliArgs, _source: &mut JsonFileSource) -> Result<(), String> {
    Err("png output requires the `cairo-backend` feature".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut output = PathBuf::from("chart.svg");
    let mut width = 800_u32;
    let mut height = 400_u32;
    let mut config = LayoutConfig::default();
    let mut format = OutputFormat::Svg;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("missing value for {name}"));
        match arg.as_str() {
            "--input" => input = Some(PathBuf::from(value("--input")?)),
            "--output" => output = PathBuf::from(value("--output")?),
            "--width" => width = parse_number(&value("--width")?, "--width")?,
            "--height" => height = parse_number(&value("--height")?, "--height")?,
            "--min-spacing" => {
                let spacing = parse_number(&value("--min-spacing")?, "--min-spacing")?;
                config = config.with_min_spacing(spacing);
            }
            "--width-scale" => {
                let scale = parse_number(&value("--width-scale")?, "--width-scale")?;
                config = config.with_width_scale(scale);
            }
            "--config" => {
                let path = value("--config")?;
                let raw = fs::read_to_string(&path)
                    .map_err(|err| format!("failed to read `{path}`: {err}"))?;
                config = LayoutConfig::from_json_str(&raw).map_err(|err| err.to_string())?;
            }
            "--labels" => config = config.with_axis_labels(),
            "--no-tooltips" => config = config.with_tooltips(false),
            "--format" => {
                format = match value("--format")?.as_str() {
                    "svg" => OutputFormat::Svg,
                    "png" => OutputFormat::Png,
                    other => return Err(format!("unknown format `{other}`")),
                };
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => return Err(format!("unknown argument `{arg}`")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| "missing required --input <data.json>".to_owned())?,
        output,
        viewport: Viewport::new(width, height),
        config,
        format,
    })
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|err| format!("invalid value `{raw}` for {name}: {err}"))
}
