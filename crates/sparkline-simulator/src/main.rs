//! Desktop simulator for the sparkline chart.
//!
//! Builds the chart scene from a config file (or the built-in 320×240
//! layout), feeds it uniformly random samples across the chart's value
//! range and renders into an `embedded-graphics-simulator` display.
//!
//! Every frame follows the same refresh discipline a real panel needs:
//! append a batch of samples, recompute the polyline once, redraw the dirty
//! region off-screen, then push only the changed pixels to the display.
//!
//! Without the `window` feature the simulator runs a fixed number of frames
//! and writes the final frame to a PNG. With it, frames go to an SDL2 window
//! until Q/Escape is pressed or the window is closed.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sparkline_core::ui::Drawable;
use sparkline_core::{Config, FrameBuffer, SparklineChart, ValueRange};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Frames rendered in headless mode when `--frames` is not given.
const DEFAULT_HEADLESS_FRAMES: u64 = 200;

#[derive(Parser, Debug)]
#[command(version, about = "Scrolling sparkline chart simulator")]
struct Args {
    /// TOML file with [display] and [chart] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to render (headless default: 200; window: until closed)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Samples appended per frame before the polyline is recomputed
    #[arg(long, default_value_t = 1)]
    batch: u32,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 10)]
    interval_ms: u64,

    /// Seed for the sample generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of retained samples
    #[arg(long)]
    max_items: Option<usize>,

    /// Override the value drawn at the bottom edge
    #[arg(long, allow_hyphen_values = true)]
    y_min: Option<f32>,

    /// Override the value drawn at the top edge
    #[arg(long, allow_hyphen_values = true)]
    y_max: Option<f32>,

    /// Where to write the last frame in headless mode
    #[arg(short, long, default_value = "sparkline.png")]
    output: PathBuf,

    /// Pixel scale factor for the PNG / window
    #[arg(long, default_value_t = 2)]
    scale: u32,
}

/// Read the config file if one was given and apply CLI overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config.as_deref() {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };

    if let Some(max_items) = args.max_items {
        config.chart.max_items = max_items;
    }
    if let Some(y_min) = args.y_min {
        config.chart.y_min = y_min;
    }
    if let Some(y_max) = args.y_max {
        config.chart.y_max = y_max;
    }

    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ---------------------------------------------------------------------------
// Sample generation
// ---------------------------------------------------------------------------

/// Uniform random samples spanning the chart's value range.
struct RandomSamples {
    rng: StdRng,
    low: f32,
    high: f32,
}

impl RandomSamples {
    fn new(range: &ValueRange, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            low: range.y_min(),
            high: range.y_max(),
        }
    }

    fn next_sample(&mut self) -> f32 {
        self.rng.random_range(self.low..self.high)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Append one batch of samples and recompute the polyline once.
fn feed(chart: &mut SparklineChart, samples: &mut RandomSamples, batch: u32) {
    for _ in 0..batch {
        chart.add_value(samples.next_sample());
    }
    let points = chart.update();
    trace!("Polyline has {} points", points.len());
}

/// Redraw the chart's dirty region into the framebuffer.
///
/// Returns the redrawn region, or `None` if nothing was dirty.
fn render(
    chart: &mut SparklineChart,
    framebuffer: &mut FrameBuffer,
    background: Rgb565,
) -> Option<Rectangle> {
    let region = chart.dirty_region()?;

    // FrameBuffer drawing is infallible
    let _ = framebuffer.fill_solid(&region.bounds, background);
    let _ = chart.draw(framebuffer);
    chart.mark_clean();

    Some(region.bounds)
}

/// Push the framebuffer's changed pixels to the simulated panel.
fn present(framebuffer: &mut FrameBuffer, display: &mut SimulatorDisplay<Rgb565>) {
    if let Ok(Some(area)) = framebuffer.flush(display) {
        trace!(
            "Presented {}x{} at ({}, {})",
            area.size.width, area.size.height, area.top_left.x, area.top_left.y
        );
    }
}

struct Simulation {
    chart: SparklineChart,
    samples: RandomSamples,
    framebuffer: FrameBuffer,
    display: SimulatorDisplay<Rgb565>,
    background: Rgb565,
    batch: u32,
}

impl Simulation {
    fn new(config: &Config, args: &Args) -> Result<Self> {
        let chart = SparklineChart::new(&config.chart)
            .map_err(|e| anyhow!("invalid chart config: {e}"))?;
        let range = config
            .chart
            .range()
            .map_err(|e| anyhow!("invalid chart config: {e}"))?;

        let seed = args.seed.unwrap_or_else(rand::random);
        info!("Sample seed: {}", seed);

        let background = config.chart.background();
        let mut display = SimulatorDisplay::<Rgb565>::new(config.display.size());
        let _ = display.clear(background);
        let mut framebuffer = FrameBuffer::new(config.display.size());
        let _ = framebuffer.clear(background);

        // Both start out identical; nothing to flush yet
        present(&mut framebuffer, &mut display);

        Ok(Self {
            chart,
            samples: RandomSamples::new(&range, seed),
            framebuffer,
            display,
            background,
            batch: args.batch.max(1),
        })
    }

    /// Advance one frame: new samples, off-screen redraw, present.
    fn step(&mut self) {
        feed(&mut self.chart, &mut self.samples, self.batch);

        if let Some(region) = render(&mut self.chart, &mut self.framebuffer, self.background) {
            debug!(
                "Redrew {}x{} region at ({}, {})",
                region.size.width, region.size.height, region.top_left.x, region.top_left.y
            );
        }

        present(&mut self.framebuffer, &mut self.display);
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

fn output_settings(scale: u32) -> OutputSettings {
    OutputSettingsBuilder::new().scale(scale.max(1)).build()
}

#[cfg(not(feature = "window"))]
fn run(mut sim: Simulation, args: &Args, frame_duration: Duration) -> Result<()> {
    let frames = args.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
    info!("Rendering {} frames headless", frames);

    for _ in 0..frames {
        let frame_start = Instant::now();
        sim.step();

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }

    sim.display
        .to_rgb_output_image(&output_settings(args.scale))
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("Last frame written to {}", args.output.display());

    Ok(())
}

#[cfg(feature = "window")]
fn run(mut sim: Simulation, args: &Args, frame_duration: Duration) -> Result<()> {
    use embedded_graphics_simulator::{SimulatorEvent, Window, sdl2::Keycode};

    info!("Keys: Q/Esc=Quit");
    let mut window = Window::new("Sparkline Simulator", &output_settings(args.scale));

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(&sim.display);

    let mut frame: u64 = 0;
    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                _ => {}
            }
        }

        if args.frames.is_some_and(|limit| frame >= limit) {
            break;
        }

        sim.step();
        window.update(&sim.display);
        frame += 1;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    info!("Starting sparkline simulator");
    info!(
        "Display: {}×{}, chart {}×{} at ({}, {}), {} samples in {}..{}",
        config.display.width,
        config.display.height,
        config.chart.width,
        config.chart.height,
        config.chart.x,
        config.chart.y,
        config.chart.max_items,
        config.chart.y_min,
        config.chart.y_max
    );

    let sim = Simulation::new(&config, &args)?;
    run(sim, &args, Duration::from_millis(args.interval_ms))?;

    info!("Simulator exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["sparkline-simulator"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_cli_overrides_apply_on_top_of_defaults() {
        let args = args(&["--max-items", "64", "--y-min", "-5", "--y-max", "5"]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.chart.max_items, 64);
        assert_eq!(config.chart.y_min, -5.0);
        assert_eq!(config.chart.y_max, 5.0);
        assert_eq!(config.chart.width, 270);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = args(&["--config", "/nonexistent/sparkline.toml"]);
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn test_random_samples_stay_in_range() {
        let range = ValueRange::new(0.0, 10.0).unwrap();
        let mut samples = RandomSamples::new(&range, 7);
        for _ in 0..1000 {
            let v = samples.next_sample();
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn test_seeded_samples_are_reproducible() {
        let range = ValueRange::new(-1.0, 1.0).unwrap();
        let mut a = RandomSamples::new(&range, 42);
        let mut b = RandomSamples::new(&range, 42);
        for _ in 0..16 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn test_step_presents_chart_and_settles() {
        let config = Config::default();
        let args = args(&["--seed", "1", "--batch", "3"]);
        let mut sim = Simulation::new(&config, &args).unwrap();

        sim.step();
        assert_eq!(sim.chart.sparkline().buffer().len(), 3);
        assert!(!sim.chart.is_dirty());
        assert_eq!(sim.framebuffer.dirty_area(), None);

        let line = config.chart.line_color();
        assert_eq!(sim.display.get_pixel(Point::new(40, 30)), line);
    }

    #[test]
    fn test_invalid_chart_config_fails_fast() {
        let mut config = Config::default();
        config.chart.max_items = 0;
        let args = args(&[]);

        let err = Simulation::new(&config, &args).err().unwrap();
        assert!(err.to_string().contains("Invalid capacity"));
    }
}
