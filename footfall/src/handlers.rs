use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use footfall_core::compose::OutputFormat;
use footfall_core::data::DatasetStats;
use footfall_core::settings::CONFIG_FILE_NAME;
use footfall_core::{BaseLayer, ClickPayload, ComposedView, Dataset, Session, Settings};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_CONFIG_DIR: &str = "~/.config/footfall/";

// Helper functions shared by the handlers

/// Resolve settings from an explicit config file, the user config, or defaults,
/// then apply any dataset paths given on the command line.
pub fn resolve_settings(
    config: Option<&PathBuf>,
    pois: Option<&PathBuf>,
    visits: Option<&PathBuf>,
) -> Result<Settings> {
    let settings = match config {
        Some(path) => Settings::load(path)?,
        None => {
            let user_config = default_config_path();
            if user_config.exists() {
                debug!("Using config file {}", user_config.display());
                Settings::load(&user_config)?
            } else {
                Settings::default()
            }
        }
    };

    Ok(settings.with_overrides(pois.map(PathBuf::as_path), visits.map(PathBuf::as_path)))
}

pub fn default_config_path() -> PathBuf {
    expand_path(DEFAULT_CONFIG_DIR).join(CONFIG_FILE_NAME)
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Write the default configuration into `dir`, refusing to overwrite unless `force`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    let contents = Settings::default().to_toml_string()?;
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    Ok(path)
}

/// Load both datasets behind a spinner. Failure here is fatal for the caller.
pub fn load_dataset(settings: &Settings, show_progress: bool) -> Result<Dataset> {
    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Invalid spinner template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!(
            "Loading {} and {}...",
            settings.data.pois.display(),
            settings.data.visits.display()
        ));
        Some(pb)
    } else {
        None
    };

    let result = Dataset::load(&settings.data).with_context(|| {
        format!(
            "Failed to load datasets ({}, {})",
            settings.data.pois.display(),
            settings.data.visits.display()
        )
    });

    if let Some(pb) = spinner {
        match &result {
            Ok(dataset) => pb.finish_with_message(format!(
                "Loaded {} POIs and {} origin records",
                dataset.pois().len(),
                dataset.index().total_records()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    result
}

/// Feed click events from `input` through `session`, one line at a time.
///
/// Blank lines are skipped and `quit` or `exit` stops the loop. Returns the
/// number of events handled.
pub fn run_event_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
    json: bool,
) -> Result<usize> {
    let mut handled = 0;

    for line in input.lines() {
        let line = line.context("Failed to read click event")?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }
        let Some(payload) = ClickPayload::parse_line(trimmed) else {
            continue;
        };

        let view = session.handle(&payload);
        handled += 1;

        writeln!(output, "{}", view.summary)?;
        if json {
            writeln!(output, "{}", serde_json::to_string(&view.payload)?)?;
        }
    }

    info!("Handled {} click events", handled);
    Ok(handled)
}

#[derive(Serialize)]
struct RenderDocument<'a> {
    base_layer: &'a BaseLayer,
    view: &'a ComposedView,
}

/// Render one composed view in the requested format.
pub fn format_view(view: &ComposedView, base_layer: &BaseLayer, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let document = RenderDocument { base_layer, view };
            Ok(serde_json::to_string_pretty(&document)?)
        }
        OutputFormat::Text => {
            let mut text = String::new();
            text.push_str(&format!("{}\n", view.summary));

            let opacities: Vec<String> = view
                .payload
                .poi_opacity
                .iter()
                .map(|o| format!("{:.1}", o))
                .collect();
            text.push_str(&format!("\nPOI opacity: [{}]\n", opacities.join(", ")));

            text.push_str(&format!("County markers: {}\n", view.payload.overlay.len()));
            for marker in &view.payload.overlay {
                text.push_str(&format!(
                    "  ({:.4}, {:.4}) size {:.2}  {}\n",
                    marker.lat,
                    marker.lon,
                    marker.size,
                    marker.label.replace('\n', " | ")
                ));
            }
            Ok(text)
        }
    }
}

pub fn format_stats(stats: &DatasetStats) -> String {
    let mut text = String::new();
    text.push_str(&format!("POIs loaded:            {}\n", stats.poi_count));
    text.push_str(&format!("POIs with origin data:  {}\n", stats.indexed_pois));
    text.push_str(&format!("Origin records:         {}\n", stats.record_count));
    text.push_str(&format!("POIs without data:      {}\n", stats.pois_without_data));
    text.push_str(&format!("Orphan placekeys:       {}\n", stats.orphan_ids.len()));
    for id in &stats.orphan_ids {
        text.push_str(&format!("  - {}\n", id));
    }
    text
}

fn settings_from_args(args: &ArgMatches) -> Result<Settings> {
    resolve_settings(
        args.get_one::<PathBuf>("config"),
        args.get_one::<PathBuf>("pois"),
        args.get_one::<PathBuf>("visits"),
    )
}

pub fn print_banner() {
    println!(
        "{} {}",
        "footfall".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!("{}", "visitor origins for points of interest".bright_black());
    println!();
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_lowercase())
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    print_divider();
    println!("{}", "  FOOTFALL INITIALIZATION".bright_white().bold());
    print_divider();
    println!();

    let dir = args
        .get_one::<String>("PATH")
        .map(|p| expand_path(p))
        .unwrap_or_else(|| expand_path(DEFAULT_CONFIG_DIR));
    let mut force = args.get_flag("force");
    let config_path = dir.join(CONFIG_FILE_NAME);

    println!(
        "{} Target: {}",
        "→".blue(),
        config_path.display().to_string().bright_white()
    );
    println!();

    if config_path.exists() && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!(
            "  {} {}",
            "•".yellow(),
            config_path.display().to_string().bright_white()
        );
        println!("{}", "This operation will overwrite the existing file.".yellow());

        let response = print_prompt("Do you want to continue? [y/N]:")?;
        println!();

        if response != "y" && response != "yes" {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
        force = true;
    }

    let written = write_default_config(&dir, force)?;
    println!("{} Configuration written to {}", "✓".green().bold(), written.display());
    Ok(())
}

pub fn handle_explore(args: &ArgMatches, quiet: bool) -> Result<()> {
    let settings = settings_from_args(args)?;
    let json = args.get_flag("json");
    let dataset = load_dataset(&settings, !quiet)?;
    let mut session = Session::new(dataset).with_style(settings.style);

    if !quiet {
        println!("{}", session.current_view().summary.bright_black());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_event_loop(&mut session, stdin.lock(), &mut out, json)?;
    Ok(())
}

pub fn handle_render(args: &ArgMatches, quiet: bool) -> Result<()> {
    let settings = settings_from_args(args)?;
    let format = args
        .get_one::<String>("format")
        .and_then(|f| OutputFormat::from_str(f))
        .unwrap_or(OutputFormat::Text);

    let dataset = load_dataset(&settings, !quiet)?;
    let mut session = Session::new(dataset).with_style(settings.style);

    let view = match args.get_one::<String>("poi") {
        Some(poi) => {
            let payload = match args.get_one::<u64>("raw-count") {
                Some(raw) => ClickPayload::with_raw_count(poi, *raw),
                None => ClickPayload::from(poi.as_str()),
            };
            session.handle(&payload)
        }
        None => session.current_view(),
    };

    let rendered = format_view(&view, &session.base_layer(), &format)?;

    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                println!("{} View written to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

pub fn handle_stats(args: &ArgMatches, quiet: bool) -> Result<()> {
    let settings = settings_from_args(args)?;
    let dataset = load_dataset(&settings, !quiet)?;
    print!("{}", format_stats(&dataset.stats()));
    Ok(())
}
