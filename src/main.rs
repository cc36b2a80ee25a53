use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use census_dashboard::chart::{features_chart, nodes_chart};
use census_dashboard::{
    events, load, load_and_render, source, ui, App, Census, CensusSource, EchartsTheme,
    HtmlDashboard, Settings, Summary, DEFAULT_LAYOUT,
};

#[derive(Parser, Debug)]
#[command(name = "census-dashboard")]
#[command(about = "Dashboard for peer-to-peer network census snapshots")]
struct Args {
    /// Config file (defaults to census-dashboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "census_dashboard=debug"
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the static HTML dashboard
    Render {
        /// Census location: path, http(s) URL, or "-" for stdin
        #[arg(short, long)]
        source: Option<String>,

        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTML layout to fill instead of the built-in one
        #[arg(long)]
        layout: Option<PathBuf>,
    },

    /// Browse the census in the terminal
    View {
        /// Census location: path, http(s) URL, or "-" for stdin
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Export the summary and chart options to a JSON file
    Export {
        /// Census location: path, http(s) URL, or "-" for stdin
        #[arg(short, long)]
        source: Option<String>,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut settings =
        Settings::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Command::Render {
            source,
            output,
            layout,
        } => {
            if let Some(source) = source {
                settings.source = source;
            }
            if let Some(output) = output {
                settings.output = output;
            }
            if layout.is_some() {
                settings.layout = layout;
            }
            render_page(&settings)
        }
        Command::View { source } => {
            if let Some(source) = source {
                settings.source = source;
            }
            run_view(&settings)
        }
        Command::Export { source, output } => {
            if let Some(source) = source {
                settings.source = source;
            }
            export_to_file(&settings, &output)
        }
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_theme(settings: &Settings) -> Result<EchartsTheme> {
    match &settings.theme {
        Some(path) => EchartsTheme::from_file(path),
        None => Ok(EchartsTheme::default()),
    }
}

/// Write the HTML dashboard.
fn render_page(settings: &Settings) -> Result<()> {
    let layout = match &settings.layout {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout {}", path.display()))?,
        None => DEFAULT_LAYOUT.to_string(),
    };
    let theme = load_theme(settings)?;
    let source = source::open(&settings.source);

    let rt = tokio::runtime::Runtime::new()?;
    let census = rt.block_on(write_page(
        &*source,
        &settings.echarts_url,
        &layout,
        &theme,
        &settings.output,
    ))?;

    info!(
        output = %settings.output.display(),
        snapshots = census.len(),
        "dashboard written"
    );
    Ok(())
}

/// Load the census into `layout` and write the page to `output`.
///
/// The page is written even when loading fails, with the error in its
/// status slot; the load error is returned afterwards.
async fn write_page(
    source: &dyn CensusSource,
    echarts_url: &str,
    layout: &str,
    theme: &EchartsTheme,
    output: &Path,
) -> Result<Census> {
    let mut page = HtmlDashboard::new(echarts_url);
    let (text, charts) = page.targets();
    let loaded = load_and_render(source, text, charts).await;

    let html = page.render_document(layout, theme)?;
    tokio::fs::write(output, html)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    loaded.with_context(|| format!("Wrote {} with an error status", output.display()))
}

/// Load the census into the terminal view and run it.
fn run_view(settings: &Settings) -> Result<()> {
    let source = source::open(&settings.source);
    let mut app = App::new(source.description(), ui::Theme::auto_detect());

    // A failed load is shown in the header
    let rt = tokio::runtime::Runtime::new()?;
    let _ = rt.block_on(load_and_render(&*source, &mut app.page, &mut app.charts));

    run_tui(&mut app)
}

/// Run the TUI until the user quits
fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(app.theme.value));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::draw(frame, app);
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(250))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Export the latest summary and both themed chart options to a JSON file
fn export_to_file(settings: &Settings, export_path: &Path) -> Result<()> {
    let theme = load_theme(settings)?;
    let source = source::open(&settings.source);

    let rt = tokio::runtime::Runtime::new()?;
    let census = rt
        .block_on(load(&*source))
        .with_context(|| format!("Failed to load census from {}", source.description()))?;

    let export = serde_json::json!({
        "source": source.description(),
        "snapshots": census.len(),
        "summary": Summary::from_latest(census.latest()),
        "charts": {
            "nodes": theme.apply(&nodes_chart(&census))?,
            "features": theme.apply(&features_chart(&census))?,
        },
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    info!(output = %export_path.display(), "census exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use census_dashboard::FileSource;

    const CENSUS: &str = r#"{"timestamp":1700000000,"total_contacted":18234,"stats":{"total_nodes":1000,"v2_transport":600,"compact_filters":400,"v2_and_filters":250}}"#;

    #[tokio::test]
    async fn test_write_page() {
        let dir = tempfile::tempdir().unwrap();
        let census_path = dir.path().join("census.jsonl");
        std::fs::write(&census_path, CENSUS).unwrap();
        let output = dir.path().join("index.html");

        let source = FileSource::new(&census_path);
        let theme = EchartsTheme::default();
        let census = write_page(&source, "echarts.js", DEFAULT_LAYOUT, &theme, &output)
            .await
            .unwrap();
        assert_eq!(census.len(), 1);

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Last run November 14, 2023"));
        assert!(html.contains("<script type=\"module\">"));
    }

    #[tokio::test]
    async fn test_failed_load_still_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("index.html");

        let source = FileSource::new(dir.path().join("census.jsonl"));
        let theme = EchartsTheme::default();
        let err = write_page(&source, "echarts.js", DEFAULT_LAYOUT, &theme, &output)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("with an error status"));
        assert!(format!("{:#}", err).contains("Could not load census.jsonl"));

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Error: Could not load census.jsonl"));
        assert!(!html.contains("<script"));
    }

    #[tokio::test]
    async fn test_layout_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("index.html");

        let source = FileSource::new(dir.path().join("census.jsonl"));
        let theme = EchartsTheme::default();
        let result = write_page(&source, "echarts.js", "<html></html>", &theme, &output).await;
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
