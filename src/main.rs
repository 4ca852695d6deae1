mod app;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use select_group::config::AppConfig;
use select_group::{partition, trigger_label, Layout, Viewport};

#[derive(Parser, Debug)]
#[command(name = "select-group")]
#[command(version = "0.1.0")]
#[command(about = "Responsive select group: chips on wide terminals, a dropdown on narrow ones")]
struct Args {
    /// Config file (default: ~/.config/select-group/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inline chips before the overflow dropdown
    #[arg(short, long)]
    max_elements: Option<usize>,

    /// Terminal width below which the mobile layout is used
    #[arg(short, long)]
    breakpoint: Option<u16>,

    /// Force a layout instead of following the terminal width
    #[arg(short, long, value_enum)]
    layout: Option<Layout>,

    /// Print the chip/overflow split for the current terminal as JSON
    #[arg(short, long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.dump);

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(max) = args.max_elements {
        config.max_elements = Some(max);
    }
    if let Some(breakpoint) = args.breakpoint {
        config.mobile_breakpoint = breakpoint;
    }
    if let Some(layout) = args.layout {
        config.layout = layout;
    }

    let viewport = Viewport::from_terminal(config.mobile_breakpoint, config.layout);

    if args.dump {
        return print_partition(&config, &viewport);
    }

    run_tui(config, viewport).await
}

/// Log to stderr for one-shot commands, to a file while the TUI owns the screen
fn init_logging(to_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::from_default_env();

    let log_file = if to_stderr {
        None
    } else {
        dirs::cache_dir().and_then(|dir| {
            let dir = dir.join("select-group");
            std::fs::create_dir_all(&dir).ok()?;
            std::fs::File::create(dir.join("select-group.log")).ok()
        })
    };

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init(),
        None => tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init(),
    }
}

fn print_partition(config: &AppConfig, viewport: &Viewport) -> Result<()> {
    let part = partition(&config.items, config.max_elements);
    let names = |items: &[select_group::SelectItem]| -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    };

    let current = config.items.get(config.current_index());
    let trigger = match current {
        Some(current) if part.has_overflow() => Some(trigger_label(&part, current).to_string()),
        _ => None,
    };

    let output = serde_json::json!({
        "width": viewport.width(),
        "breakpoint": viewport.breakpoint(),
        "mobile": viewport.is_mobile(),
        "current": current.map(|i| i.name.as_str()),
        "visible": names(part.visible),
        "hidden": names(part.hidden),
        "trigger": trigger,
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn run_tui(config: AppConfig, viewport: Viewport) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, viewport);
    tracing::info!(mobile = app.group.is_mobile(), items = app.items.len(), "starting select-group");

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        if app.needs_clear {
            terminal.clear()?;
            app.needs_clear = false;
        }
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            let event = event::read()?;
            if let Event::Key(key) = &event {
                if key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
            }
            if !app.handle_event(&event) {
                return Ok(());
            }
        }

        app.tick();
    }
}
