use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;

use otpfield::app::App;
use otpfield::config::Config;
use otpfield::event::{AppEvent, EventHandler};
use otpfield::otp::PasteMode;
use otpfield::ui::components::code_label::{CodeLabel, KeyHints};
use otpfield::ui::components::otp_row::OtpRow;
use otpfield::ui::layout::AppLayout;
use otpfield::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "otpfield", version, about = "Terminal one-time-passcode entry field")]
struct Cli {
    #[arg(short, long, help = "Number of digit cells")]
    cells: Option<usize>,

    #[arg(short, long, help = "Mask entered digits")]
    mask: bool,

    #[arg(long, help = "Character shown in place of masked digits")]
    mask_char: Option<char>,

    #[arg(short, long, value_enum, help = "How multi-digit pastes are placed")]
    paste: Option<PasteMode>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Print the completed code as JSON")]
    json: bool,

    #[arg(long, help = "Write logs to this file (filter with OTPFIELD_LOG)")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(message = "config.load_failed", error = %err);
        Config::default()
    });
    if let Some(cells) = cli.cells {
        config.cell_count = cells;
    }
    if cli.mask {
        config.masking_enabled = true;
    }
    if let Some(mask_char) = cli.mask_char {
        config.mask_char = mask_char;
    }
    if let Some(paste) = cli.paste {
        config.paste_mode = paste;
    }
    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }

    let theme = Theme::load(&config.theme).unwrap_or_default();
    let mut app = App::new(&config, theme).context("cannot build passcode field")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    if let Some(completed) = &app.last_completed {
        if cli.json {
            println!("{}", serde_json::to_string(completed)?);
        } else {
            println!("{}", completed.code);
        }
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("OTPFIELD_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => {
                // Only presses edit; releases and repeats would double-enter digits.
                if key.kind == KeyEventKind::Press {
                    let action = app.handle_key(key);
                    tracing::trace!(message = "key", code = ?key.code, action = ?action);
                }
            }
            AppEvent::Paste(text) => {
                app.handle_paste(&text);
            }
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area, OtpRow::height(&app.group));

    let header = Paragraph::new(Span::styled(
        " Enter verification code ",
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(header, layout.header);

    frame.render_widget(OtpRow::new(&app.group, &app.theme), layout.row);
    frame.render_widget(CodeLabel::new(&app.label, &app.theme), layout.label);
    frame.render_widget(KeyHints { theme: &app.theme }, layout.footer);
}
