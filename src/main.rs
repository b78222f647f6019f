use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use springdex::config::AppConfig;
use springdex::tui::app::AppState;
use springdex::tui::services::Services;

const USAGE: &str = "\
Navegue pelos personagens de Os Simpsons no terminal.

Uso: springdex [OPÇÕES]

Opções:
  -h, --help       Mostra esta ajuda
  -V, --version    Mostra a versão

Configuração: ~/.config/springdex/config.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "-V" | "--version" => {
                println!("{} {}", springdex::NAME, springdex::VERSION);
                return Ok(());
            }
            "-h" | "--help" => {
                println!("{} {}\n{USAGE}", springdex::NAME, springdex::VERSION);
                return Ok(());
            }
            other => {
                eprintln!("Argumento desconhecido: {other}\n\n{USAGE}");
                std::process::exit(2);
            }
        }
    }

    let config = AppConfig::load();

    // Initialize logging (file only; the TUI owns the terminal)
    let _log_guard = springdex::core::logging::init_tui(&config.data_dir());
    log::info!("springdex v{} starting", springdex::VERSION);

    let runtime = tokio::runtime::Runtime::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = runtime.block_on(async {
        let services = Services::init(&config);
        let mut app = AppState::new(services, &config.tui);
        app.run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms.max(1)))
            .await
    });

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("TUI exited with error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("springdex exiting");
    Ok(())
}
