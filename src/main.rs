// src/main.rs  —  loctable entry point
use anyhow::{Context, Result};
use clap::Parser;
use loctable::config::{self, AppConfig, Cli};
use loctable::l10n::{EnvProbe, FileLoader, Registry, Switch};
use loctable::tui::{describe, startup_status, Tui, View};
use loctable::widgets::Board;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    // ── --print-config  ───────────────────────────────────────────────────────
    if cli.print_config {
        print!("{}", config::DEFAULT_CONFIG_TOML);
        return Ok(());
    }

    // ── --write-config  ───────────────────────────────────────────────────────
    if cli.write_config {
        let path = AppConfig::write_default_config(&cli)?;
        println!("Config written to: {}", path.display());
        println!("Edit it to point at your localization CSV.");
        return Ok(());
    }

    // ── Load config + table ───────────────────────────────────────────────────
    let cfg = AppConfig::load(&cli)?;
    let loader = FileLoader::new(&cfg.resource_dir);
    let mut registry = Registry::new(cfg.separator);
    let loaded = registry.load(&loader, &cfg.resource);

    // Startup language: a failure leaves no language selected and is shown in the status bar
    let selected = match &loaded {
        Ok(()) => registry.select_initial(&cfg.default_language, &EnvProbe, cfg.use_system_language),
        Err(_) => Ok(None),
    };

    // ── --list-languages  ─────────────────────────────────────────────────────
    if cli.list_languages {
        loaded.with_context(|| format!("Loading {:?} from {}", cfg.resource, cfg.resource_dir.display()))?;
        for lang in registry.languages() {
            let mark = if registry.active_language() == Some(lang.as_str()) { '*' } else { ' ' };
            println!("{mark} {lang}");
        }
        return Ok(());
    }

    // ── --dump  ───────────────────────────────────────────────────────────────
    if cli.dump || cfg!(not(feature = "tui")) {
        loaded.with_context(|| format!("Loading {:?} from {}", cfg.resource, cfg.resource_dir.display()))?;
        let table = registry.current_table()
            .context("No language selected; pass --lang or --system-lang")?;
        for key in table.keys() {
            println!("{key}\t{}", table.get(key).unwrap_or_default());
        }
        return Ok(());
    }

    let status = startup_status(&registry, loaded.as_ref().err(), selected.as_ref().err());
    run_tui(&cfg, &loader, &mut registry, status)
}

/// env_logger, optionally redirected to a file so it does not tear the TUI
fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Opening log file {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run_tui(
    cfg:      &AppConfig,
    loader:   &FileLoader,
    registry: &mut Registry,
    status:   String,
) -> Result<()> {
    let mut tui = Tui::new()?;
    let result = event_loop(&mut tui, cfg, loader, registry, status);
    tui.cleanup();
    result
}

fn event_loop(
    tui:        &mut Tui,
    cfg:        &AppConfig,
    loader:     &FileLoader,
    registry:   &mut Registry,
    mut status: String,
) -> Result<()> {
    let mut board = Board::build(registry);
    loop {
        tui.draw(&View { title: &cfg.title, registry: &*registry, board: &board, status: &status })?;

        #[cfg(not(feature = "tui"))]
        {
            let _ = (loader, &mut status, &mut board);
            return Ok(());
        }

        #[cfg(feature = "tui")]
        {
            use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
            use std::time::Duration;

            if !event::poll(Duration::from_millis(250))? { continue; }
            let Event::Key(k) = event::read()? else { continue };
            if k.kind == KeyEventKind::Release { continue; }

            let outcome = match k.code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Right | KeyCode::Tab => Some(registry.cycle_language(1)),
                KeyCode::Left | KeyCode::BackTab => Some(registry.cycle_language(-1)),
                KeyCode::Char(d @ '1'..='9') => {
                    let idx = d as usize - '1' as usize;
                    let lang = registry.languages().get(idx).cloned();
                    lang.map(|l| registry.switch_language(&l))
                }
                KeyCode::Char('r') => {
                    status = match registry.load(loader, &cfg.resource) {
                        Ok(()) => {
                            // Old labels leave the subscription list with the old board
                            board = Board::build(registry);
                            format!("reloaded · {}", describe(registry))
                        }
                        Err(e) => format!("reload failed: {e}"),
                    };
                    None
                }
                _ => None,
            };

            match outcome {
                Some(Ok(Switch::Changed(n))) if !n.missing.is_empty() => {
                    status = format!("{} · missing: {}", describe(registry), n.missing.join(", "));
                }
                Some(Ok(Switch::Changed(_))) => status = describe(registry),
                Some(Ok(Switch::Redundant))  => status = format!("{} (already active)", describe(registry)),
                Some(Err(e))                 => status = e.to_string(),
                None => {}
            }
        }
    }
}
