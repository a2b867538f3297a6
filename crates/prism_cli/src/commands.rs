//! Subcommand implementations

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use prism_theme::{
    FileStorage, PollingAppearance, SystemAppearance, ThemeController, ThemeMode, ThemeSnapshot,
    ThemeStorage, VariableSet,
};

use crate::cli::{FormatArg, VarsArgs};
use crate::config::PrismConfig;

/// A controller over the persisted state plus the OS probe it follows
pub struct Session {
    theme: ThemeController,
    appearance: Rc<PollingAppearance>,
}

impl Session {
    /// Open against the configured state file and the real OS
    pub fn open(config: &PrismConfig) -> Result<Self> {
        let storage = match &config.storage.path {
            Some(path) => FileStorage::new(path),
            None => FileStorage::in_config_dir().context("Cannot locate the theme state file")?,
        };
        tracing::debug!(path = %storage.path().display(), "using theme state file");
        Self::with_parts(config, storage, Rc::new(PollingAppearance::new()))
    }

    pub fn with_parts(
        config: &PrismConfig,
        storage: impl ThemeStorage + 'static,
        appearance: Rc<PollingAppearance>,
    ) -> Result<Self> {
        let registry = config.registry()?;
        let theme = ThemeController::builder()
            .registry(registry)
            .storage(storage)
            .appearance(appearance.clone())
            .initialize(config.defaults.mode, &config.defaults.theme);
        Ok(Self { theme, appearance })
    }
}

pub fn list(session: &Session, out: &mut impl Write) -> Result<()> {
    let active = session.theme.theme_name();
    for name in session.theme.registry().names() {
        let marker = if name == active { '*' } else { ' ' };
        writeln!(out, "{marker} {name}")?;
    }
    Ok(())
}

pub fn status(session: &Session, json: bool, out: &mut impl Write) -> Result<()> {
    write_snapshot(&session.theme.snapshot(), json, out)
}

pub fn set_mode(session: &Session, mode: ThemeMode, out: &mut impl Write) -> Result<()> {
    session.theme.set_mode(mode);
    write_snapshot(&session.theme.snapshot(), false, out)
}

pub fn set_theme(session: &Session, name: &str, out: &mut impl Write) -> Result<()> {
    if !session.theme.set_theme_name(name) {
        let known: Vec<&str> = session.theme.registry().names().collect();
        anyhow::bail!("Unknown theme `{name}` (known: {})", known.join(", "));
    }
    write_snapshot(&session.theme.snapshot(), false, out)
}

pub fn toggle(session: &Session, out: &mut impl Write) -> Result<()> {
    session.theme.toggle();
    write_snapshot(&session.theme.snapshot(), false, out)
}

/// Render variables without touching the persisted state
pub fn vars(session: &Session, args: &VarsArgs, out: &mut impl Write) -> Result<()> {
    let name = args
        .theme
        .clone()
        .unwrap_or_else(|| session.theme.theme_name());
    let mode = args.mode.map(ThemeMode::from).unwrap_or(session.theme.mode());
    let scheme = mode.resolve(session.appearance.preferred_scheme());

    let colors = session
        .theme
        .registry()
        .color_set(&name, scheme)
        .with_context(|| format!("Unknown theme `{name}`"))?;
    let vars = VariableSet::new(colors);

    match args.format {
        FormatArg::Css => write!(out, "{}", vars.to_css(&args.selector))?,
        FormatArg::Json => writeln!(out, "{}", serde_json::to_string_pretty(&vars.to_json())?)?,
    }
    Ok(())
}

/// Print the status, then a line for every change until `count` polls ran
pub fn watch(
    session: &Session,
    interval: Duration,
    count: Option<u64>,
    out: &mut impl Write,
) -> Result<()> {
    write_snapshot(&session.theme.snapshot(), false, out)?;

    let changes: Rc<RefCell<Vec<ThemeSnapshot>>> = Rc::default();
    let sink = changes.clone();
    let observer = session
        .theme
        .observe(move |snapshot| sink.borrow_mut().push(snapshot));
    session.theme.mount();

    let mut polls = 0u64;
    loop {
        session.appearance.poll();
        polls += 1;

        for snapshot in changes.borrow_mut().drain(..) {
            write_snapshot(&snapshot, false, out)?;
        }
        out.flush()?;

        if count.is_some_and(|limit| polls >= limit) {
            break;
        }
        thread::sleep(interval);
    }

    session.theme.unobserve(observer);
    session.theme.dispose();
    Ok(())
}

fn write_snapshot(snapshot: &ThemeSnapshot, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(snapshot)?)?;
    } else {
        writeln!(
            out,
            "mode={} theme={} resolved={}",
            snapshot.mode, snapshot.theme_name, snapshot.resolved
        )?;
    }
    Ok(())
}
