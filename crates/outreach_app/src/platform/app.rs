use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use outreach_core::{update, AppState, Msg};
use outreach_engine::{
    ChatCompletionsRequester, DocumentSource, EngineHandle, HttpDocumentSource,
    LinkedInExtractor, ProfileScraper, SnapshotDocumentSource,
};
use outreach_logging::{outreach_debug, outreach_info};

use super::config::Cli;
use super::desktop::SystemDesktop;
use super::effects::EffectRunner;
use super::persistence::SettingsStore;
use super::ui::commands::{parse_command, PanelCommand, HELP};
use super::ui::render::render;

/// Everything the panel loop reacts to.
pub enum PanelEvent {
    Msg(Msg),
    /// A line typed by the user.
    Input(String),
    InputClosed,
}

pub fn run_panel(config: &Cli) -> anyhow::Result<()> {
    let engine = build_engine(config)?;
    let store = SettingsStore::new(&config.settings_dir);
    let (tx, rx) = mpsc::channel::<PanelEvent>();

    spawn_stdin_reader(tx.clone());
    let runner = EffectRunner::new(engine, store, Box::new(SystemDesktop::default()), tx);
    let mut panel = Panel {
        state: AppState::new(),
        runner,
    };

    println!("{HELP}");
    let saved = panel.runner.store().load();
    outreach_info!("Panel started settings_present={}", saved.is_some());
    if let Some(saved_at) = panel.runner.store().saved_at() {
        outreach_info!("Settings last saved {}", saved_at.to_rfc3339());
    }
    panel.dispatch(Msg::SettingsLoaded(saved));

    while let Ok(event) = rx.recv() {
        match event {
            PanelEvent::Msg(msg) => panel.dispatch(msg),
            PanelEvent::Input(line) if line.trim().is_empty() => {}
            PanelEvent::Input(line) => match parse_command(&line) {
                Ok(PanelCommand::Quit) => break,
                Ok(command) => panel.handle_command(command),
                Err(reason) => println!("{reason} (type `help`)"),
            },
            PanelEvent::InputClosed => break,
        }
        io::stdout().flush()?;
    }
    outreach_info!("Panel closed");
    Ok(())
}

fn build_engine(config: &Cli) -> anyhow::Result<EngineHandle> {
    let source: Arc<dyn DocumentSource> = match &config.snapshots {
        Some(dir) => {
            outreach_info!("Reading profile snapshots from {:?}", dir);
            Arc::new(SnapshotDocumentSource::new(dir))
        }
        None => Arc::new(
            HttpDocumentSource::new(config.fetch_settings()).context("building page fetcher")?,
        ),
    };
    let scraper = ProfileScraper::new(source, Arc::new(LinkedInExtractor::default()));
    let requester = ChatCompletionsRequester::new(config.generation_settings())
        .context("building message requester")?;
    EngineHandle::new(scraper, Arc::new(requester)).context("starting engine")
}

fn spawn_stdin_reader(tx: mpsc::Sender<PanelEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(PanelEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(PanelEvent::InputClosed);
    });
}

struct Panel {
    state: AppState,
    runner: EffectRunner,
}

impl Panel {
    fn dispatch(&mut self, msg: Msg) {
        outreach_debug!("dispatch {}", short_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.run(effects);
        if was_dirty {
            print_lines(&render(&view));
        }
    }

    fn handle_command(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::Dispatch(msg) => self.dispatch(msg),
            PanelCommand::Setup {
                resume_path,
                api_key,
            } => match fs::read_to_string(&resume_path) {
                Ok(resume) => self.dispatch(Msg::SetupSubmitted { resume, api_key }),
                Err(err) => println!("Could not read {}: {err}", resume_path.display()),
            },
            PanelCommand::Show => print_lines(&render(&self.state.view())),
            PanelCommand::Help => println!("{HELP}"),
            PanelCommand::Quit => {}
        }
    }
}

/// Variant name only; messages can carry the resume and key.
fn short_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::SettingsLoaded(_) => "SettingsLoaded",
        Msg::SetupSubmitted { .. } => "SetupSubmitted",
        Msg::SettingsSaved(_) => "SettingsSaved",
        Msg::ResetClicked => "ResetClicked",
        Msg::Tab(_) => "Tab",
        Msg::ScrapeFinished { .. } => "ScrapeFinished",
        Msg::GuardReleased { .. } => "GuardReleased",
        Msg::GenerateClicked(_) => "GenerateClicked",
        Msg::RegenerateClicked => "RegenerateClicked",
        Msg::DraftFinished { .. } => "DraftFinished",
        Msg::CopyClicked => "CopyClicked",
        Msg::Copied(_) => "Copied",
        Msg::OpenJobsClicked => "OpenJobsClicked",
        Msg::JobsOpened(_) => "JobsOpened",
    }
}

fn print_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
}
