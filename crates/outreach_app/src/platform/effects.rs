use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use outreach_core::{DraftFailure, Effect, MessageKind, Msg, ProfileSignals};
use outreach_engine::{EngineEvent, EngineHandle, RequestError};
use outreach_logging::{outreach_error, outreach_info, outreach_warn, redact};

use super::app::PanelEvent;
use super::desktop::Desktop;
use super::persistence::SettingsStore;

pub struct EffectRunner {
    engine: EngineHandle,
    store: SettingsStore,
    desktop: Box<dyn Desktop>,
    tx: mpsc::Sender<PanelEvent>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        store: SettingsStore,
        desktop: Box<dyn Desktop>,
        tx: mpsc::Sender<PanelEvent>,
    ) -> Self {
        let runner = Self {
            engine,
            store,
            desktop,
            tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SaveSettings(settings) => {
                    let result = self.store.save(&settings).map_err(|err| {
                        outreach_error!("Saving settings failed: {}", err);
                        err.to_string()
                    });
                    self.send(Msg::SettingsSaved(result));
                }
                Effect::ClearSettings => {
                    if let Err(err) = self.store.clear() {
                        outreach_error!("Clearing settings failed: {}", err);
                    }
                }
                Effect::Scrape { token, url } => {
                    outreach_info!("Scrape token={} url={}", token, url);
                    self.engine.scrape(token, url);
                }
                Effect::ReleaseGuard { token, after } => {
                    self.engine.release_after(token, after);
                }
                Effect::RequestMessage {
                    request_id,
                    api_key,
                    request,
                } => {
                    outreach_info!(
                        "RequestMessage id={} kind={} key={}",
                        request_id,
                        request.kind.label(),
                        redact(&api_key)
                    );
                    self.engine.generate(
                        request_id,
                        request.resume,
                        api_key,
                        map_signals(&request.signals),
                        map_kind(request.kind),
                    );
                }
                Effect::CopyToClipboard(text) => {
                    self.send(copy_text(self.desktop.as_ref(), &text));
                }
                Effect::OpenUrl(url) => {
                    self.send(open_url(self.desktop.as_ref(), &url));
                }
            }
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.tx.send(PanelEvent::Msg(msg));
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let tx = self.tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if tx.send(PanelEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn copy_text(desktop: &dyn Desktop, text: &str) -> Msg {
    Msg::Copied(desktop.copy_text(text).map_err(|err| {
        outreach_warn!("Copy failed: {}", err);
        err.to_string()
    }))
}

fn open_url(desktop: &dyn Desktop, url: &str) -> Msg {
    outreach_info!("Opening {}", url);
    Msg::JobsOpened(desktop.open_url(url).map_err(|err| {
        outreach_warn!("Opening {} failed: {}", url, err);
        err.to_string()
    }))
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ScrapeCompleted { token, result } => Msg::ScrapeFinished {
            token,
            result: result
                .map(|signals| {
                    ProfileSignals::new(signals.name(), signals.position(), signals.is_hiring())
                })
                .map_err(|failure| {
                    outreach_warn!("Scrape {} failed: {}", token, failure);
                    failure.to_string()
                }),
        },
        EngineEvent::GuardReleased { token } => Msg::GuardReleased { token },
        EngineEvent::DraftCompleted { request_id, result } => Msg::DraftFinished {
            request_id,
            result: result.map_err(|err| {
                outreach_warn!("Draft {} failed: {}", request_id, err);
                map_failure(err)
            }),
        },
    }
}

fn map_signals(signals: &ProfileSignals) -> outreach_engine::ProfileSignals {
    outreach_engine::ProfileSignals::new(signals.name(), signals.position(), signals.is_hiring())
}

fn map_kind(kind: MessageKind) -> outreach_engine::MessageKind {
    match kind {
        MessageKind::Referral => outreach_engine::MessageKind::Referral,
        MessageKind::Meeting => outreach_engine::MessageKind::Meeting,
        MessageKind::Connect => outreach_engine::MessageKind::Connect,
    }
}

fn map_failure(err: RequestError) -> DraftFailure {
    match err {
        RequestError::Configuration(reason) => DraftFailure::Configuration(reason),
        RequestError::QuotaExceeded => DraftFailure::QuotaExceeded,
        RequestError::InvalidApiKey => DraftFailure::InvalidApiKey,
        RequestError::Provider(message) => DraftFailure::Provider(message),
        RequestError::MalformedResponse => DraftFailure::MalformedResponse,
        RequestError::Network(detail) => DraftFailure::Network(detail),
    }
}
