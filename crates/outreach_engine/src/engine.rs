use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use outreach_logging::{outreach_debug, outreach_error};

use crate::compose::MessageRequester;
use crate::scrape::ProfileScraper;
use crate::{CheckToken, EngineEvent, MessageKind, ProfileSignals, RequestId};

enum EngineCommand {
    Scrape {
        token: CheckToken,
        url: String,
    },
    Generate {
        request_id: RequestId,
        resume: String,
        api_key: String,
        signals: ProfileSignals,
        kind: MessageKind,
    },
    ReleaseAfter {
        token: CheckToken,
        delay: Duration,
    },
}

#[derive(Clone)]
struct Services {
    scraper: ProfileScraper,
    requester: Arc<dyn MessageRequester>,
}

/// Runs scrapes, generation requests and guard timers on a background runtime.
///
/// Results come back as [`EngineEvent`]s in completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(scraper: ProfileScraper, requester: Arc<dyn MessageRequester>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let services = Services { scraper, requester };

        thread::Builder::new()
            .name("outreach-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let services = services.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(&services, command, event_tx).await;
                    });
                }
                outreach_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn scrape(&self, token: CheckToken, url: impl Into<String>) {
        self.send(EngineCommand::Scrape {
            token,
            url: url.into(),
        });
    }

    pub fn generate(
        &self,
        request_id: RequestId,
        resume: impl Into<String>,
        api_key: impl Into<String>,
        signals: ProfileSignals,
        kind: MessageKind,
    ) {
        self.send(EngineCommand::Generate {
            request_id,
            resume: resume.into(),
            api_key: api_key.into(),
            signals,
            kind,
        });
    }

    pub fn release_after(&self, token: CheckToken, delay: Duration) {
        self.send(EngineCommand::ReleaseAfter { token, delay });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            outreach_error!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    services: &Services,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Scrape { token, url } => {
            let result = services.scraper.scrape(&url).await;
            EngineEvent::ScrapeCompleted { token, result }
        }
        EngineCommand::Generate {
            request_id,
            resume,
            api_key,
            signals,
            kind,
        } => {
            let result = services
                .requester
                .request_message(&resume, &api_key, &signals, kind)
                .await;
            EngineEvent::DraftCompleted { request_id, result }
        }
        EngineCommand::ReleaseAfter { token, delay } => {
            tokio::time::sleep(delay).await;
            EngineEvent::GuardReleased { token }
        }
    };
    let _ = event_tx.send(event);
}
