use crate::domain::error::DomainError;
use crate::domain::ports::alert_feed::StreamEvent;
use crate::domain::values::connection::{
    reconnect_delay, ConnectionState, MAX_RECONNECT_ATTEMPTS,
};
use crate::infrastructure::http::snapshot::AlertDto;
use crate::infrastructure::http::sse::SseParser;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// One logical subscription to the backend's SSE alert stream.
///
/// A single driver task owns the physical connection, so only one connect
/// attempt can ever be in flight. Dropped connections are redialed with
/// exponential backoff until the attempt budget runs out; `close` is
/// idempotent and suppresses every event from that point on.
pub struct StreamConnection {
    url: String,
    client: reqwest::Client,
    shared: Arc<Shared>,
    events: mpsc::UnboundedSender<StreamEvent>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<ConnectionState>,
    attempts: AtomicU32,
}

impl Shared {
    fn set_state(&self, next: ConnectionState) {
        *self.state.lock().unwrap_or_else(|p| p.into_inner()) = next;
    }

    fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl StreamConnection {
    /// Begin connecting to `url`. Never fails synchronously; connection
    /// problems surface as events and backoff redials.
    pub fn open(url: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<StreamEvent>) {
        let url = url.into();
        let client = reqwest::Client::builder()
            .user_agent("alertdesk/0.1")
            .build()
            .unwrap_or_default();
        let shared = Arc::new(Shared {
            state: Mutex::new(ConnectionState::Connecting),
            attempts: AtomicU32::new(0),
        });
        let (events, rx) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(drive(
            url.clone(),
            client.clone(),
            shared.clone(),
            events.clone(),
            shutdown_rx,
        ));

        (
            Self {
                url,
                client,
                shared,
                events,
                shutdown,
                task: Some(task),
            },
            rx,
        )
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    /// Consecutive failed connection attempts since the last successful
    /// handshake.
    pub fn attempts(&self) -> u32 {
        self.shared.attempts.load(Ordering::Relaxed)
    }

    /// Tear down the connection and cancel any pending redial. Safe to
    /// call repeatedly or before a connection ever succeeded; no events or
    /// automatic reconnects happen afterwards.
    pub fn close(&mut self) {
        self.shared.set_state(ConnectionState::Closing);
        let _ = self.shutdown.send(true);
        if self.task.as_ref().map_or(true, |t| t.is_finished()) {
            self.shared.set_state(ConnectionState::Closed);
        }
    }

    /// Reset the attempt budget and redial immediately. Also the only way
    /// out of the gave-up state.
    pub fn reconnect(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }

        self.shared.attempts.store(0, Ordering::Relaxed);
        self.shared.set_state(ConnectionState::Connecting);

        let (shutdown, shutdown_rx) = watch::channel(false);
        self.shutdown = shutdown;
        self.task = Some(tokio::spawn(drive(
            self.url.clone(),
            self.client.clone(),
            self.shared.clone(),
            self.events.clone(),
            shutdown_rx,
        )));
    }
}

impl Drop for StreamConnection {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn drive(
    url: String,
    client: reqwest::Client,
    shared: Arc<Shared>,
    events: mpsc::UnboundedSender<StreamEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }
        shared.set_state(ConnectionState::Connecting);

        match run_once(&url, &client, &shared, &events, &mut shutdown).await {
            // Intentional close while connecting or reading
            Ok(()) => break,
            Err(e) => {
                shared.set_state(ConnectionState::Closed);
                if *shutdown.borrow() {
                    break;
                }
                debug!("alert stream dropped: {e}");
                // Counter increments before the redial is scheduled
                let attempt = shared.attempts.fetch_add(1, Ordering::Relaxed) + 1;
                let _ = events.send(StreamEvent::Error(e.to_string()));
                let _ = events.send(StreamEvent::Closed);

                if attempt >= MAX_RECONNECT_ATTEMPTS {
                    warn!("giving up after {attempt} failed stream connections");
                    let _ = events.send(StreamEvent::GaveUp);
                    break;
                }

                let delay = reconnect_delay(attempt);
                debug!("redialing alert stream in {delay:?} (attempt {attempt})");
                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }
    shared.set_state(ConnectionState::Closed);
}

/// Run one physical connection to completion. `Ok(())` means the owner
/// closed intentionally; any dropped or failed connection is an `Err` so
/// the driver can apply the redial policy.
async fn run_once(
    url: &str,
    client: &reqwest::Client,
    shared: &Shared,
    events: &mpsc::UnboundedSender<StreamEvent>,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<(), DomainError> {
    let connect = client.get(url).header("Accept", "text/event-stream").send();
    let resp = tokio::select! {
        _ = shutdown.changed() => return Ok(()),
        resp = connect => resp?,
    };

    if !resp.status().is_success() {
        return Err(DomainError::Network(format!(
            "stream endpoint returned {}",
            resp.status()
        )));
    }

    shared.set_state(ConnectionState::Open);
    shared.attempts.store(0, Ordering::Relaxed);
    info!("alert stream connected");
    let _ = events.send(StreamEvent::Opened);

    let mut body = resp.bytes_stream();
    let mut parser = SseParser::default();

    loop {
        let chunk = tokio::select! {
            _ = shutdown.changed() => return Ok(()),
            chunk = body.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                for frame in parser.push(&bytes) {
                    if frame.event != "alert" {
                        continue;
                    }
                    let parsed = serde_json::from_str::<AlertDto>(&frame.data)
                        .map_err(DomainError::from)
                        .and_then(AlertDto::into_record);
                    match parsed {
                        Ok(record) => {
                            let _ = events.send(StreamEvent::Alert(record));
                        }
                        // Bad payloads are dropped; the connection stays up
                        Err(e) => warn!("dropping malformed stream alert: {e}"),
                    }
                }
            }
            Some(Err(e)) => return Err(DomainError::Network(e.to_string())),
            None => return Err(DomainError::Network("stream closed by server".into())),
        }
    }
}
