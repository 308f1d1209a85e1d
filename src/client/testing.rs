use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing::subscriber::DefaultGuard;

use super::{BoxFuture, HttpRequest, HttpTransport, Response};

#[derive(Debug, Clone)]
pub(crate) enum FakeReply {
    Respond { status: u16, body: String },
    TimedOut,
    Refused,
}

impl FakeReply {
    pub(crate) fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub(crate) fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
        }
    }
}

/// Records every request and answers from a scripted queue of replies.
#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    replies: VecDeque<FakeReply>,
}

impl FakeTransport {
    pub(crate) fn new(replies: Vec<FakeReply>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                replies: replies.into(),
            })),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl HttpTransport for FakeTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<Response, Box<dyn std::error::Error + Send + Sync>>> {
        Box::pin(async move {
            let reply = {
                let mut state = self.state.lock().unwrap();
                state.requests.push(request);
                state.replies.pop_front()
            };
            match reply {
                Some(FakeReply::Respond { status, body }) => Ok(Response {
                    status_code: status,
                    body,
                    headers: vec![("content-type".to_owned(), "application/json".to_owned())],
                }),
                Some(FakeReply::TimedOut) => {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "deadline elapsed").into())
                }
                Some(FakeReply::Refused) => Err(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )
                .into()),
                None => Err("no scripted reply left".into()),
            }
        })
    }
}

/// Formatted log output collected by a thread-local subscriber.
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route events from the current thread into a fresh buffer until the guard drops.
    pub(crate) fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
