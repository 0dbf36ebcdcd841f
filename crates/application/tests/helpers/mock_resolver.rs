use async_trait::async_trait;
use ferrous_ptr_application::ports::ReverseResolver;
use ferrous_ptr_domain::DomainError;
use std::collections::HashMap;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::Instant;

/// In-memory resolver. Unknown addresses fail with NXDOMAIN.
#[derive(Clone, Default)]
pub struct MockReverseResolver {
    records: Arc<Mutex<HashMap<String, Vec<String>>>>,
    errors: Arc<Mutex<HashMap<String, DomainError>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    default_delay: Arc<Mutex<Option<Duration>>>,
    calls: Arc<Mutex<Vec<(String, Instant)>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockReverseResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_names(&self, address: &str, names: &[&str]) {
        self.records.lock().unwrap().insert(
            address.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
    }

    pub fn set_error(&self, address: &str, error: DomainError) {
        self.errors
            .lock()
            .unwrap()
            .insert(address.to_string(), error);
    }

    pub fn set_delay(&self, address: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(address.to_string(), delay);
    }

    pub fn set_default_delay(&self, delay: Duration) {
        *self.default_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn delay_for(&self, address: &str) -> Option<Duration> {
        self.delays
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .or(*self.default_delay.lock().unwrap())
    }
}

#[async_trait]
impl ReverseResolver for MockReverseResolver {
    async fn reverse_lookup(&self, address: &str) -> Result<Vec<String>, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((address.to_string(), Instant::now()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay_for(address) {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(error) = self.errors.lock().unwrap().get(address) {
            return Err(error.clone());
        }

        match self.records.lock().unwrap().get(address) {
            Some(names) => Ok(names.clone()),
            None => Err(DomainError::NxDomain),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// Yields `data` once, then fails every subsequent read.
pub struct FailingReader {
    data: Option<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            data: Some(data.as_bytes().to_vec()),
        }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.data.take() {
            Some(data) => {
                buf.put_slice(&data);
                Poll::Ready(Ok(()))
            }
            None => Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))),
        }
    }
}

/// Rejects every write.
pub struct FailingWriter;

impl AsyncWrite for FailingWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
