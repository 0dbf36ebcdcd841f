use ferrous_ptr_domain::ip_to_reverse_domain;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, Default)]
pub struct MockBehavior {
    /// Answer UDP queries with TC set and no answers.
    pub truncate_udp: bool,
    /// Reply with an ID that does not match the query.
    pub mismatched_id: bool,
    /// Force this RCODE on every reply.
    pub rcode: Option<u8>,
}

/// PTR server answering on the same port over UDP and TCP.
pub struct MockPtrServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    tasks: Vec<JoinHandle<()>>,
}

struct Zone {
    records: HashMap<String, Vec<String>>,
    behavior: MockBehavior,
}

impl MockPtrServer {
    pub async fn start(
        records: &[(&str, &[&str])],
        behavior: MockBehavior,
    ) -> Result<Self, std::io::Error> {
        let zone = Arc::new(Zone {
            records: records
                .iter()
                .map(|(ip, names)| {
                    let ip: IpAddr = ip.parse().expect("mock records use IP keys");
                    (
                        ip_to_reverse_domain(&ip),
                        names.iter().map(|n| n.to_string()).collect(),
                    )
                })
                .collect(),
            behavior,
        });

        let (listener, socket) = Self::bind_pair().await?;
        let addr = socket.local_addr()?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));

        let udp_task = {
            let zone = zone.clone();
            let counter = udp_queries.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 512];
                while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if let Some(response) = build_response(&zone, &buf[..len], true) {
                        let _ = socket.send_to(&response, peer).await;
                    }
                }
            })
        };

        let tcp_task = {
            let zone = zone.clone();
            let counter = tcp_queries.clone();
            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let zone = zone.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let mut len_buf = [0u8; 2];
                        if stream.read_exact(&mut len_buf).await.is_err() {
                            return;
                        }
                        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                        if stream.read_exact(&mut query).await.is_err() {
                            return;
                        }
                        counter.fetch_add(1, Ordering::SeqCst);
                        if let Some(response) = build_response(&zone, &query, false) {
                            let _ = stream
                                .write_all(&(response.len() as u16).to_be_bytes())
                                .await;
                            let _ = stream.write_all(&response).await;
                        }
                    });
                }
            })
        };

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            tasks: vec![udp_task, tcp_task],
        })
    }

    async fn bind_pair() -> Result<(TcpListener, UdpSocket), std::io::Error> {
        let mut last_error = None;
        for _ in 0..20 {
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            let port = listener.local_addr()?.port();
            match UdpSocket::bind(("127.0.0.1", port)).await {
                Ok(socket) => return Ok((listener, socket)),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| std::io::Error::other("no free port pair")))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockPtrServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn build_response(zone: &Zone, query: &[u8], over_udp: bool) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }

    // Question name, then QTYPE and QCLASS
    let mut labels = Vec::new();
    let mut pos = 12;
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        labels.push(String::from_utf8_lossy(query.get(pos..pos + len)?).to_lowercase());
        pos += len;
    }
    let question_end = pos + 4;
    let question = query.get(12..question_end)?;
    let qname = format!("{}.", labels.join("."));

    let behavior = zone.behavior;
    let names = zone.records.get(&qname);
    let truncated = over_udp && behavior.truncate_udp;
    let rcode = behavior
        .rcode
        .unwrap_or(if names.is_some() { 0 } else { 3 });
    let answers: &[String] = match (names, truncated) {
        (Some(names), false) => names,
        _ => &[],
    };

    let mut id = [query[0], query[1]];
    if behavior.mismatched_id {
        id = [!id[0], !id[1]];
    }

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&id);
    response.push(0x81 | if truncated { 0x02 } else { 0x00 });
    response.push(0x80 | rcode);
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(question);

    for name in answers {
        let rdata = encode_name(name);
        response.extend_from_slice(&[
            0xc0, 0x0c, // pointer to question name
            0x00, 0x0c, // PTR
            0x00, 0x01, // IN
            0x00, 0x00, 0x0e, 0x10, // TTL 3600
        ]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    Some(response)
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}
