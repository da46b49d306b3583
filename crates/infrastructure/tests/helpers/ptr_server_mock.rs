#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

const RCODE_NXDOMAIN: u8 = 3;
const RCODE_SERVFAIL: u8 = 2;
const RCODE_REFUSED: u8 = 5;
const NO_TARGETS: &[&str] = &[];
const WRONG_ID_TARGETS: &[&str] = &["wrong.example."];

/// What the mock server answers to every PTR query it receives.
#[derive(Clone, Debug)]
pub enum MockAnswer {
    Ptr(Vec<&'static str>),
    NoData,
    NxDomain,
    ServFail,
    Refused,
    /// Empty truncated answer over UDP, full PTR answer over TCP.
    TruncatedThenTcp(Vec<&'static str>),
    WrongId,
    Silent,
}

/// Local nameserver on 127.0.0.1 serving both UDP and TCP on one port.
pub struct MockPtrServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockPtrServer {
    pub async fn start(answer: MockAnswer) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_counter = Arc::clone(&udp_queries);
        let tcp_counter = Arc::clone(&tcp_queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_response(&buf[..len], &answer, false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = listener.accept() => {
                        if let Ok((stream, _)) = result {
                            tcp_counter.fetch_add(1, Ordering::SeqCst);
                            let answer = answer.clone();
                            tokio::spawn(serve_tcp(stream, answer));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
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

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockPtrServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_tcp(mut stream: tokio::net::TcpStream, answer: MockAnswer) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query).await.is_err() {
        return;
    }

    if let Some(response) = build_response(&query, &answer, true) {
        let len = (response.len() as u16).to_be_bytes();
        let _ = stream.write_all(&len).await;
        let _ = stream.write_all(&response).await;
        let _ = stream.flush().await;
    }
}

/// Answers a single-question query by echoing the question and appending
/// PTR records that point back at it (name compression offset 12).
pub fn build_response(query: &[u8], answer: &MockAnswer, over_tcp: bool) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }

    let (rcode, truncated, targets): (u8, bool, &[&str]) = match answer {
        MockAnswer::Ptr(targets) => (0, false, targets.as_slice()),
        MockAnswer::NoData => (0, false, NO_TARGETS),
        MockAnswer::NxDomain => (RCODE_NXDOMAIN, false, NO_TARGETS),
        MockAnswer::ServFail => (RCODE_SERVFAIL, false, NO_TARGETS),
        MockAnswer::Refused => (RCODE_REFUSED, false, NO_TARGETS),
        MockAnswer::TruncatedThenTcp(targets) if over_tcp => (0, false, targets.as_slice()),
        MockAnswer::TruncatedThenTcp(_) => (0, true, NO_TARGETS),
        MockAnswer::WrongId => (0, false, WRONG_ID_TARGETS),
        MockAnswer::Silent => return None,
    };

    let mut response = Vec::with_capacity(512);

    if matches!(answer, MockAnswer::WrongId) {
        let id = u16::from_be_bytes([query[0], query[1]]).wrapping_add(1);
        response.extend_from_slice(&id.to_be_bytes());
    } else {
        response.extend_from_slice(&query[0..2]);
    }

    // QR + RD, TC when truncated
    response.push(0x81 | if truncated { 0x02 } else { 0x00 });
    // RA + RCODE
    response.push(0x80 | rcode);

    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(targets.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&query[12..]);

    for target in targets {
        let rdata = encode_name(target);
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
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.split('.').filter(|label| !label.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}
