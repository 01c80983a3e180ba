//! Local HTTP stub shared by the wire-level tests.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Answers every request with one canned response and records the
/// request bodies in arrival order.
pub struct StubServer {
    /// Base URL, e.g. `http://127.0.0.1:1234/`.
    pub url: String,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Starts serving `status` (e.g. `"200 OK"`) with `body` on a free port.
    pub fn start(status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let bodies = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&bodies);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                respond(stream, status, body, &recorded);
            }
        });

        Self { url, bodies }
    }

    /// Bodies of the requests received so far.
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

fn respond(stream: TcpStream, status: &str, body: &str, recorded: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut request_body = vec![0; content_length];
    if reader.read_exact(&mut request_body).is_err() {
        return;
    }
    recorded
        .lock()
        .unwrap()
        .push(String::from_utf8_lossy(&request_body).into_owned());

    let mut stream = stream;
    let _ = write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
}
