#![allow(dead_code)]

use ankinotify::infrastructure::config::{AnkiConfig, Config, PushPlusConfig};
use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Local HTTP server answering a fixed sequence of responses, one per connection
pub struct CannedServer {
    pub url: String,
    bodies: Receiver<String>,
}

impl CannedServer {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, bodies) = mpsc::channel();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                // Record before answering so the client never sees a response
                // whose request is not yet recorded
                let _ = tx.send(read_request_body(&mut stream));
                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { url, bodies }
    }

    /// Start a server answering `200` with each JSON body in turn
    pub fn json(bodies: Vec<Value>) -> Self {
        Self::start(bodies.into_iter().map(|b| (200, b.to_string())).collect())
    }

    /// Bodies of the requests answered so far, parsed as JSON
    pub fn requests(&self) -> Vec<Value> {
        self.bodies
            .try_iter()
            .map(|b| serde_json::from_str(&b).expect("Request body should be JSON"))
            .collect()
    }
}

fn read_request_body(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0; content_length];
    let _ = reader.read_exact(&mut body);
    String::from_utf8_lossy(&body).into_owned()
}

/// URL of a port nobody listens on
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(anki_url: &str, pushplus_url: &str) -> Config {
    Config {
        anki: AnkiConfig {
            url: anki_url.to_string(),
            ..AnkiConfig::default()
        },
        pushplus: PushPlusConfig {
            token: "test-token".to_string(),
            url: pushplus_url.to_string(),
            template: "txt".to_string(),
            topic: String::new(),
            channel: "personal".to_string(),
            timeout_secs: Some(5),
        },
    }
}

/// AnkiConnect `notesInfo` answer for a single note
pub fn notes_info(id: i64, front: &str, tags: &[&str]) -> Value {
    serde_json::json!({
        "result": [{
            "noteId": id,
            "profile": "User 1",
            "modelName": "Basic",
            "tags": tags,
            "fields": {
                "Front": {"value": front, "order": 0},
                "Back": {"value": "back", "order": 1}
            },
            "cards": [id + 1]
        }],
        "error": null
    })
}

pub fn find_notes(ids: &[i64]) -> Value {
    serde_json::json!({ "result": ids, "error": null })
}
