//! One-shot HTTP tile server for provider behaviour tests.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// A tile server bound to a local port.
pub struct TileServer {
    /// Base URL to hand to the provider.
    pub base_url: String,
    /// First request line of each request received.
    pub requests: Receiver<String>,
}

/// Encode a solid PNG of the given size.
pub fn png(width: u32, height: u32, pixel: [u8; 3]) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    RgbImage::from_pixel(width, height, Rgb(pixel))
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap_or_else(|err| panic!("failed to encode PNG fixture: {err}"));
    bytes.into_inner()
}

/// Serve a single response with `status` and `body`, then stop.
pub fn serve_once(status: u16, body: Vec<u8>) -> TileServer {
    spawn(move |mut stream| {
        let head = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream
            .write_all(head.as_bytes())
            .and_then(|()| stream.write_all(&body))
            .unwrap_or_else(|err| panic!("failed to write response: {err}"));
    })
}

/// Accept a single request and hold the connection open without answering.
pub fn serve_silence(hold: Duration) -> TileServer {
    spawn(move |stream| {
        thread::sleep(hold);
        drop(stream);
    })
}

/// Base URL of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("failed to bind probe listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("failed to read probe address: {err}"));
    drop(listener);
    format!("http://{addr}/staticmap")
}

fn spawn(respond: impl FnOnce(TcpStream) + Send + 'static) -> TileServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("failed to bind tile server: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("failed to read tile server address: {err}"));
    let (sender, requests) = mpsc::channel();
    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(
            stream
                .try_clone()
                .unwrap_or_else(|err| panic!("failed to clone stream: {err}")),
        );
        let mut request_line = String::new();
        if reader.read_line(&mut request_line).is_err() {
            return;
        }
        let mut header = String::new();
        while reader.read_line(&mut header).is_ok_and(|read| read > 2) {
            header.clear();
        }
        let _ = sender.send(request_line.trim_end().to_owned());
        respond(stream);
    });
    TileServer {
        base_url: format!("http://{addr}/staticmap"),
        requests,
    }
}
