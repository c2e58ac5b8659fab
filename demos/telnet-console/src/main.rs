//! Interactive console served over a TCP socket.
//!
//! Connect with `nc` or a telnet client in character mode and get a
//! line editor with history, completion and a handful of commands.
//! One client is served at a time.

use std::net::{TcpListener, TcpStream};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use feedline::builder::EditorBuilder;
use feedline::editor::{Control, Handler};

const COMMANDS: &[&str] = &[
    "echo off",
    "echo on",
    "exit",
    "help",
    "history",
    "history clear",
];

#[derive(Parser)]
#[command(about = "Interactive console over TCP built on feedline")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 6969)]
    port: u16,

    /// Prompt shown to the client
    #[arg(long, default_value = "> ")]
    prompt: String,

    /// History entries retained per session
    #[arg(long, default_value_t = 10)]
    history: usize,
}

struct Session {
    stream: TcpStream,
    done: bool,
}

impl Session {
    fn respond(&mut self, text: &str) {
        if let Err(error) = embedded_io::Write::write_all(self, text.as_bytes()) {
            warn!(%error, "client write failed");
            self.done = true;
        }
    }
}

impl embedded_io::ErrorType for Session {
    type Error = std::io::Error;
}

impl embedded_io::Write for Session {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::Write::write(&mut self.stream, buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::Write::flush(&mut self.stream)
    }
}

impl Handler for Session {
    fn line_read(&mut self, line: &[u8], control: &mut Control<'_, '_>) {
        let line = String::from_utf8_lossy(line);

        match line.trim() {
            "" => {}
            "help" => {
                self.respond("commands: help, history, history clear, echo on, echo off, exit\r\n")
            }
            "history" => {
                if control.history_len() == 0 {
                    self.respond("<No history>\r\n");
                } else {
                    // Oldest first, numbered from 1
                    for n in (0..control.history_len()).rev() {
                        let entry = control.history_entry(n).unwrap_or(b"");
                        let text = format!(
                            "{}: {}\r\n",
                            control.history_len() - n,
                            String::from_utf8_lossy(entry)
                        );
                        self.respond(&text);
                    }
                }
            }
            "history clear" => {
                control.clear_history();
                self.respond("history cleared\r\n");
            }
            "echo off" => {
                control.set_echo_suppressed(true);
                self.respond("echo off\r\n");
            }
            "echo on" => {
                control.set_echo_suppressed(false);
                self.respond("echo on\r\n");
            }
            "exit" => {
                self.respond("bye\r\n");
                self.done = true;
            }
            other => {
                let text = format!("unknown command: {}\r\n", other);
                self.respond(&text);
            }
        }
    }

    fn suggest(&mut self, line: &[u8]) -> Option<&str> {
        let line = std::str::from_utf8(line).ok()?;
        if line.is_empty() {
            return None;
        }

        COMMANDS.iter().copied().find(|c| c.starts_with(line))
    }
}

fn serve_client(stream: TcpStream, args: &Args) -> anyhow::Result<()> {
    let peer = stream.peer_addr().context("peer address")?;
    info!(%peer, "client connected");

    let mut session = Session {
        stream,
        done: false,
    };
    let mut editor = EditorBuilder::new_unbounded()
        .with_alloc_history(args.history)
        .build();

    editor.set_prompt(&args.prompt, &mut session)?;

    let mut buffer = [0; 256];
    loop {
        let n = std::io::Read::read(&mut session.stream, &mut buffer).context("client read")?;
        if n == 0 {
            break;
        }

        for &byte in &buffer[..n] {
            // Telnet sends CR LF or CR NUL; CR alone ends the line
            if byte == b'\n' || byte == 0 {
                continue;
            }

            editor.feed(byte, &mut session)?;
        }

        if session.done {
            break;
        }
    }

    info!(%peer, "client disconnected");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let listener = TcpListener::bind(("0.0.0.0", args.port))
        .with_context(|| format!("binding port {}", args.port))?;
    info!(port = args.port, "listening");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(error) = serve_client(stream, &args) {
                    warn!(%error, "session ended with error");
                }
            }
            Err(error) => warn!(%error, "accept failed"),
        }
    }

    Ok(())
}
