use anyhow::{Result, anyhow};
use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use tiny_http::{Header, Request, Response, Server};

/// Serves one file for every request, whatever the path or method.
///
/// The file is read again for each request, so a regenerated page shows up
/// without restarting.
pub struct FileServer {
    server: Server,
    file: PathBuf,
    content_type: Header,
}

impl FileServer {
    pub fn bind<A: ToSocketAddrs>(addr: A, file: impl Into<PathBuf>) -> Result<Self> {
        let server =
            Server::http(addr).map_err(|e| anyhow!("Failed to start HTTP server: {e}"))?;
        let content_type =
            Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
                .map_err(|_| anyhow!("Invalid Content-Type header"))?;

        Ok(Self {
            server,
            file: file.into(),
            content_type,
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Blocks for as long as the process lives.
    pub fn serve_forever(&self) {
        for request in self.server.incoming_requests() {
            self.respond(request);
        }
    }

    pub fn serve_one(&self) -> std::io::Result<()> {
        let request = self.server.recv()?;
        self.respond(request);
        Ok(())
    }

    fn respond(&self, request: Request) {
        log::debug!("{} {}", request.method(), request.url());

        let sent = match fs::read(&self.file) {
            Ok(bytes) => request.respond(
                Response::from_data(bytes).with_header(self.content_type.clone()),
            ),
            Err(e) => {
                log::warn!("Cannot read {}: {e}", self.file.display());
                request.respond(
                    Response::from_string("404 page not found\n").with_status_code(404),
                )
            }
        };

        if let Err(e) = sent {
            log::warn!("Failed to send response: {e}");
        }
    }
}
