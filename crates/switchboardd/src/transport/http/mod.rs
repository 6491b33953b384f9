//! HTTP(S) transport served by `tiny_http`.
//!
//! Requests whose path equals the registered endpoint become exchanges; their
//! parameters are the URL-encoded form body (when present) followed by the
//! query string, so body values win on duplicate keys. Other `GET` requests
//! are served from the configured web root. With TLS enabled the server is
//! started with the configured PEM certificate and key.

mod static_files;
mod tls;

use std::fmt;
use std::io::{self, Cursor, Read};
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use switchboard_config::Config;
use tiny_http::{Header, Method, Server, SslConfig, StatusCode};
use tracing::{debug, info, warn};

use super::{
    ExchangeSender, Inbound, ProducerSlot, ResponseReceiver, TRANSPORT_TARGET, Transport,
    TransportError, TransportHandle, exchange_channel,
};
use crate::dispatch::{CONTENT_TYPE, Request, Response};

/// Exchanges that may wait for a pump before request threads block.
const QUEUE_CAPACITY: usize = 64;
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

type Reply = tiny_http::Response<Cursor<Vec<u8>>>;

/// Transport serving HTTP/1.1, optionally over TLS.
pub struct HttpTransport {
    config: Arc<Config>,
    listener: TcpListener,
    local_addr: SocketAddr,
    tls: Option<SslConfig>,
    endpoint: Option<(String, ExchangeSender)>,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("local_addr", &self.local_addr)
            .field("tls", &self.tls.is_some())
            .field("endpoint", &self.endpoint.as_ref().map(|(path, _)| path))
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Binds the listening socket selected by `config`.
    ///
    /// The port is the TLS port unless TLS is disabled. TLS material is
    /// loaded here so a bad certificate stops the service before it serves.
    ///
    /// # Errors
    ///
    /// Returns an error when TLS material is missing or invalid, or when the
    /// address cannot be resolved or bound.
    pub fn bind(config: Arc<Config>) -> Result<Self, TransportError> {
        let tls = if config.tls_enabled() {
            let (certificate, key) = config
                .tls_material()
                .ok_or(TransportError::TlsMaterialMissing)?;
            Some(tls::ssl_config(certificate, key)?)
        } else {
            None
        };
        let listener = bind_listener(&config.web_server.bind_host, config.effective_port())?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| TransportError::LocalAddr { source })?;
        Ok(Self {
            config,
            listener,
            local_addr,
            tls,
            endpoint: None,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Transport for HttpTransport {
    fn register(&mut self, endpoint: &str) -> Result<Inbound, TransportError> {
        if let Some((existing, _)) = &self.endpoint {
            return Err(TransportError::AlreadyRegistered {
                endpoint: existing.clone(),
            });
        }
        let (sender, inbound) = exchange_channel(QUEUE_CAPACITY);
        self.endpoint = Some((endpoint.to_owned(), sender));
        Ok(inbound)
    }

    fn start(self: Box<Self>) -> Result<TransportHandle, TransportError> {
        let Self {
            config,
            listener,
            local_addr,
            tls,
            endpoint,
        } = *self;
        let (endpoint, sender) = endpoint.ok_or(TransportError::NotRegistered)?;
        let server = Server::from_listener(listener, tls)
            .map_err(|source| TransportError::Server { source })?;
        let producer = ProducerSlot::new(sender);
        let routes = Arc::new(Routes {
            endpoint,
            producer: producer.clone(),
            config,
        });
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = Arc::clone(&shutdown);
        let worker = thread::spawn(move || serve(&server, &shutdown_flag, &routes, local_addr));
        Ok(TransportHandle::new(
            shutdown,
            producer,
            Some(worker),
            Some(local_addr),
        ))
    }
}

fn serve(server: &Server, shutdown: &AtomicBool, routes: &Arc<Routes>, addr: SocketAddr) {
    info!(target: TRANSPORT_TARGET, %addr, "http server active");
    while !shutdown.load(Ordering::SeqCst) {
        match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => {
                let routes = Arc::clone(routes);
                thread::spawn(move || routes.respond(request));
            }
            Ok(None) => {}
            Err(error) => {
                warn!(target: TRANSPORT_TARGET, error = %error, "failed to receive request");
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
    info!(target: TRANSPORT_TARGET, %addr, "http server stopped");
}

struct Routes {
    endpoint: String,
    producer: ProducerSlot,
    config: Arc<Config>,
}

enum BodyError {
    TooLarge,
    Io(io::Error),
}

impl Routes {
    fn respond(&self, mut request: tiny_http::Request) {
        let reply = self.route(&mut request);
        if let Err(error) = request.respond(reply) {
            warn!(target: TRANSPORT_TARGET, error = %error, "failed to write response");
        }
    }

    fn route(&self, request: &mut tiny_http::Request) -> Reply {
        let url = request.url().to_owned();
        let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
        debug!(
            target: TRANSPORT_TARGET,
            method = %request.method(),
            path,
            "http request"
        );
        if path == self.endpoint {
            return self.exchange(request, query);
        }
        if *request.method() != Method::Get {
            return self.text(405, "method not allowed");
        }
        self.config
            .web_server
            .web_root
            .as_deref()
            .and_then(|root| static_files::load(root, path))
            .map_or_else(
                || self.text(404, "not found"),
                |(content_type, body)| self.reply(200, &[(CONTENT_TYPE, content_type)], body),
            )
    }

    // The producer is checked out only once the body is complete, so a slow
    // client never holds the inbound stream open.
    fn exchange(&self, request: &mut tiny_http::Request, query: &str) -> Reply {
        let limit = self.config.web_server.max_request_bytes;
        let body = match read_body(request, limit) {
            Ok(body) => body,
            Err(BodyError::TooLarge) => {
                return self.text(413, &format!("request exceeds {limit} bytes"));
            }
            Err(BodyError::Io(error)) => {
                debug!(target: TRANSPORT_TARGET, error = %error, "unreadable request body");
                return self.text(400, "unreadable request body");
            }
        };
        let mut params = Request::new();
        if has_form_body(request) {
            params.extend_from_form(&body);
        }
        params.extend_from_form(query.as_bytes());
        match self.producer.submit(params).map(ResponseReceiver::wait) {
            Ok(Some(response)) => self.from_response(response),
            Ok(None) | Err(_) => self.text(503, "service is shutting down"),
        }
    }

    fn from_response(&self, response: Response) -> Reply {
        let headers: Vec<(&str, &str)> = response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        self.reply(200, &headers, response.body().to_vec())
    }

    fn text(&self, status: u16, message: &str) -> Reply {
        self.reply(
            status,
            &[(CONTENT_TYPE, "text/plain; charset=utf-8")],
            message.as_bytes().to_vec(),
        )
    }

    fn reply(&self, status: u16, headers: &[(&str, &str)], body: Vec<u8>) -> Reply {
        let server_name = [("Server", self.config.web_server.name.as_str())];
        server_name.iter().chain(headers).fold(
            tiny_http::Response::from_data(body).with_status_code(StatusCode(status)),
            |reply, (name, value)| match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => reply.with_header(header),
                Err(()) => {
                    warn!(target: TRANSPORT_TARGET, header = *name, "dropping invalid header");
                    reply
                }
            },
        )
    }
}

fn read_body(request: &mut tiny_http::Request, limit: usize) -> Result<Vec<u8>, BodyError> {
    if request.body_length().is_some_and(|length| length > limit) {
        return Err(BodyError::TooLarge);
    }
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut body = Vec::new();
    Read::take(request.as_reader(), cap)
        .read_to_end(&mut body)
        .map_err(BodyError::Io)?;
    if body.len() > limit {
        return Err(BodyError::TooLarge);
    }
    Ok(body)
}

fn has_form_body(request: &tiny_http::Request) -> bool {
    request.headers().iter().any(|header| {
        header.field.equiv(CONTENT_TYPE)
            && header
                .value
                .as_str()
                .to_ascii_lowercase()
                .starts_with(FORM_CONTENT_TYPE)
    })
}

fn bind_listener(host: &str, port: u16) -> Result<TcpListener, TransportError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| TransportError::Resolve {
            host: host.to_owned(),
            port,
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| TransportError::ResolveEmpty {
        host: host.to_owned(),
        port,
    })?;
    TcpListener::bind(addr).map_err(|source| TransportError::BindTcp { addr, source })
}
