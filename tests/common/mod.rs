use std::convert::Infallible;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use flate2::{Compression, write::GzEncoder};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::HeaderMap;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// What the test server answers to every request.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Vec<u8>,
    /// Wait this long before sending anything back.
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn gzipped(mut self) -> Self {
        self.body = gzip(&self.body);
        self.header("Content-Encoding", "gzip")
    }

    /// Gzips each half of the body on its own and sends both members back to
    /// back, the way concatenated `.gz` files look.
    pub fn gzipped_in_two_members(mut self) -> Self {
        let (head, tail) = self.body.split_at(self.body.len() / 2);
        let mut body = gzip(head);
        body.extend(gzip(tail));
        self.body = body;
        self.header("Content-Encoding", "gzip")
    }

    /// Claims gzip but sends plain bytes.
    pub fn broken_gzip(self) -> Self {
        self.header("Content-Encoding", "gzip")
    }
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip body");
    encoder.finish().expect("gzip body")
}

pub struct TestServer {
    pub url: String,
    received: Arc<Mutex<Vec<HeaderMap>>>,
}

impl TestServer {
    /// Request headers seen so far, one map per request.
    pub fn received(&self) -> Vec<HeaderMap> {
        self.received.lock().expect("lock received headers").clone()
    }
}

/// Plain http server on a random local port.
pub async fn serve(reply: Reply) -> TestServer {
    start(reply, None).await
}

/// Https server with a freshly generated self-signed certificate, so clients
/// only get through when they skip certificate verification.
pub async fn serve_tls(reply: Reply) -> TestServer {
    start(reply, Some(self_signed_acceptor())).await
}

async fn start(reply: Reply, tls: Option<TlsAcceptor>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
    let addr = listener.local_addr().expect("test server address");
    let received = Arc::new(Mutex::new(Vec::new()));
    let scheme = if tls.is_some() { "https" } else { "http" };

    let seen = received.clone();
    let reply = Arc::new(reply);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let seen = seen.clone();
            let reply = reply.clone();
            let tls = tls.clone();
            tokio::spawn(async move {
                match tls {
                    Some(acceptor) => {
                        // A client that rejects the certificate ends here.
                        if let Ok(stream) = acceptor.accept(stream).await {
                            serve_connection(stream, seen, reply).await;
                        }
                    }
                    None => serve_connection(stream, seen, reply).await,
                }
            });
        }
    });

    TestServer {
        url: format!("{scheme}://{addr}/"),
        received,
    }
}

async fn serve_connection<S>(stream: S, seen: Arc<Mutex<Vec<HeaderMap>>>, reply: Arc<Reply>)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let service = service_fn(move |req: Request<Incoming>| {
        let seen = seen.clone();
        let reply = reply.clone();
        async move {
            seen.lock().expect("lock received headers").push(req.headers().clone());
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            Ok::<_, Infallible>(respond(&reply))
        }
    });
    let _ = http1::Builder::new()
        .serve_connection(TokioIo::new(stream), service)
        .await;
}

fn self_signed_acceptor() -> TlsAcceptor {
    let certified = rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string(), "localhost".to_string()])
        .expect("generate self-signed certificate");
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .expect("tls protocol versions")
        .with_no_client_auth()
        .with_single_cert(vec![certified.cert.der().clone()], key)
        .expect("tls server config");
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    TlsAcceptor::from(Arc::new(config))
}

fn respond(reply: &Reply) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(reply.body.clone())));
    *response.status_mut() = hyper::StatusCode::from_u16(reply.status).expect("valid status");
    for (name, value) in &reply.headers {
        response
            .headers_mut()
            .append(*name, hyper::header::HeaderValue::from_static(*value));
    }
    response
}

/// A url nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{addr}/")
}
