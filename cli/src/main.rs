use crate::cli::{Args, Command, LogFormat, ViewSelection};
use crate::document::DocumentStore;
use crate::health::HealthStatus;
use anyhow::{Context, bail};
use clap::Parser;
use oxdiagram::{AssertionFormat, CompiledDiagram, ParseError, View, classify, parse_assertions};
use oxhttp::Server;
use oxhttp::model::{HeaderName, HeaderValue, Method, Request, Response, Status};
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, Read, Write, stdin, stdout};
use std::net::ToSocketAddrs;
use std::path::Path;
use std::str::FromStr;
use std::thread::available_parallelism;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod document;
mod health;

const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);
const HTML_ROOT_PAGE: &str = include_str!("../templates/index.html");

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);
    match args.command {
        Command::Serve {
            bind,
            document,
            cors,
        } => serve(
            if let Some(document) = document {
                DocumentStore::open(&document).with_context(|| {
                    format!("Failed to open the document store {}", document.display())
                })?
            } else {
                DocumentStore::in_memory()
            },
            &bind,
            cors,
        ),
        Command::Compile {
            file,
            format,
            base,
            view,
            output,
        } => {
            let format = if let Some(format) = format {
                format_from_name(&format)?
            } else if let Some(file) = &file {
                format_from_path(file)?
            } else {
                bail!("The --format option must be set when reading from stdin")
            };
            let data = if let Some(file) = &file {
                fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?
            } else {
                let mut data = Vec::new();
                stdin().lock().read_to_end(&mut data)?;
                data
            };
            let diagram = compile(format, &data, base.as_deref())
                .with_context(|| format!("Failed to compile the {format} document"))?;
            let json = match view {
                ViewSelection::Class => serde_json::to_value(diagram.view(View::Class))?,
                ViewSelection::Object => serde_json::to_value(diagram.view(View::Object))?,
                ViewSelection::Both => serde_json::to_value(&diagram)?,
            };
            if let Some(output) = output {
                let file = File::create(&output)
                    .with_context(|| format!("Failed to create {}", output.display()))?;
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, &json)?;
                writer.write_all(b"\n")?;
                writer
                    .into_inner()
                    .map_err(io::IntoInnerError::into_error)?
                    .sync_all()?;
            } else {
                let mut stdout = stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, &json)?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
            }
            Ok(())
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Text => builder.with_ansi(io::stderr().is_terminal()).init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Parses and compiles a document, logging what was found in it.
fn compile(
    format: AssertionFormat,
    data: &[u8],
    base_iri: Option<&str>,
) -> Result<CompiledDiagram, ParseError> {
    let start = Instant::now();
    let assertions = parse_assertions(format, data, base_iri)?;
    let entities = classify(&assertions)
        .resolve_shapes(&assertions)
        .classify_relations(&assertions);
    let diagram = entities.build_models();
    info!(
        %format,
        assertions = assertions.len(),
        classes = entities.classes.len(),
        instances = entities.instances.len(),
        elapsed = ?start.elapsed(),
        "Document compiled"
    );
    Ok(diagram)
}

fn format_from_path(path: &Path) -> anyhow::Result<AssertionFormat> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        AssertionFormat::from_extension(ext).with_context(|| {
            format!("Not able to guess the file format from file name extension '{ext}'")
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn format_from_name(name: &str) -> anyhow::Result<AssertionFormat> {
    if let Some(t) = AssertionFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = AssertionFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

fn serve(store: DocumentStore, bind: &str, cors: bool) -> anyhow::Result<()> {
    health::init_start_time();
    let location = store
        .location()
        .map_or_else(|| "memory".to_owned(), |path| path.display().to_string());
    let mut server = if cors {
        Server::new(cors_middleware(move |request| {
            handle_request(request, &store)
                .unwrap_or_else(|(status, message)| error(status, message))
        })?)
    } else {
        Server::new(move |request| {
            handle_request(request, &store)
                .unwrap_or_else(|(status, message)| error(status, message))
        })
    }
    .with_global_timeout(HTTP_TIMEOUT)
    .with_server_name(concat!("Oxdiagram/", env!("CARGO_PKG_VERSION")))?
    .with_max_concurrent_connections(available_parallelism()?.get() * 128);
    for socket in bind.to_socket_addrs()? {
        server = server.bind(socket);
    }
    let server = server.spawn()?;
    info!(
        bind,
        document = %location,
        version = env!("CARGO_PKG_VERSION"),
        "Listening for requests at http://{bind}"
    );
    server.join()?;
    Ok(())
}

fn cors_middleware(
    on_request: impl Fn(&mut Request) -> Response + Send + Sync + 'static,
) -> anyhow::Result<impl Fn(&mut Request) -> Response + Send + Sync + 'static> {
    let origin = HeaderName::from_str("Origin")?;
    let access_control_allow_origin = HeaderName::from_str("Access-Control-Allow-Origin")?;
    let access_control_request_method = HeaderName::from_str("Access-Control-Request-Method")?;
    let access_control_allow_method = HeaderName::from_str("Access-Control-Allow-Methods")?;
    let access_control_request_headers = HeaderName::from_str("Access-Control-Request-Headers")?;
    let access_control_allow_headers = HeaderName::from_str("Access-Control-Allow-Headers")?;
    let star = HeaderValue::from_str("*")?;
    Ok(move |request: &mut Request| {
        if *request.method() == Method::OPTIONS {
            let mut response = Response::builder(Status::NO_CONTENT);
            if request.header(&origin).is_some() {
                response
                    .headers_mut()
                    .append(access_control_allow_origin.clone(), star.clone());
            }
            if let Some(method) = request.header(&access_control_request_method) {
                response
                    .headers_mut()
                    .append(access_control_allow_method.clone(), method.clone());
            }
            if let Some(headers) = request.header(&access_control_request_headers) {
                response
                    .headers_mut()
                    .append(access_control_allow_headers.clone(), headers.clone());
            }
            response.build()
        } else {
            let mut response = on_request(request);
            if request.header(&origin).is_some() {
                response
                    .headers_mut()
                    .append(access_control_allow_origin.clone(), star.clone());
            }
            response
        }
    })
}

type HttpError = (Status, String);

fn handle_request(request: &mut Request, store: &DocumentStore) -> Result<Response, HttpError> {
    match (request.url().path(), request.method().as_ref()) {
        ("/", "HEAD") => Ok(Response::builder(Status::OK)
            .with_header(HeaderName::CONTENT_TYPE, "text/html; charset=utf-8")
            .map_err(internal_server_error)?
            .build()),
        ("/", "GET") => Ok(Response::builder(Status::OK)
            .with_header(HeaderName::CONTENT_TYPE, "text/html; charset=utf-8")
            .map_err(internal_server_error)?
            .with_body(HTML_ROOT_PAGE)),
        ("/document", "GET") => {
            let document = store.load().map_err(internal_server_error)?;
            Ok(Response::builder(Status::OK)
                .with_header(HeaderName::CONTENT_TYPE, "text/turtle; charset=utf-8")
                .map_err(internal_server_error)?
                .with_body(document))
        }
        ("/update", "POST") => {
            let content_type =
                content_type(request).ok_or_else(|| bad_request("No Content-Type given"))?;
            let format = AssertionFormat::from_media_type(&content_type)
                .ok_or_else(|| unsupported_media_type(&content_type))?;
            let document = read_document(request)?;
            let diagram = compile(format, document.as_bytes(), None).map_err(|e| {
                warn!(error = %e, "Rejected an invalid document");
                bad_request(e)
            })?;
            let body = serde_json::to_vec(&diagram).map_err(internal_server_error)?;
            if let Err(e) = store.save(&document) {
                tracing::error!(error = %e, "Failed to persist the document");
            }
            Ok(Response::builder(Status::OK)
                .with_header(HeaderName::CONTENT_TYPE, "application/json")
                .map_err(internal_server_error)?
                .with_body(body))
        }
        ("/health", "GET") => {
            let document = store.load().map_err(internal_server_error)?;
            let body = HealthStatus::new(document.len())
                .to_json()
                .map_err(internal_server_error)?;
            Ok(Response::builder(Status::OK)
                .with_header(HeaderName::CONTENT_TYPE, "application/json")
                .map_err(internal_server_error)?
                .with_body(body))
        }
        (path @ ("/" | "/document" | "/update" | "/health"), method) => Err((
            Status::METHOD_NOT_ALLOWED,
            format!("{method} is not supported by {path}"),
        )),
        (path, method) => Err((
            Status::NOT_FOUND,
            format!("{method} {path} is not supported by this server"),
        )),
    }
}

fn read_document(request: &mut Request) -> Result<String, HttpError> {
    let mut data = Vec::new();
    request
        .body_mut()
        .take(MAX_DOCUMENT_SIZE + 1)
        .read_to_end(&mut data)
        .map_err(bad_request)?;
    if u64::try_from(data.len()).map_or(true, |len| len > MAX_DOCUMENT_SIZE) {
        return Err((
            Status::CONTENT_TOO_LARGE,
            format!("Documents are limited to {MAX_DOCUMENT_SIZE} bytes"),
        ));
    }
    String::from_utf8(data).map_err(bad_request)
}

fn content_type(request: &Request) -> Option<String> {
    let value = request.header(&HeaderName::CONTENT_TYPE)?.to_str().ok()?;
    Some(
        value
            .split_once(';')
            .map_or(value, |(b, _)| b)
            .trim()
            .to_ascii_lowercase(),
    )
}

fn error(status: Status, message: impl fmt::Display) -> Response {
    let response = Response::builder(status);
    match response.with_header(HeaderName::CONTENT_TYPE, "text/plain; charset=utf-8") {
        Ok(response) => response.with_body(message.to_string()),
        Err(_) => Response::builder(status).with_body(message.to_string()),
    }
}

fn bad_request(message: impl fmt::Display) -> HttpError {
    (Status::BAD_REQUEST, message.to_string())
}

fn unsupported_media_type(content_type: &str) -> HttpError {
    (
        Status::UNSUPPORTED_MEDIA_TYPE,
        format!("No supported content Content-Type given: {content_type}"),
    )
}

fn internal_server_error(message: impl fmt::Display) -> HttpError {
    tracing::error!(error = %message, "Internal server error");
    (Status::INTERNAL_SERVER_ERROR, message.to_string())
}
