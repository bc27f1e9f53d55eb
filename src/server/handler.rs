//! # Handler de Conexiones
//! src/server/handler.rs
//!
//! Lógica pura de atención de una conexión: leer el request, parsearlo,
//! resolver el archivo contra el document root y escribir la respuesta.
//! El handler no guarda estado: es seguro ejecutarlo en paralelo desde
//! cualquier worker.

use crate::http::{Method, Request, Response, StatusCode};
use crate::logging::AccessLog;
use crate::pool::Task;
use std::fs;
use std::io::{Read, Write};
use std::net::Shutdown;
use std::path::{Component, Path, PathBuf};

/// Presupuesto de lectura por request
///
/// El request completo (request line + headers + línea en blanco) debe
/// caber en una sola lectura de este tamaño; si no, se responde 400.
const MAX_REQUEST_BYTES: usize = 8192;

/// Atiende una conexión de principio a fin
///
/// Pasos:
/// 1. Leer hasta `MAX_REQUEST_BYTES` (una sola lectura, sin reintento)
/// 2. Parsear la request line; solo `GET` sirve archivos
/// 3. Resolver el path contra el document root (rechazando escapes)
/// 4. Responder 200 con el archivo, 404 si no existe, 400 si el request
///    es inválido
/// 5. Escribir la respuesta completa, registrarla en el access log y
///    cerrar la conexión (sin keep-alive)
///
/// Los errores de I/O se propagan al worker, que los registra; nunca
/// cruzan hacia la lógica de control del pool.
pub fn handle(task: Task, document_root: &Path, access_log: &AccessLog) -> std::io::Result<()> {
    let (mut stream, peer) = task.into_parts();

    let mut buffer = [0u8; MAX_REQUEST_BYTES];
    let bytes_read = stream.read(&mut buffer)?;

    if bytes_read == 0 {
        // El cliente cerró sin enviar nada
        return Ok(());
    }

    let (response, method, path) = match Request::parse(&buffer[..bytes_read]) {
        Ok(request) => {
            let method = request.method().as_str();
            let path = request.path().to_string();

            let response = if request.method() != Method::GET {
                Response::error(StatusCode::BadRequest, "Only GET is supported")
            } else {
                serve_file(document_root, &path)
            };

            (response, method, path)
        }
        Err(e) => (
            Response::error(StatusCode::BadRequest, &e.to_string()),
            "-",
            "-".to_string(),
        ),
    };

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    // Registrar después de escribir: un problema del log ya no puede
    // afectar la respuesta enviada
    access_log.record(peer, method, &path, response.status().as_u16());

    let _ = stream.shutdown(Shutdown::Both);
    Ok(())
}

/// Resuelve un path del request y produce la respuesta de archivo
fn serve_file(document_root: &Path, raw_path: &str) -> Response {
    let resolved = match resolve_path(document_root, raw_path) {
        Some(path) => path,
        None => return Response::error(StatusCode::BadRequest, "Invalid path"),
    };

    match fs::read(&resolved) {
        Ok(content) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", content_type(&resolved))
            .with_body_bytes(content),
        Err(_) => Response::error(StatusCode::NotFound, "File not found"),
    }
}

/// Resuelve un path del request contra el document root
///
/// - Descarta la query string
/// - Exige un path absoluto (empieza con `/`)
/// - `/` se mapea a `/index.html`
/// - Se recorren los componentes rechazando `..` y componentes absolutos:
///   el resultado nunca escapa del document root
///
/// `None` significa path inválido (el handler responde 400).
fn resolve_path(document_root: &Path, raw_path: &str) -> Option<PathBuf> {
    let path = raw_path.split('?').next().unwrap_or(raw_path);

    if !path.starts_with('/') {
        return None;
    }

    let relative = if path == "/" { "index.html" } else { &path[1..] };

    let mut resolved = document_root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            // ParentDir, RootDir o Prefix escaparían del document root
            _ => return None,
        }
    }

    Some(resolved)
}

/// Infiere el Content-Type según la extensión del archivo
fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
