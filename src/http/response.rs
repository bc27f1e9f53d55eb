//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP de forma
//! programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("Hello");
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::StatusCode;
use std::collections::HashMap;

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 400, 404)
    status: StatusCode,

    /// Headers HTTP (Content-Type, Content-Length, etc.)
    /// Usamos HashMap para evitar duplicados
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self.headers.insert(
            "Content-Length".to_string(),
            self.body.len().to_string()
        );
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para archivos binarios (imágenes, etc.)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers.insert(
            "Content-Length".to_string(),
            self.body.len().to_string()
        );
        self
    }

    /// Crea una respuesta de error con mensaje JSON
    ///
    /// Formato del JSON: `{"error": "mensaje"}`
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound, "File not found");
    /// assert_eq!(response.status(), StatusCode::NotFound);
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = format!(r#"{{"error": "{}"}}"#, message);
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(&body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
