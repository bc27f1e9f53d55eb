//! # Módulo HTTP
//!
//! Implementa el subconjunto mínimo del protocolo HTTP que necesita el
//! servidor, sin librerías de alto nivel:
//!
//! - Parsing de la request line (`METHOD /path HTTP/1.x`)
//! - Construcción de responses
//! - Códigos de estado
//!
//! Los headers del request se ignoran deliberadamente: el servidor solo
//! necesita método, path y versión para decidir qué archivo servir.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```

pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
