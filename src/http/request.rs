//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser mínimo de la request line. El servidor lee el request completo en
//! una sola pasada con un presupuesto fijo de bytes: si dentro de ese
//! presupuesto no aparece la línea en blanco que termina los headers, el
//! request se considera malformado (no hay reintento ni buffering).
//!
//! ## Formato esperado
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! Los headers se ignoran: solo interesan método, path y versión.

/// Métodos HTTP reconocidos por el parser
///
/// El servidor solo atiende `GET`; los demás se parsean correctamente
/// pero el handler responde 400 sin intentar servir archivos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Como GET pero solo headers (no soportado por el handler)
    HEAD,

    /// POST - Enviar datos (no soportado por el handler)
    POST,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el token no corresponde a un método reconocido
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
        }
    }
}

/// Representa la request line parseada de un request HTTP
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, HEAD, POST)
    method: Method,

    /// Path de la petición (ej: "/index.html")
    path: String,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// Request truncado: no apareció la línea en blanco final dentro
    /// del presupuesto de lectura
    IncompleteRequest,

    /// Formato inválido de la request line
    InvalidRequestLine,

    /// Método HTTP no reconocido
    UnsupportedMethod(String),

    /// Versión HTTP incorrecta (debe ser HTTP/1.0 o HTTP/1.1)
    InvalidHttpVersion(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::IncompleteRequest => write!(f, "Incomplete HTTP request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea la request line de un request HTTP desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Los bytes leídos de la conexión (hasta el presupuesto)
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request line parseada exitosamente
    /// * `Err(ParseError)` - Request malformado o truncado
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_server::http::{Method, Request};
    ///
    /// let raw = b"GET /index.html HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.path(), "/index.html");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        // Convertir a string (validando que sea UTF-8 válido)
        let request_str = std::str::from_utf8(buffer)
            .map_err(|_| ParseError::InvalidRequestLine)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // La línea en blanco que termina los headers debe estar presente:
        // si no llegó completa en la primera lectura, el request se trata
        // como malformado en lugar de esperar más bytes.
        if !request_str.contains("\r\n\r\n") {
            return Err(ParseError::IncompleteRequest);
        }

        let first_line = request_str
            .split("\r\n")
            .next()
            .ok_or(ParseError::InvalidRequestLine)?;

        Self::parse_request_line(first_line)
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;
        let path = parts[1].to_string();

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok(Request { method, path, version })
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request (puede incluir query string)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }
}
