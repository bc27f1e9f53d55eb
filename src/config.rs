//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_server --port 8080 --workers 4 --document-root ./public
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 WORKERS=8 ./static_server
//! ```

use clap::Parser;

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor de archivos estáticos concurrente con pool de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz del que se sirven los archivos
    #[arg(long = "document-root", default_value = "./public", env = "DOCUMENT_ROOT")]
    pub document_root: String,

    /// Número de workers del pool (cada uno atiende una conexión a la vez)
    #[arg(short, long, default_value = "4", env = "WORKERS")]
    pub workers: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// # Ejemplo
    /// ```no_run
    /// use static_server::config::Config;
    ///
    /// let config = Config::new();
    /// println!("Server listening on {}", config.address());
    /// ```
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos. Un pool de tamaño 0
    /// se rechaza aquí: un servidor sin workers nunca atendería nada.
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.document_root.trim().is_empty() {
            return Err("Document root must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Address:       {}", self.address());
        println!("   Document root: {}", self.document_root);
        println!("   Workers:       {}", self.workers);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            document_root: "./public".to_string(),
            workers: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.document_root, "./public");
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_workers() {
        let mut config = Config::default();
        config.workers = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Workers"));
    }

    #[test]
    fn test_validate_empty_document_root() {
        let mut config = Config::default();
        config.document_root = "  ".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Document root"));
    }

    #[test]
    fn test_config_custom_values() {
        let mut config = Config::default();
        config.port = 3000;
        config.workers = 8;
        config.document_root = "/srv/www".to_string();

        assert_eq!(config.port, 3000);
        assert_eq!(config.workers, 8);
        assert_eq!(config.document_root, "/srv/www");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_print_summary() {
        let config = Config::default();
        // No debe hacer panic
        config.print_summary();
    }
}
