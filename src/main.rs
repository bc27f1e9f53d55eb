//! # Static Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos estáticos.

use static_server::config::Config;
use static_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Static Server");
    println!("=================================\n");

    // Crear configuración (CLI + variables de entorno)
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Crear el servidor (pool de workers incluido)
    let server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error al crear el pool: {}", e);
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
