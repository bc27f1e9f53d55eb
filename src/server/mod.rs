//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa la capa TCP del servidor:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes y las encola en el pool
//! 3. El handler (ejecutado por los workers) lee, parsea y responde
//!
//! El acceptor nunca procesa una conexión: solo decide su admisión.

pub mod handler;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{Server, StopHandle};
