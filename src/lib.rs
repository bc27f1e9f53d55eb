//! # Static Server
//! src/lib.rs
//!
//! Servidor de archivos estáticos concurrente implementado desde cero para
//! demostrar conceptos de sistemas operativos: concurrencia, sincronización
//! y manejo de recursos compartidos.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing y construcción del protocolo HTTP (request line, responses)
//! - `pool`: Cola de tareas y pool de workers de tamaño fijo
//! - `server`: Loop de aceptación TCP y handler de conexiones
//! - `logging`: Access log compartido entre workers
//!
//! ## Flujo de una conexión
//!
//! ```text
//! accept() -> Task -> TaskQueue -> Worker -> handler -> response -> close
//! ```
//!
//! El acceptor nunca procesa conexiones: solo las encola. Los workers son
//! los únicos consumidores de la cola y cada Task es consumido exactamente
//! una vez.

pub mod config;
pub mod http;
pub mod logging;
pub mod pool;
pub mod server;
