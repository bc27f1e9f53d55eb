//! # Tipos del Pool
//! src/pool/types.rs
//!
//! Define el `Task` (la unidad de trabajo diferido), el modo de shutdown
//! y los errores de construcción del pool.

use std::net::{Shutdown, SocketAddr, TcpStream};

/// Unidad de trabajo diferido: una conexión aceptada pendiente de atender
///
/// Un `Task` es dueño exclusivo de su conexión: se crea en el acceptor,
/// se mueve a la cola y lo consume exactamente un worker. No se comparte
/// ni se clona; transferir el `Task` transfiere la conexión.
#[derive(Debug)]
pub struct Task {
    /// Socket de la conexión aceptada
    stream: TcpStream,

    /// Dirección del cliente
    peer: SocketAddr,
}

impl Task {
    /// Envuelve una conexión aceptada en un Task
    pub fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self { stream, peer }
    }

    /// Dirección del cliente que originó la conexión
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Descompone el Task en sus partes para procesarlo
    pub fn into_parts(self) -> (TcpStream, SocketAddr) {
        (self.stream, self.peer)
    }

    /// Cierra la conexión sin atenderla
    ///
    /// Lo usan el acceptor (cuando el pool rechaza el encolado) y el pool
    /// (cuando un shutdown inmediato descarta tareas pendientes). Un error
    /// al cerrar se ignora: el socket se libera igualmente al soltarlo.
    pub fn close(self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

/// Modo de apagado del pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownMode {
    /// Terminar las tareas en ejecución y drenar toda la cola antes de parar
    Graceful,

    /// Terminar solo la tarea en curso de cada worker; las tareas encoladas
    /// pero no tomadas se descartan y el pool cierra sus conexiones
    Immediate,
}

/// Errores al construir el pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Se pidió un pool de tamaño 0 (un servidor sin workers no atiende nada)
    NoWorkers,
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::NoWorkers => write!(f, "Worker pool requires at least one worker"),
        }
    }
}

impl std::error::Error for PoolError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    /// Helper: crea un Task a partir de una conexión real
    fn connected_task(listener: &TcpListener) -> (Task, TcpStream) {
        let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (server_side, peer) = listener.accept().unwrap();
        (Task::new(server_side, peer), client)
    }

    #[test]
    fn test_task_keeps_peer_address() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let (task, client) = connected_task(&listener);

        assert_eq!(task.peer(), client.local_addr().unwrap());
    }

    #[test]
    fn test_into_parts_returns_same_peer() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let (task, client) = connected_task(&listener);

        let expected = client.local_addr().unwrap();
        let (_stream, peer) = task.into_parts();
        assert_eq!(peer, expected);
    }

    #[test]
    fn test_close_does_not_panic() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let (task, _client) = connected_task(&listener);

        task.close();
    }

    #[test]
    fn test_pool_error_display() {
        assert_eq!(
            PoolError::NoWorkers.to_string(),
            "Worker pool requires at least one worker"
        );
    }
}
