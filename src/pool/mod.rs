//! # Módulo del Pool de Workers
//! src/pool/mod.rs
//!
//! Este módulo implementa el corazón concurrente del servidor:
//!
//! - `types`: el `Task` (una conexión aceptada, como valor con dueño único),
//!   el modo de shutdown y los errores del pool
//! - `queue`: la cola FIFO thread-safe que comparten acceptor y workers
//! - `workers`: el pool de tamaño fijo que consume la cola
//!
//! La cola y su flag de aceptación son el único estado mutable compartido;
//! nadie accede a sus internos fuera de la propia cola.

pub mod queue;
pub mod types;
pub mod workers;

// Re-exportar para facilitar el uso
pub use queue::TaskQueue;
pub use types::{PoolError, ShutdownMode, Task};
pub use workers::{TaskHandler, WorkerPool};
