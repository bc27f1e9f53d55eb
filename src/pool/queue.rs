//! # Cola de Tareas
//! src/pool/queue.rs
//!
//! Implementa la cola FIFO thread-safe que comparten el acceptor y los
//! workers. La cola es el único camino de una conexión aceptada hacia el
//! pool: el acceptor encola, los workers desencolan, y cada `Task` es
//! consumido como máximo una vez (garantizado por movimiento de ownership).
//!
//! El flag `accepting` vive bajo el mismo mutex que la cola: una vez que
//! pasa a `false` nunca vuelve a `true` (no hay reinicio del pool).

use crate::pool::types::Task;
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

/// Estado interno de la cola, protegido por un único mutex
struct QueueState {
    /// Tareas pendientes, en orden de llegada (frente = más antigua)
    tasks: VecDeque<Task>,

    /// Flag de ciclo de vida: mientras sea true se aceptan submits.
    /// Se escribe false una sola vez, durante el shutdown.
    accepting: bool,
}

/// Cola FIFO thread-safe de tareas pendientes
pub struct TaskQueue {
    /// Estado compartido (cola + flag de aceptación)
    state: Arc<Mutex<QueueState>>,

    /// Condvar para despertar workers cuando llega trabajo o al cerrar
    condvar: Arc<Condvar>,
}

impl TaskQueue {
    /// Crea una cola vacía que acepta submits
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState {
                tasks: VecDeque::new(),
                accepting: true,
            })),
            condvar: Arc::new(Condvar::new()),
        }
    }

    /// Encola una tarea al final de la cola
    ///
    /// Despierta exactamente a un worker bloqueado en `take`.
    ///
    /// # Errores
    ///
    /// Si la cola ya está cerrada devuelve la tarea rechazada en el `Err`
    /// (mismo patrón que `mpsc::SendError`): el que llamó sigue siendo el
    /// dueño de la conexión y debe cerrarla él mismo.
    pub fn submit(&self, task: Task) -> Result<(), Task> {
        let mut state = self.state.lock().unwrap();

        if !state.accepting {
            return Err(task);
        }

        state.tasks.push_back(task);

        // Notificar a un worker esperando
        self.condvar.notify_one();

        Ok(())
    }

    /// Desencola la tarea más antigua (FIFO)
    ///
    /// Bloquea hasta que haya una tarea disponible o la cola quede cerrada
    /// y vacía. `None` significa "no hay más trabajo": el worker puede salir.
    pub fn take(&self) -> Option<Task> {
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }

            if !state.accepting {
                return None;
            }

            // Esperar a que haya tareas o a que cierren la cola
            state = self.condvar.wait(state).unwrap();
        }
    }

    /// Cierra la cola: no se aceptan más submits
    ///
    /// Las tareas ya encoladas siguen disponibles para `take` (drenado
    /// graceful). Despierta a todos los workers para que observen el cierre.
    /// Idempotente.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.accepting = false;
        self.condvar.notify_all();
    }

    /// Cierra la cola y descarta las tareas pendientes en una sola
    /// sección crítica (shutdown inmediato)
    ///
    /// Devuelve las tareas descartadas para que el pool cierre sus
    /// conexiones.
    pub fn close_and_drain(&self) -> Vec<Task> {
        let mut state = self.state.lock().unwrap();
        state.accepting = false;
        let discarded: Vec<Task> = state.tasks.drain(..).collect();
        self.condvar.notify_all();
        discarded
    }

    /// Retorna el número de tareas pendientes
    pub fn len(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.tasks.len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verifica si la cola sigue aceptando submits
    pub fn is_accepting(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.accepting
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TaskQueue {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            condvar: Arc::clone(&self.condvar),
        }
    }
}
