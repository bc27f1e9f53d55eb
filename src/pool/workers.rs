//! # Pool de Workers
//! src/pool/workers.rs
//!
//! Pool de threads de tamaño fijo que consume la cola de tareas. Los
//! workers son de larga vida: se crean con el pool y viven hasta que la
//! cola se cierra y se vacía. Un fallo al atender una conexión se registra
//! y queda contenido en esa tarea; nunca tumba al worker ni al pool.

use crate::pool::queue::TaskQueue;
use crate::pool::types::{PoolError, ShutdownMode, Task};
use std::io;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Función que atiende una tarea (lee el request, responde y cierra)
///
/// El pool no sabe nada de HTTP: recibe el handler como seam, igual que
/// el router registra handlers por función.
pub type TaskHandler = Arc<dyn Fn(Task) -> io::Result<()> + Send + Sync>;

/// Pool de workers de tamaño fijo
pub struct WorkerPool {
    /// Cola compartida con el acceptor
    queue: TaskQueue,

    /// Handles de los workers, consumidos por el shutdown al hacer join
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Crea el pool y lanza exactamente `workers` threads
    ///
    /// # Errores
    ///
    /// Retorna `PoolError::NoWorkers` si `workers == 0`: un pool vacío
    /// sería un servidor que acepta conexiones y nunca las atiende.
    ///
    /// # Ejemplo
    /// ```
    /// use std::sync::Arc;
    /// use static_server::pool::{PoolError, WorkerPool};
    ///
    /// let result = WorkerPool::new(0, Arc::new(|_task| Ok(())));
    /// assert!(matches!(result, Err(PoolError::NoWorkers)));
    /// ```
    pub fn new(workers: usize, handler: TaskHandler) -> Result<Self, PoolError> {
        if workers == 0 {
            return Err(PoolError::NoWorkers);
        }

        let queue = TaskQueue::new();
        let mut handles = Vec::with_capacity(workers);

        for i in 0..workers {
            let queue = queue.clone();
            let handler = Arc::clone(&handler);
            let name = format!("Worker-{}", i);

            handles.push(thread::spawn(move || {
                Self::worker_loop(name, queue, handler)
            }));
        }

        Ok(Self {
            queue,
            handles: Mutex::new(handles),
        })
    }

    /// Loop principal del worker
    ///
    /// Consume la cola hasta que `take` retorna `None` (cola cerrada y
    /// vacía). Un error del handler se registra y se sigue con la próxima
    /// tarea: una conexión que falla nunca termina al worker.
    fn worker_loop(name: String, queue: TaskQueue, handler: TaskHandler) {
        println!("🔧 {} iniciado", name);

        while let Some(task) = queue.take() {
            let peer = task.peer();

            if let Err(e) = handler(task) {
                eprintln!("   ❌ {} error atendiendo {}: {}", name, peer, e);
            }
        }

        println!("🔚 {} terminado", name);
    }

    /// Encola una conexión aceptada
    ///
    /// # Errores
    ///
    /// Si el pool ya fue detenido, devuelve la tarea rechazada en el
    /// `Err`: el caller (el acceptor) sigue siendo el dueño de la conexión
    /// y debe cerrarla él mismo para no filtrar el descriptor.
    pub fn enqueue(&self, task: Task) -> Result<(), Task> {
        self.queue.submit(task)
    }

    /// Detiene el pool
    ///
    /// En ambos modos el flag de aceptación pasa a false (ningún submit
    /// posterior tiene éxito) y se hace join de todos los workers antes
    /// de retornar:
    ///
    /// - `Graceful`: los workers terminan lo que tienen entre manos y
    ///   drenan la cola completa.
    /// - `Immediate`: las tareas encoladas pero no tomadas se descartan y
    ///   el pool cierra sus conexiones; cada worker termina solo la tarea
    ///   que esté ejecutando.
    ///
    /// Retorna el número de tareas descartadas (0 en modo graceful).
    /// Idempotente: una segunda llamada no encuentra workers que joinear.
    pub fn shutdown(&self, mode: ShutdownMode) -> usize {
        let discarded = match mode {
            ShutdownMode::Graceful => {
                self.queue.close();
                Vec::new()
            }
            ShutdownMode::Immediate => self.queue.close_and_drain(),
        };

        let discarded_count = discarded.len();
        for task in discarded {
            println!("   🗑️  Descartando conexión pendiente de {}", task.peer());
            task.close();
        }

        let handles: Vec<JoinHandle<()>> = {
            let mut guard = self.handles.lock().unwrap();
            guard.drain(..).collect()
        };

        for handle in handles {
            let _ = handle.join();
        }

        discarded_count
    }

    /// Número de tareas encoladas pendientes de tomar
    pub fn queued_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Verifica si el pool sigue aceptando trabajo
    pub fn is_accepting(&self) -> bool {
        self.queue.is_accepting()
    }
}
