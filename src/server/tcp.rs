//! # Acceptor TCP
//! src/server/tcp.rs
//!
//! El loop de aceptación: dueño del socket de escucha y de la admisión de
//! conexiones. Cada conexión aceptada se envuelve en un `Task` y se encola
//! en el pool; los workers hacen el resto.
//!
//! Ciclo de vida: `listening` → (stop pedido o error fatal) → `draining`
//! → `stopped`. Nunca se vuelve a `listening`.

use crate::config::Config;
use crate::logging::AccessLog;
use crate::pool::{PoolError, ShutdownMode, Task, TaskHandler, WorkerPool};
use crate::server::handler;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Servidor de archivos estáticos con pool de workers
pub struct Server {
    config: Config,
    pool: Arc<WorkerPool>,
    access_log: AccessLog,

    /// Señal de stop externa; una vez true, no vuelve a false
    stop: Arc<AtomicBool>,

    /// Dirección real de escucha, publicada al empezar a servir
    /// (necesaria para que el stop handle pueda despertar el accept)
    local_addr: Arc<Mutex<Option<SocketAddr>>>,
}

/// Handle para detener el servidor desde otro thread
///
/// `stop()` marca la señal y abre una conexión de cortesía al listener
/// para desbloquear el `accept`; el acceptor la descarta al observar la
/// señal y entra en drenado graceful.
#[derive(Clone)]
pub struct StopHandle {
    stop: Arc<AtomicBool>,
    local_addr: Arc<Mutex<Option<SocketAddr>>>,
}

impl StopHandle {
    /// Pide el stop del servidor (fire-and-forget)
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);

        // Despertar al acceptor si está bloqueado en accept()
        let addr = { *self.local_addr.lock().unwrap() };
        if let Some(addr) = addr {
            let _ = TcpStream::connect(addr);
        }
    }
}

impl Server {
    /// Crea el servidor: access log, handler y pool de workers
    ///
    /// # Errores
    ///
    /// `PoolError::NoWorkers` si la configuración pide 0 workers.
    pub fn new(config: Config) -> Result<Self, PoolError> {
        let access_log = AccessLog::new();

        let document_root = PathBuf::from(&config.document_root);
        let handler_log = access_log.clone();
        let task_handler: TaskHandler = Arc::new(move |task: Task| {
            handler::handle(task, &document_root, &handler_log)
        });

        let pool = Arc::new(WorkerPool::new(config.workers, task_handler)?);

        Ok(Self {
            config,
            pool,
            access_log,
            stop: Arc::new(AtomicBool::new(false)),
            local_addr: Arc::new(Mutex::new(None)),
        })
    }

    /// Obtiene un handle para detener el servidor desde otro thread
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            stop: Arc::clone(&self.stop),
            local_addr: Arc::clone(&self.local_addr),
        }
    }

    /// Hace bind en la dirección configurada y sirve hasta el stop
    pub fn run(&self) -> io::Result<()> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);
        println!("[*] Pool de workers: {}\n", self.config.workers);

        self.serve(listener)
    }

    /// Loop de aceptación sobre un listener ya creado
    ///
    /// Por cada conexión aceptada encola un `Task`. Los errores de accept
    /// transitorios se registran y se continúa; un error fatal del listener
    /// detiene el loop e inicia el shutdown graceful del pool (y se
    /// propaga: es la única clase de error que termina el proceso).
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        // Publicar la dirección real (relevante con puerto 0)
        *self.local_addr.lock().unwrap() = listener.local_addr().ok();

        loop {
            match listener.accept() {
                Ok((stream, peer)) => {
                    if self.stop.load(Ordering::SeqCst) {
                        // Conexión de cortesía del stop handle (o un
                        // cliente tardío): se descarta y se pasa a drenar
                        drop(stream);
                        break;
                    }

                    println!("   ✅ Nueva conexión desde: {}", peer);

                    if let Err(rejected) = self.pool.enqueue(Task::new(stream, peer)) {
                        // El pool ya no acepta: cerrar la conexión aquí
                        // para no filtrar el descriptor
                        eprintln!("   ❌ Pool detenido, cerrando conexión de {}", peer);
                        rejected.close();
                    }
                }
                Err(e) if is_transient(&e) => {
                    eprintln!("   ❌ Error transitorio al aceptar conexión: {}", e);
                }
                Err(e) => {
                    eprintln!("💥 Error fatal del listener: {}", e);
                    self.pool.shutdown(ShutdownMode::Graceful);
                    return Err(e);
                }
            }
        }

        println!("\n[*] Stop recibido: drenando tareas pendientes...");
        self.pool.shutdown(ShutdownMode::Graceful);

        println!("[+] Servidor detenido. Resumen:");
        println!("{}", self.access_log.summary_json());

        Ok(())
    }

    /// Acceso al access log (para inspección y tests)
    pub fn access_log(&self) -> &AccessLog {
        &self.access_log
    }

    /// Acceso al pool (para inspección y tests)
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }
}

/// Clasifica errores de accept que no comprometen el listener
///
/// Un handshake abortado por el cliente o una interrupción no son motivo
/// para apagar el servidor; cualquier otro error del listener sí lo es.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
    )
}
