//! # Access Log
//! src/logging.rs
//!
//! Registro de requests atendidos, compartido entre todos los workers.
//!
//! `record` es fire-and-forget: imprime una línea por request y acumula
//! contadores, y nunca falla hacia el handler. La respuesta ya se escribió
//! cuando se registra; un problema del log no puede afectarla.

use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Access log thread-safe
#[derive(Clone)]
pub struct AccessLog {
    inner: Arc<Mutex<AccessLogData>>,
    start_time: Instant,
}

/// Datos internos del access log
struct AccessLogData {
    /// Contador total de requests
    total_requests: u64,

    /// Requests por código de estado
    status_codes: HashMap<u16, u64>,

    /// Requests por ruta
    requests_per_path: HashMap<String, u64>,
}

impl AccessLog {
    /// Crea un access log vacío
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AccessLogData {
                total_requests: 0,
                status_codes: HashMap::new(),
                requests_per_path: HashMap::new(),
            })),
            start_time: Instant::now(),
        }
    }

    /// Registra un request atendido
    ///
    /// Fire-and-forget: imprime la línea de acceso y actualiza los
    /// contadores. Si el mutex está envenenado se omite la actualización
    /// en silencio; el log nunca propaga un fallo al caller.
    pub fn record(&self, client: SocketAddr, method: &str, path: &str, status: u16) {
        println!("   📄 {} \"{} {}\" -> {}", client, method, path, status);

        if let Ok(mut data) = self.inner.lock() {
            data.total_requests += 1;
            *data.status_codes.entry(status).or_insert(0) += 1;
            *data.requests_per_path.entry(path.to_string()).or_insert(0) += 1;
        }
    }

    /// Obtiene un snapshot de los contadores
    pub fn snapshot(&self) -> AccessLogSnapshot {
        let data = self.inner.lock().unwrap();

        AccessLogSnapshot {
            total_requests: data.total_requests,
            uptime_secs: self.start_time.elapsed().as_secs(),
            status_codes: data.status_codes.clone(),
            requests_per_path: data.requests_per_path.clone(),
        }
    }

    /// Resumen en JSON, para imprimir al detener el servidor
    pub fn summary_json(&self) -> String {
        let snapshot = self.snapshot();
        serde_json::to_string_pretty(&snapshot)
            .unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for AccessLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot de los contadores del access log
#[derive(Debug, Clone, Serialize)]
pub struct AccessLogSnapshot {
    pub total_requests: u64,
    pub uptime_secs: u64,
    pub status_codes: HashMap<u16, u64>,
    pub requests_per_path: HashMap<String, u64>,
}
