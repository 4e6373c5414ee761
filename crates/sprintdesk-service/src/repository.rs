use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use sprintdesk_core::history::{ChangeKind, HistoryEntry};
use sprintdesk_core::request::{CreateRequest, Request, UpdateRequest};
use sprintdesk_core::sprint::{CreateSprint, Sprint};
use sprintdesk_db::Db;

use crate::ServiceError;

/// Owns the three in-memory tables; `Db` is its only I/O boundary.
///
/// Opening loads everything from disk in full; each mutation applies in
/// memory and rewrites the touched tables in full. There is no locking:
/// two processes on the same data directory can lose an update (last
/// writer wins).
pub struct Repository {
    db: Db,
    sprints: Vec<Sprint>,
    requests: Vec<Request>,
    history: Vec<HistoryEntry>,
}

impl Repository {
    pub fn open(db: Db) -> Result<Self, ServiceError> {
        let sprints = db.load_sprints()?;
        let requests = db.load_requests()?;
        let history = db.load_history()?;
        Ok(Self {
            db,
            sprints,
            requests,
            history,
        })
    }

    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Append a sprint unconditionally. Names are not unique and the date
    /// order is not checked; both conditions only warn.
    pub fn create_sprint(&mut self, input: CreateSprint) -> Result<Sprint, ServiceError> {
        if input.dias_efectivos == 0 {
            return Err(ServiceError::InvalidInput(
                "effective days must be at least 1".into(),
            ));
        }
        if self.sprints.iter().any(|s| s.nombre == input.nombre) {
            warn!("sprint {:?} already registered, appending anyway", input.nombre);
        }
        if input.fecha_fin < input.fecha_inicio {
            warn!(
                "sprint {:?} ends ({}) before it starts ({})",
                input.nombre, input.fecha_fin, input.fecha_inicio
            );
        }
        let sprint = Sprint {
            nombre: input.nombre,
            fecha_inicio: input.fecha_inicio,
            fecha_fin: input.fecha_fin,
            personas_qa: input.personas_qa,
            personas_dev: input.personas_dev,
            dias_efectivos: input.dias_efectivos,
        };
        self.sprints.push(sprint.clone());
        self.db.save_sprints(&self.sprints)?;
        info!("sprint {:?} registered", sprint.nombre);
        Ok(sprint)
    }

    pub fn create_request(&mut self, input: CreateRequest) -> Result<Request, ServiceError> {
        self.create_request_at(input, Local::now().naive_local())
    }

    /// Create with an explicit timestamp for the history snapshot.
    pub fn create_request_at(
        &mut self,
        input: CreateRequest,
        at: NaiveDateTime,
    ) -> Result<Request, ServiceError> {
        if self.requests.iter().any(|r| r.id == input.id) {
            return Err(ServiceError::InvalidInput(format!(
                "request ID {} already exists; use update instead",
                input.id
            )));
        }
        self.warn_dangling_sprint(&input.sprint);

        let request = Request {
            id: input.id,
            descripcion: input.descripcion,
            tipo: input.tipo,
            estado: input.estado,
            fecha_movimiento: input.fecha_movimiento,
            sprint: input.sprint,
            carryover: input.carryover,
            puntos_qa: input.puntos_qa,
            puntos_dev: input.puntos_dev,
            puntos_finales: input.puntos_finales,
            compromiso: input.compromiso,
            historia_relacionada: input.historia_relacionada,
            horas_resolucion: input.horas_resolucion,
        };
        self.history
            .push(HistoryEntry::snapshot(&request, at, ChangeKind::New));
        self.requests.push(request.clone());
        self.db.save_requests(&self.requests)?;
        self.db.save_history(&self.history)?;
        info!("request {} created", request.id);
        Ok(request)
    }

    pub fn update_request(
        &mut self,
        id: u32,
        update: UpdateRequest,
    ) -> Result<Request, ServiceError> {
        self.update_request_at(id, update, Local::now().naive_local())
    }

    /// Whole-row replace: every mutable field is overwritten and exactly
    /// one `Modified` snapshot of the post-update row is appended.
    /// Description and type stay as created.
    pub fn update_request_at(
        &mut self,
        id: u32,
        update: UpdateRequest,
        at: NaiveDateTime,
    ) -> Result<Request, ServiceError> {
        let Some(idx) = self.requests.iter().position(|r| r.id == id) else {
            return Err(ServiceError::NotFound(format!("request {id}")));
        };
        self.warn_dangling_sprint(&update.sprint);

        {
            let request = &mut self.requests[idx];
            request.estado = update.estado;
            request.fecha_movimiento = update.fecha_movimiento;
            request.sprint = update.sprint;
            request.carryover = update.carryover;
            request.puntos_qa = update.puntos_qa;
            request.puntos_dev = update.puntos_dev;
            request.puntos_finales = update.puntos_finales;
            request.compromiso = update.compromiso;
            request.historia_relacionada = update.historia_relacionada;
            request.horas_resolucion = update.horas_resolucion;
        }
        let updated = self.requests[idx].clone();
        self.history
            .push(HistoryEntry::snapshot(&updated, at, ChangeKind::Modified));
        self.db.save_requests(&self.requests)?;
        self.db.save_history(&self.history)?;
        info!("request {id} updated");
        Ok(updated)
    }

    fn warn_dangling_sprint(&self, sprint: &str) {
        if !sprint.is_empty() && !self.sprints.iter().any(|s| s.nombre == sprint) {
            warn!("sprint {sprint:?} is not in the registry");
        }
    }
}
