use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::points::Points;
use crate::request::{Commitment, Request, RequestStatus, RequestType};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    New,
    Modified,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::New => "new",
            ChangeKind::Modified => "modified",
        }
    }

    pub fn wire_label(&self) -> &'static str {
        match self {
            ChangeKind::New => "New",
            ChangeKind::Modified => "Modified",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "new" | "New" => Some(ChangeKind::New),
            "modified" | "Modified" => Some(ChangeKind::Modified),
            _ => None,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

/// One append-only ledger row: a full snapshot of a request at the moment
/// of a create or update, plus the change timestamp and kind.
///
/// The timestamp is kept as the raw wire string so a malformed value in an
/// existing file survives load/save round-trips; date-range filters drop
/// rows it cannot parse, the underlying table keeps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u32,
    pub fecha_cambio: String,
    pub cambio: ChangeKind,
    pub descripcion: String,
    pub tipo: RequestType,
    pub estado: RequestStatus,
    pub fecha_movimiento: NaiveDate,
    pub sprint: String,
    pub carryover: bool,
    pub puntos_qa: Points,
    pub puntos_dev: Points,
    pub puntos_finales: Points,
    pub compromiso: Commitment,
    pub historia_relacionada: String,
    pub horas_resolucion: Option<f64>,
}

impl HistoryEntry {
    /// Snapshot a request as a ledger row.
    pub fn snapshot(request: &Request, at: NaiveDateTime, cambio: ChangeKind) -> Self {
        Self {
            id: request.id,
            fecha_cambio: at.format(TIMESTAMP_FORMAT).to_string(),
            cambio,
            descripcion: request.descripcion.clone(),
            tipo: request.tipo,
            estado: request.estado,
            fecha_movimiento: request.fecha_movimiento,
            sprint: request.sprint.clone(),
            carryover: request.carryover,
            puntos_qa: request.puntos_qa,
            puntos_dev: request.puntos_dev,
            puntos_finales: request.puntos_finales,
            compromiso: request.compromiso,
            historia_relacionada: request.historia_relacionada.clone(),
            horas_resolucion: request.horas_resolucion,
        }
    }

    pub fn parsed_fecha_cambio(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.fecha_cambio, TIMESTAMP_FORMAT).ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub sprint: Option<String>,
    pub estado: Option<RequestStatus>,
    pub id_contains: Option<String>,
    /// Inclusive date range on the change timestamp. A row whose timestamp
    /// does not parse is treated as out of range.
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        if let Some(ref sprint) = self.sprint {
            if &entry.sprint != sprint {
                return false;
            }
        }
        if let Some(estado) = self.estado {
            if entry.estado != estado {
                return false;
            }
        }
        if let Some(ref fragment) = self.id_contains {
            if !entry.id.to_string().contains(fragment.as_str()) {
                return false;
            }
        }
        if self.desde.is_some() || self.hasta.is_some() {
            let Some(ts) = entry.parsed_fecha_cambio() else {
                return false;
            };
            let day = ts.date();
            if let Some(desde) = self.desde {
                if day < desde {
                    return false;
                }
            }
            if let Some(hasta) = self.hasta {
                if day > hasta {
                    return false;
                }
            }
        }
        true
    }
}
