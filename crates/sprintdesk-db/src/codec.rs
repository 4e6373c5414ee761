//! On-disk schema and row codecs for the three tables.
//!
//! Column names and value labels are kept byte-for-byte stable
//! (localized headers, `Sí`/`No` booleans, `N/A` points) so existing
//! data files keep loading.

use chrono::NaiveDate;

use sprintdesk_core::history::{ChangeKind, HistoryEntry};
use sprintdesk_core::points::Points;
use sprintdesk_core::request::{Commitment, Request, RequestStatus, RequestType};
use sprintdesk_core::sprint::Sprint;

use crate::DbError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const SPRINTS_FILE: &str = "sprints.csv";
pub const REQUESTS_FILE: &str = "solicitudes.csv";
pub const HISTORY_FILE: &str = "historial.csv";

pub const SPRINT_COLUMNS: &[&str] = &[
    "Sprint",
    "Fecha Inicio",
    "Fecha Fin",
    "Personas QA",
    "Personas Dev",
    "Dias Efectivos",
];

pub const REQUEST_COLUMNS: &[&str] = &[
    "ID",
    "Solicitud",
    "Tipo",
    "Estado",
    "Fecha Movimiento",
    "Sprint",
    "Carryover",
    "Puntos_QA",
    "Puntos_Dev",
    "Puntos_Finales",
    "Compromiso",
    "Historia Relacionada",
    "Horas Resolucion",
];

pub const HISTORY_COLUMNS: &[&str] = &[
    "ID",
    "Fecha Cambio",
    "Tipo Cambio",
    "Solicitud",
    "Tipo",
    "Estado",
    "Fecha Movimiento",
    "Sprint",
    "Carryover",
    "Puntos_QA",
    "Puntos_Dev",
    "Puntos_Finales",
    "Compromiso",
    "Historia Relacionada",
    "Horas Resolucion",
];

fn decode_err(table: &str, row: usize, column: &str, value: &str) -> DbError {
    DbError::Decode {
        table: table.to_string(),
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn encode_bool(v: bool) -> String {
    if v { "Sí" } else { "No" }.to_string()
}

fn decode_bool(table: &str, row: usize, column: &str, v: &str) -> Result<bool, DbError> {
    match v.trim() {
        "Sí" | "Si" | "sí" | "si" => Ok(true),
        "No" | "no" | "" => Ok(false),
        other => Err(decode_err(table, row, column, other)),
    }
}

fn encode_hours(v: Option<f64>) -> String {
    match v {
        Some(h) => h.to_string(),
        None => String::new(),
    }
}

fn decode_hours(table: &str, row: usize, column: &str, v: &str) -> Result<Option<f64>, DbError> {
    let trimmed = v.trim();
    if trimmed.is_empty() || trimmed == "N/A" {
        return Ok(None);
    }
    let hours: f64 = trimmed
        .parse()
        .map_err(|_| decode_err(table, row, column, trimmed))?;
    if hours < 0.0 {
        return Err(decode_err(table, row, column, trimmed));
    }
    Ok(Some(hours))
}

fn decode_date(table: &str, row: usize, column: &str, v: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(v.trim(), DATE_FORMAT)
        .map_err(|_| decode_err(table, row, column, v))
}

fn decode_u32(table: &str, row: usize, column: &str, v: &str) -> Result<u32, DbError> {
    v.trim()
        .parse()
        .map_err(|_| decode_err(table, row, column, v))
}

fn decode_points(table: &str, row: usize, column: &str, v: &str) -> Result<Points, DbError> {
    Points::parse_str(v).ok_or_else(|| decode_err(table, row, column, v))
}

pub fn sprint_to_row(s: &Sprint) -> Vec<String> {
    vec![
        s.nombre.clone(),
        s.fecha_inicio.format(DATE_FORMAT).to_string(),
        s.fecha_fin.format(DATE_FORMAT).to_string(),
        s.personas_qa.to_string(),
        s.personas_dev.to_string(),
        s.dias_efectivos.to_string(),
    ]
}

/// Decode one `SPRINT_COLUMNS`-shaped row.
pub fn row_to_sprint(row: &[String], idx: usize) -> Result<Sprint, DbError> {
    let t = SPRINTS_FILE;
    Ok(Sprint {
        nombre: row[0].clone(),
        fecha_inicio: decode_date(t, idx, "Fecha Inicio", &row[1])?,
        fecha_fin: decode_date(t, idx, "Fecha Fin", &row[2])?,
        personas_qa: decode_u32(t, idx, "Personas QA", &row[3])?,
        personas_dev: decode_u32(t, idx, "Personas Dev", &row[4])?,
        dias_efectivos: decode_u32(t, idx, "Dias Efectivos", &row[5])?,
    })
}

pub fn request_to_row(r: &Request) -> Vec<String> {
    vec![
        r.id.to_string(),
        r.descripcion.clone(),
        r.tipo.wire_label().to_string(),
        r.estado.wire_label().to_string(),
        r.fecha_movimiento.format(DATE_FORMAT).to_string(),
        r.sprint.clone(),
        encode_bool(r.carryover),
        r.puntos_qa.as_str().to_string(),
        r.puntos_dev.as_str().to_string(),
        r.puntos_finales.as_str().to_string(),
        r.compromiso.wire_label().to_string(),
        r.historia_relacionada.clone(),
        encode_hours(r.horas_resolucion),
    ]
}

/// Decode one `REQUEST_COLUMNS`-shaped row.
pub fn row_to_request(row: &[String], idx: usize) -> Result<Request, DbError> {
    let t = REQUESTS_FILE;
    Ok(Request {
        id: decode_u32(t, idx, "ID", &row[0])?,
        descripcion: row[1].clone(),
        tipo: RequestType::parse_str(row[2].trim())
            .ok_or_else(|| decode_err(t, idx, "Tipo", &row[2]))?,
        estado: RequestStatus::parse_str(row[3].trim())
            .ok_or_else(|| decode_err(t, idx, "Estado", &row[3]))?,
        fecha_movimiento: decode_date(t, idx, "Fecha Movimiento", &row[4])?,
        sprint: row[5].clone(),
        carryover: decode_bool(t, idx, "Carryover", &row[6])?,
        puntos_qa: decode_points(t, idx, "Puntos_QA", &row[7])?,
        puntos_dev: decode_points(t, idx, "Puntos_Dev", &row[8])?,
        puntos_finales: decode_points(t, idx, "Puntos_Finales", &row[9])?,
        compromiso: Commitment::parse_str(row[10].trim())
            .ok_or_else(|| decode_err(t, idx, "Compromiso", &row[10]))?,
        historia_relacionada: row[11].clone(),
        horas_resolucion: decode_hours(t, idx, "Horas Resolucion", &row[12])?,
    })
}

pub fn history_to_row(e: &HistoryEntry) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.fecha_cambio.clone(),
        e.cambio.wire_label().to_string(),
        e.descripcion.clone(),
        e.tipo.wire_label().to_string(),
        e.estado.wire_label().to_string(),
        e.fecha_movimiento.format(DATE_FORMAT).to_string(),
        e.sprint.clone(),
        encode_bool(e.carryover),
        e.puntos_qa.as_str().to_string(),
        e.puntos_dev.as_str().to_string(),
        e.puntos_finales.as_str().to_string(),
        e.compromiso.wire_label().to_string(),
        e.historia_relacionada.clone(),
        encode_hours(e.horas_resolucion),
    ]
}

/// Decode one `HISTORY_COLUMNS`-shaped row. The change timestamp is kept
/// raw; everything else decodes strictly.
pub fn row_to_history(row: &[String], idx: usize) -> Result<HistoryEntry, DbError> {
    let t = HISTORY_FILE;
    Ok(HistoryEntry {
        id: decode_u32(t, idx, "ID", &row[0])?,
        fecha_cambio: row[1].clone(),
        cambio: ChangeKind::parse_str(row[2].trim())
            .ok_or_else(|| decode_err(t, idx, "Tipo Cambio", &row[2]))?,
        descripcion: row[3].clone(),
        tipo: RequestType::parse_str(row[4].trim())
            .ok_or_else(|| decode_err(t, idx, "Tipo", &row[4]))?,
        estado: RequestStatus::parse_str(row[5].trim())
            .ok_or_else(|| decode_err(t, idx, "Estado", &row[5]))?,
        fecha_movimiento: decode_date(t, idx, "Fecha Movimiento", &row[6])?,
        sprint: row[7].clone(),
        carryover: decode_bool(t, idx, "Carryover", &row[8])?,
        puntos_qa: decode_points(t, idx, "Puntos_QA", &row[9])?,
        puntos_dev: decode_points(t, idx, "Puntos_Dev", &row[10])?,
        puntos_finales: decode_points(t, idx, "Puntos_Finales", &row[11])?,
        compromiso: Commitment::parse_str(row[12].trim())
            .ok_or_else(|| decode_err(t, idx, "Compromiso", &row[12]))?,
        historia_relacionada: row[13].clone(),
        horas_resolucion: decode_hours(t, idx, "Horas Resolucion", &row[14])?,
    })
}
