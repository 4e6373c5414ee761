use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sprint capacity metadata attached to a summary row by the registry
/// join. `None` when the history names a sprint the registry never saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintMeta {
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub personas_qa: u32,
    pub personas_dev: u32,
    pub dias_efectivos: u32,
}

/// One aggregate row per sprint name appearing in the history.
///
/// Sprints with no history rows do not appear at all; the join against the
/// registry only decorates groups the history produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintSummary {
    pub sprint: String,
    /// Distinct request IDs seen for this sprint.
    pub total_solicitudes: usize,
    /// History rows with the carryover flag set.
    pub total_carryover: usize,
    pub puntos_qa: u32,
    pub puntos_dev: u32,
    pub puntos_finales: u32,
    pub compromiso_qa: usize,
    pub compromiso_dev: usize,
    pub compromiso_ambos: usize,
    /// Mean resolution hours over all rows in the group; rows without a
    /// value contribute 0 to the numerator and still count in the
    /// denominator.
    pub media_horas_resolucion: f64,
    pub meta: Option<SprintMeta>,
}
