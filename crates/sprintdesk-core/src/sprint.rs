use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named iteration with capacity metadata. Create-only: sprints are
/// never updated or deleted. Names are not enforced unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub nombre: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub personas_qa: u32,
    pub personas_dev: u32,
    pub dias_efectivos: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSprint {
    pub nombre: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub personas_qa: u32,
    pub personas_dev: u32,
    pub dias_efectivos: u32,
}
