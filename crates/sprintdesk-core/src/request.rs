use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SprintdeskError;
use crate::points::Points;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    UserStory,
    TechnicalDebt,
    Defect,
}

impl RequestType {
    pub const ALL: &[RequestType] = &[
        RequestType::UserStory,
        RequestType::TechnicalDebt,
        RequestType::Defect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::UserStory => "user_story",
            RequestType::TechnicalDebt => "technical_debt",
            RequestType::Defect => "defect",
        }
    }

    /// Label as stored in the CSV files.
    pub fn wire_label(&self) -> &'static str {
        match self {
            RequestType::UserStory => "User Story",
            RequestType::TechnicalDebt => "Technical Debt",
            RequestType::Defect => "Defect",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "user_story" | "User Story" => Some(RequestType::UserStory),
            "technical_debt" | "Technical Debt" => Some(RequestType::TechnicalDebt),
            "defect" | "Defect" => Some(RequestType::Defect),
            _ => None,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

/// Status pipeline, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    ToPrioritize,
    DevBacklog,
    InDevelopment,
    QaTesting,
    AcceptanceTesting,
}

impl RequestStatus {
    pub const ALL: &[RequestStatus] = &[
        RequestStatus::ToPrioritize,
        RequestStatus::DevBacklog,
        RequestStatus::InDevelopment,
        RequestStatus::QaTesting,
        RequestStatus::AcceptanceTesting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::ToPrioritize => "to_prioritize",
            RequestStatus::DevBacklog => "dev_backlog",
            RequestStatus::InDevelopment => "in_development",
            RequestStatus::QaTesting => "qa_testing",
            RequestStatus::AcceptanceTesting => "acceptance_testing",
        }
    }

    /// Localized label as stored in the CSV files, kept byte-for-byte
    /// stable for compatibility with existing data files.
    pub fn wire_label(&self) -> &'static str {
        match self {
            RequestStatus::ToPrioritize => "Por priorizar",
            RequestStatus::DevBacklog => "Backlog Dev",
            RequestStatus::InDevelopment => "En desarrollo",
            RequestStatus::QaTesting => "Pruebas QA",
            RequestStatus::AcceptanceTesting => "Pruebas de aceptación",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::ToPrioritize => "To prioritize",
            RequestStatus::DevBacklog => "Dev backlog",
            RequestStatus::InDevelopment => "In development",
            RequestStatus::QaTesting => "QA testing",
            RequestStatus::AcceptanceTesting => "Acceptance testing",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "to_prioritize" | "Por priorizar" => Some(RequestStatus::ToPrioritize),
            "dev_backlog" | "Backlog Dev" => Some(RequestStatus::DevBacklog),
            "in_development" | "En desarrollo" => Some(RequestStatus::InDevelopment),
            "qa_testing" | "Pruebas QA" => Some(RequestStatus::QaTesting),
            "acceptance_testing" | "Pruebas de aceptación" => {
                Some(RequestStatus::AcceptanceTesting)
            }
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which side of the team the sprint work is committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commitment {
    Dev,
    Qa,
    Both,
}

impl Commitment {
    pub const ALL: &[Commitment] = &[Commitment::Dev, Commitment::Qa, Commitment::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Dev => "dev",
            Commitment::Qa => "qa",
            Commitment::Both => "both",
        }
    }

    pub fn wire_label(&self) -> &'static str {
        match self {
            Commitment::Dev => "Dev",
            Commitment::Qa => "QA",
            Commitment::Both => "Ambos",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "dev" | "Dev" => Some(Commitment::Dev),
            "qa" | "QA" => Some(Commitment::Qa),
            "both" | "Ambos" | "Both" => Some(Commitment::Both),
            _ => None,
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: u32,
    pub descripcion: String,
    pub tipo: RequestType,
    pub estado: RequestStatus,
    pub fecha_movimiento: NaiveDate,
    /// Sprint-name reference into the registry; may be empty, never
    /// validated (dangling references are possible).
    pub sprint: String,
    pub carryover: bool,
    pub puntos_qa: Points,
    pub puntos_dev: Points,
    pub puntos_finales: Points,
    pub compromiso: Commitment,
    /// Populated only when `tipo` is `Defect`.
    pub historia_relacionada: String,
    /// Resolution time in hours; only meaningful for defects.
    pub horas_resolucion: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    pub id: u32,
    pub descripcion: String,
    pub tipo: RequestType,
    pub estado: RequestStatus,
    pub fecha_movimiento: NaiveDate,
    #[serde(default)]
    pub sprint: String,
    pub carryover: bool,
    pub puntos_qa: Points,
    pub puntos_dev: Points,
    pub puntos_finales: Points,
    pub compromiso: Commitment,
    #[serde(default)]
    pub historia_relacionada: String,
    #[serde(default)]
    pub horas_resolucion: Option<f64>,
}

/// Whole-row update: every mutable field is overwritten unconditionally.
/// `descripcion` and `tipo` are immutable after creation and have no
/// update surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub estado: RequestStatus,
    pub fecha_movimiento: NaiveDate,
    #[serde(default)]
    pub sprint: String,
    pub carryover: bool,
    pub puntos_qa: Points,
    pub puntos_dev: Points,
    pub puntos_finales: Points,
    pub compromiso: Commitment,
    #[serde(default)]
    pub historia_relacionada: String,
    #[serde(default)]
    pub horas_resolucion: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub sprint: Option<String>,
    pub estado: Option<RequestStatus>,
    /// Substring match on the ID rendered as text.
    pub id_contains: Option<String>,
}

impl RequestFilter {
    pub fn matches(&self, request: &Request) -> bool {
        if let Some(ref sprint) = self.sprint {
            if &request.sprint != sprint {
                return false;
            }
        }
        if let Some(estado) = self.estado {
            if request.estado != estado {
                return false;
            }
        }
        if let Some(ref fragment) = self.id_contains {
            if !request.id.to_string().contains(fragment.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Parse a request ID from raw form input: the text must be a
/// non-negative integer, anything else is a validation error.
pub fn parse_request_id(raw: &str) -> Result<u32, SprintdeskError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| SprintdeskError::InvalidInput(format!("ID must be a non-negative integer, got {trimmed:?}")))
}
