// End-to-end flows against a tempdir-backed repository: create/update
// with history append, error paths that must not mutate, and the summary
// pipeline.

use chrono::{NaiveDate, NaiveDateTime};

use sprintdesk_core::history::{ChangeKind, HistoryFilter};
use sprintdesk_core::points::Points;
use sprintdesk_core::request::{
    Commitment, CreateRequest, RequestFilter, RequestStatus, RequestType, UpdateRequest,
};
use sprintdesk_core::sprint::CreateSprint;
use sprintdesk_db::Db;
use sprintdesk_service::views::{filter_history, filter_requests};
use sprintdesk_service::{summarize, Repository, ServiceError};

fn open(dir: &std::path::Path) -> Repository {
    Repository::open(Db::open(dir).unwrap()).unwrap()
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn sprint_one() -> CreateSprint {
    CreateSprint {
        nombre: "Sprint 1".into(),
        fecha_inicio: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        fecha_fin: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
        personas_qa: 2,
        personas_dev: 3,
        dias_efectivos: 10,
    }
}

fn defect_request(id: u32) -> CreateRequest {
    CreateRequest {
        id,
        descripcion: "Pago duplicado".into(),
        tipo: RequestType::Defect,
        estado: RequestStatus::InDevelopment,
        fecha_movimiento: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        sprint: "Sprint 1".into(),
        carryover: false,
        puntos_qa: Points::Three,
        puntos_dev: Points::Five,
        puntos_finales: Points::Eight,
        compromiso: Commitment::Both,
        historia_relacionada: "HU-12".into(),
        horas_resolucion: Some(3.0),
    }
}

#[test]
fn create_appends_one_row_and_one_new_entry_persisted() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    repo.create_sprint(sprint_one()).unwrap();
    repo.create_request_at(defect_request(1), at(9, 0, 0)).unwrap();

    assert_eq!(repo.requests().len(), 1);
    assert_eq!(repo.history().len(), 1);
    assert_eq!(repo.history()[0].cambio, ChangeKind::New);
    assert_eq!(repo.history()[0].fecha_cambio, "2024-03-05 09:00:00");

    // Reopen: both tables must have hit the disk.
    let reopened = open(tmp.path());
    assert_eq!(reopened.requests().len(), 1);
    assert_eq!(reopened.history().len(), 1);
    assert_eq!(reopened.requests()[0], *repo.requests().first().unwrap());
}

#[test]
fn duplicate_id_rejected_without_mutation() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    repo.create_request_at(defect_request(1), at(9, 0, 0)).unwrap();
    let err = repo
        .create_request_at(defect_request(1), at(9, 5, 0))
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(repo.requests().len(), 1);
    assert_eq!(repo.history().len(), 1);

    let reopened = open(tmp.path());
    assert_eq!(reopened.requests().len(), 1);
    assert_eq!(reopened.history().len(), 1);
}

#[test]
fn update_unknown_id_is_not_found_without_mutation() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    let err = repo
        .update_request_at(
            99,
            UpdateRequest {
                estado: RequestStatus::QaTesting,
                fecha_movimiento: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
                sprint: "Sprint 1".into(),
                carryover: true,
                puntos_qa: Points::Na,
                puntos_dev: Points::Na,
                puntos_finales: Points::Na,
                compromiso: Commitment::Dev,
                historia_relacionada: String::new(),
                horas_resolucion: None,
            },
            at(10, 0, 0),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(repo.requests().is_empty());
    assert!(repo.history().is_empty());
}

#[test]
fn update_appends_exactly_one_modified_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    repo.create_request_at(defect_request(1), at(9, 0, 0)).unwrap();
    repo.update_request_at(
        1,
        UpdateRequest {
            estado: RequestStatus::QaTesting,
            fecha_movimiento: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            sprint: "Sprint 1".into(),
            carryover: true,
            puntos_qa: Points::Three,
            puntos_dev: Points::Five,
            puntos_finales: Points::Eight,
            compromiso: Commitment::Both,
            historia_relacionada: "HU-12".into(),
            horas_resolucion: Some(4.0),
        },
        at(11, 30, 0),
    )
    .unwrap();

    assert_eq!(repo.requests().len(), 1);
    assert_eq!(repo.history().len(), 2);
    let last = repo.history().last().unwrap();
    assert_eq!(last.cambio, ChangeKind::Modified);
    // Snapshot carries the post-update values.
    assert_eq!(last.estado, RequestStatus::QaTesting);
    assert!(last.carryover);
    assert_eq!(last.horas_resolucion, Some(4.0));
    // Immutable fields survive untouched.
    assert_eq!(repo.requests()[0].descripcion, "Pago duplicado");
    assert_eq!(repo.requests()[0].tipo, RequestType::Defect);
}

#[test]
fn filters_and_together_and_absent_filter_is_noop() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    let mut a = defect_request(1);
    a.sprint = "Sprint 3".into();
    a.estado = RequestStatus::QaTesting;
    let mut b = defect_request(2);
    b.sprint = "Sprint 3".into();
    b.estado = RequestStatus::DevBacklog;
    let mut c = defect_request(3);
    c.sprint = "Sprint 4".into();
    c.estado = RequestStatus::QaTesting;
    repo.create_request_at(a, at(9, 0, 0)).unwrap();
    repo.create_request_at(b, at(9, 1, 0)).unwrap();
    repo.create_request_at(c, at(9, 2, 0)).unwrap();

    let filtered = filter_requests(
        repo.requests(),
        &RequestFilter {
            sprint: Some("Sprint 3".into()),
            estado: Some(RequestStatus::QaTesting),
            id_contains: None,
        },
    );
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 1);

    let all = filter_requests(repo.requests(), &RequestFilter::default());
    assert_eq!(all.len(), 3);
}

#[test]
fn history_date_range_filter_is_inclusive() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    repo.create_request_at(defect_request(1), at(9, 0, 0)).unwrap();
    let mut later = defect_request(2);
    later.fecha_movimiento = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    repo.create_request_at(
        later,
        NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    )
    .unwrap();

    let ranged = filter_history(
        repo.history(),
        &HistoryFilter {
            desde: Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            hasta: Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            ..Default::default()
        },
    );
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].id, 1);
}

#[test]
fn end_to_end_summary_matches_contract() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    repo.create_sprint(sprint_one()).unwrap();
    let mut request = defect_request(1);
    request.carryover = false;
    request.puntos_qa = Points::Three;
    request.puntos_dev = Points::Five;
    repo.create_request_at(request, at(9, 0, 0)).unwrap();
    repo.update_request_at(
        1,
        UpdateRequest {
            estado: RequestStatus::QaTesting,
            fecha_movimiento: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            sprint: "Sprint 1".into(),
            carryover: true,
            puntos_qa: Points::Three,
            puntos_dev: Points::Five,
            puntos_finales: Points::Eight,
            compromiso: Commitment::Both,
            historia_relacionada: "HU-12".into(),
            horas_resolucion: Some(3.0),
        },
        at(12, 0, 0),
    )
    .unwrap();

    let view = filter_history(repo.history(), &HistoryFilter::default());
    let summaries = summarize(&view, repo.sprints());
    assert_eq!(summaries.len(), 1);
    let s = &summaries[0];
    assert_eq!(s.sprint, "Sprint 1");
    assert_eq!(s.total_solicitudes, 1);
    assert_eq!(s.total_carryover, 1);
    assert_eq!(s.puntos_qa, 3);
    assert_eq!(s.puntos_dev, 5);
    let meta = s.meta.as_ref().unwrap();
    assert_eq!(meta.personas_qa, 2);
    assert_eq!(meta.personas_dev, 3);
    assert_eq!(meta.dias_efectivos, 10);
}

#[test]
fn sprint_with_zero_effective_days_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    let mut input = sprint_one();
    input.dias_efectivos = 0;
    let err = repo.create_sprint(input).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(repo.sprints().is_empty());
}

#[test]
fn duplicate_sprint_name_still_appends() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = open(tmp.path());

    repo.create_sprint(sprint_one()).unwrap();
    repo.create_sprint(sprint_one()).unwrap();
    assert_eq!(repo.sprints().len(), 2);
}
