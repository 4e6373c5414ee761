//! Per-sprint summaries derived from the change history.

use std::collections::BTreeMap;

use sprintdesk_core::history::HistoryEntry;
use sprintdesk_core::request::Commitment;
use sprintdesk_core::sprint::Sprint;
use sprintdesk_core::summary::{SprintMeta, SprintSummary};

#[derive(Default)]
struct Group {
    rows: usize,
    carryover: usize,
    puntos_qa: u32,
    puntos_dev: u32,
    puntos_finales: u32,
    compromiso_qa: usize,
    compromiso_dev: usize,
    compromiso_ambos: usize,
    horas: f64,
}

/// Reduce a (possibly filtered) history slice to the latest snapshot per
/// request ID, group by sprint name, and compute the summary columns,
/// decorated with registry metadata.
///
/// Later rows win the reduction (the ledger is append-only, so row order
/// is change order); a request that moved sprints counts only in its
/// latest one. Only sprint names present in the history appear: a
/// registered sprint with no history rows produces no summary row. The
/// mean resolution time divides by all rows in the group, counting
/// missing values as zero.
pub fn summarize(history: &[&HistoryEntry], sprints: &[Sprint]) -> Vec<SprintSummary> {
    let mut latest: BTreeMap<u32, &HistoryEntry> = BTreeMap::new();
    for entry in history {
        latest.insert(entry.id, entry);
    }

    let mut groups: BTreeMap<String, Group> = BTreeMap::new();
    for entry in latest.values() {
        let group = groups.entry(entry.sprint.clone()).or_default();
        group.rows += 1;
        if entry.carryover {
            group.carryover += 1;
        }
        group.puntos_qa += entry.puntos_qa.value();
        group.puntos_dev += entry.puntos_dev.value();
        group.puntos_finales += entry.puntos_finales.value();
        match entry.compromiso {
            Commitment::Qa => group.compromiso_qa += 1,
            Commitment::Dev => group.compromiso_dev += 1,
            Commitment::Both => group.compromiso_ambos += 1,
        }
        group.horas += entry.horas_resolucion.unwrap_or(0.0);
    }

    groups
        .into_iter()
        .map(|(sprint, g)| {
            // First registry entry with a matching name wins when the
            // registry holds duplicates.
            let meta = sprints.iter().find(|s| s.nombre == sprint).map(|s| SprintMeta {
                fecha_inicio: s.fecha_inicio,
                fecha_fin: s.fecha_fin,
                personas_qa: s.personas_qa,
                personas_dev: s.personas_dev,
                dias_efectivos: s.dias_efectivos,
            });
            SprintSummary {
                sprint,
                total_solicitudes: g.rows,
                total_carryover: g.carryover,
                puntos_qa: g.puntos_qa,
                puntos_dev: g.puntos_dev,
                puntos_finales: g.puntos_finales,
                compromiso_qa: g.compromiso_qa,
                compromiso_dev: g.compromiso_dev,
                compromiso_ambos: g.compromiso_ambos,
                media_horas_resolucion: if g.rows == 0 {
                    0.0
                } else {
                    g.horas / g.rows as f64
                },
                meta,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sprintdesk_core::history::ChangeKind;
    use sprintdesk_core::points::Points;
    use sprintdesk_core::request::{RequestStatus, RequestType};

    fn entry(id: u32, sprint: &str) -> HistoryEntry {
        HistoryEntry {
            id,
            fecha_cambio: "2024-03-05 10:00:00".into(),
            cambio: ChangeKind::New,
            descripcion: String::new(),
            tipo: RequestType::UserStory,
            estado: RequestStatus::DevBacklog,
            fecha_movimiento: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            sprint: sprint.into(),
            carryover: false,
            puntos_qa: Points::Na,
            puntos_dev: Points::Na,
            puntos_finales: Points::Na,
            compromiso: Commitment::Dev,
            historia_relacionada: String::new(),
            horas_resolucion: None,
        }
    }

    #[test]
    fn qa_points_sum_treats_na_as_zero() {
        let mut a = entry(1, "Sprint 1");
        a.puntos_qa = Points::Three;
        let mut b = entry(2, "Sprint 1");
        b.puntos_qa = Points::Na;
        let mut c = entry(3, "Sprint 1");
        c.puntos_qa = Points::Five;

        let rows = [&a, &b, &c];
        let out = summarize(&rows, &[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].puntos_qa, 8);
    }

    #[test]
    fn latest_snapshot_per_id_wins() {
        let mut created = entry(1, "Sprint 1");
        created.puntos_qa = Points::Three;
        let mut updated = entry(1, "Sprint 1");
        updated.cambio = ChangeKind::Modified;
        updated.puntos_qa = Points::Three;
        updated.carryover = true;

        let rows = [&created, &updated];
        let out = summarize(&rows, &[]);
        assert_eq!(out[0].total_solicitudes, 1);
        assert_eq!(out[0].total_carryover, 1);
        // Points are not double-counted across snapshots.
        assert_eq!(out[0].puntos_qa, 3);
    }

    #[test]
    fn request_that_moved_sprints_counts_in_latest() {
        let created = entry(1, "Sprint 1");
        let mut moved = entry(1, "Sprint 2");
        moved.cambio = ChangeKind::Modified;

        let rows = [&created, &moved];
        let out = summarize(&rows, &[]);
        let names: Vec<&str> = out.iter().map(|s| s.sprint.as_str()).collect();
        assert_eq!(names, vec!["Sprint 2"]);
    }

    #[test]
    fn commitment_counts_per_category() {
        let mut a = entry(1, "Sprint 1");
        a.compromiso = Commitment::Qa;
        let mut b = entry(2, "Sprint 1");
        b.compromiso = Commitment::Both;
        let c = entry(3, "Sprint 1");

        let rows = [&a, &b, &c];
        let out = summarize(&rows, &[]);
        assert_eq!(out[0].compromiso_qa, 1);
        assert_eq!(out[0].compromiso_dev, 1);
        assert_eq!(out[0].compromiso_ambos, 1);
    }

    #[test]
    fn mean_hours_counts_missing_as_zero() {
        let mut a = entry(1, "Sprint 1");
        a.horas_resolucion = Some(6.0);
        let b = entry(2, "Sprint 1");
        let c = entry(3, "Sprint 1");

        let rows = [&a, &b, &c];
        let out = summarize(&rows, &[]);
        assert!((out[0].media_horas_resolucion - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn registry_join_is_left_outer_from_history() {
        let a = entry(1, "Sprint 1");
        let b = entry(2, "Sprint X");
        let sprints = vec![
            Sprint {
                nombre: "Sprint 1".into(),
                fecha_inicio: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                fecha_fin: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
                personas_qa: 2,
                personas_dev: 3,
                dias_efectivos: 10,
            },
            // Registered but never touched: must not appear.
            Sprint {
                nombre: "Sprint 2".into(),
                fecha_inicio: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                fecha_fin: NaiveDate::from_ymd_opt(2024, 3, 28).unwrap(),
                personas_qa: 1,
                personas_dev: 2,
                dias_efectivos: 9,
            },
        ];

        let rows = [&a, &b];
        let out = summarize(&rows, &sprints);
        let names: Vec<&str> = out.iter().map(|s| s.sprint.as_str()).collect();
        assert_eq!(names, vec!["Sprint 1", "Sprint X"]);
        assert_eq!(out[0].meta.as_ref().unwrap().personas_qa, 2);
        assert!(out[1].meta.is_none());
    }

    #[test]
    fn groups_emitted_in_name_order() {
        let a = entry(1, "Sprint 2");
        let b = entry(2, "Sprint 1");
        let rows = [&a, &b];
        let out = summarize(&rows, &[]);
        let names: Vec<&str> = out.iter().map(|s| s.sprint.as_str()).collect();
        assert_eq!(names, vec!["Sprint 1", "Sprint 2"]);
    }
}
