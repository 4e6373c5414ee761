mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use sprintdesk_core::history::{HistoryEntry, HistoryFilter};
use sprintdesk_core::request::{parse_request_id, CreateRequest, Request, RequestFilter, UpdateRequest};
use sprintdesk_core::sprint::{CreateSprint, Sprint};
use sprintdesk_core::summary::SprintSummary;
use sprintdesk_db::Db;
use sprintdesk_service::views::{filter_history, filter_requests, sort_history_desc};
use sprintdesk_service::{summarize, Repository};

use crate::args::{Cli, Command, FilterArgs, RequestCommand, SprintCommand};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let db = match &cli.data_dir {
        Some(dir) => Db::open(dir)?,
        None => Db::open_default()?,
    };
    info!("data dir: {}", db.dir().display());
    let mut repo = Repository::open(db)?;

    match cli.command {
        Command::Sprint { command } => run_sprint(&mut repo, command)?,
        Command::Request { command } => run_request(&mut repo, command)?,
        Command::History {
            filter,
            from,
            to,
            json,
        } => {
            let filter = HistoryFilter {
                sprint: filter.sprint,
                estado: filter.status,
                id_contains: filter.id_contains,
                desde: from,
                hasta: to,
            };
            let mut view = filter_history(repo.history(), &filter);
            sort_history_desc(&mut view);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_history(&view);
            }
        }
        Command::Summary {
            sprint,
            from,
            to,
            json,
        } => {
            let filter = HistoryFilter {
                sprint,
                desde: from,
                hasta: to,
                ..Default::default()
            };
            let view = filter_history(repo.history(), &filter);
            let summaries = summarize(&view, repo.sprints());
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print_summaries(&summaries);
            }
        }
    }
    Ok(())
}

fn run_sprint(repo: &mut Repository, command: SprintCommand) -> Result<()> {
    match command {
        SprintCommand::Add {
            name,
            from,
            to,
            qa,
            dev,
            days,
        } => {
            let sprint = repo.create_sprint(CreateSprint {
                nombre: name,
                fecha_inicio: from,
                fecha_fin: to,
                personas_qa: qa,
                personas_dev: dev,
                dias_efectivos: days,
            })?;
            println!("registered sprint {}", sprint.nombre);
        }
        SprintCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(repo.sprints())?);
            } else {
                print_sprints(repo.sprints());
            }
        }
    }
    Ok(())
}

fn run_request(repo: &mut Repository, command: RequestCommand) -> Result<()> {
    match command {
        RequestCommand::Add {
            id,
            description,
            tipo,
            status,
            date,
            sprint,
            carryover,
            qa_points,
            dev_points,
            final_points,
            commitment,
            related_story,
            resolution_hours,
        } => {
            let id = parse_request_id(&id)?;
            let request = repo.create_request(CreateRequest {
                id,
                descripcion: description,
                tipo,
                estado: status,
                fecha_movimiento: date,
                sprint,
                carryover,
                puntos_qa: qa_points,
                puntos_dev: dev_points,
                puntos_finales: final_points,
                compromiso: commitment,
                historia_relacionada: related_story,
                horas_resolucion: resolution_hours,
            })?;
            println!("created request {}", request.id);
        }
        RequestCommand::Update {
            id,
            status,
            date,
            sprint,
            carryover,
            qa_points,
            dev_points,
            final_points,
            commitment,
            related_story,
            resolution_hours,
        } => {
            let id = parse_request_id(&id)?;
            let request = repo.update_request(
                id,
                UpdateRequest {
                    estado: status,
                    fecha_movimiento: date,
                    sprint,
                    carryover,
                    puntos_qa: qa_points,
                    puntos_dev: dev_points,
                    puntos_finales: final_points,
                    compromiso: commitment,
                    historia_relacionada: related_story,
                    horas_resolucion: resolution_hours,
                },
            )?;
            println!("updated request {}", request.id);
        }
        RequestCommand::List { filter, json } => {
            let FilterArgs {
                sprint,
                status,
                id_contains,
            } = filter;
            let filter = RequestFilter {
                sprint,
                estado: status,
                id_contains,
            };
            let view = filter_requests(repo.requests(), &filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_requests(&view);
            }
        }
    }
    Ok(())
}

fn print_sprints(sprints: &[Sprint]) {
    if sprints.is_empty() {
        println!("no sprints registered");
        return;
    }
    println!(
        "{:<12} {:<12} {:<12} {:>4} {:>4} {:>5}",
        "Sprint", "From", "To", "QA", "Dev", "Days"
    );
    for s in sprints {
        println!(
            "{:<12} {:<12} {:<12} {:>4} {:>4} {:>5}",
            s.nombre, s.fecha_inicio, s.fecha_fin, s.personas_qa, s.personas_dev, s.dias_efectivos
        );
    }
}

fn print_requests(requests: &[&Request]) {
    if requests.is_empty() {
        println!("no matching requests");
        return;
    }
    println!(
        "{:<6} {:<22} {:<14} {:<20} {:<12} {:<12} {:<4} {:>3} {:>4} {:>5}",
        "ID", "Description", "Type", "Status", "Moved", "Sprint", "C/O", "QA", "Dev", "Final"
    );
    for r in requests {
        println!(
            "{:<6} {:<22} {:<14} {:<20} {:<12} {:<12} {:<4} {:>3} {:>4} {:>5}",
            r.id,
            truncate(&r.descripcion, 22),
            r.tipo.wire_label(),
            r.estado.wire_label(),
            r.fecha_movimiento.to_string(),
            r.sprint,
            if r.carryover { "Sí" } else { "No" },
            r.puntos_qa.as_str(),
            r.puntos_dev.as_str(),
            r.puntos_finales.as_str()
        );
    }
}

fn print_history(entries: &[&HistoryEntry]) {
    if entries.is_empty() {
        println!("no matching history entries");
        return;
    }
    println!(
        "{:<6} {:<20} {:<9} {:<20} {:<12} {:<4}",
        "ID", "Changed", "Change", "Status", "Sprint", "C/O"
    );
    for e in entries {
        println!(
            "{:<6} {:<20} {:<9} {:<20} {:<12} {:<4}",
            e.id,
            e.fecha_cambio,
            e.cambio.wire_label(),
            e.estado.wire_label(),
            e.sprint,
            if e.carryover { "Sí" } else { "No" }
        );
    }
}

fn print_summaries(summaries: &[SprintSummary]) {
    if summaries.is_empty() {
        println!("no history to summarize");
        return;
    }
    for s in summaries {
        let name = if s.sprint.is_empty() {
            "(no sprint)"
        } else {
            s.sprint.as_str()
        };
        println!("{name}");
        if let Some(meta) = &s.meta {
            println!(
                "  {} to {}  QA={} Dev={} effective days={}",
                meta.fecha_inicio,
                meta.fecha_fin,
                meta.personas_qa,
                meta.personas_dev,
                meta.dias_efectivos
            );
        } else {
            println!("  (not in the sprint registry)");
        }
        println!(
            "  requests={}  carryover={}  points QA={} Dev={} Final={}",
            s.total_solicitudes, s.total_carryover, s.puntos_qa, s.puntos_dev, s.puntos_finales
        );
        println!(
            "  commitment QA={} Dev={} Both={}  mean resolution={:.1}h",
            s.compromiso_qa, s.compromiso_dev, s.compromiso_ambos, s.media_horas_resolucion
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
