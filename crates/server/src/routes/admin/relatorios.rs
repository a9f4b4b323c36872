//! CSV report download handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use portal_core::UserId;

use crate::db::{ChargeRepository, ProfileRepository, RequestRepository, VacationRepository};
use crate::error::AppError;
use crate::export::CsvDocument;
use crate::export::csv::report_filename;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Download one of the administrator reports as CSV.
///
/// Known reports: `funcionarios`, `solicitacoes`, `ferias`, `cobrancas`.
pub async fn download(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(report): Path<String>,
) -> Result<Response, AppError> {
    let doc = match report.as_str() {
        "funcionarios" => employees_report(&state).await?,
        "solicitacoes" => requests_report(&state).await?,
        "ferias" => vacations_report(&state).await?,
        "cobrancas" => charges_report(&state).await?,
        other => return Err(AppError::NotFound(format!("relatório {other}"))),
    };

    let filename = report_filename(&report, Utc::now().date_naive());
    tracing::info!(report = %report, rows = doc.row_count(), "report generated");

    Ok(csv_response(&filename, doc.render()))
}

async fn employees_report(state: &AppState) -> Result<CsvDocument, AppError> {
    let employees = ProfileRepository::new(state.pool()).list_employees().await?;

    let mut doc = CsvDocument::new(["nome", "email", "cargo", "funcao", "admissao"]);
    for employee in employees {
        doc.push_row([
            employee.full_name,
            employee.email.to_string(),
            employee.role.as_str().to_owned(),
            employee.position.unwrap_or_default(),
            employee
                .admission_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ]);
    }
    Ok(doc)
}

async fn requests_report(state: &AppState) -> Result<CsvDocument, AppError> {
    let requests = RequestRepository::new(state.pool()).list_all(None).await?;
    let names = employee_names(state).await?;

    let mut doc = CsvDocument::new(["funcionario", "tipo", "detalhes", "status", "data"]);
    for request in requests {
        doc.push_row([
            display_name(&names, request.user_id),
            request.details.kind().to_owned(),
            request.details.summary(),
            request.status.as_str().to_owned(),
            request.created_at.date_naive().to_string(),
        ]);
    }
    Ok(doc)
}

async fn vacations_report(state: &AppState) -> Result<CsvDocument, AppError> {
    let vacations = VacationRepository::new(state.pool()).list_all().await?;
    let names = employee_names(state).await?;

    let mut doc = CsvDocument::new(["funcionario", "inicio", "fim", "observacao"]);
    for vacation in vacations {
        doc.push_row([
            display_name(&names, vacation.user_id),
            vacation.start_date.to_string(),
            vacation.end_date.to_string(),
            vacation.note.unwrap_or_default(),
        ]);
    }
    Ok(doc)
}

async fn charges_report(state: &AppState) -> Result<CsvDocument, AppError> {
    let charges = ChargeRepository::new(state.pool()).list_all().await?;
    let names = employee_names(state).await?;

    let mut doc = CsvDocument::new(["funcionario", "descricao", "valor", "vencimento", "paga"]);
    for charge in charges {
        doc.push_row([
            display_name(&names, charge.user_id),
            charge.description,
            charge.amount.to_string(),
            charge.due_date.to_string(),
            if charge.paid { "sim" } else { "nao" }.to_owned(),
        ]);
    }
    Ok(doc)
}

/// Map of user ID to display name (full name, or email when the profile
/// has no name yet).
async fn employee_names(state: &AppState) -> Result<HashMap<UserId, String>, AppError> {
    let employees = ProfileRepository::new(state.pool()).list_employees().await?;
    Ok(employees
        .into_iter()
        .map(|e| {
            let name = if e.full_name.is_empty() {
                e.email.to_string()
            } else {
                e.full_name
            };
            (e.user_id, name)
        })
        .collect())
}

fn display_name(names: &HashMap<UserId, String>, user_id: UserId) -> String {
    names
        .get(&user_id)
        .cloned()
        .unwrap_or_else(|| user_id.to_string())
}

fn csv_response(filename: &str, body: String) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    (headers, body).into_response()
}
