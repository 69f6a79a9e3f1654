//! Lab technician commands: the prescription queue and result entry

use super::common::{emit, parse_data, report_failure, Workspace};
use crate::core::guard::Route;
use crate::core::messages::Operation;
use crate::core::scope::ScopeHandle;
use crate::domain::models::{
    LabResult, LabResultUpdate, NewLabResult, PrescriptionStatus, ResultDocument, ResultSubmission,
};
use crate::domain::{OrganizationId, PrescriptionId, Result, ResultId, TrackError, UserId};
use crate::services::technician::DEFAULT_PAGE_SIZE;
use crate::services::{LabService, TechnicianService};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Arguments for the technician command group
#[derive(Args, Debug)]
pub struct TechnicianArgs {
    #[command(subcommand)]
    pub command: TechnicianCommand,
}

#[derive(Subcommand, Debug)]
pub enum TechnicianCommand {
    /// Show the signed-in technician's profile
    Profile,
    /// Profile and the first page of pending prescriptions
    Dashboard {
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Page through the organization's pending prescriptions
    Prescriptions {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// List pending prescriptions without paging
    Pending,
    /// Accept a prescription and open a draft result for it
    Accept { prescription: PrescriptionId },
    /// List results recorded by the signed-in technician
    Results,
    /// Fill in a draft result from JSON
    UpdateResult {
        id: ResultId,
        #[arg(long)]
        data: String,
    },
    /// Submit a filled-in draft result
    SubmitDraft { id: ResultId },
    /// Submit a result with attached documents in one step
    Submit {
        prescription: PrescriptionId,
        #[arg(long)]
        result_data: String,
        #[arg(long)]
        reference_range: Option<String>,
        #[arg(long)]
        abnormal_flags: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// File to attach; repeat for several
        #[arg(long = "document")]
        documents: Vec<PathBuf>,
    },
}

impl TechnicianArgs {
    /// Execute a technician command
    pub async fn execute(&self, config_path: &str, scope: ScopeHandle) -> anyhow::Result<i32> {
        let workspace = match Workspace::open_or_exit(config_path) {
            Ok(w) => w,
            Err(code) => return Ok(code),
        };
        if let Some(code) = workspace.enter(Route::Technician) {
            return Ok(code);
        }

        let technician = TechnicianService::new(workspace.client.clone());
        let lab = LabService::new(workspace.client.clone());

        let code = match &self.command {
            TechnicianCommand::Profile => {
                emit(&scope, Operation::Load, technician.profile()).await
            }
            TechnicianCommand::Dashboard { size, search } => match organization(&workspace) {
                Ok(org) => {
                    emit(
                        &scope,
                        Operation::Load,
                        technician.dashboard(org, *size, search.as_deref()),
                    )
                    .await
                }
                Err(e) => report_failure(&e, Operation::Load),
            },
            TechnicianCommand::Prescriptions { page, size, search } => {
                match organization(&workspace) {
                    Ok(org) => {
                        emit(
                            &scope,
                            Operation::Load,
                            technician.prescriptions(org, *page, *size, search.as_deref()),
                        )
                        .await
                    }
                    Err(e) => report_failure(&e, Operation::Load),
                }
            }
            TechnicianCommand::Pending => match organization(&workspace) {
                Ok(org) => emit(&scope, Operation::Load, lab.pending_prescriptions(org)).await,
                Err(e) => report_failure(&e, Operation::Load),
            },
            TechnicianCommand::Accept { prescription } => {
                emit(
                    &scope,
                    Operation::Update,
                    accept(&workspace, &lab, *prescription),
                )
                .await
            }
            TechnicianCommand::Results => {
                emit(&scope, Operation::Load, own_results(&workspace, &lab)).await
            }
            TechnicianCommand::UpdateResult { id, data } => {
                match parse_data::<LabResultUpdate>(data) {
                    Ok(update) => {
                        emit(&scope, Operation::Update, lab.update_result(*id, &update)).await
                    }
                    Err(e) => report_failure(&e, Operation::Update),
                }
            }
            TechnicianCommand::SubmitDraft { id } => {
                emit(&scope, Operation::Submit, lab.submit_draft_result(*id)).await
            }
            TechnicianCommand::Submit {
                prescription,
                result_data,
                reference_range,
                abnormal_flags,
                notes,
                documents,
            } => {
                let submission = ResultSubmission {
                    result_data: result_data.clone(),
                    reference_range: reference_range.clone(),
                    abnormal_flags: abnormal_flags.clone(),
                    notes: notes.clone(),
                };
                match read_documents(documents) {
                    Ok(documents) => {
                        emit(
                            &scope,
                            Operation::Submit,
                            technician.submit_result(*prescription, &submission, documents),
                        )
                        .await
                    }
                    Err(e) => report_failure(&e, Operation::Submit),
                }
            }
        };

        Ok(code)
    }
}

fn organization(workspace: &Workspace) -> Result<OrganizationId> {
    workspace
        .context
        .session()
        .organization_id
        .ok_or_else(|| TrackError::MissingIdentity("Organization ID".to_string()))
}

fn technician_id(workspace: &Workspace) -> Result<UserId> {
    workspace
        .context
        .session()
        .user_id
        .ok_or_else(|| TrackError::MissingIdentity("User ID".to_string()))
}

/// Mark the prescription accepted, then open a draft result for it
async fn accept(
    workspace: &Workspace,
    lab: &LabService,
    prescription: PrescriptionId,
) -> Result<LabResult> {
    let technician = technician_id(workspace)?;
    let organization = organization(workspace)?;

    let order = lab.prescription(prescription).await?;
    lab.update_prescription_status(prescription, PrescriptionStatus::Accepted)
        .await?;

    let draft = NewLabResult::draft_for(&order, technician, organization);
    lab.create_result(&draft).await
}

async fn own_results(workspace: &Workspace, lab: &LabService) -> Result<Vec<LabResult>> {
    let technician = technician_id(workspace)?;
    let organization = organization(workspace)?;
    lab.results_for_technician(technician, organization).await
}

fn read_documents(paths: &[PathBuf]) -> Result<Vec<ResultDocument>> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path).map_err(|e| {
                TrackError::Validation(format!("Cannot read {}: {e}", path.display()))
            })?;
            let document = ResultDocument::new(file_name(path), bytes);
            Ok(match content_type(path) {
                Some(mime) => document.with_content_type(mime),
                None => document,
            })
        })
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string())
}

fn content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "txt" => Some("text/plain"),
        "csv" => Some("text/csv"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type(Path::new("scan.PDF")), Some("application/pdf"));
        assert_eq!(content_type(Path::new("photo.jpeg")), Some("image/jpeg"));
        assert_eq!(content_type(Path::new("archive.zip")), None);
        assert_eq!(content_type(Path::new("README")), None);
    }

    #[test]
    fn test_read_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cbc.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let documents = read_documents(&[path]).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].file_name, "cbc.pdf");
        assert_eq!(documents[0].content_type.as_deref(), Some("application/pdf"));
        assert_eq!(documents[0].bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_missing_document_is_rejected() {
        let err = read_documents(&[PathBuf::from("/nonexistent/cbc.pdf")]).unwrap_err();
        assert!(matches!(err, TrackError::Validation(_)));
    }
}
