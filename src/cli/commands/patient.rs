//! Patient commands: own profile, visit history and lab results

use super::common::{emit, parse_data, report_failure, Workspace};
use crate::core::guard::Route;
use crate::core::messages::Operation;
use crate::core::scope::ScopeHandle;
use crate::domain::models::VisitRecord;
use crate::domain::{HistoryId, PatientId};
use crate::services::{LabService, PatientService};
use clap::{Args, Subcommand};

/// Arguments for the patient command group
#[derive(Args, Debug)]
pub struct PatientArgs {
    #[command(subcommand)]
    pub command: PatientCommand,
}

#[derive(Subcommand, Debug)]
pub enum PatientCommand {
    /// Show the signed-in patient's profile
    Profile,
    /// Show medical details
    MedicalDetails,
    /// List visits; own history unless --patient is given
    History {
        #[arg(long)]
        patient: Option<PatientId>,
    },
    /// Record a visit from JSON
    AddHistory {
        #[arg(long)]
        data: String,
    },
    /// Update a visit from JSON
    UpdateHistory {
        id: HistoryId,
        #[arg(long)]
        data: String,
    },
    /// Delete a visit
    DeleteHistory { id: HistoryId },
    /// List lab prescriptions of a patient record
    LabPrescriptions { patient: PatientId },
    /// List lab results of a patient record
    LabResults { patient: PatientId },
}

impl PatientArgs {
    /// Execute a patient command
    pub async fn execute(&self, config_path: &str, scope: ScopeHandle) -> anyhow::Result<i32> {
        let workspace = match Workspace::open_or_exit(config_path) {
            Ok(w) => w,
            Err(code) => return Ok(code),
        };
        if let Some(code) = workspace.enter(Route::Patient) {
            return Ok(code);
        }

        let patient = PatientService::new(workspace.client.clone());
        let lab = LabService::new(workspace.client.clone());

        let code = match &self.command {
            PatientCommand::Profile => emit(&scope, Operation::Load, patient.profile()).await,
            PatientCommand::MedicalDetails => {
                emit(&scope, Operation::Load, patient.medical_details()).await
            }
            PatientCommand::History { patient: None } => {
                emit(&scope, Operation::Load, patient.history()).await
            }
            PatientCommand::History { patient: Some(id) } => {
                emit(&scope, Operation::Load, patient.history_for(*id)).await
            }
            PatientCommand::AddHistory { data } => match parse_data::<VisitRecord>(data) {
                Ok(visit) => emit(&scope, Operation::Create, patient.add_history(&visit)).await,
                Err(e) => report_failure(&e, Operation::Create),
            },
            PatientCommand::UpdateHistory { id, data } => match parse_data::<VisitRecord>(data) {
                Ok(visit) => {
                    emit(&scope, Operation::Update, patient.update_history(*id, &visit)).await
                }
                Err(e) => report_failure(&e, Operation::Update),
            },
            PatientCommand::DeleteHistory { id } => {
                emit(&scope, Operation::Delete, patient.delete_history(*id)).await
            }
            PatientCommand::LabPrescriptions { patient: id } => {
                emit(&scope, Operation::Load, lab.prescriptions_for_patient(*id)).await
            }
            PatientCommand::LabResults { patient: id } => {
                emit(&scope, Operation::Load, lab.results_for_patient(*id)).await
            }
        };

        Ok(code)
    }
}
