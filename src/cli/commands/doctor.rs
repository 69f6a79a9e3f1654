//! Doctor commands: patients, colleagues and lab orders

use super::common::{emit, parse_data, report_failure, Workspace};
use crate::core::guard::Route;
use crate::core::messages::Operation;
use crate::core::scope::ScopeHandle;
use crate::domain::models::{LabPrescription, LabResult, NewLabPrescription, PatientRecord};
use crate::domain::{PatientId, Result, TrackError, UserId};
use crate::services::{DoctorService, LabService};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Arguments for the doctor command group
#[derive(Args, Debug)]
pub struct DoctorArgs {
    #[command(subcommand)]
    pub command: DoctorCommand,
}

#[derive(Subcommand, Debug)]
pub enum DoctorCommand {
    /// Show the signed-in doctor's profile
    Profile,
    /// List patients of the organization
    Patients,
    /// Show one patient
    Patient { id: PatientId },
    /// Register a patient from JSON
    CreatePatient {
        #[arg(long)]
        data: String,
    },
    /// Update a patient from JSON
    UpdatePatient {
        id: PatientId,
        #[arg(long)]
        data: String,
    },
    /// Delete a patient
    DeletePatient { id: PatientId },
    /// Search doctors by name and/or id
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        id: Option<UserId>,
    },
    /// List colleagues in the organization
    Colleagues,
    /// List available lab test types
    TestTypes,
    /// Order a lab test from JSON
    Prescribe {
        #[arg(long)]
        data: String,
    },
    /// List lab prescriptions, for one patient or all of the doctor's
    Prescriptions {
        #[arg(long)]
        patient: Option<PatientId>,
    },
    /// List lab results, for one patient or for every prescription
    Results {
        #[arg(long)]
        patient: Option<PatientId>,
    },
}

/// A prescription next to its result, if one exists yet
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrescriptionResult {
    prescription: LabPrescription,
    result: Option<LabResult>,
}

impl DoctorArgs {
    /// Execute a doctor command
    pub async fn execute(&self, config_path: &str, scope: ScopeHandle) -> anyhow::Result<i32> {
        let workspace = match Workspace::open_or_exit(config_path) {
            Ok(w) => w,
            Err(code) => return Ok(code),
        };
        if let Some(code) = workspace.enter(Route::Doctor) {
            return Ok(code);
        }

        let doctor = DoctorService::new(workspace.client.clone());
        let lab = LabService::new(workspace.client.clone());

        let code = match &self.command {
            DoctorCommand::Profile => emit(&scope, Operation::Load, doctor.profile()).await,
            DoctorCommand::Patients => emit(&scope, Operation::Load, doctor.patients()).await,
            DoctorCommand::Patient { id } => {
                emit(&scope, Operation::Load, doctor.patient(*id)).await
            }
            DoctorCommand::CreatePatient { data } => match parse_data::<PatientRecord>(data) {
                Ok(patient) => {
                    emit(&scope, Operation::Create, doctor.create_patient(&patient)).await
                }
                Err(e) => report_failure(&e, Operation::Create),
            },
            DoctorCommand::UpdatePatient { id, data } => match parse_data::<PatientRecord>(data) {
                Ok(patient) => {
                    emit(&scope, Operation::Update, doctor.update_patient(*id, &patient)).await
                }
                Err(e) => report_failure(&e, Operation::Update),
            },
            DoctorCommand::DeletePatient { id } => {
                emit(&scope, Operation::Delete, doctor.delete_patient(*id)).await
            }
            DoctorCommand::Search { name, id } => {
                emit(
                    &scope,
                    Operation::Load,
                    doctor.search_doctors(name.as_deref(), *id),
                )
                .await
            }
            DoctorCommand::Colleagues => emit(&scope, Operation::Load, doctor.colleagues()).await,
            DoctorCommand::TestTypes => emit(&scope, Operation::Load, lab.test_types()).await,
            DoctorCommand::Prescribe { data } => match parse_data::<NewLabPrescription>(data) {
                Ok(order) => {
                    emit(&scope, Operation::Create, lab.create_prescription(&order)).await
                }
                Err(e) => report_failure(&e, Operation::Create),
            },
            DoctorCommand::Prescriptions { patient: Some(id) } => {
                emit(&scope, Operation::Load, lab.prescriptions_for_patient(*id)).await
            }
            DoctorCommand::Prescriptions { patient: None } => {
                emit(&scope, Operation::Load, own_prescriptions(&workspace, &lab)).await
            }
            DoctorCommand::Results { patient: Some(id) } => {
                emit(&scope, Operation::Load, lab.results_for_patient(*id)).await
            }
            DoctorCommand::Results { patient: None } => {
                emit(&scope, Operation::Load, results_by_prescription(&workspace, &lab)).await
            }
        };

        Ok(code)
    }
}

async fn own_prescriptions(workspace: &Workspace, lab: &LabService) -> Result<Vec<LabPrescription>> {
    let session = workspace.context.session();
    let doctor = session
        .user_id
        .ok_or_else(|| TrackError::MissingIdentity("User ID".to_string()))?;
    let organization = session
        .organization_id
        .ok_or_else(|| TrackError::MissingIdentity("Organization ID".to_string()))?;
    lab.prescriptions_for_doctor(doctor, organization).await
}

async fn results_by_prescription(
    workspace: &Workspace,
    lab: &LabService,
) -> Result<Vec<PrescriptionResult>> {
    let prescriptions = own_prescriptions(workspace, lab).await?;
    let ids: Vec<_> = prescriptions.iter().map(|p| p.id).collect();
    let results = lab.results_for_prescriptions(&ids).await?;

    Ok(prescriptions
        .into_iter()
        .zip(results)
        .map(|(prescription, result)| PrescriptionResult {
            prescription,
            result,
        })
        .collect())
}
