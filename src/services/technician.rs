//! Lab technician workspace endpoints

use super::session_user_id;
use crate::adapters::http::ApiClient;
use crate::domain::models::{Ack, LabPrescription, ResultDocument, ResultSubmission, User};
use crate::domain::{OrganizationId, Page, PageResponse, PrescriptionId, Result, TrackError};
use reqwest::multipart::{Form, Part};
use serde::Serialize;

/// Default page size of the prescription queue
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// What the technician dashboard shows on open
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianDashboard {
    pub profile: User,
    pub prescriptions: Page<LabPrescription>,
}

#[derive(Debug, Clone)]
pub struct TechnicianService {
    client: ApiClient,
}

impl TechnicianService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Profile of the signed-in technician
    ///
    /// # Errors
    ///
    /// `TrackError::MissingIdentity` if no user id is cached.
    pub async fn profile(&self) -> Result<User> {
        let user_id = session_user_id(&self.client)?;
        self.client
            .get(&format!("/lab/technician/profile/{user_id}"))
            .await
    }

    /// Pending prescriptions of an organization, one page at a time
    ///
    /// The backend answers with either a page envelope or a bare list; both
    /// are normalized into a [`Page`].
    pub async fn prescriptions(
        &self,
        organization: OrganizationId,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<Page<LabPrescription>> {
        let mut query = vec![
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("status", "PENDING".to_string()),
        ];
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }

        let response: PageResponse<LabPrescription> = self
            .client
            .get_with_query(&format!("/lab/prescriptions/org/{organization}"), &query)
            .await?;
        Ok(response.into())
    }

    /// Profile and first page of the queue, fetched concurrently
    pub async fn dashboard(
        &self,
        organization: OrganizationId,
        size: u32,
        search: Option<&str>,
    ) -> Result<TechnicianDashboard> {
        let (profile, prescriptions) = tokio::try_join!(
            self.profile(),
            self.prescriptions(organization, 0, size, search)
        )?;
        Ok(TechnicianDashboard {
            profile,
            prescriptions,
        })
    }

    /// Submit a result with optional supporting documents
    ///
    /// Sent as `multipart/form-data`; absent optional fields are sent as
    /// empty strings and every document as a `documents` part.
    pub async fn submit_result(
        &self,
        prescription: PrescriptionId,
        submission: &ResultSubmission,
        documents: Vec<ResultDocument>,
    ) -> Result<Ack> {
        let form = submission_form(prescription, submission, documents)?;
        self.client.post_multipart("/lab/result/submit", form).await
    }
}

fn submission_form(
    prescription: PrescriptionId,
    submission: &ResultSubmission,
    documents: Vec<ResultDocument>,
) -> Result<Form> {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();

    let mut form = Form::new()
        .text("prescriptionId", prescription.to_string())
        .text("resultData", submission.result_data.clone())
        .text("referenceRange", optional(&submission.reference_range))
        .text("abnormalFlags", optional(&submission.abnormal_flags))
        .text("notes", optional(&submission.notes));

    for document in documents {
        let mut part = Part::bytes(document.bytes).file_name(document.file_name);
        if let Some(content_type) = document.content_type {
            part = part.mime_str(&content_type).map_err(|e| {
                TrackError::Validation(format!("Invalid content type '{content_type}': {e}"))
            })?;
        }
        form = form.part("documents", part);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_document_content_type() {
        let submission = ResultSubmission {
            result_data: "Hb 13.5".into(),
            ..Default::default()
        };
        let documents = vec![ResultDocument::new("scan.pdf", vec![1, 2, 3]).with_content_type("not a mime")];

        let err = submission_form(PrescriptionId::new(9), &submission, documents).unwrap_err();
        assert!(matches!(err, TrackError::Validation(_)));
    }

    #[test]
    fn test_form_builds_with_documents() {
        let submission = ResultSubmission {
            result_data: "Hb 13.5".into(),
            notes: Some("fasting".into()),
            ..Default::default()
        };
        let documents = vec![
            ResultDocument::new("scan.pdf", vec![1, 2, 3]).with_content_type("application/pdf"),
            ResultDocument::new("notes.txt", b"ok".to_vec()),
        ];

        let form = submission_form(PrescriptionId::new(9), &submission, documents).unwrap();
        assert!(!form.boundary().is_empty());
    }
}
