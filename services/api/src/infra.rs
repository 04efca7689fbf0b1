use chrono::NaiveDate;
use educare::config::AppConfig;
use educare::error::AppError;
use educare::workflows::access::{AccessService, CredentialTable, InMemorySessionStore};
use educare::workflows::admission::{
    AdmissionService, ContactGateway, ContactMessage, EnrollmentGateway, EnrollmentSubmission,
    HttpSubmissionGateway, SubmissionError,
};
use educare::workflows::observation::ObservationBoard;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type HttpAdmissionService =
    AdmissionService<HttpSubmissionGateway, HttpSubmissionGateway>;
pub(crate) type TableAccessService = AccessService<CredentialTable, InMemorySessionStore>;

/// Everything the HTTP surface needs, wired from configuration.
pub(crate) struct Services {
    pub(crate) admission: Arc<HttpAdmissionService>,
    pub(crate) access: Arc<TableAccessService>,
    pub(crate) observations: Arc<ObservationBoard>,
}

impl Services {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let gateway = Arc::new(HttpSubmissionGateway::from_config(&config.admission)?);
        let admission = Arc::new(AdmissionService::new(
            config.admission.eligibility,
            gateway.clone(),
            gateway,
        ));

        let access = Arc::new(AccessService::new(
            Arc::new(load_credentials(config)?),
            Arc::new(InMemorySessionStore::new()),
        ));

        Ok(Self {
            admission,
            access,
            observations: Arc::new(ObservationBoard::seeded()),
        })
    }
}

pub(crate) fn load_credentials(config: &AppConfig) -> Result<CredentialTable, AppError> {
    match &config.access.credentials_csv {
        Some(path) => {
            let table = CredentialTable::from_path(path)?;
            info!(
                path = %path.display(),
                roles = table.roles().count(),
                "loaded credential table"
            );
            Ok(table)
        }
        None => Ok(CredentialTable::standard()),
    }
}

/// Intake sink that keeps submissions in memory; used by the CLI demo and route tests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryIntakeGateway {
    enrollments: Arc<Mutex<Vec<EnrollmentSubmission>>>,
    contacts: Arc<Mutex<Vec<ContactMessage>>>,
}

impl InMemoryIntakeGateway {
    pub(crate) fn enrollments(&self) -> Vec<EnrollmentSubmission> {
        self.enrollments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn contacts(&self) -> Vec<ContactMessage> {
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EnrollmentGateway for InMemoryIntakeGateway {
    async fn submit(&self, submission: &EnrollmentSubmission) -> Result<(), SubmissionError> {
        self.enrollments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(submission.clone());
        Ok(())
    }
}

impl ContactGateway for InMemoryIntakeGateway {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), SubmissionError> {
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
