use crate::infra::InMemoryIntakeGateway;
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use educare::config::ConfigError;
use educare::error::AppError;
use educare::workflows::access::{
    AccessClient, AccessService, CredentialTable, InMemorySessionStore, LoginError, LoginRequest,
    Role,
};
use educare::workflows::admission::{
    compute_eligibility, AdmissionService, ContactMessage, EligibilityAssessment,
    EligibilityPolicy, EnrollmentRequest, PreferredClass,
};
use educare::workflows::observation::{
    ObservationBoard, ObservationFilter, ObservationForm, ObservationStatus, OverallRating,
    CLASSROOM_SCREEN,
};
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_BIRTH_DATE: &str = "2021-06-15";

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Child's date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) date_of_birth: String,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Override the youngest admitted age
    #[arg(long)]
    pub(crate) min_age: Option<u8>,
    /// Override the oldest admitted age
    #[arg(long)]
    pub(crate) max_age: Option<u8>,
}

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    /// Role to sign in as (eccd_office, seed_teacher, educare_teacher, parent)
    #[arg(long)]
    pub(crate) role: String,
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long)]
    pub(crate) password: String,
    /// Credential CSV (role,username,password) to check against instead of the built-in table
    #[arg(long)]
    pub(crate) credentials_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the admission walkthrough (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn policy_from_overrides(
    min_age: Option<u8>,
    max_age: Option<u8>,
) -> Result<EligibilityPolicy, ConfigError> {
    let defaults = EligibilityPolicy::default();
    let min_age = min_age.map_or(defaults.min_age, i32::from);
    let max_age = max_age.map_or(defaults.max_age, i32::from);
    if min_age > max_age {
        return Err(ConfigError::InvertedAgeBounds { min_age, max_age });
    }
    Ok(EligibilityPolicy::new(min_age, max_age))
}

pub(crate) fn render_assessment(
    date_of_birth: &str,
    assessment: &EligibilityAssessment,
    policy: &EligibilityPolicy,
) -> String {
    let mut lines = vec![format!(
        "Date of birth {date_of_birth} (policy {}-{} years)",
        policy.min_age, policy.max_age
    )];

    match (assessment.age, assessment.eligible) {
        (Some(age), Some(eligible)) => {
            let verdict = if eligible { "eligible" } else { "not eligible" };
            lines.push(format!("- Age {age}: {verdict}"));
        }
        _ => lines.push("- Not yet a complete date; eligibility unknown".to_string()),
    }
    if let Some(error) = &assessment.error {
        lines.push(format!("- {error}"));
    }
    if let Some(guidance) = assessment.guidance(policy) {
        lines.push(format!("- {guidance}"));
    }
    lines.join("\n")
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let EligibilityArgs {
        date_of_birth,
        today,
        min_age,
        max_age,
    } = args;

    let policy = policy_from_overrides(min_age, max_age)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let assessment = compute_eligibility(&date_of_birth, today, &policy);

    println!("Evaluated on {today}");
    println!("{}", render_assessment(&date_of_birth, &assessment, &policy));
    Ok(())
}

pub(crate) fn run_login(args: LoginArgs) -> Result<(), AppError> {
    let LoginArgs {
        role,
        username,
        password,
        credentials_csv,
    } = args;

    let table = match credentials_csv {
        Some(path) => CredentialTable::from_path(path)?,
        None => CredentialTable::standard(),
    };
    let access = AccessService::new(Arc::new(table), Arc::new(InMemorySessionStore::new()));

    match access.login(&LoginRequest::new(role, username, password)) {
        Ok(outcome) => {
            println!(
                "Signed in as {} ({})",
                outcome.session.name,
                outcome.session.role.label()
            );
            println!("Landing route: {}", outcome.landing_route);
        }
        Err(LoginError::Validation(errors)) => println!("Sign-in form incomplete: {errors}"),
        Err(LoginError::Failed(failure)) => println!("{failure}"),
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("Educare+ demo (evaluated on {today})");
    println!("\nAdmission eligibility");
    for policy in [EligibilityPolicy::ENROLLMENT, EligibilityPolicy::PRE_REGISTRATION] {
        let assessment = compute_eligibility(DEMO_BIRTH_DATE, today, &policy);
        println!("{}", render_assessment(DEMO_BIRTH_DATE, &assessment, &policy));
    }

    println!("\nEnrollment intake (in-memory backend)");
    let intake = Arc::new(InMemoryIntakeGateway::default());
    let admission = AdmissionService::new(
        EligibilityPolicy::default(),
        intake.clone(),
        intake.clone(),
    );
    let request = EnrollmentRequest {
        date_of_birth: DEMO_BIRTH_DATE.to_string(),
        student_name: "Lia Santos".to_string(),
        parent_name: "Ana Santos".to_string(),
        parent_contact: "0917 555 0101".to_string(),
        parent_email: "ana.santos@example.com".to_string(),
        preferred_class: Some(PreferredClass::Morning),
    };
    match admission.enroll(request, today, Utc::now()).await {
        Ok(submission) => {
            println!(
                "- Submitted {} (age {}) for the {}",
                submission.student.name,
                submission.student.age,
                submission.enrollment.preferred_class.label()
            );
            match serde_json::to_string_pretty(&submission) {
                Ok(json) => println!("  Payload:\n{json}"),
                Err(err) => println!("  Payload unavailable: {err}"),
            }
        }
        Err(err) => println!("- Enrollment refused: {err}"),
    }
    let question = ContactMessage {
        name: "Ana Santos".to_string(),
        email: "ana.santos@example.com".to_string(),
        subject: "Class schedule".to_string(),
        message: "What time does the morning class start?".to_string(),
    };
    if let Err(err) = admission.contact(question).await {
        println!("- Contact message refused: {err}");
    }
    println!(
        "- Backend received {} enrollment(s) and {} contact message(s)",
        intake.enrollments().len(),
        intake.contacts().len()
    );

    println!("\nDashboard sign-in");
    let access = AccessClient::new(Arc::new(AccessService::new(
        Arc::new(CredentialTable::standard()),
        Arc::new(InMemorySessionStore::new()),
    )));
    access.restore();
    for role in Role::ALL {
        let username = CredentialTable::standard()
            .account(role)
            .map(|account| account.username.clone())
            .unwrap_or_default();
        match access.login(&LoginRequest::new(
            role.as_str(),
            username,
            educare::workflows::access::credentials::DEFAULT_PASSWORD,
        )) {
            Ok(outcome) => {
                let observation = match access.authorize(CLASSROOM_SCREEN) {
                    Ok(_) => "allowed".to_string(),
                    Err(denied) => format!("denied ({denied})"),
                };
                println!(
                    "- {} -> {} | classroom observation {}",
                    role.label(),
                    outcome.landing_route,
                    observation
                );
            }
            Err(err) => println!("- {} sign-in failed: {err}", role.label()),
        }
        access.logout();
    }
    let cross_role = access.login(&LoginRequest::new("parent", "eccdadmin", "password123"));
    if let Err(err) = cross_role {
        println!("- Office credentials under the parent role: {err}");
    }

    println!("\nClassroom observation");
    let board = ObservationBoard::seeded();
    let pending = board.list(&ObservationFilter {
        search: Some(ObservationStatus::Pending.label().to_string()),
        ..ObservationFilter::default()
    });
    println!("- {} center(s) awaiting observation", pending.len());
    if let Some(entry) = pending.first() {
        let form = ObservationForm {
            observation_date: today.format("%Y-%m-%d").to_string(),
            teaching_performance: "Lesson delivered with clear examples".to_string(),
            classroom_management: "Learning corners organised".to_string(),
            student_engagement: "Learners answered readily".to_string(),
            additional_notes: String::new(),
            overall_rating: Some(OverallRating::Excellent),
        };
        match board.record_observation(entry.id, &form) {
            Ok(updated) => println!(
                "- Observed {} at {} ({}) -> {}",
                updated.teacher,
                updated.center_name,
                updated.barangay,
                updated.status.label()
            ),
            Err(err) => println!("- Observation not recorded: {err}"),
        }
    }

    Ok(())
}
