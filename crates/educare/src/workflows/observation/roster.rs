use serde::{Deserialize, Serialize};

pub const ALL: &str = "All";

pub const BARANGAYS: [&str; 27] = [
    "Abella",
    "Bagumbayan Norte",
    "Bagumbayan Sur",
    "Balatas",
    "Calauag",
    "Cararayan",
    "Carolina",
    "Concepcion Grande",
    "Concepcion Pequeña",
    "Dayangdang",
    "Del Rosario",
    "Dinaga",
    "Igualdad Interior",
    "Lerma",
    "Liboton",
    "Mabolo",
    "Pacol",
    "Panicuason",
    "Peñafrancia",
    "Sabang",
    "San Felipe",
    "San Francisco (City Center)",
    "San Isidro",
    "Santa Cruz",
    "Tabuco",
    "Tinago",
    "Triangulo",
];

pub const CENTERS: [&str; 4] = [
    "Educare Center I",
    "Educare Center II",
    "Educare Center III",
    "Educare Center IV",
];

pub const SCHOOL_YEARS: [&str; 4] = ["2024", "2023", "2022", "2021"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationStatus {
    Pending,
    Observed,
}

impl ObservationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ObservationStatus::Pending => "Pending",
            ObservationStatus::Observed => "Observed",
        }
    }
}

/// One teacher's classroom at an Educare center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterEntry {
    pub id: u32,
    pub barangay: String,
    pub center_name: String,
    pub location: String,
    pub teacher: String,
    pub status: ObservationStatus,
}

impl CenterEntry {
    fn seed(
        id: u32,
        barangay: &str,
        center_name: &str,
        location: &str,
        teacher: &str,
        status: ObservationStatus,
    ) -> Self {
        Self {
            id,
            barangay: barangay.to_string(),
            center_name: center_name.to_string(),
            location: location.to_string(),
            teacher: teacher.to_string(),
            status,
        }
    }

    fn mentions(&self, needle: &str) -> bool {
        [
            self.barangay.as_str(),
            self.center_name.as_str(),
            self.location.as_str(),
            self.teacher.as_str(),
            self.status.label(),
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Current school year's centers.
pub fn seed_roster() -> Vec<CenterEntry> {
    use ObservationStatus::{Observed, Pending};

    vec![
        CenterEntry::seed(1, "Abella", "Educare Center I", "Barangay Hall", "MARY GRACE BUENAVIDA", Observed),
        CenterEntry::seed(2, "Abella", "Educare Center I", "Barangay Hall", "ZARILU A. GABO", Pending),
        CenterEntry::seed(3, "Bagumbayan Norte", "Educare Center I", "Barangay Hall", "MA. ELENA P. LOZANO", Observed),
        CenterEntry::seed(4, "Bagumbayan Sur", "Educare Center I", "Barangay Hall", "GEMMA MUÑOZ", Pending),
        CenterEntry::seed(5, "Bagumbayan Sur", "Educare Center II", "Barangay Hall", "GINA BELBIS", Observed),
        CenterEntry::seed(6, "Bagumbayan Sur", "Educare Center II", "Barangay Hall", "PAULA PALEAN", Pending),
        CenterEntry::seed(7, "Balatas", "Educare Center I", "Barangay Hall", "GEMMA M. BADANOY", Observed),
        CenterEntry::seed(8, "Balatas", "Educare Center II", "Barangay Hall", "HAZEL E. PORTUGUEZ", Pending),
        CenterEntry::seed(9, "Balatas", "Educare Center III", "Barangay Hall", "JUNABEL SJ. AYNERA", Observed),
        CenterEntry::seed(10, "Calauag", "Educare Center I", "Barangay Hall", "SALVE G. LEONEN", Pending),
        CenterEntry::seed(11, "Calauag", "Educare Center II", "St. Vincent", "GLORIA L. MORALES", Observed),
        CenterEntry::seed(12, "Calauag", "Educare Center III", "CLUPA", "VIRGINIA G. SACAYAN", Pending),
    ]
}

/// Dropdown and search criteria. `None`, blank, and `"All"` all mean no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObservationFilter {
    #[serde(default)]
    pub barangay: Option<String>,
    #[serde(default)]
    pub center: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

fn restriction(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != ALL)
}

impl ObservationFilter {
    pub fn matches(&self, entry: &CenterEntry) -> bool {
        let barangay = restriction(&self.barangay).map_or(true, |value| entry.barangay == value);
        let center = restriction(&self.center).map_or(true, |value| entry.center_name == value);
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map_or(true, |term| entry.mentions(&term.to_lowercase()));

        barangay && center && search
    }
}
