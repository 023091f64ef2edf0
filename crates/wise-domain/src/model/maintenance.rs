use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of cost event recorded in the maintenance history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceCategory {
    /// Miscellaneous expenses (tolls, tyres, washing...)
    #[serde(rename = "DIVERSAS")]
    Diversas,
    /// Workshop maintenance
    #[serde(rename = "MANUTENCAO")]
    Manutencao,
}

impl MaintenanceCategory {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceCategory::Diversas => "DIVERSAS",
            MaintenanceCategory::Manutencao => "MANUTENÇÃO",
        }
    }

    /// Parse a category code as written in exported sheets
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_uppercase();
        match code.as_str() {
            "DIVERSAS" | "DIVERSA" | "MISC" => Some(MaintenanceCategory::Diversas),
            "MANUTENCAO" | "MANUTENÇÃO" | "MAINTENANCE" => Some(MaintenanceCategory::Manutencao),
            _ => None,
        }
    }
}

impl std::fmt::Display for MaintenanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One maintenance or miscellaneous cost event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub date: NaiveDate,
    pub driver: String,
    pub vehicle: String,
    pub cost: f64,
    pub responsible: String,
    pub observation: String,
    pub category: MaintenanceCategory,
}
