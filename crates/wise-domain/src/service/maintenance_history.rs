//! Maintenance history listing
//!
//! Records are shown verbatim; nothing here aggregates costs.

use super::util::{format_brl, truncate_str};
use crate::model::{MaintenanceCategory, MaintenanceRecord};

/// Keep records matching the optional vehicle and category filters, in order
pub fn filter_maintenance(
    records: &[MaintenanceRecord],
    vehicle: Option<&str>,
    category: Option<MaintenanceCategory>,
) -> Vec<MaintenanceRecord> {
    records
        .iter()
        .filter(|r| vehicle.map_or(true, |v| r.vehicle.eq_ignore_ascii_case(v.trim())))
        .filter(|r| category.map_or(true, |c| r.category == c))
        .cloned()
        .collect()
}

pub fn generate_maintenance_report(records: &[MaintenanceRecord]) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("        Histórico de Manutenção da Frota          \n");
    report.push_str("        Fleet Maintenance History                 \n");
    report.push_str("==================================================\n\n");

    if records.is_empty() {
        report.push_str("【Sem registros / No records】\n\n");
        report.push_str("==================================================\n");
        return report;
    }

    report.push_str("-".repeat(86).as_str());
    report.push('\n');
    report.push_str(&format!(
        "{:<10} {:<16} {:<11} {:<30} {:>15}\n",
        "Data", "Veículo", "Categoria", "Observação", "Custo"
    ));
    report.push_str("-".repeat(86).as_str());
    report.push('\n');
    for r in records {
        report.push_str(&format!(
            "{:<10} {:<16} {:<11} {:<30} {:>15}\n",
            r.date.format("%d/%m/%Y").to_string(),
            truncate_str(&r.vehicle, 15),
            r.category.label(),
            truncate_str(&r.observation, 29),
            format_brl(r.cost)
        ));
    }
    report.push('\n');
    report.push_str(&format!("  Registros / Records: {}\n\n", records.len()));
    report.push_str("==================================================\n");
    report
}
