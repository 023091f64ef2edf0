//! Excel export functionality

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use wise_types::{Error, Result};

use crate::app::FleetDashboard;

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export the dashboard to an Excel workbook
pub fn export_to_excel(dashboard: &FleetDashboard, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let overview_sheet = workbook.add_worksheet();
    write_overview_sheet(overview_sheet, dashboard)?;

    let vehicles_sheet = workbook.add_worksheet();
    write_vehicles_sheet(vehicles_sheet, dashboard)?;

    let drivers_sheet = workbook.add_worksheet();
    write_drivers_sheet(drivers_sheet, dashboard)?;

    let maintenance_sheet = workbook.add_worksheet();
    write_maintenance_sheet(maintenance_sheet, dashboard)?;

    workbook.save(output_path).map_err(excel_err)?;
    tracing::info!(path = %output_path.display(), "workbook saved");

    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }
    Ok(())
}

fn write_overview_sheet(sheet: &mut Worksheet, dashboard: &FleetDashboard) -> Result<()> {
    sheet.set_name("Overview").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("\"R$\" #,##0.00");

    sheet
        .write_string_with_format(0, 0, "Fleet Overview", &header_format)
        .map_err(excel_err)?;

    let global = dashboard.overview();
    let rows: [(&str, f64, Option<&Format>); 5] = [
        ("Trips", global.trip_count as f64, None),
        ("Total spent", global.total_spent, Some(&money)),
        ("Total km", global.total_km, None),
        ("Average km/L", global.avg_km_l, None),
        ("Cost per km", global.avg_cost_per_km, Some(&money)),
    ];

    for (i, (label, value, format)) in rows.iter().enumerate() {
        let row = (i + 2) as u32;
        sheet.write_string(row, 0, *label).map_err(excel_err)?;
        let written = match format {
            Some(format) => sheet.write_number_with_format(row, 1, *value, format),
            None => sheet.write_number(row, 1, *value),
        };
        written.map_err(excel_err)?;
    }

    sheet.set_column_width(0, 18).map_err(excel_err)?;
    sheet.set_column_width(1, 16).map_err(excel_err)?;

    Ok(())
}

fn write_vehicles_sheet(sheet: &mut Worksheet, dashboard: &FleetDashboard) -> Result<()> {
    sheet.set_name("Vehicles").map_err(excel_err)?;
    write_headers(
        sheet,
        &["Vehicle", "Trips", "KM", "Cost", "Liters", "KM/L", "Status"],
    )?;

    for (row_idx, v) in dashboard.vehicles().iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, &v.name).map_err(excel_err)?;
        sheet.write_number(row, 1, v.trips).map_err(excel_err)?;
        sheet.write_number(row, 2, v.km).map_err(excel_err)?;
        sheet.write_number(row, 3, v.cost).map_err(excel_err)?;
        sheet.write_number(row, 4, v.liters).map_err(excel_err)?;
        sheet.write_number(row, 5, v.efficiency).map_err(excel_err)?;
        sheet
            .write_string(row, 6, v.band().label())
            .map_err(excel_err)?;
    }

    sheet.set_column_width(0, 18).map_err(excel_err)?;
    Ok(())
}

fn write_drivers_sheet(sheet: &mut Worksheet, dashboard: &FleetDashboard) -> Result<()> {
    sheet.set_name("Drivers").map_err(excel_err)?;
    write_headers(
        sheet,
        &[
            "Driver",
            "Trips",
            "KM",
            "Liters",
            "Cost",
            "KM/L",
            "Avg km diff",
            "Cost per km",
            "Score",
            "Rating",
            "Attention",
        ],
    )?;

    for (row_idx, d) in dashboard.drivers().iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let attention = d
            .attention_points()
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join("; ");

        sheet.write_string(row, 0, &d.name).map_err(excel_err)?;
        sheet.write_number(row, 1, d.trips).map_err(excel_err)?;
        sheet.write_number(row, 2, d.total_km).map_err(excel_err)?;
        sheet.write_number(row, 3, d.total_liters).map_err(excel_err)?;
        sheet.write_number(row, 4, d.total_cost).map_err(excel_err)?;
        sheet.write_number(row, 5, d.avg_km_l).map_err(excel_err)?;
        sheet.write_number(row, 6, d.avg_km_diff).map_err(excel_err)?;
        sheet.write_number(row, 7, d.cost_per_km).map_err(excel_err)?;
        sheet.write_number(row, 8, d.score).map_err(excel_err)?;
        sheet
            .write_string(row, 9, d.band().label())
            .map_err(excel_err)?;
        sheet.write_string(row, 10, &attention).map_err(excel_err)?;
    }

    sheet.set_column_width(0, 20).map_err(excel_err)?;
    sheet.set_column_width(10, 40).map_err(excel_err)?;
    Ok(())
}

fn write_maintenance_sheet(sheet: &mut Worksheet, dashboard: &FleetDashboard) -> Result<()> {
    sheet.set_name("Maintenance").map_err(excel_err)?;
    write_headers(
        sheet,
        &[
            "Date",
            "Vehicle",
            "Driver",
            "Category",
            "Responsible",
            "Observation",
            "Cost",
        ],
    )?;

    for (row_idx, m) in dashboard.data().maintenance.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet
            .write_string(row, 0, m.date.format("%d/%m/%Y").to_string())
            .map_err(excel_err)?;
        sheet.write_string(row, 1, &m.vehicle).map_err(excel_err)?;
        sheet.write_string(row, 2, &m.driver).map_err(excel_err)?;
        sheet
            .write_string(row, 3, m.category.label())
            .map_err(excel_err)?;
        sheet.write_string(row, 4, &m.responsible).map_err(excel_err)?;
        sheet.write_string(row, 5, &m.observation).map_err(excel_err)?;
        sheet.write_number(row, 6, m.cost).map_err(excel_err)?;
    }

    sheet.set_column_width(0, 12).map_err(excel_err)?;
    sheet.set_column_width(5, 40).map_err(excel_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wise_infra::builtin::{builtin_maintenance, builtin_trips};

    use crate::repository::FleetData;

    #[test]
    fn test_export_writes_workbook() {
        let dashboard = FleetDashboard::new(FleetData::new(
            builtin_trips().unwrap(),
            builtin_maintenance().unwrap(),
        ));
        let dir = tempdir().unwrap();
        let path = dir.path().join("frota.xlsx");

        export_to_excel(&dashboard, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 1000);
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_empty_dataset() {
        let dashboard = FleetDashboard::new(FleetData::new(Vec::new(), Vec::new()));
        let dir = tempdir().unwrap();
        let path = dir.path().join("vazio.xlsx");
        assert!(export_to_excel(&dashboard, &path).is_ok());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dashboard = FleetDashboard::new(FleetData::new(Vec::new(), Vec::new()));
        let path = Path::new("/nonexistent/dir/frota.xlsx");
        assert!(matches!(
            export_to_excel(&dashboard, path),
            Err(Error::Excel(_))
        ));
    }
}
