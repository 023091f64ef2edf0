use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One completed trip by a vehicle/driver pair.
///
/// `total_expenses` and `avg_km_l` are taken as recorded; nothing here
/// recomputes them from the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Veículo
    pub vehicle: String,
    /// Motorista
    pub driver: String,
    /// Data de saída
    pub departure_date: NaiveDate,
    /// Data de chegada
    pub arrival_date: NaiveDate,
    /// Destino
    pub destination: String,
    /// Combustível (R$)
    pub fuel_cost: f64,
    /// Manutenção (R$)
    pub maintenance_cost: f64,
    /// Diária do motorista (R$)
    pub driver_daily: f64,
    /// Despesa total (R$)
    pub total_expenses: f64,
    /// KM total, never negative
    pub total_km: f64,
    /// Diferença de KM, planned vs. driven (signed)
    pub km_difference: f64,
    /// Litros de diesel, never negative
    pub total_diesel_liters: f64,
    /// Média KM/L
    pub avg_km_l: f64,
}
