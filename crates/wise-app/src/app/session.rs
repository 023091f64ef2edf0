//! Presentation state: active view, route form and the live route plan

use serde::{Deserialize, Serialize};
use wise_domain::model::{RoutePlan, RouteRequest};
use wise_domain::service::{SimulationSource, SimulatorSettings};
use wise_types::Result;

use super::dashboard_service::FleetDashboard;

/// Which screen is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Dashboard,
    RoutePlanner,
    Maintenance,
}

impl ViewState {
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Dashboard => "Torre de Controle",
            ViewState::RoutePlanner => "Planejador de Rotas",
            ViewState::Maintenance => "Frota e Motoristas",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            ViewState::Dashboard => "Control Tower",
            ViewState::RoutePlanner => "Route Planner",
            ViewState::Maintenance => "Fleet & Drivers",
        }
    }
}

/// Route planner form fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteForm {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub vehicle: Option<String>,
}

impl Default for RouteForm {
    fn default() -> Self {
        Self {
            origin: "Curitiba".to_string(),
            destination: "São Paulo".to_string(),
            date: String::new(),
            vehicle: None,
        }
    }
}

impl RouteForm {
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            date: self.date.clone(),
            vehicle: self.vehicle.clone(),
        }
    }
}

/// State owned by the presentation layer between interactions
#[derive(Debug, Clone, Default)]
pub struct Session {
    view: ViewState,
    form: RouteForm,
    plan: Option<RoutePlan>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn form(&self) -> &RouteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RouteForm {
        &mut self.form
    }

    /// The plan currently shown on the route planner, if any
    pub fn plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }

    /// Switch views. Leaving the route planner discards the current plan.
    pub fn select_view(&mut self, view: ViewState) {
        if self.view == ViewState::RoutePlanner && view != ViewState::RoutePlanner {
            self.plan = None;
        }
        self.view = view;
    }

    /// Run the simulator on the current form.
    ///
    /// On success the new plan replaces the previous one; on error the
    /// previous plan is kept.
    pub fn simulate<S: SimulationSource + ?Sized>(
        &mut self,
        dashboard: &FleetDashboard,
        settings: &SimulatorSettings,
        source: &mut S,
    ) -> Result<&RoutePlan> {
        let plan = dashboard.simulate(&self.form.to_request(), settings, source)?;
        Ok(&*self.plan.insert(plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wise_domain::model::WeatherRisk;
    use wise_domain::service::FixedSource;
    use wise_infra::builtin::{builtin_maintenance, builtin_trips};
    use wise_types::Error;

    use crate::repository::FleetData;

    fn dashboard() -> FleetDashboard {
        FleetDashboard::new(FleetData::new(
            builtin_trips().unwrap(),
            builtin_maintenance().unwrap(),
        ))
    }

    fn source(distance_km: u32) -> FixedSource {
        FixedSource {
            distance_km,
            weather_risk: WeatherRisk::High,
        }
    }

    #[test]
    fn test_defaults() {
        let session = Session::new();
        assert_eq!(session.view(), ViewState::Dashboard);
        assert_eq!(session.form().origin, "Curitiba");
        assert_eq!(session.form().destination, "São Paulo");
        assert!(session.plan().is_none());
    }

    #[test]
    fn test_simulate_replaces_plan() {
        let dash = dashboard();
        let settings = SimulatorSettings::default();
        let mut session = Session::new();
        session.select_view(ViewState::RoutePlanner);
        session.form_mut().vehicle = Some("AXOR 2544".to_string());

        session.simulate(&dash, &settings, &mut source(500)).unwrap();
        assert_eq!(session.plan().unwrap().distance_km, 500);

        session.simulate(&dash, &settings, &mut source(650)).unwrap();
        assert_eq!(session.plan().unwrap().distance_km, 650);
    }

    #[test]
    fn test_failed_simulation_keeps_previous_plan() {
        let dash = dashboard();
        let settings = SimulatorSettings::default();
        let mut session = Session::new();
        session.select_view(ViewState::RoutePlanner);
        session.form_mut().vehicle = Some("ATEGO 3030".to_string());
        session.simulate(&dash, &settings, &mut source(420)).unwrap();

        session.form_mut().vehicle = Some("   ".to_string());
        let result = session.simulate(&dash, &settings, &mut source(700));
        assert!(matches!(result, Err(Error::MissingVehicleSelection)));
        assert_eq!(session.plan().unwrap().distance_km, 420);
        assert_eq!(session.plan().unwrap().vehicle, "ATEGO 3030");
    }

    #[test]
    fn test_leaving_planner_discards_plan() {
        let dash = dashboard();
        let mut session = Session::new();
        session.select_view(ViewState::RoutePlanner);
        session.form_mut().vehicle = Some("ACCELO 1017".to_string());
        session
            .simulate(&dash, &SimulatorSettings::default(), &mut source(300))
            .unwrap();

        session.select_view(ViewState::RoutePlanner);
        assert!(session.plan().is_some());

        session.select_view(ViewState::Maintenance);
        assert!(session.plan().is_none());
        assert_eq!(session.view(), ViewState::Maintenance);
    }
}
