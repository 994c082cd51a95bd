// src/map/view.rs
use crate::cases::CaseGateway;
use crate::domain::{CaseRecord, CaseStatus, Severity};
use crate::map::assets::{load_map_library, AssetLoader, MapLibrary};
use crate::map::markers::{case_icon, home_icon};
use crate::map::{LayerId, MapBackend, MapError, MapSettings, Notice, CASES_LAYER, HOME_LAYER};
use crate::templates::components::popup::case_popup;
use maud::html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Unloaded,
    ResourcesLoading,
    MapInitializing,
    DataLoading,
    Ready,
    Errored(String),
}

impl ViewState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Errored(msg) => Some(msg),
            _ => None,
        }
    }
}

/// One row of the list view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseListItem<'a> {
    pub case: &'a CaseRecord,
    pub severity: Severity,
}

/// The map dashboard component. Each instance owns its backend, its layers
/// and the last fetched snapshot; nothing is shared between instances.
pub struct MapView<B: MapBackend> {
    backend: B,
    settings: MapSettings,
    state: ViewState,
    library: Option<MapLibrary>,
    /// Set once the map and both layer groups exist.
    cases_layer: Option<LayerId>,
    cases: Vec<CaseRecord>,
    notices: Vec<Notice>,
}

impl<B: MapBackend> MapView<B> {
    pub fn new(backend: B, settings: MapSettings) -> Self {
        Self {
            backend,
            settings,
            state: ViewState::Unloaded,
            library: None,
            cases_layer: None,
            cases: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Picks up a map that is already on screen, in the `Ready` state.
    pub fn resume(mut backend: B, settings: MapSettings) -> Result<Self, MapError> {
        backend.find_layer_group(HOME_LAYER)?;
        let cases = backend.find_layer_group(CASES_LAYER)?;
        Ok(Self {
            state: ViewState::Ready,
            cases_layer: Some(cases),
            ..Self::new(backend, settings)
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn library(&self) -> Option<&MapLibrary> {
        self.library.as_ref()
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// True once the base map and its layers exist.
    pub fn has_map(&self) -> bool {
        self.cases_layer.is_some()
    }

    pub fn cases(&self) -> &[CaseRecord] {
        &self.cases
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs the whole start-up: assets, map, first fetch.
    pub fn mount(&mut self, assets: &dyn AssetLoader, gateway: &dyn CaseGateway) -> &ViewState {
        if self.state != ViewState::Unloaded {
            log::warn!("map view mounted twice, ignoring");
            return &self.state;
        }

        self.transition(ViewState::ResourcesLoading);
        match load_map_library(assets) {
            Ok(library) => self.library = Some(library),
            Err(e) => return self.fail(e),
        }

        self.transition(ViewState::MapInitializing);
        if let Err(e) = self.initialize_map() {
            return self.fail(e);
        }

        self.load_cases(gateway)
    }

    /// Clears the cases layer and rebuilds it from a fresh fetch.
    ///
    /// Allowed once the map exists, including after a failed fetch.
    pub fn refresh(&mut self, gateway: &dyn CaseGateway) -> &ViewState {
        if self.cases_layer.is_none() {
            log::warn!("refresh requested before the map exists ({:?})", self.state);
            return &self.state;
        }
        self.load_cases(gateway)
    }

    /// Closes a case, then refreshes whatever the outcome.
    pub fn resolve(&mut self, case_id: &str, gateway: &dyn CaseGateway) -> Notice {
        let number = self.case_number_of(case_id, gateway);

        let notice = match gateway.update_case_status(case_id, CaseStatus::Closed) {
            Ok(()) => {
                let message = match number {
                    Some(number) => format!("Case {number} is now closed."),
                    None => "The case is now closed.".to_string(),
                };
                Notice::success("Case resolved", message)
            }
            Err(e) => Notice::error("Could not resolve case", e.message),
        };
        self.notices.push(notice.clone());

        self.refresh(gateway);
        notice
    }

    /// Current snapshot, most delayed first, each with its tier.
    pub fn case_list(&self) -> Vec<CaseListItem<'_>> {
        let mut items: Vec<CaseListItem<'_>> = self
            .cases
            .iter()
            .map(|case| CaseListItem {
                case,
                severity: Severity::classify(case.estimated_delay),
            })
            .collect();
        items.sort_by(|a, b| b.case.estimated_delay.total_cmp(&a.case.estimated_delay));
        items
    }

    /// Case number for the toast. A resumed view has no snapshot yet, so it
    /// asks the gateway.
    fn case_number_of(&self, case_id: &str, gateway: &dyn CaseGateway) -> Option<String> {
        let number_in = |cases: &[CaseRecord]| {
            cases
                .iter()
                .find(|c| c.id == case_id)
                .map(|c| c.case_number.clone())
        };
        if !self.cases.is_empty() {
            return number_in(&self.cases);
        }
        match gateway.fetch_open_cases() {
            Ok(cases) => number_in(&cases),
            Err(e) => {
                log::debug!("no case number for {case_id}: {}", e.message);
                None
            }
        }
    }

    fn initialize_map(&mut self) -> Result<(), MapError> {
        let settings = &self.settings;
        self.backend.create_map(&settings.container_id)?;
        self.backend.set_view(settings.center, settings.zoom)?;
        self.backend.add_tile_layer(&settings.tiles)?;

        let home = self.backend.create_layer_group(HOME_LAYER)?;
        let cases = self.backend.create_layer_group(CASES_LAYER)?;

        let marker = self
            .backend
            .create_marker(&home, settings.home.coordinate, &home_icon())?;
        self.backend.bind_popup(
            marker,
            html! { strong { (settings.home.label) } },
        )?;

        self.cases_layer = Some(cases);
        Ok(())
    }

    fn load_cases(&mut self, gateway: &dyn CaseGateway) -> &ViewState {
        self.transition(ViewState::DataLoading);

        let fetched = match gateway.fetch_open_cases() {
            Ok(cases) => cases,
            Err(e) => {
                self.notices
                    .push(Notice::error("Could not load cases", e.message.clone()));
                return self.fail(MapError::Fetch(e.message));
            }
        };

        if let Err(e) = self.draw_cases(&fetched) {
            return self.fail(e);
        }
        log::debug!("map shows {} cases", fetched.len());
        self.cases = fetched;
        self.transition(ViewState::Ready)
    }

    fn draw_cases(&mut self, cases: &[CaseRecord]) -> Result<(), MapError> {
        let layer = match &self.cases_layer {
            Some(layer) => layer.clone(),
            None => return Err(MapError::Init("cases layer missing".into())),
        };

        self.backend.clear_layer_group(&layer)?;
        for case in cases {
            let severity = Severity::classify(case.estimated_delay);
            let marker = self
                .backend
                .create_marker(&layer, case.coordinate(), &case_icon(severity))?;
            self.backend.bind_popup(marker, case_popup(case))?;
        }
        Ok(())
    }

    fn transition(&mut self, next: ViewState) -> &ViewState {
        log::debug!("map view: {:?} -> {:?}", self.state, next);
        self.state = next;
        &self.state
    }

    fn fail(&mut self, err: MapError) -> &ViewState {
        match &err {
            MapError::Fetch(_) => log::warn!("{err}"),
            _ => log::error!("{err}"),
        }
        self.transition(ViewState::Errored(err.to_string()))
    }
}
