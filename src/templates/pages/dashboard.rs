use crate::map::{CaseListItem, MapLibrary, Notice, ViewState};
use crate::templates::components::{blocking_card, case_list, toast, toasts_oob};
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

pub struct DashboardVm<'a> {
    pub email: &'a str,
    pub state: &'a ViewState,
    pub has_map: bool,
    pub library: Option<&'a MapLibrary>,
    pub container_id: &'a str,
    pub map_script: String,
    pub items: &'a [CaseListItem<'a>],
    pub notices: &'a [Notice],
}

pub fn dashboard_page(vm: &DashboardVm<'_>) -> Markup {
    desktop_layout(
        "Site visits",
        vm.library,
        html! {
            main class="container" {
                h1 { "Open construction cases" }
                p { "Signed in as " strong { (vm.email) } }

                @if vm.has_map {
                    div class="map-toolbar" {
                        button
                            class="btn"
                            id="refresh-cases"
                            hx-get="/dashboard/cases-layer"
                            hx-target="#map-updates"
                            hx-swap="innerHTML"
                            hx-disabled-elt="this"
                        { "Refresh" }
                    }
                    div id=(vm.container_id) class="case-map" {}
                    div id="map-updates" {
                        script { (PreEscaped(&vm.map_script)) }
                    }
                    (case_list(vm.items, false))
                } @else {
                    (blocking_card(
                        "The map is unavailable",
                        vm.state.error().unwrap_or("The map could not be started."),
                    ))
                }

                div class="toasts toasts--initial" {
                    @for notice in vm.notices {
                        (toast(notice))
                    }
                }
            }
        },
    )
}

/// Response to a refresh or resolve: the map script, the list, any toasts.
///
/// `items` is `None` when the fetch failed; the list on screen is left alone.
pub fn map_update(script: &str, items: Option<&[CaseListItem<'_>]>, notices: &[Notice]) -> Markup {
    html! {
        script { (PreEscaped(script)) }
        @if let Some(items) = items {
            (case_list(items, true))
        }
        (toasts_oob(notices))
    }
}
