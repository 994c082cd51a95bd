use crate::map::CaseListItem;
use crate::templates::components::popup::delay_text;
use maud::{html, Markup};

/// List view next to the map. Rebuilt from the view on every render.
pub fn case_list(items: &[CaseListItem<'_>], oob: bool) -> Markup {
    html! {
        section id="case-list" class="card case-list" hx-swap-oob=[oob.then_some("true")] {
            h3 { "Open cases (" (items.len()) ")" }
            @if items.is_empty() {
                p class="empty" { "No open construction cases." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Case" }
                            th { "Hotel" }
                            th { "Subject" }
                            th { "Delay" }
                        }
                    }
                    tbody {
                        @for item in items {
                            tr class={ "severity-" (item.severity.as_str()) } {
                                td { (item.case.case_number) }
                                td { (item.case.hotel_name) }
                                td { (item.case.subject.as_deref().unwrap_or("No subject")) }
                                td {
                                    span
                                        class="severity-tag"
                                        style={ "background-color: " (item.severity.color()) }
                                    { (item.severity.as_str()) }
                                    " " (delay_text(item.case.estimated_delay))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
