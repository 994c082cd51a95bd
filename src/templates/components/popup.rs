use crate::domain::{CaseRecord, Severity};
use crate::map::markers::directions_url;
use crate::router::resolve_path;
use maud::{html, Markup};

/// Popup shown when a case marker is clicked.
///
/// The resolve button posts its own case id; nothing global is involved.
pub fn case_popup(case: &CaseRecord) -> Markup {
    let severity = Severity::classify(case.estimated_delay);
    let directions = directions_url(&case.hotel_name, case.coordinate());

    html! {
        div class="case-popup" data-case-id=(case.id) {
            h3 { (case.hotel_name) }
            p { strong { "Case: " } (case.case_number) }
            p { strong { "Subject: " } (case.subject.as_deref().unwrap_or("No subject")) }
            p { strong { "Issue: " } (case.issue_category.as_deref().unwrap_or("Not specified")) }
            p class="case-delay" {
                strong { "Delay: " }
                span style={ "color: " (severity.color()) "; font-weight: bold;" } {
                    (delay_text(case.estimated_delay))
                }
            }
            p {
                strong { "Construction: " }
                (case.construction_phase.as_deref().unwrap_or("Unknown phase"))
                " (" (case.construction_progress) "%)"
            }
            @if let Some(phone) = &case.phone {
                p class="case-phone" { strong { "Phone: " } a href={ "tel:" (phone) } { (phone) } }
            }
            p { strong { "Address: " } (case.address.as_deref().unwrap_or("Address not available")) }
            div class="case-actions" {
                a class="btn" href=(directions) target="_blank" rel="noopener" { "Directions" }
                button
                    class="btn primary"
                    hx-post=(resolve_path(&case.id))
                    hx-target="#map-updates"
                    hx-swap="innerHTML"
                    hx-disabled-elt="this"
                { "Mark resolved" }
            }
        }
    }
}

pub fn delay_text(days: f64) -> String {
    if days == 1.0 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
