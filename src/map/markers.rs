// src/map/markers.rs
use maud::html;
use url::form_urlencoded;

use crate::domain::{LatLng, Severity};
use crate::map::MarkerIcon;

const PIN_SIZE: u32 = 22;
const HOME_SIZE: u32 = 30;

/// Round pin filled with the tier color.
pub fn case_icon(severity: Severity) -> MarkerIcon {
    let style = format!(
        "background-color: {}; width: {PIN_SIZE}px; height: {PIN_SIZE}px; border-radius: 50%; \
         border: 2px solid #ffffff; box-shadow: 0 0 4px rgba(0, 0, 0, 0.5);",
        severity.color()
    );
    MarkerIcon {
        html: html! {
            div class={ "case-pin case-pin--" (severity.as_str()) } style=(style) {}
        }
        .into_string(),
        class_name: "case-marker",
        size: (PIN_SIZE, PIN_SIZE),
        anchor: (PIN_SIZE / 2, PIN_SIZE / 2),
    }
}

pub fn home_icon() -> MarkerIcon {
    let style = format!(
        "width: {HOME_SIZE}px; height: {HOME_SIZE}px; line-height: {HOME_SIZE}px; \
         text-align: center; font-size: 18px; background-color: #524ed2; color: #ffffff; \
         border-radius: 6px;"
    );
    MarkerIcon {
        html: html! {
            div class="home-pin" style=(style) { "⌂" }
        }
        .into_string(),
        class_name: "home-marker",
        size: (HOME_SIZE, HOME_SIZE),
        anchor: (HOME_SIZE / 2, HOME_SIZE),
    }
}

/// Turn-by-turn link to a site. Formatting only; the URL is never checked.
pub fn directions_url(site_name: &str, at: LatLng) -> String {
    let name: String = form_urlencoded::byte_serialize(site_name.as_bytes()).collect();
    format!(
        "https://waze.com/ul?q={name}&ll={},{}&navigate=yes",
        at.lat, at.lng
    )
}
