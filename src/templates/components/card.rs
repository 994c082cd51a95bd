use maud::{html, Markup};

/// Card shown in place of the map when the page cannot work.
pub fn blocking_card(title: &str, message: &str) -> Markup {
    html! {
        div class="card card--blocking" role="alert" {
            h2 { (title) }
            p class="blocking-error" { (message) }
        }
    }
}
