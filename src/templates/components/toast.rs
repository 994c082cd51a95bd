use crate::map::Notice;
use maud::{html, Markup, PreEscaped};

const AUTO_DISMISS: &str =
    "(() => { const t = document.currentScript.parentElement; setTimeout(() => t.remove(), 5000); })();";

/// A toast that removes itself after a few seconds.
pub fn toast(notice: &Notice) -> Markup {
    let class = if notice.is_error() {
        "toast toast--error"
    } else {
        "toast toast--success"
    };
    html! {
        div class=(class) role="status" onclick="this.remove()" {
            strong { (notice.title) }
            p { (notice.message) }
            script { (PreEscaped(AUTO_DISMISS)) }
        }
    }
}

/// Toasts appended to `#toasts` from any htmx response.
pub fn toasts_oob(notices: &[Notice]) -> Markup {
    html! {
        @if !notices.is_empty() {
            div hx-swap-oob="beforeend:#toasts" {
                @for notice in notices {
                    (toast(notice))
                }
            }
        }
    }
}
