//! Determinate progress bar, counted in chunks

use dioxus::prelude::*;

#[component]
pub fn ProgressBar(value: usize, max: usize) -> Element {
    // A zero maximum renders as an empty bar
    let max = max.max(1);
    let value = value.min(max);

    rsx! {
        progress {
            class: "progress",
            max: "{max}",
            value: "{value}",
        }
    }
}
