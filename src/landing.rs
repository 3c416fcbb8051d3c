#![allow(non_snake_case)]
use dioxus::prelude::*;
use studyhall::counter::{CounterDisplay, CounterPayload};

use crate::{fetch_json, Route};

// landing webpage: the public counter and a way into a test

#[component]
pub fn Landing() -> Element {
    let mut test_id = use_signal(String::new);
    let nav = use_navigator();
    let counter = use_resource(|| async { fetch_json::<CounterPayload>("/api/counter").await });

    // the fallback text is server config and only arrives inside a payload,
    // so an unreachable api shows a blank
    let counter_text = match &*counter.read_unchecked() {
        Some(Ok(payload)) => payload.text(),
        _ => String::new(),
    };

    rsx! {
        div { style: "display:flex;flex-direction:column;align-items:center;justify-content:center;height:100vh;gap:1rem;font-family:sans-serif;",
            h1 { "Studyhall" }

            CounterDisplay { text: counter_text }

            Link { to: Route::Tests {}, "Browse tests" }

            div { style: "display:flex;gap:0.5rem;",
                input {
                    placeholder: "Paste a test ID...",
                    value: "{test_id}",
                    oninput: move |e| test_id.set(e.value()),
                }
                button {
                    onclick: move |_| {
                        let id = test_id.read().clone();
                        if !id.is_empty() {
                            nav.push(Route::Test { id });
                        }
                    },
                    "Open"
                }
            }
        }
    }
}
