#![allow(non_snake_case)]

use dioxus::prelude::*;
use serde::de::DeserializeOwned;
// this hosts the front end
mod landing;

use landing::Landing;
use studyhall::views::{NoteView, SubmissionView, TestSummary, TestView, TestsList};

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Landing {},
    #[route("/note/:id")]
    Note { id: String },
    #[route("/test/:id")]
    Test { id: String },
    #[route("/submission/:id")]
    Submission { id: String },
    #[route("/tests")]
    Tests {},
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! { Router::<Route> {} }
}

pub(crate) async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, gloo_net::Error> {
    gloo_net::http::Request::get(path).send().await?.json::<T>().await
}

// the router has already pulled the id out of the path

#[component]
fn Note(id: String) -> Element {
    rsx! { NoteView { id } }
}

#[component]
fn Test(id: String) -> Element {
    rsx! { TestView { id } }
}

#[component]
fn Submission(id: String) -> Element {
    rsx! { SubmissionView { id } }
}

#[component]
fn Tests() -> Element {
    let tests = use_resource(|| async { fetch_json::<Vec<TestSummary>>("/api/tests").await });

    match &*tests.read_unchecked() {
        Some(Ok(tests)) => rsx! { TestsList { tests: tests.clone() } },
        Some(Err(e)) => rsx! { p { "Could not load tests: {e}" } },
        None => rsx! { p { "Loading..." } },
    }
}
