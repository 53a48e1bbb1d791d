use leptos::prelude::*;

/// 404 fallback page.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page not found"</h1>
		<p>"The page you were looking for does not exist."</p>
		<a href="/">"Back to the editor"</a>
	}
}
