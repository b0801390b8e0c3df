use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div style="color: #888; font-family: sans-serif; padding: 40px;">
			<h1>"Page not found"</h1>
			<a href="/" style="color: #8b5cf6;">"Back to the mind map"</a>
		</div>
	}
}
