//! Fetches and decodes the graph document.

use log::info;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::error::{GraphError, Result};
use super::types::GraphDocument;

pub fn parse_document(text: &str) -> Result<GraphDocument> {
	Ok(serde_json::from_str(text)?)
}

/// Fetches `url` with the browser's fetch API and decodes it.
pub async fn fetch_document(url: &str) -> Result<GraphDocument> {
	let opts = RequestInit::new();
	opts.set_method("GET");

	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| GraphError::LoadFailure(format!("request error: {e:?}")))?;
	request
		.headers()
		.set("Content-Type", "application/json")
		.map_err(|e| GraphError::LoadFailure(format!("header error: {e:?}")))?;

	let window = web_sys::window().ok_or_else(|| GraphError::LoadFailure("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| GraphError::LoadFailure(format!("fetch error: {e:?}")))?
		.dyn_into()
		.map_err(|_| GraphError::LoadFailure("response is not a Response".into()))?;

	if !response.ok() {
		return Err(GraphError::LoadFailure(format!(
			"HTTP {} fetching {url}",
			response.status()
		)));
	}

	let text = JsFuture::from(
		response
			.text()
			.map_err(|e| GraphError::LoadFailure(format!("body error: {e:?}")))?,
	)
	.await
	.map_err(|e| GraphError::LoadFailure(format!("body error: {e:?}")))?
	.as_string()
	.ok_or_else(|| GraphError::LoadFailure("body is not text".into()))?;

	let doc = parse_document(&text)?;
	info!("loaded {url}: {} labels, {} edges", doc.labels.len(), doc.edges.len());
	Ok(doc)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn malformed_documents_are_load_failures() {
		for text in ["", "[]", r#"{"labels": "A"}"#, r#"{"labels": [], "edges": [[0, 1]]}"#] {
			assert!(
				matches!(parse_document(text), Err(GraphError::LoadFailure(_))),
				"{text}"
			);
		}
	}

	#[test]
	fn parses_the_reference_document() {
		let doc = parse_document(
			r#"{
				"visualFormat": "topologically sorted",
				"labels": ["A", "B", "C"],
				"edges": [[0, 1, "x"], [1, 2, "y"]]
			}"#,
		)
		.unwrap();
		assert_eq!(doc.labels.len(), 3);
		assert_eq!(doc.edges.len(), 2);
	}
}
