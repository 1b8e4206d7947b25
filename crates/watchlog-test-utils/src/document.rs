use parking_lot::Mutex;
use std::collections::HashMap;
use watchlog_core::DocumentSurface;

#[derive(Default)]
struct DocumentState {
    location: String,
    document_title: Option<String>,
    texts: HashMap<String, String>,
    attrs: HashMap<(String, String), String>,
    attr_lists: HashMap<(String, String), Vec<String>>,
    media_duration: Option<f64>,
}

/// Scriptable document stub.
///
/// Built up with `with_*` methods; the `set_*` methods mutate through a
/// shared reference so tests can simulate a navigation while a pipeline
/// holds the document.
#[derive(Default)]
pub struct StaticDocument {
    state: Mutex<DocumentState>,
}

impl StaticDocument {
    pub fn new(location: &str) -> Self {
        let doc = Self::default();
        doc.state.lock().location = location.to_string();
        doc
    }

    pub fn with_document_title(self, title: &str) -> Self {
        self.state.lock().document_title = Some(title.to_string());
        self
    }

    pub fn with_text(self, selector: &str, text: &str) -> Self {
        self.state
            .lock()
            .texts
            .insert(selector.to_string(), text.to_string());
        self
    }

    pub fn with_attr(self, selector: &str, attr: &str, value: &str) -> Self {
        self.state
            .lock()
            .attrs
            .insert((selector.to_string(), attr.to_string()), value.to_string());
        self
    }

    pub fn with_attr_all(self, selector: &str, attr: &str, values: &[&str]) -> Self {
        self.state.lock().attr_lists.insert(
            (selector.to_string(), attr.to_string()),
            values.iter().map(|value| value.to_string()).collect(),
        );
        self
    }

    pub fn with_media_duration(self, seconds: f64) -> Self {
        self.state.lock().media_duration = Some(seconds);
        self
    }

    /// Simulate a navigation to a new location.
    pub fn set_location(&self, location: &str) {
        self.state.lock().location = location.to_string();
    }

    /// Replace the text a selector resolves to.
    pub fn set_text(&self, selector: &str, text: &str) {
        self.state
            .lock()
            .texts
            .insert(selector.to_string(), text.to_string());
    }
}

impl DocumentSurface for StaticDocument {
    fn location(&self) -> String {
        self.state.lock().location.clone()
    }

    fn query_text(&self, selector: &str) -> Option<String> {
        self.state.lock().texts.get(selector).cloned()
    }

    fn query_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let state = self.state.lock();
        state
            .attrs
            .get(&(selector.to_string(), attr.to_string()))
            .cloned()
            .or_else(|| {
                state
                    .attr_lists
                    .get(&(selector.to_string(), attr.to_string()))
                    .and_then(|values| values.first().cloned())
            })
    }

    fn query_attr_all(&self, selector: &str, attr: &str) -> Vec<String> {
        self.state
            .lock()
            .attr_lists
            .get(&(selector.to_string(), attr.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn media_duration_seconds(&self) -> Option<f64> {
        self.state.lock().media_duration
    }

    fn document_title(&self) -> Option<String> {
        self.state.lock().document_title.clone()
    }
}
