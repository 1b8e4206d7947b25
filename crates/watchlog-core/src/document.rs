//! Read-only view over the host document.

/// Read-only access to the currently rendered document.
///
/// Implementations wrap whatever environment renders the page; the capture
/// pipeline only issues selector queries against it and never mutates.
/// Queries are expected to answer from live state, so two reads across an
/// await point may observe different pages.
pub trait DocumentSurface: Send + Sync {
    /// Current full address of the displayed page.
    fn location(&self) -> String;

    /// Trimmed text content of the first element matching `selector`.
    fn query_text(&self, selector: &str) -> Option<String>;

    /// Attribute value of the first element matching `selector`.
    fn query_attr(&self, selector: &str, attr: &str) -> Option<String>;

    /// Attribute values of every element matching `selector`, in document
    /// order.
    fn query_attr_all(&self, selector: &str, attr: &str) -> Vec<String>;

    /// Reported duration of the live media element, if one is present.
    fn media_duration_seconds(&self) -> Option<f64>;

    /// The document title, if set.
    fn document_title(&self) -> Option<String>;
}
