//! Single-selection typeahead over a pre-loaded catalog.
//!
//! The candidate list is fully resident in memory; filtering is a
//! case-insensitive substring match, no remote call per keystroke.

/// Search/selection state for one typeahead input.
#[derive(Debug, Clone)]
pub struct TypeaheadSelect {
    options: Vec<(i64, String)>,
    search: String,
    selected: Option<i64>,
    open: bool,
}

impl TypeaheadSelect {
    pub fn new(options: impl IntoIterator<Item = (i64, String)>) -> Self {
        Self {
            options: options.into_iter().collect(),
            search: String::new(),
            selected: None,
            open: false,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn selected_label(&self) -> Option<&str> {
        let id = self.selected?;
        self.options
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, label)| label.as_str())
    }

    /// Candidates matching the current search text. Empty when nothing
    /// has been typed, or when the text is exactly the selected item's
    /// label (nothing left to disambiguate).
    pub fn results(&self) -> Vec<(i64, &str)> {
        if self.search.is_empty() {
            return Vec::new();
        }
        if self
            .selected_label()
            .is_some_and(|label| label == self.search)
        {
            return Vec::new();
        }
        let needle = self.search.to_lowercase();
        self.options
            .iter()
            .filter(|(id, label)| {
                Some(*id) != self.selected && label.to_lowercase().contains(&needle)
            })
            .map(|(id, label)| (*id, label.as_str()))
            .collect()
    }

    /// The input gained focus; the candidate list becomes visible.
    pub fn focus(&mut self) {
        self.open = true;
    }

    /// Outside click: the candidate list closes, state is otherwise kept.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// The user edited the search text. A prior selection survives only
    /// while the text still matches its label exactly; otherwise typing
    /// invalidates it rather than keeping a stale id under mismatched
    /// text.
    pub fn input(&mut self, text: &str) {
        self.search = text.to_string();
        if self
            .selected_label()
            .is_some_and(|label| label != self.search)
        {
            self.selected = None;
        }
        self.open = true;
    }

    /// Pick a candidate: selection set, text mirrors the label, list
    /// closes. Unknown ids are ignored.
    pub fn select(&mut self, id: i64) -> bool {
        let Some(label) = self
            .options
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, label)| label.clone())
        else {
            return false;
        };
        self.selected = Some(id);
        self.search = label;
        self.open = false;
        true
    }

    /// Clear both selection and text to search again.
    pub fn clear(&mut self) {
        self.selected = None;
        self.search.clear();
    }
}
