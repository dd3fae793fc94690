//! Custom bulk actions offered on the table view.

use serde::{Deserialize, Serialize};

/// One entry of the table view's "More" menu.
///
/// Serializes to the descriptor shape the host's client-side code expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAction {
    pub title: String,
    /// Name of the client-side handler invoked with the selected ids.
    pub function: String,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl BatchAction {
    pub fn new(title: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            function: function.into(),
            css_class: None,
            icon: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Caller-supplied actions spliced around a table's own actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSlots {
    #[serde(default)]
    pub top: Vec<BatchAction>,
    #[serde(default)]
    pub bottom: Vec<BatchAction>,
}

impl BatchSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// `top`, then `actions`, then `bottom`.
    pub fn splice(self, actions: impl IntoIterator<Item = BatchAction>) -> Vec<BatchAction> {
        let mut out = self.top;
        out.extend(actions);
        out.extend(self.bottom);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_keeps_top_own_bottom_order() {
        let slots = BatchSlots {
            top: vec![BatchAction::new("Top", "top")],
            bottom: vec![BatchAction::new("Bottom", "bottom")],
        };
        let titles: Vec<String> = slots
            .splice([BatchAction::new("Own", "own")])
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, ["Top", "Own", "Bottom"]);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let json = serde_json::to_value(BatchAction::new("Go", "go").with_icon("ok")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Go", "function": "go", "icon": "ok"}));
    }
}
