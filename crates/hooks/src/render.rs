use core::str::FromStr;

use serde::{Deserialize, Serialize};

use invoicer_core::DomainError;

/// Page the host is about to render, as tagged in header/footer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "tableview")]
    TableView,
    #[serde(rename = "detailview")]
    DetailView,
    #[serde(rename = "tableview+detailview")]
    TableAndDetailView,
    #[serde(rename = "print-tableview")]
    PrintTableView,
    #[serde(rename = "print-detailview")]
    PrintDetailView,
    #[serde(rename = "filters")]
    Filters,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::TableView,
        ContentType::DetailView,
        ContentType::TableAndDetailView,
        ContentType::PrintTableView,
        ContentType::PrintDetailView,
        ContentType::Filters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::TableView => "tableview",
            ContentType::DetailView => "detailview",
            ContentType::TableAndDetailView => "tableview+detailview",
            ContentType::PrintTableView => "print-tableview",
            ContentType::PrintDetailView => "print-detailview",
            ContentType::Filters => "filters",
        }
    }
}

impl core::fmt::Display for ContentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown content type '{s}'")))
    }
}

/// Render options the host hands to page init and reads back afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Replacement page for the filters view, relative to the app root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_page: Option<String>,
}
