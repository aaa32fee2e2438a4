//! Views over the model.

use serde::{Deserialize, Serialize};

/// Reference from a view to a model element or relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct View {
    pub key: String,
    pub title: String,
    pub name: String,
    pub description: String,
    pub elements: Vec<ViewRef>,
    pub relationships: Vec<ViewRef>,
}

impl View {
    /// The heading shown for this view: its title, or its name when untitled.
    pub fn heading(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// The kinds of view that are indexed, in indexing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Custom,
    SystemLandscape,
    SystemContext,
    Container,
    Component,
    Dynamic,
    Deployment,
}

impl ViewKind {
    pub const ORDERED: [ViewKind; 7] = [
        ViewKind::Custom,
        ViewKind::SystemLandscape,
        ViewKind::SystemContext,
        ViewKind::Container,
        ViewKind::Component,
        ViewKind::Dynamic,
        ViewKind::Deployment,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewSet {
    pub custom_views: Vec<View>,
    pub system_landscape_views: Vec<View>,
    pub system_context_views: Vec<View>,
    pub container_views: Vec<View>,
    pub component_views: Vec<View>,
    pub dynamic_views: Vec<View>,
    pub deployment_views: Vec<View>,
}

impl ViewSet {
    pub fn of_kind(&self, kind: ViewKind) -> &[View] {
        match kind {
            ViewKind::Custom => &self.custom_views,
            ViewKind::SystemLandscape => &self.system_landscape_views,
            ViewKind::SystemContext => &self.system_context_views,
            ViewKind::Container => &self.container_views,
            ViewKind::Component => &self.component_views,
            ViewKind::Dynamic => &self.dynamic_views,
            ViewKind::Deployment => &self.deployment_views,
        }
    }

    /// Every view, grouped by kind in [`ViewKind::ORDERED`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewKind, &View)> {
        ViewKind::ORDERED
            .into_iter()
            .flat_map(move |kind| self.of_kind(kind).iter().map(move |view| (kind, view)))
    }

    pub fn len(&self) -> usize {
        ViewKind::ORDERED
            .iter()
            .map(|kind| self.of_kind(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
