//! Read-only workspace model consumed by the indexer.
//!
//! The types mirror the workspace JSON layout (camelCase fields, optional
//! everything except the workspace id, unknown fields ignored) so that an
//! exported workspace can be deserialized directly.

mod element;
mod view;

pub use element::{
    Component, Container, ContainerInstance, CustomElement, DeploymentNode, ElementRef,
    InfrastructureNode, Person, Relationship, SoftwareSystem, SoftwareSystemInstance,
};
pub use view::{View, ViewKind, ViewRef, ViewSet};

use crate::types::WorkspaceId;
use crate::{IndexError, IndexResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model: Model,
    #[serde(default)]
    pub views: ViewSet,
    #[serde(default)]
    pub documentation: Option<Documentation>,
}

impl Workspace {
    /// Parse a workspace from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a workspace JSON file
    pub fn load(path: &Path) -> IndexResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| IndexError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&json).map_err(|e| IndexError::WorkspaceParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Model {
    pub people: Vec<Person>,
    pub software_systems: Vec<SoftwareSystem>,
    pub custom_elements: Vec<CustomElement>,
    pub deployment_nodes: Vec<DeploymentNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documentation {
    pub sections: Vec<Section>,
    pub decisions: Vec<Decision>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub content: String,
    pub format: String,
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Decision {
    pub id: String,
    pub date: String,
    pub title: String,
    pub status: String,
    pub content: String,
    pub format: String,
}

/// Id lookup over every element and relationship in a model.
///
/// Views reference elements and relationships by id; building this once
/// per workspace keeps the view walk linear.
pub struct ModelIndex<'a> {
    elements: HashMap<&'a str, ElementRef<'a>>,
    relationships: HashMap<&'a str, &'a Relationship>,
}

impl<'a> ModelIndex<'a> {
    pub fn new(model: &'a Model) -> Self {
        let mut index = Self {
            elements: HashMap::new(),
            relationships: HashMap::new(),
        };

        let systems: HashMap<&str, &SoftwareSystem> = model
            .software_systems
            .iter()
            .map(|s| (s.id.as_str(), s))
            .collect();
        let containers: HashMap<&str, &Container> = model
            .software_systems
            .iter()
            .flat_map(|s| s.containers.iter())
            .map(|c| (c.id.as_str(), c))
            .collect();

        for person in &model.people {
            index.insert(ElementRef::Person(person));
        }
        for element in &model.custom_elements {
            index.insert(ElementRef::CustomElement(element));
        }
        for system in &model.software_systems {
            index.insert(ElementRef::SoftwareSystem(system));
            for container in &system.containers {
                index.insert(ElementRef::Container(container));
                for component in &container.components {
                    index.insert(ElementRef::Component(component));
                }
            }
        }
        for node in &model.deployment_nodes {
            index.insert_deployment_node(node, &systems, &containers);
        }

        index
    }

    fn insert_deployment_node(
        &mut self,
        node: &'a DeploymentNode,
        systems: &HashMap<&str, &'a SoftwareSystem>,
        containers: &HashMap<&str, &'a Container>,
    ) {
        self.insert(ElementRef::DeploymentNode(node));
        for child in &node.children {
            self.insert_deployment_node(child, systems, containers);
        }
        for infrastructure in &node.infrastructure_nodes {
            self.insert(ElementRef::InfrastructureNode(infrastructure));
        }
        for instance in &node.software_system_instances {
            let system = systems.get(instance.software_system_id.as_str()).copied();
            self.insert(ElementRef::SoftwareSystemInstance(instance, system));
        }
        for instance in &node.container_instances {
            let container = containers.get(instance.container_id.as_str()).copied();
            self.insert(ElementRef::ContainerInstance(instance, container));
        }
    }

    fn insert(&mut self, element: ElementRef<'a>) {
        for relationship in element.relationships() {
            self.relationships
                .insert(relationship.id.as_str(), relationship);
        }
        self.elements.insert(element.id(), element);
    }

    pub fn element(&self, id: &str) -> Option<ElementRef<'a>> {
        self.elements.get(id).copied()
    }

    pub fn relationship(&self, id: &str) -> Option<&'a Relationship> {
        self.relationships.get(id).copied()
    }

    pub fn software_system(&self, id: &str) -> Option<&'a SoftwareSystem> {
        match self.element(id) {
            Some(ElementRef::SoftwareSystem(system)) => Some(system),
            _ => None,
        }
    }

    pub fn container(&self, id: &str) -> Option<&'a Container> {
        match self.element(id) {
            Some(ElementRef::Container(container)) => Some(container),
            _ => None,
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}
