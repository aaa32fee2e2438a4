//! Model elements and relationships.
//!
//! Elements are stored the way the workspace JSON nests them: containers
//! inside software systems, components inside containers, and deployment
//! nodes forming their own tree. Relationships live on their source element.

use serde::{Deserialize, Serialize};

use super::Documentation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Relationship {
    pub id: String,
    pub source_id: String,
    pub destination_id: String,
    pub description: String,
    pub technology: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub description: String,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomElement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoftwareSystem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub containers: Vec<Container>,
    pub documentation: Option<Documentation>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technology: String,
    pub components: Vec<Component>,
    pub documentation: Option<Documentation>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technology: String,
    pub documentation: Option<Documentation>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technology: String,
    pub children: Vec<DeploymentNode>,
    pub infrastructure_nodes: Vec<InfrastructureNode>,
    pub software_system_instances: Vec<SoftwareSystemInstance>,
    pub container_instances: Vec<ContainerInstance>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfrastructureNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technology: String,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoftwareSystemInstance {
    pub id: String,
    pub software_system_id: String,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerInstance {
    pub id: String,
    pub container_id: String,
    pub relationships: Vec<Relationship>,
}

/// A borrowed view of any model element.
///
/// Callers are expected to go through the capability accessors
/// ([`name`](Self::name), [`description`](Self::description),
/// [`technology`](Self::technology), [`deployment_node`](Self::deployment_node))
/// rather than matching on the variant. An element kind that gains no
/// capability still contributes its basics.
///
/// Instances carry the element they were resolved to, if it exists in the
/// model; an instance of an unknown element has empty basics.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Person(&'a Person),
    CustomElement(&'a CustomElement),
    SoftwareSystem(&'a SoftwareSystem),
    Container(&'a Container),
    Component(&'a Component),
    DeploymentNode(&'a DeploymentNode),
    InfrastructureNode(&'a InfrastructureNode),
    SoftwareSystemInstance(&'a SoftwareSystemInstance, Option<&'a SoftwareSystem>),
    ContainerInstance(&'a ContainerInstance, Option<&'a Container>),
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ElementRef::Person(e) => &e.id,
            ElementRef::CustomElement(e) => &e.id,
            ElementRef::SoftwareSystem(e) => &e.id,
            ElementRef::Container(e) => &e.id,
            ElementRef::Component(e) => &e.id,
            ElementRef::DeploymentNode(e) => &e.id,
            ElementRef::InfrastructureNode(e) => &e.id,
            ElementRef::SoftwareSystemInstance(e, _) => &e.id,
            ElementRef::ContainerInstance(e, _) => &e.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ElementRef::Person(e) => &e.name,
            ElementRef::CustomElement(e) => &e.name,
            ElementRef::SoftwareSystem(e) => &e.name,
            ElementRef::Container(e) => &e.name,
            ElementRef::Component(e) => &e.name,
            ElementRef::DeploymentNode(e) => &e.name,
            ElementRef::InfrastructureNode(e) => &e.name,
            ElementRef::SoftwareSystemInstance(_, system) => system.map_or("", |s| &s.name),
            ElementRef::ContainerInstance(_, container) => container.map_or("", |c| &c.name),
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            ElementRef::Person(e) => &e.description,
            ElementRef::CustomElement(e) => &e.description,
            ElementRef::SoftwareSystem(e) => &e.description,
            ElementRef::Container(e) => &e.description,
            ElementRef::Component(e) => &e.description,
            ElementRef::DeploymentNode(e) => &e.description,
            ElementRef::InfrastructureNode(e) => &e.description,
            ElementRef::SoftwareSystemInstance(_, system) => {
                system.map_or("", |s| &s.description)
            }
            ElementRef::ContainerInstance(_, container) => {
                container.map_or("", |c| &c.description)
            }
        }
    }

    /// Technology, for the kinds that carry one.
    pub fn technology(&self) -> Option<&'a str> {
        match self {
            ElementRef::Container(e) => Some(&e.technology),
            ElementRef::Component(e) => Some(&e.technology),
            ElementRef::DeploymentNode(e) => Some(&e.technology),
            ElementRef::InfrastructureNode(e) => Some(&e.technology),
            ElementRef::ContainerInstance(_, container) => container.map(|c| c.technology.as_str()),
            _ => None,
        }
    }

    /// The deployment subtree rooted at this element, if it has one.
    pub fn deployment_node(&self) -> Option<&'a DeploymentNode> {
        match self {
            ElementRef::DeploymentNode(node) => Some(node),
            _ => None,
        }
    }

    /// Documentation attached to this element (systems, containers, components).
    pub fn documentation(&self) -> Option<&'a Documentation> {
        match self {
            ElementRef::SoftwareSystem(e) => e.documentation.as_ref(),
            ElementRef::Container(e) => e.documentation.as_ref(),
            ElementRef::Component(e) => e.documentation.as_ref(),
            _ => None,
        }
    }

    pub fn relationships(&self) -> &'a [Relationship] {
        match self {
            ElementRef::Person(e) => &e.relationships,
            ElementRef::CustomElement(e) => &e.relationships,
            ElementRef::SoftwareSystem(e) => &e.relationships,
            ElementRef::Container(e) => &e.relationships,
            ElementRef::Component(e) => &e.relationships,
            ElementRef::DeploymentNode(e) => &e.relationships,
            ElementRef::InfrastructureNode(e) => &e.relationships,
            ElementRef::SoftwareSystemInstance(e, _) => &e.relationships,
            ElementRef::ContainerInstance(e, _) => &e.relationships,
        }
    }
}
