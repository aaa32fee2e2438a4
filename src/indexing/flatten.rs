//! Flattens a workspace's model and views into searchable documents.
//!
//! The workspace yields one overview document and one diagram document per
//! view. A diagram's content is the text of everything the view shows:
//! its heading, description, elements (with whole deployment subtrees for
//! deployment nodes) and relationships.

use tracing::debug;

use super::urls::diagram_url;
use crate::model::{DeploymentNode, ElementRef, ModelIndex, View, Workspace};
use crate::types::{ContentBuilder, DocumentType, IndexedDocument, join_non_empty};

pub struct ModelFlattener<'a> {
    workspace: &'a Workspace,
    model: ModelIndex<'a>,
}

impl<'a> ModelFlattener<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            model: ModelIndex::new(&workspace.model),
        }
    }

    /// The workspace overview document. Its URL is empty.
    pub fn overview(&self) -> IndexedDocument {
        let workspace = self.workspace;
        IndexedDocument::new(workspace.id, DocumentType::Workspace)
            .with_name(workspace.name.as_str())
            .with_description(workspace.description.as_str())
            .with_content(join_non_empty([
                workspace.name.as_str(),
                workspace.description.as_str(),
            ]))
    }

    /// One diagram document per view, in view-kind order.
    pub fn diagrams(&self) -> Vec<IndexedDocument> {
        self.workspace
            .views
            .iter()
            .map(|(_, view)| self.diagram(view))
            .collect()
    }

    pub fn diagram(&self, view: &View) -> IndexedDocument {
        let mut content = ContentBuilder::new();
        content.push(view.heading()).push(&view.description);

        for reference in &view.elements {
            match self.model.element(&reference.id) {
                Some(element) => self.push_element(&mut content, element),
                None => debug!(view = %view.key, element = %reference.id, "Skipping unknown element"),
            }
        }

        for reference in &view.relationships {
            match self.model.relationship(&reference.id) {
                Some(relationship) => {
                    content
                        .push(&relationship.description)
                        .push(&relationship.technology);
                }
                None => debug!(
                    view = %view.key,
                    relationship = %reference.id,
                    "Skipping unknown relationship"
                ),
            }
        }

        IndexedDocument::new(self.workspace.id, DocumentType::Diagram)
            .with_url(diagram_url(&view.key))
            .with_name(view.name.as_str())
            .with_description(view.description.as_str())
            .with_content(content.build())
    }

    fn push_element(&self, content: &mut ContentBuilder, element: ElementRef<'_>) {
        match element.deployment_node() {
            Some(node) => self.push_deployment_node(content, node),
            None => push_basics(content, element),
        }
    }

    /// Text of a deployment node and everything deployed inside it.
    fn push_deployment_node(&self, content: &mut ContentBuilder, node: &DeploymentNode) {
        content
            .push(&node.name)
            .push(&node.description)
            .push(&node.technology);

        for child in &node.children {
            self.push_deployment_node(content, child);
        }

        for infrastructure in &node.infrastructure_nodes {
            push_basics(content, ElementRef::InfrastructureNode(infrastructure));
        }

        for instance in &node.software_system_instances {
            let system = self.model.software_system(&instance.software_system_id);
            let instance = ElementRef::SoftwareSystemInstance(instance, system);
            content.push(instance.name()).push(instance.description());
        }

        for instance in &node.container_instances {
            let container = self.model.container(&instance.container_id);
            push_basics(content, ElementRef::ContainerInstance(instance, container));
        }
    }
}

/// Name and description, then technology for the kinds that have one.
fn push_basics(content: &mut ContentBuilder, element: ElementRef<'_>) {
    content
        .push(element.name())
        .push(element.description())
        .push_opt(element.technology());
}
