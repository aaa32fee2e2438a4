//! Owners of documentation and decisions.

use crate::model::{Documentation, ElementRef, Workspace};

/// The workspace itself, or one of its elements.
#[derive(Debug, Clone)]
pub enum Owner<'a> {
    Workspace(&'a Workspace),
    /// An element and the names of the elements enclosing it, outermost first
    Element {
        element: ElementRef<'a>,
        parents: Vec<&'a str>,
    },
}

impl<'a> Owner<'a> {
    /// A top-level element such as a software system
    pub fn element(element: ElementRef<'a>) -> Self {
        Owner::Element {
            element,
            parents: Vec::new(),
        }
    }

    pub fn nested(element: ElementRef<'a>, parents: Vec<&'a str>) -> Self {
        Owner::Element { element, parents }
    }

    /// Display name used as the prefix of result names
    pub fn name(&self) -> &'a str {
        match self {
            Owner::Workspace(workspace) => &workspace.name,
            Owner::Element { element, .. } => element.name(),
        }
    }

    /// Names from the outermost enclosing element down to this one, used in
    /// URLs. Empty for the workspace.
    ///
    /// Element names repeat across systems, so a container is identified
    /// by its system and a component by its system and container.
    pub fn path(&self) -> Vec<&'a str> {
        match self {
            Owner::Workspace(_) => Vec::new(),
            Owner::Element { element, parents } => {
                let mut path = parents.clone();
                path.push(element.name());
                path
            }
        }
    }

    pub fn documentation(&self) -> Option<&'a Documentation> {
        match self {
            Owner::Workspace(workspace) => workspace.documentation.as_ref(),
            Owner::Element { element, .. } => element.documentation(),
        }
    }

    /// The workspace followed by every software system, container and
    /// component, in containment order
    pub fn all(workspace: &'a Workspace) -> Vec<Owner<'a>> {
        let mut owners = vec![Owner::Workspace(workspace)];
        for system in &workspace.model.software_systems {
            owners.push(Owner::element(ElementRef::SoftwareSystem(system)));
            for container in &system.containers {
                owners.push(Owner::nested(
                    ElementRef::Container(container),
                    vec![system.name.as_str()],
                ));
                for component in &container.components {
                    owners.push(Owner::nested(
                        ElementRef::Component(component),
                        vec![system.name.as_str(), container.name.as_str()],
                    ));
                }
            }
        }
        owners
    }
}
