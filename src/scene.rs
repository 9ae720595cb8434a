//! Scene access: where annotations and their documents sit on the canvas.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::RoutingConfig;
use crate::geometry::Rect;

/// Screen-space placement of one annotation and the document holding it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLocation {
    pub document: Rect,
    pub annotation: Rect,
}

/// Resolves annotation ids to canvas rectangles.
pub trait SceneAccessor {
    fn locate(&self, annotation_id: &str) -> Option<AnnotationLocation>;
}

impl SceneAccessor for HashMap<String, AnnotationLocation> {
    fn locate(&self, annotation_id: &str) -> Option<AnnotationLocation> {
        self.get(annotation_id).copied()
    }
}

impl<T: SceneAccessor + ?Sized> SceneAccessor for &T {
    fn locate(&self, annotation_id: &str) -> Option<AnnotationLocation> {
        (**self).locate(annotation_id)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("Document {0} has no area")]
    DegenerateDocument(String),
    #[error("Annotation {id} appears in both {first} and {second}")]
    DuplicateAnnotation {
        id: String,
        first: String,
        second: String,
    },
}

/// How annotation rectangles of a document are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Canvas coordinates.
    #[default]
    Absolute,
    /// Fractions (0..1) of the document's width and height.
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    #[serde(flatten)]
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Document {
    /// Canvas-space rectangle of one of this document's annotations.
    pub fn annotation_rect(&self, annotation: &Annotation) -> Rect {
        match self.units {
            Units::Absolute => annotation.rect,
            Units::Relative => Rect::new(
                self.rect.x + annotation.rect.x * self.rect.width,
                self.rect.y + annotation.rect.y * self.rect.height,
                annotation.rect.width * self.rect.width,
                annotation.rect.height * self.rect.height,
            ),
        }
    }
}

/// A flat list of documents placed on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub documents: Vec<Document>,
}

impl Scene {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for doc in &self.documents {
            if !(doc.rect.width > 0.0 && doc.rect.height > 0.0) {
                return Err(SceneError::DegenerateDocument(doc.id.clone()));
            }
            for ann in &doc.annotations {
                if let Some(first) = owner.insert(ann.id.as_str(), doc.id.as_str()) {
                    return Err(SceneError::DuplicateAnnotation {
                        id: ann.id.clone(),
                        first: first.to_string(),
                        second: doc.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Build a lookup table of every annotation. The first occurrence of an id wins.
    pub fn index(&self) -> HashMap<String, AnnotationLocation> {
        let mut index = HashMap::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for doc in &self.documents {
            for ann in &doc.annotations {
                if !seen.insert(ann.id.as_str()) {
                    tracing::warn!(annotation = %ann.id, document = %doc.id, "Duplicate annotation id ignored");
                    continue;
                }
                index.insert(
                    ann.id.clone(),
                    AnnotationLocation {
                        document: doc.rect,
                        annotation: doc.annotation_rect(ann),
                    },
                );
            }
        }
        index
    }
}

impl SceneAccessor for Scene {
    fn locate(&self, annotation_id: &str) -> Option<AnnotationLocation> {
        self.documents.iter().find_map(|doc| {
            doc.annotations
                .iter()
                .find(|ann| ann.id == annotation_id)
                .map(|ann| AnnotationLocation {
                    document: doc.rect,
                    annotation: doc.annotation_rect(ann),
                })
        })
    }
}

/// Input document for the CLI and WASM front ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub config: RoutingConfig,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub connections: Vec<Vec<String>>,
}

impl SceneFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Split into the scene and the remaining routing inputs.
    pub fn into_parts(self) -> (Scene, RoutingConfig, Vec<Vec<String>>) {
        (Scene::new(self.documents), self.config, self.connections)
    }
}
