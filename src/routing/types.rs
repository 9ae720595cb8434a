//! Data structures shared by the routing stages.

use serde::Serialize;

use crate::geometry::{Path, Point};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Annotation not found: {id}")]
    UnresolvedAnnotation { id: String },
    #[error("No path found from {from} to {to}")]
    NoPathFound { from: String, to: String },
    #[error("Connection must name exactly two annotations, got {len}")]
    InvalidConnection { len: usize },
}

/// A validated pair of annotation ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl TryFrom<&[String]> for Connection {
    type Error = RouteError;

    fn try_from(ids: &[String]) -> Result<Self, Self::Error> {
        match ids {
            [from, to] => Ok(Connection::new(from.as_str(), to.as_str())),
            _ => Err(RouteError::InvalidConnection { len: ids.len() }),
        }
    }
}

/// Two-point path leaving a document: annotation edge midpoint, then the
/// point just outside the document border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPath {
    pub start: Point,
    pub exit: Point,
}

impl AnchorPath {
    pub fn to_path(self) -> Path {
        vec![self.start, self.exit]
    }
}

/// Outcome of routing one connection.
pub type ConnectionResult = Result<Path, RouteError>;

/// Serializable per-connection output for JSON front ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteReport {
    pub fn new(ids: &[String], result: &ConnectionResult) -> Self {
        let (path, error) = match result {
            Ok(path) => (Some(path.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            from: ids.first().cloned(),
            to: ids.get(1).cloned(),
            path,
            error,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_from_pair() {
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            Connection::try_from(ids.as_slice()),
            Ok(Connection::new("a", "b"))
        );
    }

    #[test]
    fn test_connection_wrong_arity() {
        let one = vec!["a".to_string()];
        let three = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(
            Connection::try_from(one.as_slice()),
            Err(RouteError::InvalidConnection { len: 1 })
        );
        assert_eq!(
            Connection::try_from(three.as_slice()),
            Err(RouteError::InvalidConnection { len: 3 })
        );
    }

    #[test]
    fn test_report_json() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let ok = RouteReport::new(&ids, &Ok(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]));
        let err = RouteReport::new(
            &ids,
            &Err(RouteError::UnresolvedAnnotation { id: "b".to_string() }),
        );
        assert!(ok.is_ok());
        assert!(!err.is_ok());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"from":"a","to":"b","error":"Annotation not found: b"}"#
        );
        let json = serde_json::to_string(&ok).unwrap();
        assert!(json.contains(r#""path":[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0}]"#));
    }
}
