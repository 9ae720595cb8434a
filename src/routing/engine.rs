//! Connection routing: anchors, middle path, splicing and lane spreading.

use crate::config::{ConfigError, RoutingConfig};
use crate::geometry::{Path, manhattan_length, simplify};
use crate::scene::{AnnotationLocation, SceneAccessor};

use super::anchors::calculate_anchor;
use super::corners::CorridorLines;
use super::lanes::resolve_overlaps;
use super::search::MiddlePathSearch;
use super::types::{Connection, ConnectionResult, RouteError, RouteReport};

#[derive(Debug, Clone, Default)]
pub struct RoutingEngine {
    config: RoutingConfig,
}

impl RoutingEngine {
    pub fn new(config: RoutingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Route every connection and spread overlapping segments of the
    /// successful ones. Results come back in input order; a failed
    /// connection does not affect the others.
    pub fn route<S: SceneAccessor + ?Sized>(
        &self,
        scene: &S,
        connections: &[Vec<String>],
    ) -> Vec<ConnectionResult> {
        let mut results: Vec<ConnectionResult> = connections
            .iter()
            .map(|ids| {
                let connection = Connection::try_from(ids.as_slice())?;
                self.route_connection(scene, &connection)
            })
            .collect();

        for (ids, result) in connections.iter().zip(&results) {
            if let Err(e) = result {
                tracing::warn!(connection = ?ids, error = %e, "Connection not routed");
            }
        }

        let routed: Vec<usize> = results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.is_ok().then_some(i))
            .collect();
        let paths: Vec<Path> = routed
            .iter()
            .filter_map(|&i| results[i].as_ref().ok().cloned())
            .collect();

        let spread = resolve_overlaps(
            &paths,
            self.config.half_column_gap(),
            self.config.half_row_gap(),
        );
        for (i, path) in routed.into_iter().zip(spread) {
            results[i] = Ok(path);
        }
        results
    }

    /// `route` with each result paired with its connection ids.
    pub fn route_report<S: SceneAccessor + ?Sized>(
        &self,
        scene: &S,
        connections: &[Vec<String>],
    ) -> Vec<RouteReport> {
        self.route(scene, connections)
            .iter()
            .zip(connections)
            .map(|(result, ids)| RouteReport::new(ids, result))
            .collect()
    }

    /// Build the raw path for one connection, without lane spreading.
    pub fn route_connection<S: SceneAccessor + ?Sized>(
        &self,
        scene: &S,
        connection: &Connection,
    ) -> ConnectionResult {
        let from = locate(scene, &connection.from)?;
        let to = locate(scene, &connection.to)?;

        let path = self.build_path(&from, &to).ok_or_else(|| RouteError::NoPathFound {
            from: connection.from.clone(),
            to: connection.to.clone(),
        })?;

        tracing::debug!(
            from = %connection.from,
            to = %connection.to,
            points = path.len(),
            length = manhattan_length(&path),
            "Routed connection"
        );
        Ok(path)
    }

    /// Splice `start anchor + middle + reversed end anchor`.
    pub fn build_path(&self, from: &AnnotationLocation, to: &AnnotationLocation) -> Option<Path> {
        let lines = CorridorLines::new(&from.document, &to.document, &self.config);
        let start = lines.snap_exit(calculate_anchor(
            &from.annotation,
            &from.document,
            &self.config,
        ));
        let end = lines.snap_exit(calculate_anchor(&to.annotation, &to.document, &self.config));
        let corners = lines.corners(&from.document, &to.document);
        let obstacles = [from.document, to.document];

        let middle = MiddlePathSearch {
            start: start.exit,
            end: end.exit,
            corners: &corners,
            obstacles: &obstacles,
        }
        .shortest()?;

        // First and last middle points repeat the anchor exits.
        let inner = middle.get(1..middle.len().saturating_sub(1)).unwrap_or(&[]);

        let mut path: Path = Vec::with_capacity(inner.len() + 4);
        path.extend(start.to_path());
        path.extend_from_slice(inner);
        path.extend(end.to_path().into_iter().rev());
        Some(simplify(&path))
    }
}

fn locate<S: SceneAccessor + ?Sized>(scene: &S, id: &str) -> Result<AnnotationLocation, RouteError> {
    scene
        .locate(id)
        .ok_or_else(|| RouteError::UnresolvedAnnotation { id: id.to_string() })
}
