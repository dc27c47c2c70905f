use crate::errors::GeometryError;
use crate::graph::NodeId;
use super::Point;

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;


/// Spatial index over node centres, answers "which node is under the pointer"
pub struct NodeLocator {
    entries: Vec<(NodeId, Point)>,
    tree: KdTree<f64, usize, [f64; 2]>, // stores point -> index in entries
}

impl NodeLocator {

    /// Index the given node positions
    pub fn build<I>(nodes: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = (NodeId, Point)>,
    {
        let entries: Vec<(NodeId, Point)> = nodes.into_iter().collect();
        let mut tree = KdTree::new(2);

        for (idx, (_, point)) in entries.iter().enumerate() {
            tree.add([point.x, point.y], idx)?;
        }

        Ok(Self { entries, tree })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest node whose centre lies strictly within `radius` of `point`
    pub fn node_at(&self, point: &Point, radius: f64) -> Result<Option<NodeId>, GeometryError> {
        let nearest = self.tree.nearest(&[point.x, point.y], 1, &squared_euclidean)?;

        let Some(&(_, &idx)) = nearest.first() else {
            return Ok(None);
        };

        // tree distances are squared, compare against the real distance instead
        Ok(self.entries.get(idx).and_then(|(id, centre)| {
            (centre.distance_to(point) < radius).then_some(*id)
        }))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> NodeLocator {
        NodeLocator::build(vec![
            (NodeId(1), Point::new(100.0, 100.0)),
            (NodeId(2), Point::new(130.0, 100.0)),
            (NodeId(3), Point::new(400.0, 250.0)),
        ]).unwrap()
    }

    #[test]
    fn test_hit_inside_radius() {
        let loc = locator();
        assert_eq!(loc.len(), 3);
        assert_eq!(loc.node_at(&Point::new(105.0, 98.0), 20.0).unwrap(), Some(NodeId(1)));
        assert_eq!(loc.node_at(&Point::new(390.0, 260.0), 20.0).unwrap(), Some(NodeId(3)));
    }

    #[test]
    fn test_overlapping_picks_nearest() {
        let loc = locator();
        // within 20 of both 1 and 2, closer to 2
        assert_eq!(loc.node_at(&Point::new(118.0, 100.0), 20.0).unwrap(), Some(NodeId(2)));
    }

    #[test]
    fn test_miss_on_boundary_and_beyond() {
        let loc = locator();
        assert_eq!(loc.node_at(&Point::new(100.0, 120.0), 20.0).unwrap(), None);
        assert_eq!(loc.node_at(&Point::new(250.0, 400.0), 20.0).unwrap(), None);
    }

    #[test]
    fn test_empty_locator() {
        let loc = NodeLocator::build(Vec::new()).unwrap();
        assert!(loc.is_empty());
        assert_eq!(loc.node_at(&Point::new(0.0, 0.0), 20.0).unwrap(), None);
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let res = NodeLocator::build(vec![(NodeId(1), Point::new(f64::NAN, 0.0))]);
        assert!(matches!(res, Err(GeometryError::KdTree(_))));
    }
}
