//! Phase 6: hole carving — remove triangles whose centroid falls strictly
//! inside any hole polygon.

use cdt_math::Point2;

use crate::error::MeshResult;
use crate::mesh::Mesh;
use crate::predicates::point_strictly_in_polygon;

use super::Working;

/// Remove every working triangle whose centroid lies strictly inside any of
/// `hole_points`.
pub(crate) fn carve(mesh: &Mesh, working: &mut Working, hole_points: &[Vec<Point2>]) -> MeshResult<()> {
    if hole_points.is_empty() {
        return Ok(());
    }

    let eps = mesh.config().epsilon;
    let mut to_remove = Vec::new();

    for id in working.ids() {
        let [a, b, c] = working.verts(id);
        let (pa, pb, pc) = (mesh.vertex(a)?, mesh.vertex(b)?, mesh.vertex(c)?);
        let centroid = Point2::new((pa.x + pb.x + pc.x) / 3.0, (pa.y + pb.y + pc.y) / 3.0);

        if hole_points
            .iter()
            .any(|hole| point_strictly_in_polygon(centroid, hole, &eps))
        {
            to_remove.push(id);
        }
    }

    for id in to_remove {
        working.remove(id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdt::earclip;
    use crate::config::MeshConfig;
    use cdt_math::Epsilon;

    #[test]
    fn carves_out_centered_hole() {
        let mut mesh = Mesh::new(MeshConfig::for_cdt(Epsilon::default()));
        let outer_pts = [
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 30.0),
            Point2::new(0.0, 30.0),
        ];
        let ids: Vec<_> = outer_pts.iter().map(|&p| mesh.add_vertex(p)).collect();
        let mut working = earclip::triangulate(&mesh, &ids).unwrap();
        let before = working.len();

        let hole = vec![
            Point2::new(10.0, 10.0),
            Point2::new(20.0, 10.0),
            Point2::new(20.0, 20.0),
            Point2::new(10.0, 20.0),
        ];

        carve(&mesh, &mut working, &[hole]).unwrap();
        assert!(working.len() <= before);
    }

    #[test]
    fn no_holes_is_a_no_op() {
        let mut mesh = Mesh::new(MeshConfig::for_cdt(Epsilon::default()));
        let outer_pts = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let ids: Vec<_> = outer_pts.iter().map(|&p| mesh.add_vertex(p)).collect();
        let mut working = earclip::triangulate(&mesh, &ids).unwrap();
        let before = working.len();

        carve(&mesh, &mut working, &[]).unwrap();
        assert_eq!(working.len(), before);
    }
}
