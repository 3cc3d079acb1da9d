use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::ViewFrame;
use crate::math::hull_2d::convex_hull;
use crate::math::polygon_2d::{rotate_to_canonical_start, Winding};
use crate::math::{Point3, TOLERANCE};

use super::boolean_2d::{combine, union_all, BooleanOp, Contour, FillRule};
use super::loop_clean::{BoundaryLoop, LoopClean};
use super::offset_2d::PolygonOffset2D;

/// The remainders of one target region after carving.
///
/// `loops` is empty when the region was degenerate or entirely carved away —
/// a valid outcome the caller is expected to skip, not a failure.
#[derive(Debug, Default)]
pub struct RegionCut {
    pub loops: Vec<BoundaryLoop>,
}

/// Carves subtractor footprints out of planar boundary regions.
///
/// For one view: subtractor corner clouds are projected onto the view plane,
/// reduced to convex hulls, unioned, optionally offset, and subtracted from
/// every target region polygon. The remainders come back as cleaned, closed
/// 3D boundary loops in the requested winding.
///
/// The operation is a pure function of its inputs; it holds no state between
/// invocations and mutates nothing it does not own.
#[derive(Debug)]
pub struct CarveRegions {
    frame: ViewFrame,
    subtractors: Vec<Vec<Point3>>,
    regions: Vec<Vec<Point3>>,
    offset_distance: f64,
    fill_rule: FillRule,
    winding: Winding,
}

impl CarveRegions {
    /// Creates a new carve operation.
    ///
    /// `subtractors` are world-space corner clouds (typically the 8 corners
    /// of a bounding box each); `regions` are ordered boundary loops of the
    /// target regions; `offset_distance` grows (positive) or shrinks
    /// (negative) the merged subtractor footprint before subtraction, in the
    /// same linear units as the geometry.
    #[must_use]
    pub fn new(
        frame: ViewFrame,
        subtractors: Vec<Vec<Point3>>,
        regions: Vec<Vec<Point3>>,
        offset_distance: f64,
    ) -> Self {
        Self {
            frame,
            subtractors,
            regions,
            offset_distance,
            fill_rule: FillRule::NonZero,
            winding: Winding::CounterClockwise,
        }
    }

    /// Sets the fill rule used for the subtraction step.
    #[must_use]
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Sets the winding the emitted loops must have, as seen from the side
    /// the view normal points toward.
    #[must_use]
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    /// Executes the carve, returning one [`RegionCut`] per input region in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if no regions were provided.
    /// Degenerate subtractors and regions are skipped silently (logged at
    /// debug level), never reported as errors.
    pub fn execute(&self) -> Result<Vec<RegionCut>> {
        if self.regions.is_empty() {
            return Err(
                OperationError::InvalidInput("at least one region loop is required".to_owned())
                    .into(),
            );
        }

        let cutters = self.build_cutters();

        let mut cuts = Vec::with_capacity(self.regions.len());
        for (index, region) in self.regions.iter().enumerate() {
            cuts.push(self.carve_region(index, region, &cutters));
        }
        Ok(cuts)
    }

    /// Projects a world-space point sequence into frame-local 2D.
    fn project_loop(&self, points: &[Point3]) -> Contour {
        points
            .iter()
            .map(|p| self.frame.to_local(&self.frame.project(p)))
            .collect()
    }

    /// Builds the merged, offset 2D footprint of all subtractors.
    fn build_cutters(&self) -> Vec<Contour> {
        let mut hulls = Vec::new();
        for (index, cloud) in self.subtractors.iter().enumerate() {
            let hull = convex_hull(&self.project_loop(cloud));
            if hull.len() < 3 {
                debug!(subtractor = index, "degenerate footprint skipped");
                continue;
            }
            hulls.push(hull);
        }
        if hulls.is_empty() {
            return hulls;
        }

        let merged = union_all(&hulls);
        if self.offset_distance.abs() < TOLERANCE {
            return merged;
        }

        let mut grown = Vec::with_capacity(merged.len());
        for contour in merged {
            match PolygonOffset2D::new(contour, self.offset_distance).execute() {
                Ok(offset) => grown.push(offset),
                Err(err) => debug!(%err, "cutter contour collapsed under offset"),
            }
        }
        grown
    }

    /// Subtracts the cutters from one region and rebuilds its loops.
    fn carve_region(&self, index: usize, region: &[Point3], cutters: &[Contour]) -> RegionCut {
        if region.len() < 3 {
            debug!(region = index, "region loop has fewer than 3 vertices, skipped");
            return RegionCut::default();
        }

        let subject = vec![self.project_loop(region)];
        let remainder = combine(&subject, cutters, BooleanOp::Difference, self.fill_rule);
        if remainder.is_empty() {
            debug!(region = index, "region entirely carved away");
            return RegionCut::default();
        }

        let mut loops = Vec::with_capacity(remainder.len());
        for contour in remainder {
            let canonical = rotate_to_canonical_start(&contour);
            let world: Vec<Point3> = canonical.iter().map(|p| self.frame.to_world(p)).collect();
            match LoopClean::new(world, *self.frame.normal(), self.winding).execute() {
                Some(cleaned) => loops.push(cleaned),
                None => debug!(region = index, "remainder collapsed during cleaning"),
            }
        }
        RegionCut { loops }
    }
}
