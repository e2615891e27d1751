use crate::domain::geometry::Vec3;

// Port for the spatial query the motion controller needs: does the straight
// ground-plane segment from `from` to `to` cross a box obstacle?
pub trait ObstacleQuery {
    /// Returns the id of the first box obstructing the segment, if any.
    fn first_box_hit(&self, from: Vec3, to: Vec3) -> Option<u64>;
}
