use crate::math::Vector;

/// Index of the component of `v` with the largest magnitude.
///
/// Ties are resolved toward the later axis, `z` winning over `y` winning
/// over `x`.
#[inline]
pub fn dominant_axis(v: &Vector) -> usize {
    let a = v.abs();

    if a.x > a.y {
        if a.x > a.z {
            0
        } else {
            2
        }
    } else if a.y > a.z {
        1
    } else {
        2
    }
}
