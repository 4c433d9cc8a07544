use crate::math::{Point, Real};

const SMALL_NUM: Real = 1.0e-5;

/// Distance between the segments `[a_start, a_end]` and `[b_start, b_end]`.
///
/// Nearly parallel segments are handled by clamping against the end points
/// of the first segment.
pub fn segment_segment_distance(
    a_start: &Point,
    a_end: &Point,
    b_start: &Point,
    b_end: &Point,
) -> Real {
    let u = a_end - a_start;
    let v = b_end - b_start;
    let w = a_start - b_start;
    let a = u.dot(&u);
    let b = u.dot(&v);
    let c = v.dot(&v);
    let d = u.dot(&w);
    let e = v.dot(&w);
    let denom = a * c - b * b;

    let (mut s_num, mut s_den, mut t_num, t_den) = if denom < SMALL_NUM {
        // Parallel segments.
        (0.0, 1.0, e, c)
    } else {
        let s_num = b * e - c * d;

        if s_num < 0.0 {
            (0.0, denom, e, c)
        } else if s_num > denom {
            (denom, denom, e + b, c)
        } else {
            (s_num, denom, a * e - b * d, denom)
        }
    };

    if t_num < 0.0 {
        t_num = 0.0;

        if -d < 0.0 {
            s_num = 0.0;
        } else if -d > a {
            s_num = s_den;
        } else {
            s_num = -d;
            s_den = a;
        }
    } else if t_num > t_den {
        t_num = t_den;

        if -d + b < 0.0 {
            s_num = 0.0;
        } else if -d + b > a {
            s_num = s_den;
        } else {
            s_num = -d + b;
            s_den = a;
        }
    }

    let sc = if s_num.abs() < SMALL_NUM {
        0.0
    } else {
        s_num / s_den
    };
    let tc = if t_num.abs() < SMALL_NUM {
        0.0
    } else {
        t_num / t_den
    };

    (w + u * sc - v * tc).norm()
}
