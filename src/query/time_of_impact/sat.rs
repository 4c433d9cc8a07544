use crate::math::Real;

/// Updates the contact interval of two intervals moving along one axis.
///
/// The stationary interval is `[min1, max1]`, the moving one `[min2, max2]`
/// travels `speed` along the axis over the whole displacement. `first` and
/// `last` bound the times during which the volumes overlap on every axis
/// tested so far, and are narrowed by this axis.
///
/// Returns `false` as soon as this axis proves the volumes never overlap
/// during the displacement.
pub fn sat_move_hit_test(
    speed: Real,
    min1: Real,
    max1: Real,
    min2: Real,
    max2: Real,
    first: &mut Real,
    last: &mut Real,
) -> bool {
    // Narrows `last`, failing if the interval becomes empty.
    let mut leave_at = |t: Real, first: Real| -> bool {
        if t < *last {
            *last = t;
        }
        first <= *last
    };

    if max2 < min1 {
        // The moving interval is on the smaller side.
        if speed <= 0.0 {
            return false;
        }

        let t = (min1 - max2) / speed;
        if t > 1.0 {
            return false;
        }
        *first = first.max(t);

        leave_at((max1 - min2) / speed, *first)
    } else if max1 < min2 {
        // The moving interval is on the larger side.
        if speed >= 0.0 {
            return false;
        }

        let t = (max1 - min2) / speed;
        if t > 1.0 {
            return false;
        }
        *first = first.max(t);

        leave_at((min1 - max2) / speed, *first)
    } else if speed > 0.0 {
        leave_at((max1 - min2) / speed, *first)
    } else if speed < 0.0 {
        leave_at((min1 - max2) / speed, *first)
    } else {
        true
    }
}

#[cfg(test)]
mod test {
    use super::sat_move_hit_test;

    #[test]
    fn approaching_intervals_narrow_contact_time() {
        let (mut first, mut last) = (0.0, 1.0);
        assert!(sat_move_hit_test(
            4.0, 0.0, 1.0, -3.0, -1.0, &mut first, &mut last
        ));
        assert_relative_eq!(first, 0.25);
        assert_relative_eq!(last, 1.0);
    }

    #[test]
    fn receding_or_short_moves_never_touch() {
        let (mut first, mut last) = (0.0, 1.0);
        assert!(!sat_move_hit_test(
            -4.0, 0.0, 1.0, -3.0, -1.0, &mut first, &mut last
        ));

        let (mut first, mut last) = (0.0, 1.0);
        assert!(!sat_move_hit_test(
            0.5, 0.0, 1.0, -3.0, -1.0, &mut first, &mut last
        ));
    }

    #[test]
    fn disjoint_contact_windows_fail() {
        let (mut first, mut last) = (0.6, 1.0);
        // Overlapping on this axis but leaving at t = 0.25.
        assert!(!sat_move_hit_test(
            2.0, 0.0, 1.0, 0.5, 1.5, &mut first, &mut last
        ));
    }
}
