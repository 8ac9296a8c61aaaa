/// Checks that a numerical value lies in the interval `[a,b]` and returns early
/// with [`Error::InvalidParameter`](crate::Error::InvalidParameter) if not
///
/// An optional fourth argument makes the lower bound exclusive, giving `(a,b]`.
///
/// ### Example
/// ```ignore
/// let gamma = 2.0;
/// check_interval!(gamma, 0.0, 1.0);
/// ```
/// This returns `Err` with the message "invalid value for \`gamma\`: 2, expected in [0.0, 1.0]".
macro_rules! check_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::Error::InvalidParameter {
                name: stringify!($var),
                value: $var as f64,
                expected: concat!("in [", stringify!($a), ", ", stringify!($b), "]"),
            });
        }
    };
    ($var:expr, $a:expr, $b:expr, exclusive) => {
        if !($var > $a && $var <= $b) {
            return Err($crate::Error::InvalidParameter {
                name: stringify!($var),
                value: $var as f64,
                expected: concat!("in (", stringify!($a), ", ", stringify!($b), "]"),
            });
        }
    };
}

/// Checks that a count is strictly positive
macro_rules! check_positive {
    ($var:expr) => {
        if $var == 0 {
            return Err($crate::Error::InvalidParameter {
                name: stringify!($var),
                value: 0.0,
                expected: "a positive count",
            });
        }
    };
}

pub(crate) use check_interval;
pub(crate) use check_positive;
