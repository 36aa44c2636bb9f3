//! Assertion macros for test bodies.
//!
//! Every macro here returns an [`Outcome`](crate::Outcome) from the enclosing
//! function as soon as it decides the test is failed, skipped, or passed, so
//! the remaining statements of the body never run. Messages accept `format!`
//! syntax; when omitted, the message is built from the asserted expression's
//! source text.
//!
//! ```
//! use trestle::{ensure, ensure_eq, pass, Outcome};
//!
//! fn adds_up() -> Outcome {
//!     let total = 2 + 2;
//!     ensure!(total > 0);
//!     ensure_eq!(4, total, "total was {}", total);
//!     pass!()
//! }
//!
//! assert!(adds_up().is_pass());
//! ```

/// Ends the test as passed, optionally with a message.
#[macro_export]
macro_rules! pass {
    () => {
        return $crate::Outcome::pass()
    };
    ($($msg:tt)+) => {
        return $crate::Outcome::pass_with(format!($($msg)+))
    };
}

/// Ends the test as failed at the current source location.
#[macro_export]
macro_rules! fail {
    ($($msg:tt)+) => {
        return $crate::Outcome::fail(format!($($msg)+), file!(), line!())
    };
}

/// Ends the test as skipped, optionally with a reason.
#[macro_export]
macro_rules! skip {
    () => {
        return $crate::Outcome::skip()
    };
    ($($msg:tt)+) => {
        return $crate::Outcome::skip_with(format!($($msg)+))
    };
}

/// Fails the test unless `cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $crate::ensure!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($msg:tt)+) => {
        if !$cond {
            return $crate::Outcome::fail(format!($($msg)+), file!(), line!());
        }
    };
}

/// Fails the test if `cond` holds.
#[macro_export]
macro_rules! ensure_false {
    ($cond:expr $(,)?) => {
        $crate::ensure_false!($cond, "{}", concat!("!(", stringify!($cond), ")"))
    };
    ($cond:expr, $($msg:tt)+) => {
        if $cond {
            return $crate::Outcome::fail(format!($($msg)+), file!(), line!());
        }
    };
}

/// Fails the test unless `expected == actual`.
#[macro_export]
macro_rules! ensure_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::ensure_eq!(
            $expected,
            $actual,
            "{}",
            concat!(stringify!($expected), " != ", stringify!($actual))
        )
    };
    ($expected:expr, $actual:expr, $($msg:tt)+) => {
        match (&$expected, &$actual) {
            (expected, actual) => {
                if !(*expected == *actual) {
                    return $crate::Outcome::fail(format!($($msg)+), file!(), line!());
                }
            }
        }
    };
}

/// Fails the test unless both sides are equal as text. The failure keeps both
/// full texts so they can be printed as blocks.
#[macro_export]
macro_rules! ensure_str_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::ensure_str_eq!(
            $expected,
            $actual,
            "{}",
            concat!(stringify!($expected), " != ", stringify!($actual))
        )
    };
    ($expected:expr, $actual:expr, $($msg:tt)+) => {
        match (&$expected, &$actual) {
            (expected, actual) => {
                let expected: &str = ::core::convert::AsRef::<str>::as_ref(expected);
                let actual: &str = ::core::convert::AsRef::<str>::as_ref(actual);
                if expected != actual {
                    return $crate::Outcome::fail_mismatch(
                        format!($($msg)+),
                        file!(),
                        line!(),
                        expected,
                        actual,
                    );
                }
            }
        }
    };
}

/// Fails the test unless `actual` lies within `tolerance` of `expected`.
#[macro_export]
macro_rules! ensure_in_range {
    ($expected:expr, $actual:expr, $tolerance:expr $(,)?) => {
        $crate::ensure_in_range!(
            $expected,
            $actual,
            $tolerance,
            "{}",
            concat!(
                stringify!($expected),
                " != ",
                stringify!($actual),
                " +/- ",
                stringify!($tolerance)
            )
        )
    };
    ($expected:expr, $actual:expr, $tolerance:expr, $($msg:tt)+) => {{
        let expected: f64 = $expected;
        let actual: f64 = $actual;
        let tolerance: f64 = $tolerance;
        // NaN on either side never lands in range.
        if !((expected - actual).abs() <= tolerance) {
            return $crate::Outcome::fail(format!($($msg)+), file!(), line!());
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Mismatch, Outcome};

    fn eq_body(a: i32, b: i32) -> Outcome {
        ensure_eq!(a, b);
        pass!()
    }

    #[test]
    fn ensure_eq_uses_source_text_as_default_message() {
        let x = 1;
        let y = 2;
        let outcome = (|| {
            ensure_eq!(x, y);
            pass!()
        })();
        assert_eq!(outcome.message(), Some("x != y"));
        assert!(eq_body(3, 3).is_pass());
    }

    #[test]
    fn first_failing_assertion_ends_the_body() {
        let mut reached = false;
        let outcome = (|| {
            ensure!(1 + 1 == 3, "math is {}", "broken");
            reached = true;
            pass!()
        })();
        assert!(!reached);
        assert_eq!(outcome.message(), Some("math is broken"));
    }

    #[test]
    fn ensure_str_eq_records_mismatch() {
        let actual = String::from("hello\nworld");
        let outcome = (|| {
            ensure_str_eq!("hello\nthere", actual);
            pass!()
        })();
        let Outcome::Fail(failure) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(
            failure.mismatch,
            Some(Mismatch {
                expected: "hello\nthere".to_string(),
                actual: "hello\nworld".to_string(),
            })
        );
    }

    #[test]
    fn ensure_in_range_and_false() {
        let close = (|| {
            ensure_in_range!(1.0, 1.05, 0.1);
            ensure_false!(2 < 1);
            pass!("fine")
        })();
        assert_eq!(close, Outcome::pass_with("fine"));

        let far = (|| {
            ensure_in_range!(1.0, f64::NAN, 0.1);
            pass!()
        })();
        assert!(far.is_fail());
    }

    #[test]
    fn skip_and_fail_macros() {
        let skipped = (|| -> Outcome { skip!("not on {}", "this platform") })();
        assert_eq!(skipped, Outcome::skip_with("not on this platform"));

        let failed = (|| -> Outcome { fail!("nope") })();
        assert!(failed.is_fail());
    }
}
