/// Builds a [`TtpValue`](crate::TtpValue) from JSON-like syntax.
///
/// Objects become controls, arrays become arrays, and every other expression
/// goes through `TtpValue::from`, so string literals come out quoted and
/// numbers and booleans bare. Elements are single token trees, so a
/// negative number inside a collection needs parentheses: `[(-1), 2]`.
///
/// ```rust
/// use tesira_ttp::ttp;
///
/// let value = ttp!({"instanceTag": "Mixer1", "inputs": [1, 2], "muted": false});
/// assert_eq!(value.to_wire(), "{\"instanceTag\":\"Mixer1\" \"inputs\":[1 2] \"muted\":false}");
/// ```
#[macro_export]
macro_rules! ttp {
    ([]) => {
        $crate::TtpValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::TtpValue::Array(vec![$($crate::ttp!($elem)),*])
    };

    ({}) => {
        $crate::TtpValue::Control($crate::TtpMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut control = $crate::TtpMap::new();
        $(
            control.insert($key.to_string(), $crate::ttp!($value));
        )*
        $crate::TtpValue::Control(control)
    }};

    ($other:expr) => {
        $crate::TtpValue::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{TtpMap, TtpValue};

    #[test]
    fn test_ttp_macro_scalars() {
        assert_eq!(ttp!(true), TtpValue::raw("true"));
        assert_eq!(ttp!(42), TtpValue::raw("42"));
        assert_eq!(ttp!(-1.5), TtpValue::raw("-1.5"));
        assert_eq!(ttp!("hello"), TtpValue::raw("\"hello\""));
    }

    #[test]
    fn test_ttp_macro_collections() {
        assert_eq!(ttp!([]), TtpValue::Array(vec![]));
        assert_eq!(ttp!({}), TtpValue::Control(TtpMap::new()));

        let value = ttp!([1, [2, 3], {"a": "b"}]);
        assert_eq!(value.to_wire(), "[1 [2 3] {\"a\":\"b\"}]");
    }
}
