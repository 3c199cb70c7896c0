use tesira_ttp::{ttp, Scalar, TtpMap, TtpValue};

#[test]
fn test_ttp_macro_booleans() {
    assert_eq!(ttp!(true), TtpValue::raw("true"));
    assert_eq!(ttp!(false), TtpValue::raw("false"));
    assert!(!ttp!(false).as_bool().unwrap());
}

#[test]
fn test_ttp_macro_numbers() {
    let int_val = ttp!(42);
    assert_eq!(int_val, TtpValue::raw("42"));
    assert_eq!(int_val.as_i64().unwrap(), 42);

    let float_val = ttp!(3.5);
    assert_eq!(float_val.as_f64().unwrap(), 3.5);

    let negative_val = ttp!(-123);
    assert_eq!(negative_val, TtpValue::raw("-123"));
}

#[test]
fn test_ttp_macro_strings() {
    let string_val = ttp!("hello world");
    assert_eq!(string_val, TtpValue::Scalar(Scalar::string("hello world")));
    assert_eq!(string_val.to_wire(), "\"hello world\"");

    let empty_string = ttp!("");
    assert_eq!(empty_string.to_wire(), "\"\"");
    assert_eq!(empty_string.as_string().unwrap(), "");
}

#[test]
fn test_ttp_macro_arrays() {
    assert_eq!(ttp!([]), TtpValue::Array(vec![]));

    let number_array = ttp!([1, 2, 3]);
    assert_eq!(
        number_array,
        TtpValue::Array(vec![
            TtpValue::raw("1"),
            TtpValue::raw("2"),
            TtpValue::raw("3"),
        ])
    );

    let mixed_array = ttp!([1, "hello", true]);
    assert_eq!(mixed_array.to_wire(), "[1 \"hello\" true]");
}

#[test]
fn test_ttp_macro_controls() {
    assert_eq!(ttp!({}), TtpValue::Control(TtpMap::new()));

    let control = ttp!({
        "instanceTag": "Level1",
        "channel": 2
    });

    let map = control.as_control().expect("control");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("instanceTag"), Some(&TtpValue::from("Level1")));
    assert_eq!(map.get("channel"), Some(&TtpValue::from(2)));
}

#[test]
fn test_ttp_macro_nested() {
    let value = ttp!({
        "deviceId": 0,
        "levels": [(-100), (-12)],
        "meta": {"label": "Main"}
    });

    assert_eq!(
        value.to_wire(),
        "{\"deviceId\":0 \"levels\":[-100 -12] \"meta\":{\"label\":\"Main\"}}"
    );
    assert_eq!(
        value.get("meta").unwrap().get("label").unwrap().as_string().unwrap(),
        "Main"
    );
}

#[test]
fn test_ttp_macro_trailing_commas() {
    assert_eq!(ttp!([1, 2,]), ttp!([1, 2]));
    assert_eq!(ttp!({"a": 1,}), ttp!({"a": 1}));
}

#[test]
fn test_ttp_macro_expressions() {
    let gain = -6.5;
    let tag = String::from("Mixer1");
    let value = ttp!({"gain": gain, "tag": tag});
    assert_eq!(value.to_wire(), "{\"gain\":-6.5 \"tag\":\"Mixer1\"}");
}

#[test]
fn test_ttp_macro_parses_back() {
    let value = ttp!([{"A": 1, "B": "two words"}, [], {}]);
    let parsed = tesira_ttp::deserialize_value(&value.to_wire()).unwrap();
    assert_eq!(parsed, value);
}
