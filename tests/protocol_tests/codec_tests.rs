//! Codec Tests
//!
//! Tests for command encoding and response decoding.

use soundmexpro::protocol::{
    decode_response, decode_text, encode_command, encode_request, response_text, Arg, Command,
    Status, Value,
};
use soundmexpro::{SampleBuffer, SmpError};

fn encoded(command: &Command<'_>) -> String {
    encode_command(command).unwrap().into_string().unwrap()
}

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_command_without_args() {
    assert_eq!(encoded(&Command::new("start")), "command=start;");
}

#[test]
fn test_encode_int_list_is_bare_comma_list() {
    let cmd = Command::new("trackvolume").arg("track", vec![0i64, 1]);
    let text = encoded(&cmd);

    assert!(text.contains("track=0,1;"));
    assert!(!text.contains('['));
    assert!(!text.contains(' '));
}

#[test]
fn test_encode_keeps_argument_order() {
    let cmd = Command::new("loadfile")
        .arg("filename", "eurovision.wav")
        .arg("loopcount", 2i64)
        .arg("gain", 0.5f64);

    assert_eq!(
        encoded(&cmd),
        "command=loadfile;filename=eurovision.wav;loopcount=2;gain=0.5;"
    );
}

#[test]
fn test_encode_whole_float_keeps_fraction() {
    let cmd = Command::new("volume").arg("value", vec![1.0f64, 0.25]);
    assert_eq!(encoded(&cmd), "command=volume;value=1.0,0.25;");
}

#[test]
fn test_encode_string_list() {
    let cmd = Command::new("init").arg("output", vec!["out1", "out2"]);
    assert_eq!(encoded(&cmd), "command=init;output=out1,out2;");
}

#[test]
fn test_encode_stereo_buffer_expands_to_three_keys() {
    let buffer = SampleBuffer::<f64>::zeros(10000, 2);
    let address = buffer.as_slice().as_ptr() as usize;

    let cmd = Command::new("loadmem").arg("data", buffer.as_arg());
    assert_eq!(
        encoded(&cmd),
        format!("command=loadmem;data={};samples=10000;channels=2;", address)
    );
}

#[test]
fn test_encode_mono_buffer_has_one_channel() {
    let buffer = SampleBuffer::<f32>::from_channels(vec![vec![0.1, 0.2, 0.3]]).unwrap();
    let text = encoded(&Command::new("loadmem").arg("data", buffer.as_arg()));

    assert!(text.ends_with(";samples=3;channels=1;"));
}

#[test]
fn test_encode_unsigned_ints_keep_their_value() {
    let cmd = Command::new("seek")
        .arg("position", u32::MAX)
        .arg("tracks", vec![0u32, u32::MAX]);
    assert_eq!(
        encoded(&cmd),
        "command=seek;position=4294967295;tracks=0,4294967295;"
    );
}

#[test]
fn test_encode_read_only_datadest_is_rejected() {
    let buffer = SampleBuffer::<f32>::zeros(4, 1);
    let cmd = Command::new("recgetdata").arg("datadest", buffer.as_arg());

    match encode_command(&cmd) {
        Err(SmpError::InvalidArgument(msg)) => assert!(msg.contains("datadest")),
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_encode_writable_datadest_is_accepted() {
    let mut buffer = SampleBuffer::<f32>::zeros(4, 1);
    let cmd = Command::new("recgetdata").arg("datadest", buffer.as_arg_mut());
    assert!(encoded(&cmd).ends_with(";samples=4;channels=1;"));
}

#[test]
fn test_encode_does_not_validate_delimiters_by_default() {
    let cmd = Command::new("loadfile").arg("filename", "a;b");
    assert_eq!(encoded(&cmd), "command=loadfile;filename=a;b;");
}

#[test]
fn test_encode_strict_rejects_delimiters() {
    let args = [("filename".to_string(), Arg::Str("a=b".to_string()))];
    let result = encode_request("loadfile", args.iter().map(|(k, v)| (k.as_str(), v)), true);

    match result {
        Err(SmpError::InvalidArgument(msg)) => assert!(msg.contains("filename")),
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_encode_strict_rejects_delimiter_in_list_element() {
    let args = [("name".to_string(), Arg::StrList(vec!["a".into(), "b,c".into()]))];
    let result = encode_request("trackname", args.iter().map(|(k, v)| (k.as_str(), v)), true);
    assert!(matches!(result, Err(SmpError::InvalidArgument(_))));
}

#[test]
fn test_encode_strict_accepts_clean_arguments() {
    let args = [
        ("track".to_string(), Arg::IntList(vec![0, 1])),
        ("name".to_string(), Arg::Str("left".to_string())),
    ];
    let result = encode_request("trackname", args.iter().map(|(k, v)| (k.as_str(), v)), true);
    assert_eq!(
        result.unwrap().to_str().unwrap(),
        "command=trackname;track=0,1;name=left;"
    );
}

#[test]
fn test_encode_interior_nul_is_protocol_error() {
    let cmd = Command::new("loadfile").arg("filename", "a\0b");
    let result = encode_command(&cmd);
    assert!(matches!(result, Err(SmpError::Protocol(_))));
}

// =============================================================================
// Response Decoding Tests
// =============================================================================

#[test]
fn test_decode_int_list() {
    let resp = decode_text("value=1,2,3;", 1);
    assert_eq!(resp.get("value"), Some(&Value::IntList(vec![1, 2, 3])));
}

#[test]
fn test_decode_mixed_numbers_promote_to_float_list() {
    let resp = decode_text("value=1.5,2;", 1);
    assert_eq!(resp.get("value"), Some(&Value::FloatList(vec![1.5, 2.0])));
}

#[test]
fn test_decode_non_numeric_element_forces_strings() {
    let resp = decode_text("name=out1,out 2;", 1);
    assert_eq!(
        resp.get("name"),
        Some(&Value::StrList(vec!["out1".to_string(), "out 2".to_string()]))
    );
}

#[test]
fn test_decode_channel_keys_stay_strings() {
    let resp = decode_text("getchannels=1,2;getactivechannels=3;", 1);
    assert_eq!(
        resp.get("getchannels"),
        Some(&Value::StrList(vec!["1".to_string(), "2".to_string()]))
    );
    assert_eq!(resp.get("getactivechannels"), Some(&Value::Str("3".to_string())));
}

#[test]
fn test_decode_scalars() {
    let resp = decode_text("position=-480;gain=0.5;version=2.9.1.3;", 1);
    assert_eq!(resp.get("position"), Some(&Value::Int(-480)));
    assert_eq!(resp.get("gain"), Some(&Value::Float(0.5)));
    assert_eq!(resp.get("version"), Some(&Value::Str("2.9.1.3".to_string())));
}

#[test]
fn test_decode_strips_enclosing_quotes() {
    let resp = decode_text("driver='ASIO Fireface',\"ASIO4ALL\";error=\"unknown command\";", 1);
    assert_eq!(
        resp.get("driver"),
        Some(&Value::StrList(vec![
            "ASIO Fireface".to_string(),
            "ASIO4ALL".to_string()
        ]))
    );
    assert_eq!(resp.get("error"), Some(&Value::Str("unknown command".to_string())));
}

#[test]
fn test_decode_inserts_success_first() {
    let resp = decode_text("value=1;", 1);
    let keys: Vec<&str> = resp.keys().collect();

    assert_eq!(keys, vec!["success", "value"]);
    assert_eq!(resp.get("success"), Some(&Value::Int(1)));
    assert_eq!(resp.status(), Status::Success);
}

#[test]
fn test_decode_keeps_raw_negative_status() {
    let resp = decode_text("", -5);
    assert_eq!(resp.status(), Status::Error(-5));
    assert_eq!(resp.get("success"), Some(&Value::Int(-5)));
    assert_eq!(resp.len(), 1);
}

#[test]
fn test_decode_empty_value_is_empty_string() {
    let resp = decode_text("name=;", 1);
    assert_eq!(resp.get("name"), Some(&Value::Str(String::new())));
}

#[test]
fn test_decode_key_without_assign_is_empty_string() {
    let resp = decode_text("flag;value=2;", 1);
    assert_eq!(resp.get("flag"), Some(&Value::Str(String::new())));
    assert_eq!(resp.get("value"), Some(&Value::Int(2)));
}

#[test]
fn test_decode_splits_on_first_assign_only() {
    let resp = decode_text("expr=a=b;", 1);
    assert_eq!(resp.get("expr"), Some(&Value::Str("a=b".to_string())));
}

#[test]
fn test_decode_empty_list_element_forces_strings() {
    let resp = decode_text("value=1,,3;", 1);
    assert_eq!(
        resp.get("value"),
        Some(&Value::StrList(vec!["1".into(), String::new(), "3".into()]))
    );
}

#[test]
fn test_decode_repeated_key_keeps_last_value() {
    let resp = decode_text("value=1;value=2;", 1);
    assert_eq!(resp.get("value"), Some(&Value::Int(2)));
    assert_eq!(resp.len(), 2);
}

#[test]
fn test_decode_many_keys_keeps_order_and_lookup() {
    let text: String = (0..5000).map(|i| format!("k{}={};", i, i)).collect();
    let resp = decode_text(&format!("{}k10=x;", text), 1);

    assert_eq!(resp.len(), 5001);
    assert_eq!(resp.get("k4999"), Some(&Value::Int(4999)));
    assert_eq!(resp.get("k10"), Some(&Value::Str("x".to_string())));
    assert_eq!(resp.keys().nth(11), Some("k10"));
}

#[test]
fn test_remove_keeps_later_keys_reachable() {
    let mut resp = decode_text("a=1;b=2;c=3;", 1);
    assert_eq!(resp.remove("b"), Some(Value::Int(2)));

    assert_eq!(resp.get("a"), Some(&Value::Int(1)));
    assert_eq!(resp.get("c"), Some(&Value::Int(3)));
    assert!(!resp.contains_key("b"));
    assert_eq!(resp.keys().collect::<Vec<_>>(), vec!["success", "a", "c"]);
}

// =============================================================================
// Raw Buffer Tests
// =============================================================================

#[test]
fn test_decode_stops_at_nul() {
    let mut buffer = vec![0u8; 64];
    buffer[..8].copy_from_slice(b"value=7;");
    buffer[9..20].copy_from_slice(b"stale=data;");

    let resp = decode_response(&buffer, 1);
    assert_eq!(resp.get("value"), Some(&Value::Int(7)));
    assert!(!resp.contains_key("stale"));
}

#[test]
fn test_decode_windows_1252_text() {
    // 0xE4 = 'ä', 0x80 = '€' in Windows-1252
    let bytes = b"name=Ger\xe4t \x80;\0";
    let resp = decode_response(bytes, 1);
    assert_eq!(resp.get("name"), Some(&Value::Str("Gerät €".to_string())));
}

#[test]
fn test_response_text_without_terminator() {
    assert_eq!(response_text(b"error=x"), "error=x");
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_preserves_type_category() {
    let cmd = Command::new("echo")
        .arg("count", 3i64)
        .arg("gain", 2.0f64)
        .arg("tracks", vec![0i64, 1, 2])
        .arg("levels", vec![0.5f64, 1.0])
        .arg("name", "left")
        .arg("outputs", vec!["out1", "out2"]);

    let text = encoded(&cmd);
    let body = text.strip_prefix("command=echo;").unwrap();
    let resp = decode_text(body, 1);

    assert_eq!(resp.get("count"), Some(&Value::Int(3)));
    assert_eq!(resp.get("gain"), Some(&Value::Float(2.0)));
    assert_eq!(resp.get("tracks"), Some(&Value::IntList(vec![0, 1, 2])));
    assert_eq!(resp.get("levels"), Some(&Value::FloatList(vec![0.5, 1.0])));
    assert_eq!(resp.get("name"), Some(&Value::Str("left".to_string())));
    assert_eq!(
        resp.get("outputs"),
        Some(&Value::StrList(vec!["out1".to_string(), "out2".to_string()]))
    );
}
