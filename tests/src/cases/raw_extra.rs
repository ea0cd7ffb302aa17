use crate::support::*;

use bytes::Bytes;
use gelfmut::{mutate::Gelf, Pipeline};

pub fn test() {
    let raw_extra: &[u8] = br#"{"_z": 1.50, "_a" : "first"}"#;

    let encoded = encode(
        ToEncode {
            payload: payload!({
                "short_message": "with raw extra",
                "_user_id": 9001
            }),
            pipeline: Pipeline::new().with(Gelf),
        },
        |msg| msg.raw_extra = Bytes::from_static(raw_extra),
    )
    .expect("failed to build GELF message");

    let text = String::from_utf8(encoded.clone()).expect("encoded message is not UTF8");

    // Raw extra members are copied without being re-serialized
    assert!(
        text.ends_with(r#","_user_id":9001,"_z": 1.50, "_a" : "first"}"#),
        "{}",
        text
    );

    let decoded: Value = serde_json::from_slice(&encoded).expect("encoded message is not JSON");

    assert_eq!("with raw extra", decoded["short_message"]);
    assert_eq!(9001, decoded["_user_id"]);
    assert_eq!(1.5, decoded["_z"]);
    assert_eq!("first", decoded["_a"]);
}
