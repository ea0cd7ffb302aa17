use crate::support::*;

use gelfmut::{
    mutate::{Gelf, Zerolog},
    Pipeline,
};

pub fn test() {
    // Both mutants understand `level`, and the last one applied wins
    let payload = payload!({
        "level": 4,
        "_request_id": "abc",
        "logger": "orders"
    });

    expect(
        ToEncode {
            payload: payload.clone(),
            pipeline: Pipeline::new().with(Gelf),
        },
        |encoded| {
            assert_eq!(4, encoded["level"]);
            assert_eq!("abc", encoded["_request_id"]);
            assert!(encoded.get("logger").is_none());
        },
    );

    expect(
        ToEncode {
            payload,
            pipeline: Pipeline::new().with(Gelf).with(Zerolog),
        },
        |encoded| {
            assert_eq!(4, encoded["level"]);
            assert_eq!("abc", encoded["_request_id"]);
            assert_eq!("orders", encoded["logger"]);
        },
    );
}
