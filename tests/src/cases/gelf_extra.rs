use crate::support::*;

use gelfmut::{mutate::Gelf, Pipeline};

pub fn test() {
    expect(
        ToEncode {
            payload: payload!({
                "short_message": "A short message that helps you identify what is going on",
                "timestamp": 1385053862.3072,
                "level": 1,
                "_user_id": 9001,
                "_some_info": "foo",
                "ignored": "bar"
            }),
            pipeline: Pipeline::new().with(Gelf),
        },
        |mut encoded| {
            let full_message = encoded
                .as_object_mut()
                .expect("expected an object")
                .remove("full_message")
                .expect("missing full message");

            // The raw payload is kept as the full message
            assert!(full_message
                .as_str()
                .expect("full message is not a string")
                .contains("\"ignored\":\"bar\""));

            let expected = json!({
                "version": "1.1",
                "host": "example.org",
                "short_message": "A short message that helps you identify what is going on",
                "timestamp": 1385053862.3072,
                "level": 1,
                "facility": "gelfmut-tests",
                "_user_id": 9001,
                "_some_info": "foo"
            });

            assert_eq!(expected, encoded);
        },
    );
}
