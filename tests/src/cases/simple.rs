use crate::support::*;

use gelfmut::Pipeline;

pub fn test() {
    expect(
        ToEncode {
            payload: payload!(b"  plain text, no structure\n"),
            pipeline: Pipeline::new(),
        },
        |encoded| {
            assert_eq!("1.1", encoded["version"]);
            assert_eq!("example.org", encoded["host"]);
            assert_eq!("", encoded["short_message"]);
            assert_eq!("plain text, no structure", encoded["full_message"]);
            assert_eq!("gelfmut-tests", encoded["facility"]);
            assert!(encoded["timestamp"].is_f64());

            // The zero level is left out
            assert!(encoded.get("level").is_none());
            assert_eq!(6, encoded.as_object().expect("expected an object").len());
        },
    );
}
