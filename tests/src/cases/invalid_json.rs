use crate::support::*;

use gelfmut::{
    mutate::{Caller, Gelf},
    Pipeline,
};

pub fn test() {
    expect_err(
        ToEncode {
            payload: payload!(b"this is definitely not json"),
            pipeline: Pipeline::new().with(Caller::default()).with(Gelf),
        },
        |err, msg| {
            assert!(err.to_string().contains("this is definitely not json"));

            // Nothing is applied when the payload can't be decoded
            assert!(msg.extra.is_empty());
            assert_eq!("this is definitely not json", msg.full);
        },
    );
}
