use crate::support::*;

use gelfmut::{error::InvalidField, mutate::Gelf, Pipeline};

pub fn test() {
    expect_err(
        ToEncode {
            payload: payload!({
                "facility": "payments",
                "level": "not-a-number",
                "short_message": "never set"
            }),
            pipeline: Pipeline::new().with(Gelf),
        },
        |err, msg| {
            let invalid = err
                .downcast_ref::<InvalidField>()
                .expect("expected an invalid field");

            assert_eq!("level", invalid.field());

            // Fields visited before the invalid one stay applied
            assert_eq!("payments", msg.facility);
            assert_eq!("", msg.short);
        },
    );
}
