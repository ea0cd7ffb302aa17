use crate::support::*;

use gelfmut::{
    mutate::{Caller, Zerolog},
    Pipeline,
};

pub fn test() {
    let pipeline = Pipeline::new()
        .with(Zerolog)
        .with(Caller::new(config().caller));

    let payload = payload!({
        "level": "info",
        "message": "where am I?"
    });

    let mut msg = config().message(&payload);

    // The pipeline's own frames are skipped over, landing on this call site
    let line = line!() + 1;
    pipeline.apply(&payload, &mut msg).expect("failed to apply pipeline");

    let encoded: Value = serde_json::from_slice(&msg.to_bytes().expect("failed to encode message"))
        .expect("encoded message is not JSON");

    let file = encoded["file"].as_str().expect("file is not a string");

    assert!(file.ends_with("cases/caller_pipeline.rs"), "{}", file);
    assert_eq!(line, encoded["line"]);
    assert_eq!("where am I?", encoded["short_message"]);
}
