#[macro_use]
extern crate serde_json;

mod cases;

use std::env;

fn main() {
    let case = env::args().nth(1);

    if let Some(case) = case {
        self::cases::test(case);
    } else {
        self::cases::test_all();
    }
}
