/*!
Call stack inspection.

The inspector walks outwards from a starting depth and reports the first
frame whose source file isn't on an ignore list. This is used to find the
application call site behind layers of logging plumbing.
*/

use crate::{diagnostics::emit_debug, path};

metrics! {
    caller_exhausted
}

const UNKNOWN_FILE: &str = "???";

/**
A source location reported by the inspector.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    /**
    The sentinel location used when no frame qualifies.
    */
    pub fn unknown() -> Self {
        Location {
            file: UNKNOWN_FILE.to_owned(),
            line: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.file == UNKNOWN_FILE && self.line == 0
    }
}

/**
A single frame on a call stack.

The file is the path as reported by the platform, before normalization.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: String,
    pub line: u32,
}

impl Frame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Frame {
            file: file.into(),
            line,
        }
    }
}

/**
A source of call stack frames.

Frames are indexed from the innermost one outwards.
*/
pub trait Stack {
    fn frame(&self, depth: usize) -> Option<Frame>;
}

impl Stack for [Frame] {
    fn frame(&self, depth: usize) -> Option<Frame> {
        self.get(depth).cloned()
    }
}

impl Stack for Vec<Frame> {
    fn frame(&self, depth: usize) -> Option<Frame> {
        self.as_slice().frame(depth)
    }
}

/**
A snapshot of the current thread's call stack.

Frames start at the function that called `Captured::capture`. Inlined
functions are reported as frames of their own. Without the `stack` feature,
or without debug symbols to resolve, the snapshot is empty.
*/
#[derive(Debug, Clone, Default)]
pub struct Captured {
    frames: Vec<Frame>,
}

impl Captured {
    #[cfg(feature = "stack")]
    #[inline(never)]
    pub fn capture() -> Self {
        const ANCHOR: &str = "Captured::capture";

        let backtrace = backtrace::Backtrace::new();

        let mut frames = Vec::new();
        let mut anchored = false;

        for frame in backtrace.frames() {
            let symbols = frame.symbols();

            if symbols.is_empty() {
                if anchored {
                    frames.push(Frame::new(UNKNOWN_FILE, 0));
                }

                continue;
            }

            // Symbols within a frame are ordered from the innermost inlined function
            for symbol in symbols {
                if !anchored {
                    anchored = symbol
                        .name()
                        .map(|name| name.to_string().contains(ANCHOR))
                        .unwrap_or(false);

                    continue;
                }

                let file = symbol
                    .filename()
                    .and_then(|file| file.to_str())
                    .unwrap_or(UNKNOWN_FILE);

                frames.push(Frame::new(file, symbol.lineno().unwrap_or(0)));
            }
        }

        Captured { frames }
    }

    #[cfg(not(feature = "stack"))]
    pub fn capture() -> Self {
        Captured { frames: Vec::new() }
    }
}

impl Stack for Captured {
    fn frame(&self, depth: usize) -> Option<Frame> {
        self.frames.frame(depth)
    }
}

/**
Find the first caller that isn't in an ignored file.

A `depth` of `0` is the direct caller of the function that called
`find_caller`. Ignored suffixes are path fragments like `"mutate/mod.rs"`,
matched against normalized paths.
*/
#[inline(never)]
pub fn find_caller(depth: usize, ignored: &[impl AsRef<str>]) -> Location {
    // Skip this function and the one that called it
    find_caller_in(&Captured::capture(), depth + 2, ignored)
}

/**
Find the first frame at or beyond `depth` that isn't in an ignored file.

A `depth` of `0` is the innermost frame of `stack`.
*/
pub fn find_caller_in<S>(stack: &S, depth: usize, ignored: &[impl AsRef<str>]) -> Location
where
    S: Stack + ?Sized,
{
    let mut depth = depth;

    while let Some(frame) = stack.frame(depth) {
        let file = path::normalize(&frame.file);

        if ignored.iter().any(|suffix| file.ends_with(suffix.as_ref())) {
            depth += 1;
            continue;
        }

        return Location {
            file: file.to_owned(),
            line: frame.line,
        };
    }

    increment!(stack.caller_exhausted);
    emit_debug("Caller lookup exhausted the stack");

    Location::unknown()
}
