//! Republishes one scanner call as a standalone value.
//!
//! The scanner keeps its results as mutable state that the next call
//! overwrites. [`scan_option`] copies that state out right after a single
//! call, so callers hold owned values with no link back to the scanner.

use serde::Serialize;

use crate::lifecycle::{InitContext, Module, ModuleResult};
use crate::observability::metrics;
use crate::options::scanner::{OptionScanner, END_OF_OPTIONS as NATIVE_END};

/// Option character reported once scanning is over.
pub const END_OF_OPTIONS: u8 = 0;

/// The state of the scanner right after one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Option character returned by the call; [`END_OF_OPTIONS`] when done.
    pub option: u8,
    /// Argument attached to the option, if any.
    pub argument: Option<String>,
    /// Index of the next argument element to scan.
    pub next_index: usize,
    /// The scanner's error-reporting flag.
    pub report_errors: bool,
    /// Last unrecognized option character, or the one missing its argument.
    pub unknown_option: u8,
}

impl ScanResult {
    /// True once there are no more options.
    pub fn is_end(&self) -> bool {
        self.option == END_OF_OPTIONS
    }

    pub fn option_char(&self) -> Option<char> {
        (!self.is_end()).then_some(self.option as char)
    }
}

/// Invoke the scanner once and copy out its state.
pub fn scan_option<S: AsRef<str>>(
    scanner: &mut OptionScanner,
    args: &[S],
    spec: &str,
) -> ScanResult {
    let code = scanner.getopt(args, spec);

    let result = ScanResult {
        option: normalize(code),
        argument: scanner.optarg().map(str::to_owned),
        next_index: scanner.optind(),
        report_errors: scanner.opterr(),
        unknown_option: scanner.optopt(),
    };

    let outcome = match result.option {
        END_OF_OPTIONS => "end",
        b'?' | b':' => "error",
        _ => "option",
    };
    metrics::record_scan(outcome);
    result
}

fn normalize(code: i32) -> u8 {
    if code == NATIVE_END {
        END_OF_OPTIONS
    } else {
        code as u8
    }
}

/// A scanner bound to one option spec.
#[derive(Debug, Clone)]
pub struct OptionMirror {
    scanner: OptionScanner,
    spec: String,
}

impl OptionMirror {
    pub fn new(spec: impl Into<String>, report_errors: bool) -> Self {
        let mut scanner = OptionScanner::new();
        scanner.set_opterr(report_errors);
        Self {
            scanner,
            spec: spec.into(),
        }
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn scan<S: AsRef<str>>(&mut self, args: &[S]) -> ScanResult {
        scan_option(&mut self.scanner, args, &self.spec)
    }

    /// Scan until the end of options, collecting every result.
    pub fn scan_all<S: AsRef<str>>(&mut self, args: &[S]) -> (Vec<ScanResult>, usize) {
        let mut results = Vec::new();
        loop {
            let result = self.scan(args);
            if result.is_end() {
                return (results, result.next_index);
            }
            results.push(result);
        }
    }
}

/// The mirror's slot in the module sequence. Nothing to set up or tear down.
#[derive(Debug, Default, Clone, Copy)]
pub struct MirrorModule;

impl MirrorModule {
    pub const NAME: &'static str = "getopt";
}

impl Module for MirrorModule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn init(&mut self, _ctx: &mut InitContext<'_>) -> ModuleResult {
        Ok(())
    }

    fn finish(&mut self) -> ModuleResult {
        Ok(())
    }
}
