//! POSIX-style short option scanner.
//!
//! # Option spec
//! - `c`    flag without argument
//! - `c:`   required argument, attached (`-cVAL`) or the next element
//! - `c::`  optional argument, attached only
//! - leading `:` silences diagnostics and reports a missing argument as `:`
//!
//! # Design Decisions
//! - Scanning stops at the first operand; arguments are never permuted
//! - `--` is consumed and ends scanning, a lone `-` ends scanning unconsumed
//! - The cursor survives between calls so grouped flags (`-abc`) work

/// Returned when there are no more options to scan.
pub const END_OF_OPTIONS: i32 = -1;

const UNKNOWN: u8 = b'?';
const MISSING_ARGUMENT: u8 = b':';

/// Scanner state carried between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionScanner {
    optind: usize,
    optarg: Option<String>,
    opterr: bool,
    optopt: u8,
    // Byte offset of the next flag inside args[optind]; 0 = start a new element.
    nextchar: usize,
}

impl Default for OptionScanner {
    fn default() -> Self {
        Self {
            optind: 1,
            optarg: None,
            opterr: true,
            optopt: UNKNOWN,
            nextchar: 0,
        }
    }
}

impl OptionScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next argument element to be scanned.
    pub fn optind(&self) -> usize {
        self.optind
    }

    /// Argument of the option returned by the last call.
    pub fn optarg(&self) -> Option<&str> {
        self.optarg.as_deref()
    }

    /// Whether diagnostics are written to standard error.
    pub fn opterr(&self) -> bool {
        self.opterr
    }

    pub fn set_opterr(&mut self, opterr: bool) {
        self.opterr = opterr;
    }

    /// The option character that caused the last error.
    pub fn optopt(&self) -> u8 {
        self.optopt
    }

    /// Start over from the first argument. Keeps the error-reporting flag.
    pub fn reset(&mut self) {
        *self = Self {
            opterr: self.opterr,
            ..Self::default()
        };
    }

    /// Scan the next option from `args` against `spec`.
    ///
    /// Returns the option character, `'?'` or `':'` on error, or
    /// [`END_OF_OPTIONS`].
    pub fn getopt<S: AsRef<str>>(&mut self, args: &[S], spec: &str) -> i32 {
        self.optarg = None;

        let (silent, spec) = match spec.as_bytes() {
            [b':', rest @ ..] => (true, rest),
            all => (false, all),
        };

        // The vector may have changed under a half-scanned element.
        if self.nextchar != 0
            && args
                .get(self.optind)
                .map_or(true, |a| self.nextchar >= a.as_ref().len())
        {
            self.advance();
        }

        if self.nextchar == 0 {
            let Some(arg) = args.get(self.optind) else {
                return END_OF_OPTIONS;
            };
            let arg = arg.as_ref().as_bytes();
            if arg.len() < 2 || arg[0] != b'-' {
                return END_OF_OPTIONS;
            }
            if arg == b"--" {
                self.optind += 1;
                return END_OF_OPTIONS;
            }
            self.nextchar = 1;
        }

        let arg = args[self.optind].as_ref().as_bytes();
        let c = arg[self.nextchar];
        self.nextchar += 1;
        let at_end = self.nextchar >= arg.len();

        let position = if c == b':' {
            None
        } else {
            spec.iter().position(|&b| b == c)
        };

        let Some(position) = position else {
            self.optopt = c;
            if self.opterr && !silent {
                eprintln!("{}: invalid option -- '{}'", program_name(args), c as char);
            }
            if at_end {
                self.advance();
            }
            return UNKNOWN as i32;
        };

        let takes_argument = spec.get(position + 1) == Some(&b':');
        let optional = takes_argument && spec.get(position + 2) == Some(&b':');

        if !takes_argument {
            if at_end {
                self.advance();
            }
            return c as i32;
        }

        if !at_end {
            self.optarg = Some(String::from_utf8_lossy(&arg[self.nextchar..]).into_owned());
            self.advance();
        } else if optional {
            self.advance();
        } else if let Some(next) = args.get(self.optind + 1) {
            self.optarg = Some(next.as_ref().to_string());
            self.optind += 2;
            self.nextchar = 0;
        } else {
            self.optopt = c;
            self.advance();
            if self.opterr && !silent {
                eprintln!(
                    "{}: option requires an argument -- '{}'",
                    program_name(args),
                    c as char
                );
            }
            let code = if silent { MISSING_ARGUMENT } else { UNKNOWN };
            return code as i32;
        }

        c as i32
    }

    fn advance(&mut self) {
        self.optind += 1;
        self.nextchar = 0;
    }
}

fn program_name<S: AsRef<str>>(args: &[S]) -> &str {
    args.first().map(|a| a.as_ref()).unwrap_or("bootseq")
}
