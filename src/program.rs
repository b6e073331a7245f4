//! The map program's module sequence.
//!
//! The order below is the linker's linearization of the program's imports,
//! written down once. Every module except the root is opaque here; the root
//! `Map` module is the program body.

use crate::config::schema::OptionsConfig;
use crate::lifecycle::{InitContext, Module, ModuleResult, ModuleSequence, NoopModule, SequenceError};
use crate::options::{MirrorModule, OptionMirror, ScanResult};

/// Name of the root module.
pub const ROOT_MODULE: &str = "Map";

/// Every module before the root, in initialization order.
pub const MODULE_ORDER: [&str; 31] = [
    "Storage",
    "SYSTEM",
    "M2RTS",
    "RTExceptions",
    "NumberIO",
    "StrLib",
    "ASCII",
    "Indexing",
    "errno",
    "termios",
    "FIO",
    "IO",
    "UnixArgs",
    "StdIO",
    "Args",
    MirrorModule::NAME,
    "Chance",
    "Debug",
    "StrIO",
    "StoreCoords",
    "Assertion",
    "Geometry",
    "MakeBoxes",
    "SysStorage",
    "MapOptions",
    "SysExceptions",
    "M2EXCEPTION",
    "BoxMap",
    "Break",
    "RoomMap",
    "WriteMap",
];

/// Build the map program's sequence, root last.
pub fn map_sequence(options: &OptionsConfig) -> Result<ModuleSequence, SequenceError> {
    let mut modules: Vec<Box<dyn Module>> = MODULE_ORDER
        .iter()
        .map(|name| -> Box<dyn Module> {
            if *name == MirrorModule::NAME {
                Box::new(MirrorModule)
            } else {
                Box::new(NoopModule::new(*name))
            }
        })
        .collect();
    modules.push(Box::new(MapRoot::new(options)));
    ModuleSequence::new(modules)
}

/// The root module: scans the program's options and reports them.
#[derive(Debug, Clone)]
pub struct MapRoot {
    spec: String,
    report_errors: bool,
    scanned: Vec<ScanResult>,
    operands: Vec<String>,
}

impl MapRoot {
    pub fn new(options: &OptionsConfig) -> Self {
        Self {
            spec: options.spec.clone(),
            report_errors: options.report_errors,
            scanned: Vec::new(),
            operands: Vec::new(),
        }
    }

    /// Options scanned during init, errors included.
    pub fn scanned(&self) -> &[ScanResult] {
        &self.scanned
    }

    /// Arguments left after the options.
    pub fn operands(&self) -> &[String] {
        &self.operands
    }
}

impl Module for MapRoot {
    fn name(&self) -> &str {
        ROOT_MODULE
    }

    fn init(&mut self, ctx: &mut InitContext<'_>) -> ModuleResult {
        let args = ctx.args();
        let mut mirror = OptionMirror::new(self.spec.as_str(), self.report_errors);
        let (scanned, next_index) = mirror.scan_all(args);

        for result in &scanned {
            match result.option {
                b'?' | b':' => tracing::warn!(
                    option = %(result.unknown_option as char),
                    "Unusable option"
                ),
                c => tracing::info!(
                    option = %(c as char),
                    argument = ?result.argument,
                    "Option"
                ),
            }
        }

        self.operands = args.get(next_index..).unwrap_or_default().to_vec();
        self.scanned = scanned;

        let options = self.scanned.len();
        let operands = self.operands.len();
        ctx.install_termination("map-summary", move || {
            tracing::info!(options, operands, "Map run finished");
            Ok(())
        });
        Ok(())
    }

    fn finish(&mut self) -> ModuleResult {
        self.scanned.clear();
        self.operands.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{ModuleState, Orchestrator, PhaseOutcome, Terminator};

    struct NoExit;

    impl Terminator for NoExit {
        fn terminate(&mut self, _status: i32) {}
    }

    #[test]
    fn test_map_sequence_order() {
        let seq = map_sequence(&OptionsConfig::default()).unwrap();
        let names = seq.names();

        assert_eq!(seq.len(), MODULE_ORDER.len() + 1);
        assert_eq!(names[0], "Storage");
        assert_eq!(seq.root_name(), ROOT_MODULE);
        assert!(names.contains(&MirrorModule::NAME));
        let getopt = names.iter().position(|n| *n == "getopt").unwrap();
        let map_options = names.iter().position(|n| *n == "MapOptions").unwrap();
        assert!(getopt < map_options);
    }

    #[test]
    fn test_map_program_runs_end_to_end() {
        let seq = map_sequence(&OptionsConfig {
            spec: "vs:".into(),
            report_errors: false,
        })
        .unwrap();
        let mut orchestrator = Orchestrator::new(seq).with_terminator(NoExit);
        let args: Vec<String> = ["map", "-v", "-s", "3", "rooms.txt"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(orchestrator.bootstrap(&args), PhaseOutcome::Completed);
        assert_eq!(orchestrator.state_of(ROOT_MODULE), Some(ModuleState::Initialized));
        assert_eq!(orchestrator.shutdown(), PhaseOutcome::Completed);
        assert!(orchestrator
            .states()
            .iter()
            .all(|(_, state)| *state == ModuleState::Finished));
    }

    #[test]
    fn test_root_collects_options_and_operands() {
        use crate::lifecycle::ProcedureRegistry;

        let mut root = MapRoot::new(&OptionsConfig {
            spec: "vs:".into(),
            report_errors: false,
        });
        let args: Vec<String> = ["map", "-v", "-x", "-s3", "rooms.txt", "-v"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut hooks = ProcedureRegistry::new();
        let mut ctx = InitContext::new(&args, &mut hooks);

        root.init(&mut ctx).unwrap();
        let options: Vec<_> = root.scanned().iter().map(|r| r.option as char).collect();
        assert_eq!(options, vec!['v', '?', 's']);
        assert_eq!(root.scanned()[1].unknown_option, b'x');
        assert_eq!(root.operands(), ["rooms.txt".to_string(), "-v".to_string()]);
        assert_eq!(hooks.pending_termination(), 1);
    }
}
