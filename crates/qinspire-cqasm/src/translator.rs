//! Command-stream to cQASM translation.
//!
//! The [`Translator`] is a small state machine. It starts `Clear`; the first
//! command stored after that begins a new circuit. Computational gates are
//! emitted as they arrive, measurements are deferred until [`finalize`]
//! so that every gate line precedes every measurement line.
//!
//! Gate lines use the qubit ids exactly as given in the commands. Only the
//! deferred measurements are resolved to physical positions.
//!
//! [`finalize`]: Translator::finalize

use qinspire_ir::{Command, Gate, QubitId, QubitMapping};
use tracing::{debug, trace};

use crate::error::{CqasmError, CqasmResult};
use crate::format::{format_fixed, format_general};
use crate::ledger::AllocationLedger;
use crate::program::CqasmProgram;

/// Generator name written into the program header by default.
pub const DEFAULT_GENERATOR: &str = "qinspire cQASM translator";

/// Decimals used for controlled-rotation angles.
const CR_DECIMALS: usize = 12;

/// Significant digits used for single-qubit rotation angles.
const ROTATION_DIGITS: usize = 12;

/// Translator state between flushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorState {
    /// Nothing accumulated since the last reset.
    Clear,
    /// At least one command has been stored.
    Accumulating,
}

/// Accumulates commands and produces a cQASM program on flush.
#[derive(Debug, Clone)]
pub struct Translator {
    state: TranslatorState,
    ledger: AllocationLedger,
    body: Vec<String>,
    measured: Vec<QubitId>,
    generator: String,
    last_program: Option<CqasmProgram>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Create a translator in the `Clear` state.
    pub fn new() -> Self {
        Self::with_generator(DEFAULT_GENERATOR)
    }

    /// Create a translator that names `generator` in the program header.
    pub fn with_generator(generator: impl Into<String>) -> Self {
        Self {
            state: TranslatorState::Clear,
            ledger: AllocationLedger::new(),
            body: Vec::new(),
            measured: Vec::new(),
            generator: generator.into(),
            last_program: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> TranslatorState {
        self.state
    }

    /// Whether the next stored command starts a new circuit.
    pub fn is_clear(&self) -> bool {
        self.state == TranslatorState::Clear
    }

    /// The allocation ledger of the circuit being built.
    pub fn ledger(&self) -> &AllocationLedger {
        &self.ledger
    }

    /// Gate lines emitted so far, without header or measurements.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Logical ids measured so far.
    pub fn measured(&self) -> &[QubitId] {
        &self.measured
    }

    /// The last program produced by [`finalize`](Self::finalize).
    pub fn cqasm(&self) -> Option<&CqasmProgram> {
        self.last_program.as_ref()
    }

    /// Translate and store one command.
    ///
    /// Flush commands are not accepted here; the caller finalizes instead.
    pub fn store(&mut self, cmd: &Command) -> CqasmResult<()> {
        if self.is_clear() {
            self.ledger.reset();
            self.body.clear();
            self.measured.clear();
            self.state = TranslatorState::Accumulating;
        }

        match cmd.gate {
            Gate::Allocate => {
                self.ledger.allocate(cmd.single_target()?);
            }
            Gate::Deallocate => {
                self.ledger.deallocate(cmd.single_target()?);
            }
            Gate::Measure => {
                cmd.single_target()?;
                let logical = cmd
                    .logical_qubit_id()
                    .ok_or_else(|| CqasmError::MissingLogicalId(cmd.to_string()))?;
                self.measured.push(logical);
            }
            _ => {
                let line = translate_gate(cmd)?;
                trace!(%line, "emitted");
                self.body.push(line);
            }
        }
        Ok(())
    }

    /// Freeze the accumulated circuit into a program.
    ///
    /// Returns `None` when no gate line was emitted, in which case nothing
    /// should be executed. Otherwise a `measure` line is appended for the
    /// physical position of every measured id, in measurement order.
    pub fn finalize(&mut self, mapping: &dyn QubitMapping) -> CqasmResult<Option<CqasmProgram>> {
        if self.body.is_empty() {
            return Ok(None);
        }

        let mut lines = self.body.clone();
        for &logical in &self.measured {
            let physical = mapping.resolve(logical)?;
            lines.push(format!("measure q[{physical}]"));
        }

        let program = CqasmProgram::assemble(
            &self.generator,
            self.ledger.declared_qubits(),
            &lines,
            self.measured.clone(),
        );
        debug!(qubits = program.num_qubits(), "cQASM program:\n{}", program.text());
        self.last_program = Some(program.clone());
        Ok(Some(program))
    }

    /// Drop the accumulated circuit and return to `Clear`.
    ///
    /// The last finalized program stays readable.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.body.clear();
        self.measured.clear();
        self.state = TranslatorState::Clear;
    }
}

/// Translate one computational command into a cQASM line.
///
/// The arms are ordered: the first matching rule wins.
fn translate_gate(cmd: &Command) -> CqasmResult<String> {
    let controls = cmd.controls.as_slice();
    match (&cmd.gate, controls) {
        (Gate::X, [c]) => {
            let t = cmd.single_target()?;
            Ok(format!("CNOT q[{}], q[{}]", c.0, t.0))
        }
        (Gate::Swap, []) => {
            let (a, b) = cmd.target_pair()?;
            Ok(format!("swap q[{}], q[{}]", a.0, b.0))
        }
        (Gate::X, [c1, c2]) => {
            let t = cmd.single_target()?;
            Ok(format!("Toffoli q[{}], q[{}], q[{}]", c1.0, c2.0, t.0))
        }
        (Gate::Z, [c]) => {
            let t = cmd.single_target()?;
            Ok(format!("CZ q[{}], q[{}]", c.0, t.0))
        }
        (Gate::Barrier, _) => {
            let qubits: Vec<String> = cmd.all_qubits().map(|q| format!("q[{}]", q.0)).collect();
            Ok(format!("# barrier gate {};", qubits.join(", ")))
        }
        (Gate::Rz(angle), [c]) => {
            let t = cmd.single_target()?;
            Ok(format!(
                "CR q[{}],q[{}],{}",
                c.0,
                t.0,
                format_fixed(*angle, CR_DECIMALS)
            ))
        }
        (Gate::Rx(_) | Gate::Ry(_), [_]) => Err(CqasmError::unsupported(
            cmd,
            "controlled Rx or Ry has no cQASM encoding",
        )),
        (Gate::Rx(angle) | Gate::Ry(angle) | Gate::Rz(angle), []) => {
            let t = cmd.single_target()?;
            Ok(format!(
                "{} q[{}],{}",
                cmd.gate.short_name(),
                t.0,
                format_general(*angle, ROTATION_DIGITS)
            ))
        }
        (Gate::Tdag, []) => {
            let t = cmd.single_target()?;
            Ok(format!("Tdag q[{}]", t.0))
        }
        (gate, []) if gate.is_fixed_single_qubit() => {
            let t = cmd.single_target()?;
            Ok(format!("{} q[{}]", single_qubit_mnemonic(gate), t.0))
        }
        _ => Err(CqasmError::unsupported(cmd, "not implemented")),
    }
}

/// Mnemonic for an uncontrolled fixed gate: the lowercase name, except the
/// adjoint gates which keep their literal spelling.
fn single_qubit_mnemonic(gate: &Gate) -> String {
    match gate {
        Gate::Sdag => "Sdag".to_string(),
        Gate::Tdag => "Tdag".to_string(),
        other => other.short_name().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qinspire_ir::{IdentityMapping, MappingTable};

    fn q(id: u32) -> QubitId {
        QubitId(id)
    }

    fn line(cmd: Command) -> CqasmResult<String> {
        translate_gate(&cmd)
    }

    #[test]
    fn test_single_qubit_mnemonics() {
        let cases = [
            (Gate::X, "x"),
            (Gate::Y, "y"),
            (Gate::Z, "z"),
            (Gate::H, "h"),
            (Gate::S, "s"),
            (Gate::Sdag, "Sdag"),
            (Gate::T, "t"),
            (Gate::Tdag, "Tdag"),
        ];
        for (gate, mnemonic) in cases {
            assert_eq!(
                line(Command::gate(gate, q(2))).unwrap(),
                format!("{mnemonic} q[2]")
            );
        }
    }

    #[test]
    fn test_two_and_three_qubit_lines() {
        assert_eq!(
            line(Command::controlled(Gate::X, [q(0)], q(1))).unwrap(),
            "CNOT q[0], q[1]"
        );
        assert_eq!(line(Command::swap(q(3), q(1))).unwrap(), "swap q[3], q[1]");
        assert_eq!(
            line(Command::controlled(Gate::X, [q(0), q(1)], q(2))).unwrap(),
            "Toffoli q[0], q[1], q[2]"
        );
        assert_eq!(
            line(Command::controlled(Gate::Z, [q(4)], q(0))).unwrap(),
            "CZ q[4], q[0]"
        );
    }

    #[test]
    fn test_barrier_comment() {
        assert_eq!(
            line(Command::barrier([q(0), q(1), q(2)])).unwrap(),
            "# barrier gate q[0], q[1], q[2];"
        );
    }

    #[test]
    fn test_controlled_rz() {
        assert_eq!(
            line(Command::controlled(Gate::Rz(0.5), [q(0)], q(1))).unwrap(),
            "CR q[0],q[1],0.500000000000"
        );
    }

    #[test]
    fn test_controlled_rx_ry_rejected() {
        for gate in [Gate::Rx(0.5), Gate::Ry(0.5)] {
            let err = line(Command::controlled(gate, [q(0)], q(1))).unwrap_err();
            assert!(matches!(err, CqasmError::UnsupportedGate { .. }));
        }
    }

    #[test]
    fn test_rotations() {
        assert_eq!(line(Command::gate(Gate::Rx(0.5), q(0))).unwrap(), "Rx q[0],0.5");
        assert_eq!(
            line(Command::gate(Gate::Ry(std::f64::consts::PI), q(1))).unwrap(),
            "Ry q[1],3.14159265359"
        );
        assert_eq!(line(Command::gate(Gate::Rz(1e-5), q(2))).unwrap(), "Rz q[2],1e-05");
    }

    #[test]
    fn test_unsupported() {
        for cmd in [
            Command::gate(Gate::Ph(0.1), q(0)),
            Command::controlled(Gate::H, [q(0)], q(1)),
            Command::controlled(Gate::X, [q(0), q(1), q(2)], q(3)),
            Command::swap(q(0), q(1)).with_controls([q(2)]),
            Command::flush(),
        ] {
            let err = translate_gate(&cmd).unwrap_err();
            assert!(matches!(err, CqasmError::UnsupportedGate { .. }), "{cmd}");
        }
    }

    #[test]
    fn test_measure_requires_tag() {
        let mut translator = Translator::new();
        let err = translator
            .store(&Command::new(Gate::Measure, [q(0)]))
            .unwrap_err();
        assert!(matches!(err, CqasmError::MissingLogicalId(_)));
    }

    #[test]
    fn test_state_transitions() {
        let mut translator = Translator::new();
        assert!(translator.is_clear());
        translator.store(&Command::allocate(q(0))).unwrap();
        assert_eq!(translator.state(), TranslatorState::Accumulating);
        translator.reset();
        assert!(translator.is_clear());
    }

    #[test]
    fn test_first_command_after_clear_discards_leftovers() {
        let mut translator = Translator::new();
        translator.store(&Command::allocate(q(5))).unwrap();
        translator.store(&Command::gate(Gate::H, q(5))).unwrap();
        translator.reset();
        translator.store(&Command::allocate(q(0))).unwrap();
        assert!(translator.body().is_empty());
        assert_eq!(translator.ledger().declared_qubits(), 1);
    }

    #[test]
    fn test_finalize_empty_body() {
        let mut translator = Translator::new();
        translator.store(&Command::allocate(q(0))).unwrap();
        translator.store(&Command::measure(q(0))).unwrap();
        assert!(translator.finalize(&IdentityMapping).unwrap().is_none());
        assert!(translator.cqasm().is_none());
    }

    #[test]
    fn test_finalize_uses_physical_positions() {
        let mut translator = Translator::with_generator("test");
        for cmd in [
            Command::allocate(q(0)),
            Command::allocate(q(1)),
            Command::gate(Gate::H, q(0)),
            Command::measure(q(0)),
            Command::measure(q(1)),
            Command::measure(q(0)),
        ] {
            translator.store(&cmd).unwrap();
        }
        let mapping = MappingTable::from_pairs([(q(0), 1), (q(1), 0)]);
        let program = translator.finalize(&mapping).unwrap().unwrap();
        assert_eq!(
            program.text(),
            "version 1.0\n# generated by test\nqubits 2\n\nh q[0]\nmeasure q[1]\nmeasure q[0]\nmeasure q[1]\n"
        );
        assert_eq!(program.measured(), &[q(0), q(1), q(0)]);
        assert_eq!(translator.cqasm(), Some(&program));
    }

    #[test]
    fn test_finalize_unresolved_measurement() {
        let mut translator = Translator::new();
        translator.store(&Command::allocate(q(0))).unwrap();
        translator.store(&Command::gate(Gate::X, q(0))).unwrap();
        translator.store(&Command::measure(q(0))).unwrap();
        let err = translator.finalize(&MappingTable::new()).unwrap_err();
        assert!(matches!(err, CqasmError::Ir(_)));
    }

    #[test]
    fn test_last_program_survives_reset() {
        let mut translator = Translator::new();
        translator.store(&Command::allocate(q(0))).unwrap();
        translator.store(&Command::gate(Gate::X, q(0))).unwrap();
        translator.finalize(&IdentityMapping).unwrap();
        translator.reset();
        assert!(translator.cqasm().is_some());
    }
}
