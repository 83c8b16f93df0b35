//! cQASM generation for precompiled circuits.
//!
//! Compiled circuits address physical register positions directly, so no
//! ledger or mapping is involved. Every declared qubit is measured in a
//! trailing `.measurement` block.

use std::f64::consts::FRAC_PI_2;

use qinspire_ir::{CompiledCircuit, Operation};
use tracing::info;

use crate::error::{CqasmError, CqasmResult};
use crate::format::format_general;
use crate::program::VERSION_LINE;

/// Generator comment of batch programs.
pub const BATCH_GENERATOR_LINE: &str = "# cqasm generated by QI backend";

const ANGLE_DIGITS: usize = 12;

/// Render a compiled circuit as a cQASM program.
pub fn emit_compiled(circuit: &CompiledCircuit) -> CqasmResult<String> {
    let size = circuit.number_of_qubits();
    info!(qubits = size, "generating cQASM for compiled circuit");

    let mut emitter = BatchEmitter::new(size);
    emitter.writeln(VERSION_LINE);
    emitter.writeln(BATCH_GENERATOR_LINE);
    emitter.writeln(&format!("qubits {size}"));

    for op in &circuit.operations {
        emitter.emit_operation(op)?;
    }

    emitter.writeln(".measurement");
    for index in 0..size {
        emitter.writeln(&format!("   measure q[{index}]"));
    }
    Ok(emitter.output)
}

/// Line buffer for one compiled circuit.
struct BatchEmitter {
    output: String,
    size: u32,
}

impl BatchEmitter {
    fn new(size: u32) -> Self {
        Self {
            output: String::new(),
            size,
        }
    }

    fn emit_operation(&mut self, op: &Operation) -> CqasmResult<()> {
        let name = op.name.to_lowercase();
        match name.as_str() {
            "x" | "y" | "z" | "h" | "s" | "t" | "sdg" | "tdg" | "id" => {
                let [q] = qubits(op, self.size)?;
                self.writeln(&format!("{} q[{q}]", one_qubit_mnemonic(&name)));
            }
            "cx" | "cz" | "swap" => {
                let [a, b] = qubits(op, self.size)?;
                let mnemonic = match name.as_str() {
                    "cx" => "CNOT",
                    "cz" => "CZ",
                    _ => "SWAP",
                };
                self.writeln(&format!("{mnemonic} q[{a}], q[{b}]"));
            }
            "ccx" => {
                let [c1, c2, t] = qubits(op, self.size)?;
                self.writeln(&format!("Toffoli q[{c1}], q[{c2}], q[{t}]"));
            }
            "rx" | "ry" | "rz" => {
                let [q] = qubits(op, self.size)?;
                let [theta] = params(op)?;
                let axis = &name[1..];
                self.rotation(&format!("R{axis}"), q, theta);
            }
            "u1" => {
                let [q] = qubits(op, self.size)?;
                let [lambda] = params(op)?;
                self.rotation("Rz", q, lambda);
            }
            "u2" => {
                let [q] = qubits(op, self.size)?;
                let [phi, lambda] = params(op)?;
                self.u3(q, FRAC_PI_2, phi, lambda);
            }
            "u3" => {
                let [q] = qubits(op, self.size)?;
                let [theta, phi, lambda] = params(op)?;
                self.u3(q, theta, phi, lambda);
            }
            "barrier" => {
                let list: Vec<String> = op.qubits.iter().map(|q| format!("q[{q}]")).collect();
                self.writeln(&format!("# barrier gate {};", list.join(", ")));
            }
            "measure" | "snapshot" => {}
            _ => {
                return Err(CqasmError::unsupported(
                    &op.name,
                    "no cQASM encoding for this operation",
                ));
            }
        }
        Ok(())
    }

    fn rotation(&mut self, mnemonic: &str, qubit: u32, angle: f64) {
        let angle = format_general(angle, ANGLE_DIGITS);
        self.writeln(&format!("{mnemonic} q[{qubit}], {angle}"));
    }

    /// `u3(θ, φ, λ) = Rz(φ) Ry(θ) Rz(λ)`, applied right to left.
    fn u3(&mut self, qubit: u32, theta: f64, phi: f64, lambda: f64) {
        self.rotation("Rz", qubit, lambda);
        self.rotation("Ry", qubit, theta);
        self.rotation("Rz", qubit, phi);
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn one_qubit_mnemonic(name: &str) -> &'static str {
    match name {
        "x" => "X",
        "y" => "Y",
        "z" => "Z",
        "h" => "H",
        "s" => "S",
        "sdg" => "Sdag",
        "t" => "T",
        "tdg" => "Tdag",
        _ => "I",
    }
}

fn qubits<const N: usize>(op: &Operation, size: u32) -> CqasmResult<[u32; N]> {
    let indices: [u32; N] =
        op.qubits
            .as_slice()
            .try_into()
            .map_err(|_| CqasmError::WrongArity {
                name: op.name.clone(),
                what: "qubits",
                expected: N,
                got: op.qubits.len(),
            })?;
    if let Some(&index) = indices.iter().find(|&&q| q >= size) {
        return Err(CqasmError::QubitOutOfRange {
            name: op.name.clone(),
            index,
            size,
        });
    }
    Ok(indices)
}

fn params<const N: usize>(op: &Operation) -> CqasmResult<[f64; N]> {
    op.params
        .as_slice()
        .try_into()
        .map_err(|_| CqasmError::WrongArity {
            name: op.name.clone(),
            what: "parameters",
            expected: N,
            got: op.params.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit(n: u32, ops: Vec<Operation>) -> CompiledCircuit {
        CompiledCircuit::new(n, ops)
    }

    #[test]
    fn test_header_and_measurement_block() {
        let text = emit_compiled(&circuit(2, vec![Operation::new("h", [0])])).unwrap();
        assert_eq!(
            text,
            "version 1.0\n# cqasm generated by QI backend\nqubits 2\nH q[0]\n.measurement\n   measure q[0]\n   measure q[1]\n"
        );
    }

    #[test]
    fn test_formatting_table() {
        let ops = vec![
            Operation::new("x", [0]),
            Operation::new("sdg", [1]),
            Operation::new("tdg", [2]),
            Operation::new("id", [0]),
            Operation::new("CX", [0, 1]),
            Operation::new("cz", [1, 2]),
            Operation::new("swap", [0, 2]),
            Operation::new("ccx", [0, 1, 2]),
            Operation::new("ry", [1]).with_params([0.25]),
        ];
        let text = emit_compiled(&circuit(3, ops)).unwrap();
        for expected in [
            "X q[0]\n",
            "Sdag q[1]\n",
            "Tdag q[2]\n",
            "I q[0]\n",
            "CNOT q[0], q[1]\n",
            "CZ q[1], q[2]\n",
            "SWAP q[0], q[2]\n",
            "Toffoli q[0], q[1], q[2]\n",
            "Ry q[1], 0.25\n",
        ] {
            assert!(text.contains(expected), "missing {expected:?} in\n{text}");
        }
    }

    #[test]
    fn test_u_gates_expand_to_rotations() {
        let ops = vec![
            Operation::new("u1", [0]).with_params([0.5]),
            Operation::new("u3", [0]).with_params([1.0, 2.0, 3.0]),
        ];
        let text = emit_compiled(&circuit(1, ops)).unwrap();
        assert!(text.contains("Rz q[0], 0.5\nRz q[0], 3\nRy q[0], 1\nRz q[0], 2\n"));
    }

    #[test]
    fn test_u2_is_u3_with_half_pi() {
        let u2 = emit_compiled(&circuit(
            1,
            vec![Operation::new("u2", [0]).with_params([0.1, 0.2])],
        ))
        .unwrap();
        let u3 = emit_compiled(&circuit(
            1,
            vec![Operation::new("u3", [0]).with_params([FRAC_PI_2, 0.1, 0.2])],
        ))
        .unwrap();
        assert_eq!(u2, u3);
    }

    #[test]
    fn test_full_program_lines() {
        let ops = vec![
            Operation::new("h", [0]),
            Operation::new("cx", [0, 1]),
            Operation::new("u2", [1]).with_params([0.0, 0.5]),
            Operation::new("barrier", [0, 1]),
        ];
        let text = emit_compiled(&circuit(2, ops)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "version 1.0",
                "# cqasm generated by QI backend",
                "qubits 2",
                "H q[0]",
                "CNOT q[0], q[1]",
                "Rz q[1], 0.5",
                "Ry q[1], 1.57079632679",
                "Rz q[1], 0",
                "# barrier gate q[0], q[1];",
                ".measurement",
                "   measure q[0]",
                "   measure q[1]",
            ]
        );
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), lines.len());
    }

    #[test]
    fn test_measure_and_snapshot_emit_nothing() {
        let ops = vec![
            Operation::new("measure", [0]).with_clbits([0]),
            Operation::new("snapshot", [0]),
        ];
        let text = emit_compiled(&circuit(1, ops)).unwrap();
        assert_eq!(
            text,
            "version 1.0\n# cqasm generated by QI backend\nqubits 1\n.measurement\n   measure q[0]\n"
        );
    }

    #[test]
    fn test_barrier_comment() {
        let text = emit_compiled(&circuit(2, vec![Operation::new("barrier", [0, 1])])).unwrap();
        assert!(text.contains("# barrier gate q[0], q[1];\n"));
    }

    #[test]
    fn test_unknown_operation() {
        let err = emit_compiled(&circuit(1, vec![Operation::new("rxx", [0])])).unwrap_err();
        assert!(matches!(err, CqasmError::UnsupportedGate { .. }));
    }

    #[test]
    fn test_arity_errors() {
        let err = emit_compiled(&circuit(2, vec![Operation::new("cx", [0])])).unwrap_err();
        assert!(matches!(
            err,
            CqasmError::WrongArity { what: "qubits", expected: 2, got: 1, .. }
        ));
        let err = emit_compiled(&circuit(1, vec![Operation::new("u3", [0]).with_params([1.0])]))
            .unwrap_err();
        assert!(matches!(
            err,
            CqasmError::WrongArity { what: "parameters", expected: 3, got: 1, .. }
        ));
    }

    #[test]
    fn test_qubit_out_of_range() {
        let err = emit_compiled(&circuit(1, vec![Operation::new("h", [3])])).unwrap_err();
        assert!(matches!(
            err,
            CqasmError::QubitOutOfRange { index: 3, size: 1, .. }
        ));
    }
}
